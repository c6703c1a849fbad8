//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the canonical payload encoding and the pixel layout.
//! Signatures are randomized, so only the signed message is pinned; any
//! implementation that reproduces these bytes verifies the same watermarks.

use serde_json::Value;

use sealmark::core::pixels;
use sealmark::{canonicalize, PixelGrid, WatermarkPayload};

/// A golden canonical-encoding vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Payload as JSON text, keys deliberately out of order.
    pub payload_json: &'static str,
    /// Expected canonical bytes, as UTF-8 text.
    pub expected_canonical: &'static str,
}

impl GoldenVector {
    /// Parse the vector's payload.
    pub fn payload(&self) -> WatermarkPayload {
        let value: Value = serde_json::from_str(self.payload_json).expect("vector JSON is valid");
        WatermarkPayload::from_serializable(&value).expect("vector JSON is an object")
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "Issuer and timestamp",
            payload_json: r#"{"timestamp":"2025-08-20","issuer":"Co"}"#,
            expected_canonical: r#"{"issuer": "Co", "timestamp": "2025-08-20"}"#,
        },
        GoldenVector {
            name: "Document payload",
            payload_json: r#"{"file_size":1234,"file_hash":"2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824","timestamp":"2025-08-20","issuer":"Co"}"#,
            expected_canonical: r#"{"file_hash": "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824", "file_size": 1234, "issuer": "Co", "timestamp": "2025-08-20"}"#,
        },
        GoldenVector {
            name: "Nested values",
            payload_json: r#"{"b":[1,{"z":true,"a":null}],"a":{"y":1.5,"x":"é"}}"#,
            expected_canonical: r#"{"a": {"x": "é", "y": 1.5}, "b": [1, {"a": null, "z": true}]}"#,
        },
        GoldenVector {
            name: "Escaped string",
            payload_json: r#"{"note":"line\nbreak \"quoted\""}"#,
            expected_canonical: r#"{"note": "line\nbreak \"quoted\""}"#,
        },
        GoldenVector {
            name: "Empty payload",
            payload_json: "{}",
            expected_canonical: "{}",
        },
    ]
}

/// Check every golden vector against [`canonicalize`].
///
/// Returns `(name, matches, actual)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let actual = String::from_utf8_lossy(canonicalize(&v.payload()).as_bytes()).into_owned();
            let matches = actual == v.expected_canonical;
            (v.name.to_string(), matches, actual)
        })
        .collect()
}

/// Channel LSBs expected after embedding the single byte `b"A"` (0x41).
///
/// One entry per pixel: `[r, g, b]` low bits. Pixel 0 carries the length
/// prefix bit (length 1); pixels 32..35 carry `1000_0010` in LSB-first order.
pub const LAYOUT_VECTOR: [(usize, [u8; 3]); 5] = [
    (0, [1, 0, 0]),
    (1, [0, 0, 0]),
    (32, [1, 0, 0]),
    (33, [0, 0, 0]),
    (34, [1, 0, 0]),
];

/// Embed `b"A"` into a blank 6x6 grid and compare its LSBs with
/// [`LAYOUT_VECTOR`].
pub fn verify_layout_vector() -> bool {
    let mut grid = PixelGrid::new(6, 6);
    if pixels::embed_bytes(&mut grid, b"A").is_err() {
        return false;
    }

    LAYOUT_VECTOR.iter().all(|&(index, expected)| {
        grid.pixel(index)
            .map(|rgba| [rgba[0] & 1, rgba[1] & 1, rgba[2] & 1] == expected)
            .unwrap_or(false)
    })
}
