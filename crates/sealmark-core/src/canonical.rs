//! Canonical JSON encoding of watermark payloads.
//!
//! The signed message is the payload rendered with:
//! - Object keys sorted by code point (equivalently, UTF-8 byte order), recursively
//! - Item separator `", "` and key separator `": "`
//! - Non-ASCII characters emitted as raw UTF-8, control characters escaped
//! - Integers in decimal, floats in shortest round-trip form
//!
//! **CRITICAL**: Sign and verify both go through [`canonicalize`]. Changing
//! this encoding invalidates every existing watermark.

use serde_json::{Map, Value};

use crate::payload::WatermarkPayload;

const ITEM_SEPARATOR: &[u8] = b", ";
const KEY_SEPARATOR: &[u8] = b": ";

/// Canonical byte encoding of a payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume into the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Encode a payload to canonical bytes.
///
/// Deterministic regardless of the insertion order of the payload's keys.
pub fn canonicalize(payload: &WatermarkPayload) -> CanonicalBytes {
    let mut buf = Vec::new();
    encode_map(&mut buf, payload.as_map());
    CanonicalBytes(buf)
}

/// Encode an arbitrary JSON value canonically.
pub fn canonicalize_value(value: &Value) -> CanonicalBytes {
    let mut buf = Vec::new();
    encode_value(&mut buf, value);
    CanonicalBytes(buf)
}

/// Recursively encode a JSON value.
fn encode_value(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Array(items) => {
            buf.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.extend_from_slice(ITEM_SEPARATOR);
                }
                encode_value(buf, item);
            }
            buf.push(b']');
        }
        Value::Object(map) => encode_map(buf, map),
        // Scalars use serde_json's own rendering: JSON string escaping without
        // `\u` escapes for non-ASCII, and shortest round-trip numbers.
        leaf => buf.extend_from_slice(leaf.to_string().as_bytes()),
    }
}

/// Encode an object with its keys sorted.
fn encode_map(buf: &mut Vec<u8>, map: &Map<String, Value>) {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    buf.push(b'{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            buf.extend_from_slice(ITEM_SEPARATOR);
        }
        encode_value(buf, &Value::String(key.clone()));
        buf.extend_from_slice(KEY_SEPARATOR);
        encode_value(buf, value);
    }
    buf.push(b'}');
}
