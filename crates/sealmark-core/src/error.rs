//! Error types for Sealmark Core.

use thiserror::Error;

/// Errors that can occur while signing, encoding or decoding a watermark.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Key bytes are not a parseable P-256 private key.
    #[error("key decode error: {0}")]
    KeyDecode(String),

    /// Embedded or supplied public key is not a valid P-256 SPKI key.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Payload cannot be represented as JSON.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The signer refused to produce a signature.
    #[error("signing error: {0}")]
    Signing(String),

    /// The pixel grid cannot hold (or does not hold) the declared bit length.
    #[error("capacity error: {required_pixels} pixels required, {available_pixels} available")]
    Capacity {
        required_pixels: u64,
        available_pixels: u64,
    },

    /// Fewer bits were supplied than the requested byte count needs.
    #[error("truncated data: expected {expected_bits} bits, got {actual_bits}")]
    TruncatedData {
        expected_bits: usize,
        actual_bits: usize,
    },

    /// Extracted bytes are not valid UTF-8 JSON of the envelope shape.
    #[error("corrupt watermark: {0}")]
    CorruptWatermark(String),

    /// Structurally valid envelope whose signature does not verify.
    #[error("signature mismatch")]
    SignatureMismatch,

    /// Raw buffer does not describe a `width x height` RGBA grid.
    #[error("invalid pixel format: {width}x{height} RGBA needs {expected} bytes, got {actual}")]
    InvalidPixelFormat {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
