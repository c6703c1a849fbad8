//! Structured outcome of watermark verification.

use std::fmt;

use sealmark_core::{PublicKey, WatermarkPayload};

/// Reason reported for a watermark that verified.
pub const REASON_VALID: &str = "signature valid";

/// Why a watermark was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Length prefix absent, zero, or larger than the grid can hold.
    NoWatermark,
    /// Extracted bytes are not UTF-8 JSON of the envelope shape.
    CorruptData,
    /// Embedded public key does not parse.
    InvalidPublicKey,
    /// Signature does not verify over the canonical payload.
    SignatureInvalid,
    /// Signature verifies but the signer is not in the trusted set.
    UntrustedSigner,
}

impl Rejection {
    /// Human-readable reason string.
    pub const fn reason(&self) -> &'static str {
        match self {
            Rejection::NoWatermark => "no watermark / corrupt length",
            Rejection::CorruptData => "corrupt data",
            Rejection::InvalidPublicKey => "invalid public key",
            Rejection::SignatureInvalid => "signature invalid",
            Rejection::UntrustedSigner => "untrusted signer",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Result of verifying one pixel grid.
#[derive(Debug, Clone)]
pub struct VerificationResult {
    /// Whether the watermark is present, intact and signed by an accepted key.
    pub valid: bool,
    /// The signed payload, only set when `valid`.
    pub payload: Option<WatermarkPayload>,
    /// Human-readable outcome.
    pub reason: String,
    /// Machine-readable rejection, `None` when `valid`.
    pub rejection: Option<Rejection>,
    /// The key that signed the watermark, only set when `valid`.
    pub signer: Option<PublicKey>,
}

impl VerificationResult {
    pub(crate) fn accepted(payload: WatermarkPayload, signer: PublicKey) -> Self {
        Self {
            valid: true,
            payload: Some(payload),
            reason: REASON_VALID.to_string(),
            rejection: None,
            signer: Some(signer),
        }
    }

    pub(crate) fn rejected(rejection: Rejection) -> Self {
        Self {
            valid: false,
            payload: None,
            reason: rejection.reason().to_string(),
            rejection: Some(rejection),
            signer: None,
        }
    }
}
