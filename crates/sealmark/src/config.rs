//! Configuration for the watermark service.

use sealmark_core::PublicKey;

/// Largest envelope accepted by default, in bytes.
pub const DEFAULT_MAX_ENVELOPE_BYTES: u32 = 10_000;

/// Configuration for [`crate::WatermarkService`].
#[derive(Debug, Clone)]
pub struct WatermarkConfig {
    /// Upper bound on the envelope length, enforced on embed and on the
    /// declared length prefix during verification.
    pub max_envelope_bytes: u32,
    /// Signers whose watermarks are accepted. Empty means any signer whose
    /// signature verifies against its own embedded key.
    pub trusted_keys: Vec<PublicKey>,
}

impl WatermarkConfig {
    /// Set the envelope length bound.
    pub fn with_max_envelope_bytes(mut self, max: u32) -> Self {
        self.max_envelope_bytes = max;
        self
    }

    /// Add a trusted signer.
    pub fn with_trusted_key(mut self, key: PublicKey) -> Self {
        self.trusted_keys.push(key);
        self
    }

    /// Whether `key` passes the signer allow-list.
    pub fn is_trusted(&self, key: &PublicKey) -> bool {
        self.trusted_keys.is_empty() || self.trusted_keys.contains(key)
    }
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            max_envelope_bytes: DEFAULT_MAX_ENVELOPE_BYTES,
            trusted_keys: Vec::new(),
        }
    }
}
