//! Error types for the watermark service.

use sealmark_core::CoreError;
use thiserror::Error;

/// Errors that can occur while embedding a watermark.
///
/// Verification never returns these: a bad watermark is reported through
/// [`crate::VerificationResult`].
#[derive(Debug, Error)]
pub enum WatermarkError {
    /// Key, encoding, capacity or pixel-format error from the codec.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Serialized envelope is longer than the configured bound.
    #[error("envelope of {len} bytes exceeds the configured maximum of {max}")]
    EnvelopeTooLarge { len: usize, max: u32 },
}

impl WatermarkError {
    /// Whether the grid was too small for the envelope.
    pub fn is_capacity(&self) -> bool {
        matches!(self, WatermarkError::Core(CoreError::Capacity { .. }))
    }
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, WatermarkError>;
