//! The watermark service: sign, embed, extract, verify.
//!
//! Embedding builds a [`SignedEnvelope`], serializes it to JSON and writes it
//! into the grid's channel LSBs. Verification walks the same chain backwards
//! and reports every "this watermark looks wrong" outcome as data.

use sealmark_core::pixels::{self, PixelGrid};
use sealmark_core::{KeyPair, SignedEnvelope, WatermarkPayload};

use crate::config::WatermarkConfig;
use crate::error::{Result, WatermarkError};
use crate::verdict::{Rejection, VerificationResult};

/// Statistics about a completed embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedReport {
    /// Length of the serialized envelope in bytes.
    pub envelope_len: usize,
    /// Pixels touched, including the 32-pixel length prefix.
    pub pixels_used: u64,
    /// Payload bytes the grid could hold in total.
    pub capacity_bytes: u64,
}

/// Embeds and verifies signed watermarks.
///
/// Holds no mutable state; one instance can serve any number of grids,
/// from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct WatermarkService {
    config: WatermarkConfig,
}

impl WatermarkService {
    /// Create a service with the given configuration.
    pub fn new(config: WatermarkConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &WatermarkConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Embedding
    // ─────────────────────────────────────────────────────────────────────────

    /// Sign `payload` with `keypair` and embed the envelope into `grid`.
    ///
    /// On error the grid is left untouched.
    pub fn create_signed_watermark(
        &self,
        grid: &mut PixelGrid,
        payload: &WatermarkPayload,
        keypair: &KeyPair,
    ) -> Result<EmbedReport> {
        let envelope = SignedEnvelope::seal(payload.clone(), keypair)?;
        let bytes = envelope.to_bytes()?;

        if bytes.len() > self.config.max_envelope_bytes as usize {
            return Err(WatermarkError::EnvelopeTooLarge {
                len: bytes.len(),
                max: self.config.max_envelope_bytes,
            });
        }

        pixels::embed_bytes(grid, &bytes)?;

        let report = EmbedReport {
            envelope_len: bytes.len(),
            pixels_used: pixels::required_pixels(bytes.len()),
            capacity_bytes: pixels::capacity_bytes(grid.pixel_count()),
        };
        tracing::debug!(
            envelope_len = report.envelope_len,
            pixels_used = report.pixels_used,
            capacity_bytes = report.capacity_bytes,
            "embedded signed watermark"
        );
        Ok(report)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Verification
    // ─────────────────────────────────────────────────────────────────────────

    /// Extract and parse the envelope without checking its signature.
    pub fn extract_envelope(
        &self,
        grid: &PixelGrid,
    ) -> std::result::Result<SignedEnvelope, Rejection> {
        let declared = pixels::read_length(grid).map_err(|_| Rejection::NoWatermark)?;
        if declared == 0 || declared > self.config.max_envelope_bytes {
            tracing::debug!(declared, "length prefix out of range");
            return Err(Rejection::NoWatermark);
        }

        let bytes = pixels::extract(grid).map_err(|e| {
            tracing::debug!(declared, error = %e, "length prefix exceeds grid capacity");
            Rejection::NoWatermark
        })?;

        SignedEnvelope::from_bytes(&bytes).map_err(|e| {
            tracing::debug!(error = %e, "extracted bytes are not an envelope");
            Rejection::CorruptData
        })
    }

    /// Verify the watermark in `grid`.
    ///
    /// Never fails: absent, corrupt, tampered and untrusted watermarks all
    /// come back as `valid: false` with a reason.
    pub fn verify_watermark(&self, grid: &PixelGrid) -> VerificationResult {
        match self.check(grid) {
            Ok(result) => result,
            Err(rejection) => {
                match rejection {
                    Rejection::SignatureInvalid | Rejection::UntrustedSigner => {
                        tracing::warn!(reason = rejection.reason(), "watermark rejected")
                    }
                    _ => tracing::debug!(reason = rejection.reason(), "watermark rejected"),
                }
                VerificationResult::rejected(rejection)
            }
        }
    }

    /// Verify several grids, one result per grid.
    pub fn verify_many<'a, I>(&self, grids: I) -> Vec<VerificationResult>
    where
        I: IntoIterator<Item = &'a PixelGrid>,
    {
        grids
            .into_iter()
            .map(|grid| self.verify_watermark(grid))
            .collect()
    }

    fn check(&self, grid: &PixelGrid) -> std::result::Result<VerificationResult, Rejection> {
        let envelope = self.extract_envelope(grid)?;

        let signer = envelope.signer().map_err(|_| Rejection::InvalidPublicKey)?;

        if !envelope.verify_with(&signer) {
            return Err(Rejection::SignatureInvalid);
        }

        if !self.config.is_trusted(&signer) {
            return Err(Rejection::UntrustedSigner);
        }

        Ok(VerificationResult::accepted(envelope.payload, signer))
    }
}
