//! # Sealmark
//!
//! Signed, tamper-evident watermarks hidden in the pixel data of an image.
//!
//! ## Overview
//!
//! A caller hands over a decoded RGBA pixel grid, a payload mapping and a
//! P-256 key pair. Sealmark signs the canonical form of the payload, bundles
//! payload + signature + public key into a JSON envelope and writes it into
//! the least-significant bits of the red, green and blue channels. Anyone
//! holding the pixels can later extract the envelope and check that it was
//! signed by the embedded key (or by one of a set of trusted keys).
//!
//! The payload is not confidential: the scheme only protects authenticity.
//! Any lossy re-encode, resize or single bit flip in the watermark region
//! makes verification fail.
//!
//! ## Usage
//!
//! ```rust
//! use sealmark::{KeyPair, PixelGrid, WatermarkPayload, WatermarkService};
//!
//! let keypair = KeyPair::generate();
//! let service = WatermarkService::default();
//!
//! let mut grid = PixelGrid::filled(400, 400, [220, 20, 20, 180]);
//! let payload = WatermarkPayload::for_content("Co", "2025-08-20", b"contract.pdf bytes");
//!
//! service.create_signed_watermark(&mut grid, &payload, &keypair).unwrap();
//!
//! let result = service.verify_watermark(&grid);
//! assert!(result.valid);
//! assert_eq!(result.payload, Some(payload));
//! ```
//!
//! ## Re-exports
//!
//! - `sealmark::core` - Keys, canonical encoding, bit and pixel codecs

pub mod config;
pub mod error;
pub mod service;
pub mod verdict;

// Re-export component crate
pub use sealmark_core as core;

// Re-export main types for convenience
pub use config::{WatermarkConfig, DEFAULT_MAX_ENVELOPE_BYTES};
pub use error::{Result, WatermarkError};
pub use service::{EmbedReport, WatermarkService};
pub use verdict::{Rejection, VerificationResult, REASON_VALID};

// Re-export commonly used core types
pub use sealmark_core::{
    canonicalize, CanonicalBytes, CoreError, KeyPair, PixelGrid, PublicKey, SignedEnvelope,
    WatermarkPayload,
};
