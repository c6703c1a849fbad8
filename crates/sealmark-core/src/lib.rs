//! # Sealmark Core
//!
//! Pure primitives for Sealmark: signed payloads hidden in pixel data.
//!
//! This crate contains no I/O and no image codecs. It operates on an
//! in-memory RGBA [`PixelGrid`] supplied by the caller.
//!
//! ## Key Types
//!
//! - [`KeyPair`] / [`PublicKey`] - P-256 keys with PKCS8 / SPKI PEM export
//! - [`WatermarkPayload`] - The caller's key/value mapping
//! - [`SignedEnvelope`] - Payload + signature + signer key, the embedded unit
//! - [`PixelGrid`] - Row-major RGBA pixels, mutated in place
//!
//! ## Layers
//!
//! - [`canonical`] renders a payload to deterministic bytes
//! - [`signer`] signs and verifies those bytes (ECDSA P-256, SHA-256)
//! - [`bits`] turns bytes into an LSB-first bit stream
//! - [`pixels`] writes the bit stream into channel LSBs

pub mod bits;
pub mod canonical;
pub mod envelope;
pub mod error;
pub mod keys;
pub mod payload;
pub mod pixels;
pub mod signer;

pub use bits::BitStream;
pub use canonical::{canonicalize, CanonicalBytes};
pub use envelope::SignedEnvelope;
pub use error::{CoreError, Result};
pub use keys::{KeyPair, PublicKey};
pub use payload::WatermarkPayload;
pub use pixels::PixelGrid;
pub use signer::SignatureBytes;
