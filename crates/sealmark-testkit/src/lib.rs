//! # Sealmark Testkit
//!
//! Testing utilities for Sealmark.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known payloads with their exact canonical bytes, plus
//!   a pixel-level layout vector
//! - **Generators**: Proptest strategies for payloads, keys and grids
//! - **Fixtures**: Seeded keys and grids for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! Golden vectors pin the canonical encoding that every signature depends on:
//!
//! ```rust
//! use sealmark_testkit::vectors::verify_all_vectors;
//!
//! for (name, ok, actual) in verify_all_vectors() {
//!     assert!(ok, "{}: {}", name, actual);
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use sealmark_testkit::generators::{grid_from_params, WatermarkParams};
//!
//! proptest! {
//!     #[test]
//!     fn embedded_watermark_verifies(params: WatermarkParams) {
//!         let (grid, payload) = grid_from_params(&params);
//!         prop_assert!(sealmark::WatermarkService::default().verify_watermark(&grid).valid);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust
//! use sealmark_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let (grid, _) = fixture.sealed_grid(400, 400);
//! assert!(fixture.service.verify_watermark(&grid).valid);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, noise_grid, TestFixture, SEAL_RGBA};
pub use generators::{grid_from_params, WatermarkParams};
pub use vectors::{all_vectors, verify_all_vectors, verify_layout_vector, GoldenVector};
