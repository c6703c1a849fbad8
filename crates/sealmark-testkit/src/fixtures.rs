//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sealmark::{KeyPair, PixelGrid, PublicKey, WatermarkPayload, WatermarkService};

/// Translucent red, the color of a rendered seal image.
pub const SEAL_RGBA: [u8; 4] = [220, 20, 20, 180];

/// A test fixture with a keypair and a default-configured service.
pub struct TestFixture {
    pub keypair: KeyPair,
    pub service: WatermarkService,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: KeyPair::generate(),
            service: WatermarkService::default(),
        }
    }

    /// Create with a deterministic keypair from a secret scalar.
    ///
    /// Panics if `seed` is zero or not below the P-256 group order.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: KeyPair::from_secret_bytes(&seed).expect("seed is a valid P-256 scalar"),
            service: WatermarkService::default(),
        }
    }

    /// Get the keypair's public key.
    pub fn public_key(&self) -> &PublicKey {
        self.keypair.public_key()
    }

    /// The issuer/timestamp/file_hash/file_size payload for `content`.
    pub fn document_payload(&self, content: &[u8]) -> WatermarkPayload {
        WatermarkPayload::for_content("Co", "2025-08-20", content)
    }

    /// Sign and embed `payload` into `grid`.
    pub fn seal(&self, grid: &mut PixelGrid, payload: &WatermarkPayload) {
        self.service
            .create_signed_watermark(grid, payload, &self.keypair)
            .expect("grid has room for the envelope");
    }

    /// A seal-colored grid carrying a document watermark.
    pub fn sealed_grid(&self, width: u32, height: u32) -> (PixelGrid, WatermarkPayload) {
        let mut grid = PixelGrid::filled(width, height, SEAL_RGBA);
        let payload = self.document_payload(b"contract.pdf contents");
        self.seal(&mut grid, &payload);
        (grid, payload)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[31] = (i as u8).wrapping_add(1);
            seed[0] = 0x01;
            TestFixture::with_seed(seed)
        })
        .collect()
}

/// A grid of random pixels from a fixed seed.
pub fn noise_grid(width: u32, height: u32, seed: u64) -> PixelGrid {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; width as usize * height as usize * 4];
    rng.fill(&mut data[..]);
    PixelGrid::from_rgba(width, height, data).expect("buffer sized for the grid")
}
