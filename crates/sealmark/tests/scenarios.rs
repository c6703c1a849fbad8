//! End-to-end watermark scenarios.
//!
//! Every scenario runs the full path: payload -> canonical bytes -> signature
//! -> envelope -> pixel LSBs -> extraction -> verification.

use sealmark::core::pixels::{self, PixelGrid};
use sealmark::{
    KeyPair, Rejection, SignedEnvelope, WatermarkConfig, WatermarkPayload, WatermarkService,
    REASON_VALID,
};
use sealmark_testkit::{multi_party_fixtures, noise_grid, TestFixture, SEAL_RGBA};

const FILE_HASH: &str = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("sealmark=debug")
        .with_test_writer()
        .try_init();
}

fn document_payload() -> WatermarkPayload {
    WatermarkPayload::new()
        .with("issuer", "Co")
        .with("timestamp", "2025-08-20")
        .with("file_hash", FILE_HASH)
        .with("file_size", 1234)
}

/// Flip the LSB that carries data bit `bit_index`.
fn flip_data_bit(grid: &mut PixelGrid, bit_index: usize) {
    let pixel = pixels::LENGTH_PIXELS + bit_index / pixels::DATA_BITS_PER_PIXEL;
    let channel = bit_index % pixels::DATA_BITS_PER_PIXEL;
    let mut rgba = grid.pixel(pixel).unwrap();
    rgba[channel] ^= 1;
    assert!(grid.set_pixel(pixel, rgba));
}

// ─────────────────────────────────────────────────────────────────────────────
// Seal image scenario
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn seal_image_roundtrip() {
    init_tracing();
    let keypair = KeyPair::generate();
    let service = WatermarkService::default();
    let mut grid = PixelGrid::filled(400, 400, SEAL_RGBA);

    let report = service
        .create_signed_watermark(&mut grid, &document_payload(), &keypair)
        .unwrap();
    assert_eq!(report.capacity_bytes, 59_988);
    assert!(report.pixels_used <= 160_000);

    let result = service.verify_watermark(&grid);
    assert!(result.valid);
    assert_eq!(result.reason, REASON_VALID);
    assert_eq!(result.payload, Some(document_payload()));
    assert_eq!(result.signer.as_ref(), Some(keypair.public_key()));
}

#[test]
fn seal_image_tamper_green_channel() {
    init_tracing();
    let fixture = TestFixture::new();
    let mut grid = PixelGrid::filled(400, 400, SEAL_RGBA);
    fixture.seal(&mut grid, &document_payload());

    let mut rgba = grid.pixel(50).unwrap();
    rgba[1] = 0xFF;
    grid.set_pixel(50, rgba);

    let result = fixture.service.verify_watermark(&grid);
    assert!(!result.valid);
    assert!(result.payload.is_none());
    assert!(matches!(
        result.rejection,
        Some(Rejection::CorruptData) | Some(Rejection::SignatureInvalid)
    ));
}

#[test]
fn embedding_only_touches_low_bits() {
    let fixture = TestFixture::new();
    let original = noise_grid(120, 120, 2025);
    let mut grid = original.clone();
    fixture.seal(&mut grid, &document_payload());

    for index in 0..grid.pixel_count() {
        let before = original.pixel(index).unwrap();
        let after = grid.pixel(index).unwrap();
        for channel in 0..3 {
            assert_eq!(before[channel] & 0xFE, after[channel] & 0xFE, "pixel {}", index);
        }
        assert_eq!(before[3], after[3], "alpha changed at pixel {}", index);
    }

    assert!(fixture.service.verify_watermark(&grid).valid);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tampering
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn flipped_hash_character_breaks_signature() {
    let fixture = TestFixture::new();
    let mut grid = PixelGrid::filled(200, 200, SEAL_RGBA);
    fixture.seal(&mut grid, &document_payload());

    let bytes = pixels::extract(&grid).unwrap();
    let offset = bytes
        .windows(FILE_HASH.len())
        .position(|w| w == FILE_HASH.as_bytes())
        .unwrap();
    flip_data_bit(&mut grid, offset * 8);

    let result = fixture.service.verify_watermark(&grid);
    assert_eq!(result.rejection, Some(Rejection::SignatureInvalid));
}

#[test]
fn any_flipped_envelope_bit_is_rejected() {
    let fixture = TestFixture::new();
    let mut sealed = PixelGrid::filled(200, 200, SEAL_RGBA);
    fixture.seal(&mut sealed, &document_payload());
    let envelope_bits = pixels::extract(&sealed).unwrap().len() * 8;

    for bit_index in (0..envelope_bits).step_by(97) {
        let mut grid = sealed.clone();
        flip_data_bit(&mut grid, bit_index);

        let result = fixture.service.verify_watermark(&grid);
        assert!(!result.valid, "flip at bit {} went unnoticed", bit_index);
    }
}

#[test]
fn bits_past_the_envelope_are_ignored() {
    let fixture = TestFixture::new();
    let mut grid = PixelGrid::filled(200, 200, SEAL_RGBA);
    fixture.seal(&mut grid, &document_payload());
    let envelope_bits = pixels::extract(&grid).unwrap().len() * 8;

    // Round up to the next pixel boundary so no shared pixel is touched.
    let first_free = envelope_bits.div_ceil(3) * 3;
    flip_data_bit(&mut grid, first_free);
    flip_data_bit(&mut grid, first_free + 100);

    assert!(fixture.service.verify_watermark(&grid).valid);
}

#[test]
fn corrupted_length_prefix_is_no_watermark() {
    let fixture = TestFixture::new();
    let mut grid = PixelGrid::filled(200, 200, SEAL_RGBA);
    fixture.seal(&mut grid, &document_payload());

    // Bit 31 of the length lives in pixel 31's red LSB.
    let mut rgba = grid.pixel(31).unwrap();
    rgba[0] |= 1;
    grid.set_pixel(31, rgba);

    let result = fixture.service.verify_watermark(&grid);
    assert_eq!(result.rejection, Some(Rejection::NoWatermark));
    assert_eq!(result.reason, "no watermark / corrupt length");
}

#[test]
fn swapped_public_key_is_rejected() {
    let parties = multi_party_fixtures(2);
    let mut envelope = SignedEnvelope::seal(document_payload(), &parties[0].keypair).unwrap();
    envelope.public_key = parties[1].keypair.public_key_pem().unwrap();

    let mut grid = PixelGrid::new(200, 200);
    pixels::embed_bytes(&mut grid, &envelope.to_bytes().unwrap()).unwrap();

    let result = WatermarkService::default().verify_watermark(&grid);
    assert_eq!(result.rejection, Some(Rejection::SignatureInvalid));
}

// ─────────────────────────────────────────────────────────────────────────────
// Capacity
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn capacity_boundary_on_seal_image() {
    let mut grid = PixelGrid::filled(400, 400, SEAL_RGBA);
    pixels::embed_bytes(&mut grid, &vec![0x5A; 59_988]).unwrap();
    assert_eq!(pixels::extract(&grid).unwrap().len(), 59_988);

    let mut grid = PixelGrid::filled(400, 400, SEAL_RGBA);
    let original = grid.clone();
    assert!(pixels::embed_bytes(&mut grid, &vec![0x5A; 59_989]).is_err());
    assert_eq!(grid, original);
}

#[test]
fn envelope_fits_exactly_required_pixels() {
    let fixture = TestFixture::new();
    let mut source = PixelGrid::filled(200, 200, SEAL_RGBA);
    fixture.seal(&mut source, &document_payload());
    let envelope = pixels::extract(&source).unwrap();
    let required = pixels::required_pixels(envelope.len()) as u32;

    let mut exact = PixelGrid::filled(1, required, SEAL_RGBA);
    pixels::embed_bytes(&mut exact, &envelope).unwrap();
    assert!(fixture.service.verify_watermark(&exact).valid);

    let mut short = PixelGrid::filled(1, required - 1, SEAL_RGBA);
    let original = short.clone();
    assert!(pixels::embed_bytes(&mut short, &envelope).is_err());
    assert_eq!(short, original);
}

#[test]
fn service_rejects_small_grid_without_writing() {
    let fixture = TestFixture::new();
    let mut grid = PixelGrid::filled(20, 20, SEAL_RGBA);
    let original = grid.clone();

    let err = fixture
        .service
        .create_signed_watermark(&mut grid, &document_payload(), &fixture.keypair)
        .unwrap_err();
    assert!(err.is_capacity());
    assert_eq!(grid, original);
}

// ─────────────────────────────────────────────────────────────────────────────
// Trust and batches
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn trusted_signers_only() {
    let parties = multi_party_fixtures(3);
    let mut grids = Vec::new();
    for party in &parties {
        let mut grid = PixelGrid::filled(120, 120, SEAL_RGBA);
        party.seal(&mut grid, &document_payload());
        grids.push(grid);
    }

    let config = WatermarkConfig::default()
        .with_trusted_key(parties[0].public_key().clone())
        .with_trusted_key(parties[2].public_key().clone());
    let service = WatermarkService::new(config);

    let results = service.verify_many(&grids);
    assert!(results[0].valid);
    assert_eq!(results[1].rejection, Some(Rejection::UntrustedSigner));
    assert_eq!(results[1].reason, "untrusted signer");
    assert!(results[2].valid);
}

#[test]
fn key_order_does_not_matter() {
    let fixture = TestFixture::new();
    let reordered = WatermarkPayload::new()
        .with("file_size", 1234)
        .with("file_hash", FILE_HASH)
        .with("timestamp", "2025-08-20")
        .with("issuer", "Co");

    // Sign one ordering, then swap in the other before embedding.
    let mut envelope = SignedEnvelope::seal(document_payload(), &fixture.keypair).unwrap();
    envelope.payload = reordered;

    let mut grid = PixelGrid::filled(200, 200, SEAL_RGBA);
    pixels::embed_bytes(&mut grid, &envelope.to_bytes().unwrap()).unwrap();

    assert!(fixture.service.verify_watermark(&grid).valid);
}

#[test]
fn reloaded_key_verifies_same_watermarks() {
    let fixture = TestFixture::new();
    let reloaded = KeyPair::from_pem(fixture.keypair.to_pkcs8_pem().unwrap().as_bytes()).unwrap();
    assert_eq!(reloaded.public_key(), fixture.public_key());

    let mut grid = PixelGrid::filled(120, 120, SEAL_RGBA);
    fixture
        .service
        .create_signed_watermark(&mut grid, &document_payload(), &reloaded)
        .unwrap();

    let config = WatermarkConfig::default().with_trusted_key(fixture.public_key().clone());
    assert!(WatermarkService::new(config).verify_watermark(&grid).valid);
}
