//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{Map, Value};

use sealmark::{KeyPair, PixelGrid, WatermarkPayload, WatermarkService};

use crate::fixtures::SEAL_RGBA;

/// Generate a random keypair.
///
/// Seeds that are not valid P-256 scalars are skipped.
pub fn keypair() -> impl Strategy<Value = KeyPair> {
    any::<[u8; 32]>().prop_filter_map("invalid scalar", |seed| {
        KeyPair::from_secret_bytes(&seed).ok()
    })
}

/// Generate a payload key, including non-ASCII ones.
pub fn payload_key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_]{1,12}".prop_map(String::from),
        "[a-zé日ß]{1,6}".prop_map(String::from),
    ]
}

/// Generate a leaf value: string, integer, bool or null.
pub fn leaf_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        "\\PC{0,16}".prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<u32>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        Just(Value::Null),
    ]
}

/// Generate a JSON value with bounded nesting.
pub fn json_value() -> impl Strategy<Value = Value> {
    leaf_value().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(payload_key(), inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

/// Generate a payload of up to `max_entries` top-level entries.
pub fn payload(max_entries: usize) -> impl Strategy<Value = WatermarkPayload> {
    prop::collection::btree_map(payload_key(), json_value(), 0..=max_entries)
        .prop_map(|entries| entries.into_iter().collect())
}

/// Generate the entries of a payload as a list, for insertion-order tests.
pub fn payload_entries(max_entries: usize) -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::btree_map(payload_key(), json_value(), 0..=max_entries)
        .prop_map(|entries| entries.into_iter().collect())
}

/// Parameters for generating a watermarked grid.
#[derive(Debug, Clone)]
pub struct WatermarkParams {
    pub keypair: KeyPair,
    pub payload: WatermarkPayload,
    pub width: u32,
    pub height: u32,
}

impl Arbitrary for WatermarkParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (keypair(), payload(4), 64u32..=160, 64u32..=160)
            .prop_map(|(keypair, payload, width, height)| WatermarkParams {
                keypair,
                payload,
                width,
                height,
            })
            .boxed()
    }
}

/// Generate a seal-colored grid and embed the params' payload into it.
///
/// The grid is grown until the envelope fits.
pub fn grid_from_params(params: &WatermarkParams) -> (PixelGrid, WatermarkPayload) {
    let service = WatermarkService::default();
    let mut height = params.height;
    loop {
        let mut grid = PixelGrid::filled(params.width, height, SEAL_RGBA);
        match service.create_signed_watermark(&mut grid, &params.payload, &params.keypair) {
            Ok(_) => return (grid, params.payload.clone()),
            Err(e) if e.is_capacity() => height *= 2,
            Err(e) => panic!("embedding failed: {}", e),
        }
    }
}
