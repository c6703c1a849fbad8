//! The caller-supplied watermark payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::{CoreError, Result};

/// Well-known payload keys used by content attestation.
pub mod keys {
    pub const ISSUER: &str = "issuer";
    pub const TIMESTAMP: &str = "timestamp";
    pub const FILE_HASH: &str = "file_hash";
    pub const FILE_SIZE: &str = "file_size";
}

/// A mapping of string keys to JSON values carried inside a watermark.
///
/// Key order is irrelevant: signing always goes through the canonical form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WatermarkPayload(Map<String, Value>);

impl WatermarkPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build from any serializable value that renders as a JSON object.
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        match serde_json::to_value(value).map_err(|e| CoreError::Encoding(e.to_string()))? {
            Value::Object(map) => Ok(Self(map)),
            other => Err(CoreError::Encoding(format!(
                "payload must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Attestation payload for a piece of content.
    ///
    /// Records the issuer, a caller-formatted timestamp, the lowercase hex
    /// SHA-256 of the content, and its length in bytes.
    pub fn for_content(issuer: &str, timestamp: &str, content: &[u8]) -> Self {
        let mut payload = Self::new();
        payload.insert(keys::ISSUER, issuer);
        payload.insert(keys::TIMESTAMP, timestamp);
        payload.insert(keys::FILE_HASH, hex::encode(Sha256::digest(content)));
        payload.insert(keys::FILE_SIZE, content.len() as u64);
        payload
    }

    /// Insert a value, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Borrow the underlying map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume into the underlying map.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for WatermarkPayload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for WatermarkPayload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_for_content() {
        let payload = WatermarkPayload::for_content("Co", "2025-08-20", b"hello");
        assert_eq!(payload.get(keys::ISSUER), Some(&json!("Co")));
        assert_eq!(payload.get(keys::TIMESTAMP), Some(&json!("2025-08-20")));
        assert_eq!(
            payload.get(keys::FILE_HASH),
            Some(&json!(
                "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
            ))
        );
        assert_eq!(payload.get(keys::FILE_SIZE), Some(&json!(5)));
    }

    #[test]
    fn test_from_serializable_map() {
        let mut map = HashMap::new();
        map.insert("issuer", "Co");
        let payload = WatermarkPayload::from_serializable(&map).unwrap();
        assert_eq!(payload.len(), 1);
    }

    #[test]
    fn test_from_serializable_rejects_non_object() {
        let err = WatermarkPayload::from_serializable(&vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, CoreError::Encoding(_)));
    }

    #[test]
    fn test_non_finite_float_becomes_null() {
        let mut map = HashMap::new();
        map.insert("ratio", f64::NAN);
        let payload = WatermarkPayload::from_serializable(&map).unwrap();
        assert_eq!(payload.get("ratio"), Some(&Value::Null));
    }

    #[test]
    fn test_from_serializable_rejects_non_string_keys() {
        let mut map = HashMap::new();
        map.insert(vec![1u8], "x");
        let err = WatermarkPayload::from_serializable(&map).unwrap_err();
        assert!(matches!(err, CoreError::Encoding(_)));
    }

    #[test]
    fn test_transparent_serde() {
        let payload = WatermarkPayload::new().with("a", 1).with("b", true);
        let text = serde_json::to_string(&payload).unwrap();
        let back: WatermarkPayload = serde_json::from_str(&text).unwrap();
        assert_eq!(payload, back);
        assert!(text.starts_with('{'));
    }
}
