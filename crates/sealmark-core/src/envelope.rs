//! The signed envelope embedded into pixel data.
//!
//! Wire form is UTF-8 JSON:
//! `{"data": <payload>, "signature": <base64 DER>, "public_key": <SPKI PEM>}`

use serde::{Deserialize, Serialize};

use crate::canonical::canonicalize;
use crate::error::{CoreError, Result};
use crate::keys::{KeyPair, PublicKey};
use crate::payload::WatermarkPayload;
use crate::signer::{self, SignatureBytes};

/// Payload plus the signature over its canonical form and the signer's key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedEnvelope {
    /// The signed payload.
    #[serde(rename = "data")]
    pub payload: WatermarkPayload,

    /// Base64 of the DER signature over `canonicalize(payload)`.
    pub signature: String,

    /// SubjectPublicKeyInfo PEM of the signing key.
    pub public_key: String,
}

impl SignedEnvelope {
    /// Sign a payload and bundle it with the signer's public key.
    pub fn seal(payload: WatermarkPayload, keypair: &KeyPair) -> Result<Self> {
        let message = canonicalize(&payload);
        let signature = signer::sign(keypair, &message)?;

        Ok(Self {
            payload,
            signature: signature.to_base64(),
            public_key: keypair.public_key_pem()?,
        })
    }

    /// Serialize to JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| CoreError::Encoding(e.to_string()))
    }

    /// Parse from extracted bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| CoreError::CorruptWatermark(format!("not utf-8: {}", e)))?;
        serde_json::from_str(text).map_err(|e| CoreError::CorruptWatermark(e.to_string()))
    }

    /// Parse the embedded public key.
    pub fn signer(&self) -> Result<PublicKey> {
        PublicKey::from_pem(&self.public_key)
    }

    /// Check the signature against a given key.
    ///
    /// Undecodable signatures yield `false`.
    pub fn verify_with(&self, public_key: &PublicKey) -> bool {
        match SignatureBytes::from_base64(&self.signature) {
            Ok(signature) => signer::verify(public_key, &canonicalize(&self.payload), &signature),
            Err(_) => false,
        }
    }

    /// Check the signature against the embedded key.
    pub fn verify(&self) -> Result<PublicKey> {
        let public_key = self.signer()?;
        if self.verify_with(&public_key) {
            Ok(public_key)
        } else {
            Err(CoreError::SignatureMismatch)
        }
    }
}
