//! ECDSA P-256 / SHA-256 signatures over canonical payload bytes.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::Signature;
use std::fmt;

use crate::canonical::CanonicalBytes;
use crate::error::{CoreError, Result};
use crate::keys::{KeyPair, PublicKey};

/// An ASN.1 DER encoded ECDSA signature.
#[derive(Clone, PartialEq, Eq)]
pub struct SignatureBytes(Vec<u8>);

impl SignatureBytes {
    /// Wrap raw signature bytes (DER or 64-byte `r || s`).
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Standard padded base64, the form stored in the envelope.
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.0)
    }

    /// Decode from standard padded base64.
    pub fn from_base64(s: &str) -> Result<Self> {
        BASE64
            .decode(s)
            .map(Self)
            .map_err(|e| CoreError::CorruptWatermark(format!("signature is not base64: {}", e)))
    }

    /// Parse as an ECDSA signature, accepting DER or fixed-width encodings.
    fn to_signature(&self) -> Option<Signature> {
        Signature::from_der(&self.0)
            .or_else(|_| Signature::from_slice(&self.0))
            .ok()
    }
}

impl fmt::Debug for SignatureBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex = hex::encode(&self.0);
        write!(f, "P256Sig({}...)", &hex[..hex.len().min(16)])
    }
}

impl AsRef<[u8]> for SignatureBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Sign canonical bytes with the key pair's private key.
///
/// The message is hashed with SHA-256 before signing.
pub fn sign(keypair: &KeyPair, message: &CanonicalBytes) -> Result<SignatureBytes> {
    let signature: Signature = keypair
        .signing_key()
        .try_sign(message.as_bytes())
        .map_err(|e| CoreError::Signing(e.to_string()))?;
    Ok(SignatureBytes(signature.to_der().as_bytes().to_vec()))
}

/// Verify a signature over canonical bytes.
///
/// Malformed or non-matching signatures yield `false`.
pub fn verify(public_key: &PublicKey, message: &CanonicalBytes, signature: &SignatureBytes) -> bool {
    match signature.to_signature() {
        Some(sig) => public_key
            .verifying_key()
            .verify(message.as_bytes(), &sig)
            .is_ok(),
        None => false,
    }
}

/// Verify against a PEM-encoded public key.
///
/// Fails only when the key itself cannot be parsed.
pub fn verify_pem(
    public_key_pem: &str,
    message: &CanonicalBytes,
    signature: &SignatureBytes,
) -> Result<bool> {
    let public_key = PublicKey::from_pem(public_key_pem)?;
    Ok(verify(&public_key, message, signature))
}
