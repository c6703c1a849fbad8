//! Keygen command - create a signing key pair

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sealmark::KeyPair;

pub const PRIVATE_KEY_FILE: &str = "private_key.pem";
pub const PUBLIC_KEY_FILE: &str = "public_key.pem";

/// Generate a key pair and write both PEM files into `out_dir`.
pub fn run(out_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let keypair = KeyPair::generate();
    let private_path = out_dir.join(PRIVATE_KEY_FILE);
    let public_path = out_dir.join(PUBLIC_KEY_FILE);

    std::fs::write(&private_path, keypair.to_pkcs8_pem()?)
        .with_context(|| format!("writing {}", private_path.display()))?;
    std::fs::write(&public_path, keypair.public_key_pem()?)
        .with_context(|| format!("writing {}", public_path.display()))?;

    tracing::info!(path = %private_path.display(), "wrote private key");
    println!("Private key: {}", private_path.display());
    println!("Public key:  {}", public_path.display());
    println!("Fingerprint: {}", keypair.public_key().fingerprint()?);

    Ok((private_path, public_path))
}

/// Load a private key PEM file.
pub fn load_keypair(path: &Path) -> Result<KeyPair> {
    let pem = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    KeyPair::from_pem(&pem).with_context(|| format!("decoding private key {}", path.display()))
}
