//! Verify command - check the watermark in a raw RGBA file

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::json;

use sealmark::{PublicKey, VerificationResult, WatermarkConfig, WatermarkService};

use super::read_grid;

/// Load trusted signer keys from PEM files.
pub fn load_trusted_keys(paths: &[PathBuf]) -> Result<Vec<PublicKey>> {
    paths
        .iter()
        .map(|path| {
            let pem = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            PublicKey::from_pem_bytes(&pem)
                .with_context(|| format!("decoding public key {}", path.display()))
        })
        .collect()
}

/// Verify `input` and print the result. Returns whether it was valid.
pub fn run(
    input: &Path,
    width: u32,
    trusted_key_paths: &[PathBuf],
    as_json: bool,
    max_envelope_bytes: u32,
) -> Result<bool> {
    let mut config = WatermarkConfig::default().with_max_envelope_bytes(max_envelope_bytes);
    for key in load_trusted_keys(trusted_key_paths)? {
        config = config.with_trusted_key(key);
    }

    let grid = read_grid(input, width)?;
    let result = WatermarkService::new(config).verify_watermark(&grid);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&to_json(&result))?);
    } else {
        print_human(&result);
    }
    Ok(result.valid)
}

/// JSON rendering of a verification result.
pub fn to_json(result: &VerificationResult) -> serde_json::Value {
    json!({
        "valid": result.valid,
        "reason": result.reason,
        "payload": result.payload,
        "signer_fingerprint": result.signer.as_ref().and_then(|s| s.fingerprint().ok()),
    })
}

fn print_human(result: &VerificationResult) {
    if result.valid {
        println!("VALID: {}", result.reason);
    } else {
        println!("INVALID: {}", result.reason);
    }

    if let Some(signer) = &result.signer {
        if let Ok(fingerprint) = signer.fingerprint() {
            println!("Signer: {}", fingerprint);
        }
    }
    if let Some(payload) = &result.payload {
        for (key, value) in payload.iter() {
            println!("  {}: {}", key, value);
        }
    }
}
