//! Embed command - sign a payload into a raw RGBA file

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde_json::Value;

use sealmark::core::payload::keys;
use sealmark::{EmbedReport, WatermarkConfig, WatermarkPayload, WatermarkService};

use super::keygen::load_keypair;
use super::{read_grid, write_grid};

/// Arguments of `sealmark embed`.
#[derive(Debug, Clone)]
pub struct EmbedArgs {
    pub input: PathBuf,
    pub width: u32,
    pub key: PathBuf,
    pub output: PathBuf,
    pub issuer: Option<String>,
    pub timestamp: Option<String>,
    pub content: Option<PathBuf>,
    pub fields: Vec<(String, Value)>,
}

/// Parse a `key=value` field. The value is JSON if it parses, else a string.
pub fn parse_field(raw: &str) -> std::result::Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", raw));
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::from(value));
    Ok((key.to_string(), value))
}

/// Assemble the payload from the command-line options.
pub fn build_payload(args: &EmbedArgs) -> Result<WatermarkPayload> {
    let timestamp = match &args.timestamp {
        Some(ts) => ts.clone(),
        None => unix_now()?.to_string(),
    };

    let mut payload = match &args.content {
        Some(path) => {
            let content =
                std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            WatermarkPayload::for_content(
                args.issuer.as_deref().unwrap_or_default(),
                &timestamp,
                &content,
            )
        }
        None => {
            let mut payload = WatermarkPayload::new().with(keys::TIMESTAMP, timestamp);
            if let Some(issuer) = &args.issuer {
                payload.insert(keys::ISSUER, issuer.as_str());
            }
            payload
        }
    };

    for (key, value) in &args.fields {
        payload.insert(key.as_str(), value.clone());
    }
    Ok(payload)
}

pub fn run(args: &EmbedArgs, max_envelope_bytes: u32) -> Result<EmbedReport> {
    let keypair = load_keypair(&args.key)?;
    let payload = build_payload(args)?;
    let mut grid = read_grid(&args.input, args.width)?;

    let service =
        WatermarkService::new(WatermarkConfig::default().with_max_envelope_bytes(max_envelope_bytes));
    let report = service
        .create_signed_watermark(&mut grid, &payload, &keypair)
        .with_context(|| format!("embedding into {}", args.input.display()))?;

    write_grid(&args.output, &grid)?;

    println!("Watermarked {} -> {}", args.input.display(), args.output.display());
    println!(
        "Envelope: {} bytes, {} pixels used, capacity {} bytes",
        report.envelope_len, report.pixels_used, report.capacity_bytes
    );
    Ok(report)
}

fn unix_now() -> Result<u64> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the Unix epoch")?
        .as_secs())
}
