//! Sealmark CLI
//!
//! Command-line interface for embedding and verifying signed watermarks in
//! raw RGBA pixel files.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use sealmark::DEFAULT_MAX_ENVELOPE_BYTES;

mod commands;

#[derive(Parser)]
#[command(name = "sealmark")]
#[command(about = "Sealmark - Embed and verify signed watermarks in pixel data", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Largest envelope accepted on embed and extract, in bytes
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_ENVELOPE_BYTES)]
    max_envelope_bytes: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a P-256 key pair
    Keygen {
        /// Directory for private_key.pem and public_key.pem
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Sign a payload and embed it into a raw RGBA file
    Embed {
        /// Raw RGBA input (width * height * 4 bytes)
        #[arg(short, long)]
        input: PathBuf,

        /// Image width in pixels
        #[arg(short, long)]
        width: u32,

        /// Private key PEM (PKCS8 or SEC1)
        #[arg(short, long)]
        key: PathBuf,

        /// Raw RGBA output
        #[arg(short, long)]
        output: PathBuf,

        /// Issuer name
        #[arg(long)]
        issuer: Option<String>,

        /// Timestamp (defaults to the current Unix time)
        #[arg(long)]
        timestamp: Option<String>,

        /// File to attest: adds file_hash and file_size
        #[arg(long)]
        content: Option<PathBuf>,

        /// Extra payload entry as key=value (value parsed as JSON when possible)
        #[arg(long = "field", value_parser = commands::embed::parse_field)]
        fields: Vec<(String, serde_json::Value)>,
    },

    /// Verify the watermark in a raw RGBA file
    Verify {
        /// Raw RGBA input (width * height * 4 bytes)
        #[arg(short, long)]
        input: PathBuf,

        /// Image width in pixels
        #[arg(short, long)]
        width: u32,

        /// Trusted signer public key PEM (repeatable)
        #[arg(long = "trusted-key")]
        trusted_keys: Vec<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how many payload bytes an image can hold
    Capacity {
        /// Image width in pixels
        #[arg(long)]
        width: u32,

        /// Image height in pixels
        #[arg(long)]
        height: u32,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("sealmark=debug,sealmark_core=debug,sealmark_cli=debug")
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("sealmark=info,sealmark_core=warn,sealmark_cli=info")
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Keygen { out_dir } => {
            commands::keygen::run(&out_dir)?;
        }
        Commands::Embed {
            input,
            width,
            key,
            output,
            issuer,
            timestamp,
            content,
            fields,
        } => {
            let args = commands::embed::EmbedArgs {
                input,
                width,
                key,
                output,
                issuer,
                timestamp,
                content,
                fields,
            };
            commands::embed::run(&args, cli.max_envelope_bytes)?;
        }
        Commands::Verify {
            input,
            width,
            trusted_keys,
            json,
        } => {
            let valid =
                commands::verify::run(&input, width, &trusted_keys, json, cli.max_envelope_bytes)?;
            if !valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Capacity { width, height } => {
            commands::capacity::run(width, height);
        }
    }

    Ok(ExitCode::SUCCESS)
}
