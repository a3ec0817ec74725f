//! # Batch Submission CLI
//!
//! Thin wrapper that reads signed transactions from a JSON file and submits
//! them through [`FlashblockClient`].
//!
//! ## Usage
//!
//! ```bash
//! AUTH_HEADER=<token> flashblock-send transactions.json
//! AUTH_HEADER=<token> flashblock-send --endpoint fra --json batch.json
//! ```
//!
//! The file must hold a non-empty JSON array of encoded transactions, e.g.
//! `["base64_tx1", "base64_tx2"]`.

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use flashblock_sdk::{Config, FlashblockClient};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Environment variable carrying the authorization credential
const AUTH_ENV: &str = "AUTH_HEADER";

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file containing an array of encoded transactions
    #[arg(default_value = "transactions.json")]
    transactions_file: PathBuf,

    /// Submit to this endpoint without probing (e.g. "ny", "fra")
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_transactions(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read transactions file '{}'", path.display()))?;
    let transactions: Vec<String> = serde_json::from_str(&content)
        .with_context(|| format!("invalid JSON in '{}'", path.display()))?;
    if transactions.is_empty() {
        bail!("no transactions found in '{}'", path.display());
    }
    Ok(transactions)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let credential = std::env::var(AUTH_ENV).unwrap_or_default().trim().to_string();
    if credential.is_empty() {
        return Err(anyhow!(
            "missing {}: please export {} with your token",
            AUTH_ENV,
            AUTH_ENV
        ));
    }

    let transactions = load_transactions(&args.transactions_file)?;

    let mut builder = Config::builder().credential(credential);
    if let Some(endpoint) = args.endpoint {
        builder = builder.preferred_endpoint(endpoint);
    }
    let client = FlashblockClient::new(builder.build()?)?;

    let result = client.send_transactions(&transactions).await?;
    let tip = client.random_tip_address();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "status: {}, success: {}, code: {}, message: {}",
            result.http_status, result.success, result.code, result.message
        );
        println!("endpoint: {}, durationMs: {}", result.endpoint, result.duration_ms);
        println!("signatures: {:?}", result.signatures);
    }
    println!("tipAddress: {}", tip);

    Ok(())
}
