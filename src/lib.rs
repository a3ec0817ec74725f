//! flashblock-sdk - Rust client for Flashblock batch submission
//!
//! Races the configured relay endpoints, submits a batch of signed
//! transactions to the fastest healthy one, retries transient failures and
//! fails over once if the endpoint stops answering.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use flashblock_sdk::{Config, FlashblockClient};
//!
//! # async fn run(txs: Vec<String>) -> flashblock_sdk::Result<()> {
//! let config = Config::builder().credential("your-auth-token").build()?;
//! let client = FlashblockClient::new(config)?;
//! let result = client.send_transactions(&txs).await?;
//! println!("signatures: {:?}", result.signatures);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod connection;
pub mod error;
pub mod response;
pub mod types;

pub use client::FlashblockClient;
pub use config::{Config, ConfigBuilder};
pub use connection::{Prober, RetryPolicy, Transport};
pub use error::{Result, SdkError};
pub use response::interpret;
pub use types::{Endpoint, InterpretedResponse, ProbeResult, SubmissionResponse, SubmissionResult};
