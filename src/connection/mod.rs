//! Connection management for relay endpoints
//!
//! This module provides the probe and transport abstractions, the shared
//! HTTP client, and the in-place retry policy for batch submission.

pub mod health;
pub mod http;
pub mod selector;

use crate::config::Config;
use crate::error::Result;
use crate::types::{Endpoint, ProbeResult, SubmissionResponse};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

/// Liveness probe against a single endpoint
///
/// Implementations never fail: every outcome is folded into the returned
/// [`ProbeResult`].
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, endpoint: &Endpoint) -> ProbeResult;
}

/// A single batch submission attempt
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one batch to an endpoint.
    ///
    /// Returns `Ok` whenever an HTTP response was received, whatever its
    /// status. Errors mean no response was obtained.
    async fn send_batch(
        &self,
        endpoint: &Endpoint,
        credential: &str,
        transactions: &[String],
    ) -> Result<SubmissionResponse>;
}

/// Build the pooled HTTP client shared by probes and submissions
pub fn build_http_client(config: &Config) -> Result<Client> {
    let client = Client::builder()
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .pool_idle_timeout(config.pool_idle_timeout)
        .tcp_keepalive(Some(config.tcp_keepalive))
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .build()?;
    Ok(client)
}

/// Immediate, same-endpoint retry for a batch submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    /// Total attempts including the first
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Statuses that indicate overload or a temporary server error
    pub fn is_retryable_status(status: u16) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS.as_u16()
            || status >= StatusCode::INTERNAL_SERVER_ERROR.as_u16()
    }

    /// Submit a batch, retrying transport failures and 429/5xx responses.
    ///
    /// A persistent transport failure is returned as the last error; a
    /// persistent 429/5xx is returned as a normal response.
    pub async fn submit(
        &self,
        transport: &dyn Transport,
        endpoint: &Endpoint,
        credential: &str,
        transactions: &[String],
    ) -> Result<SubmissionResponse> {
        let max_attempts = self.max_attempts();
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            debug!(
                endpoint = %endpoint.name,
                attempt,
                max_attempts,
                tx_count = transactions.len(),
                "Submitting batch"
            );

            match transport.send_batch(endpoint, credential, transactions).await {
                Ok(response) => {
                    if Self::is_retryable_status(response.http_status) && attempt < max_attempts {
                        warn!(
                            endpoint = %endpoint.name,
                            status = response.http_status,
                            attempt,
                            "Transient server failure, retrying"
                        );
                        continue;
                    }
                    return Ok(response);
                }
                Err(e) if e.is_transport() && attempt < max_attempts => {
                    warn!(
                        endpoint = %endpoint.name,
                        attempt,
                        error = %e,
                        "Submission attempt failed, retrying"
                    );
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2)
    }
}
