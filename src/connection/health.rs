//! Endpoint liveness probing
//!
//! A probe is a bounded GET against the endpoint's base URL. Every outcome,
//! including refusal and timeout, becomes a [`ProbeResult`].

use super::Prober;
use crate::types::{Endpoint, ProbeResult};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;

/// HTTP liveness prober
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
    timeout: Duration,
}

impl HttpProber {
    /// Create a prober on a shared client
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, endpoint: &Endpoint) -> ProbeResult {
        let start = Instant::now();

        let result = tokio::time::timeout(self.timeout, async {
            self.client
                .get(&endpoint.base_url)
                .timeout(self.timeout)
                .send()
                .await
        })
        .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        let healthy = match result {
            Ok(Ok(response)) if response.status().is_success() => {
                debug!(endpoint = %endpoint.name, latency_ms, "Probe successful");
                true
            }
            Ok(Ok(response)) => {
                debug!(
                    endpoint = %endpoint.name,
                    status = %response.status(),
                    latency_ms,
                    "Probe returned non-success status"
                );
                false
            }
            Ok(Err(e)) => {
                debug!(endpoint = %endpoint.name, error = %e, latency_ms, "Probe failed");
                false
            }
            Err(_) => {
                debug!(endpoint = %endpoint.name, latency_ms, "Probe timed out");
                false
            }
        };

        ProbeResult {
            endpoint: endpoint.clone(),
            healthy,
            latency_ms,
        }
    }
}
