//! Endpoint selection with a concurrent latency race
//!
//! Every candidate is probed in parallel and the fastest healthy endpoint
//! wins. When nothing is healthy the fastest responder overall is used.

use super::Prober;
use crate::error::{Result, SdkError};
use crate::types::{Endpoint, ProbeResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default probe timeout, charged as latency to a probe task that did not report
const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(1_500);

/// Endpoint selector over a fixed candidate list
pub struct EndpointSelector {
    endpoints: Arc<[Endpoint]>,
    prober: Arc<dyn Prober>,
    probe_timeout: Duration,
}

impl EndpointSelector {
    /// Create a new endpoint selector
    pub fn new(endpoints: Vec<Endpoint>, prober: Arc<dyn Prober>) -> Self {
        Self {
            endpoints: endpoints.into(),
            prober,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Set the probe timeout the prober runs under
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Look up a candidate endpoint by name
    pub fn find(&self, name: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.name == name)
    }

    /// Select an endpoint.
    ///
    /// A non-empty `preferred` name matching a candidate is returned without
    /// probing. Otherwise all candidates are raced.
    pub async fn select(&self, preferred: Option<&str>) -> Result<Endpoint> {
        if self.endpoints.is_empty() {
            return Err(SdkError::config("No endpoints configured"));
        }

        if let Some(name) = preferred.filter(|n| !n.is_empty()) {
            if let Some(endpoint) = self.find(name) {
                debug!(endpoint = %endpoint.name, "Using preferred endpoint");
                return Ok(endpoint.clone());
            }
            warn!(preferred = name, "Preferred endpoint not configured, racing all endpoints");
        }

        let results = self.probe_all().await;
        let best = pick_fastest(&results)
            .cloned()
            .ok_or_else(|| SdkError::config("No endpoints configured"))?;

        let healthy = results.iter().filter(|r| r.healthy).count();
        info!(
            endpoint = %best.name,
            healthy,
            probed = results.len(),
            "Selected endpoint"
        );
        Ok(best)
    }

    /// Probe every candidate in parallel and wait for all of them.
    ///
    /// Results come back in configured order.
    pub async fn probe_all(&self) -> Vec<ProbeResult> {
        let mut handles = Vec::with_capacity(self.endpoints.len());

        for endpoint in self.endpoints.iter() {
            let endpoint = endpoint.clone();
            let prober = Arc::clone(&self.prober);
            handles.push(tokio::spawn(async move { prober.probe(&endpoint).await }));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (handle, endpoint) in handles.into_iter().zip(self.endpoints.iter()) {
            match handle.await {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!(endpoint = %endpoint.name, error = %e, "Probe task failed");
                    results.push(ProbeResult {
                        endpoint: endpoint.clone(),
                        healthy: false,
                        latency_ms: self.probe_timeout.as_millis() as u64,
                    });
                }
            }
        }
        results
    }
}

/// Pick the lowest-latency endpoint, preferring healthy ones.
///
/// Ties go to the earlier entry. Returns `None` only for empty input.
pub fn pick_fastest(results: &[ProbeResult]) -> Option<&Endpoint> {
    let mut pool: Vec<&ProbeResult> = results.iter().filter(|r| r.healthy).collect();
    if pool.is_empty() {
        warn!("No healthy endpoints, falling back to lowest latency overall");
        pool = results.iter().collect();
    }
    pool.sort_by_key(|r| r.latency_ms);
    pool.first().map(|r| &r.endpoint)
}
