//! Data types for the Flashblock SDK
//!
//! Endpoints, probe measurements and submission results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A named relay endpoint offering the batch submission API
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Endpoint name, unique within a configuration (e.g. "ny")
    pub name: String,
    /// Base URL without trailing path (e.g. "http://ny.flashblock.trade")
    pub base_url: String,
}

impl Endpoint {
    /// Create a new endpoint
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
        }
    }

    /// Create an endpoint for a Flashblock region host (`http://<region>.flashblock.trade`)
    pub fn flashblock(region: &str) -> Self {
        Self::new(region, format!("http://{}.flashblock.trade", region))
    }

    /// URL of the batch submission route
    pub fn submit_url(&self) -> String {
        format!("{}/api/v2/submit-batch", self.base_url.trim_end_matches('/'))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.base_url)
    }
}

/// Outcome of a single liveness probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// Probed endpoint
    pub endpoint: Endpoint,
    /// Whether the endpoint answered with a 2xx status
    pub healthy: bool,
    /// Round-trip time in milliseconds, or time until failure
    pub latency_ms: u64,
}

/// Raw outcome of one completed submission round
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionResponse {
    /// HTTP status code returned by the endpoint
    pub http_status: u16,
    /// Decoded JSON object body; empty when the body was absent or not an object
    pub body: Map<String, Value>,
}

/// Fields extracted from a submission response body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterpretedResponse {
    pub success: bool,
    pub code: i64,
    pub message: String,
    pub signatures: Vec<String>,
}

/// Normalized result of a batch submission
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    /// HTTP status of the returned response
    pub http_status: u16,
    /// Upstream success flag
    pub success: bool,
    /// Upstream result code
    pub code: i64,
    /// Upstream message
    pub message: String,
    /// Transaction signatures, empty when none were reported
    pub signatures: Vec<String>,
    /// Wall-clock time from endpoint selection to response, in milliseconds
    pub duration_ms: u64,
    /// Endpoint that produced the returned response
    pub endpoint: Endpoint,
    /// Undecoded response body
    pub raw_body: Map<String, Value>,
}
