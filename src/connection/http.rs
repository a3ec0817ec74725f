//! HTTP transport implementation using reqwest
//!
//! One call is one POST to `/api/v2/submit-batch`; retries live in
//! [`RetryPolicy`](super::RetryPolicy).

use super::Transport;
use crate::error::{Result, SdkError};
use crate::types::{Endpoint, SubmissionResponse};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

/// HTTP transport implementation
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    request_timeout: Duration,
}

impl HttpTransport {
    /// Create a transport on a shared client
    pub fn new(client: Client, request_timeout: Duration) -> Self {
        Self {
            client,
            request_timeout,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send_batch(
        &self,
        endpoint: &Endpoint,
        credential: &str,
        transactions: &[String],
    ) -> Result<SubmissionResponse> {
        let url = endpoint.submit_url();
        let body = serde_json::to_vec(&SubmitBatchRequest { transactions })
            .map_err(|e| SdkError::Internal(format!("request encoding failed: {}", e)))?;

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, credential)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| SdkError::from_request(e, self.request_timeout))?;

        let http_status = response.status().as_u16();
        let body = match response.bytes().await {
            Ok(bytes) => decode_body(&bytes),
            Err(e) => {
                debug!(url = %url, error = %e, "Failed to read response body");
                Map::new()
            }
        };

        debug!(url = %url, status = http_status, fields = body.len(), "Batch response received");

        Ok(SubmissionResponse { http_status, body })
    }
}

/// Best-effort decode of a JSON object body; anything else is empty
pub fn decode_body(bytes: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

#[derive(Debug, Serialize)]
struct SubmitBatchRequest<'a> {
    transactions: &'a [String],
}
