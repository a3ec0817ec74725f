//! FlashblockClient - Main SDK entry point
//!
//! # Example
//!
//! ```rust,no_run
//! use flashblock_sdk::{Config, FlashblockClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::builder()
//!         .credential("your-auth-token")
//!         .build()?;
//!
//!     let client = FlashblockClient::new(config)?;
//!
//!     let txs = vec!["<base64 signed transaction>".to_string()];
//!     let result = client.send_transactions(&txs).await?;
//!     println!("{} via {}: {:?}", result.http_status, result.endpoint, result.signatures);
//!
//!     Ok(())
//! }
//! ```

use crate::config::Config;
use crate::connection::health::HttpProber;
use crate::connection::http::HttpTransport;
use crate::connection::selector::EndpointSelector;
use crate::connection::{build_http_client, Prober, RetryPolicy, Transport};
use crate::error::{Result, SdkError};
use crate::response::interpret;
use crate::types::{Endpoint, SubmissionResponse, SubmissionResult};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Flashblock client for batch transaction submission
pub struct FlashblockClient {
    config: Config,
    selector: EndpointSelector,
    transport: Arc<dyn Transport>,
    retry: RetryPolicy,
}

impl FlashblockClient {
    /// Create a client with the HTTP prober and transport.
    ///
    /// Both share one pooled connection client that lives as long as this
    /// `FlashblockClient`.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let http = build_http_client(&config)?;
        let prober = Arc::new(HttpProber::new(http.clone(), config.probe_timeout));
        let transport = Arc::new(HttpTransport::new(http, config.request_timeout));

        Ok(Self::with_components(config, prober, transport))
    }

    /// Create a client on custom probe and transport implementations
    pub fn with_components(
        config: Config,
        prober: Arc<dyn Prober>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let selector = EndpointSelector::new(config.endpoints.clone(), prober)
            .with_probe_timeout(config.probe_timeout);
        let retry = RetryPolicy::new(config.max_retries);
        Self {
            config,
            selector,
            transport,
            retry,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Pick a support address uniformly at random
    pub fn random_tip_address(&self) -> &str {
        self.config.random_tip_address()
    }

    /// Select an endpoint without submitting anything
    pub async fn select_endpoint(&self, preferred: Option<&str>) -> Result<Endpoint> {
        self.selector.select(preferred).await
    }

    /// Submit a batch using the configured endpoint preference
    pub async fn send_transactions(&self, transactions: &[String]) -> Result<SubmissionResult> {
        let preferred = self.config.preferred_endpoint.clone();
        self.send_transactions_with_preference(transactions, preferred.as_deref())
            .await
    }

    /// Submit a batch, preferring the named endpoint for the first attempt
    ///
    /// # Arguments
    ///
    /// * `transactions` - Signed, encoded transactions; forwarded untouched
    /// * `preferred` - Endpoint name to use without probing
    ///
    /// # Returns
    ///
    /// The normalized result from whichever endpoint answered. Fails only on
    /// empty input or when both the selected and the failover endpoint
    /// produced no HTTP response.
    pub async fn send_transactions_with_preference(
        &self,
        transactions: &[String],
        preferred: Option<&str>,
    ) -> Result<SubmissionResult> {
        if transactions.is_empty() {
            return Err(SdkError::config("no transactions to submit"));
        }

        let submission_id = Uuid::new_v4();
        let start = Instant::now();

        let mut endpoint = self.selector.select(preferred).await?;
        debug!(
            %submission_id,
            endpoint = %endpoint.name,
            tx_count = transactions.len(),
            "Submitting transaction batch"
        );

        let response = match self.submit_to(&endpoint, transactions).await {
            Ok(response) => response,
            Err(e) if e.is_transport() => {
                warn!(
                    %submission_id,
                    endpoint = %endpoint.name,
                    error = %e,
                    "Endpoint unreachable, reselecting"
                );
                endpoint = self.selector.select(None).await?;
                self.submit_to(&endpoint, transactions).await?
            }
            Err(e) => return Err(e),
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        let parsed = interpret(&response.body);

        info!(
            %submission_id,
            endpoint = %endpoint.name,
            status = response.http_status,
            success = parsed.success,
            code = parsed.code,
            signatures = parsed.signatures.len(),
            duration_ms,
            "Batch submitted"
        );

        Ok(SubmissionResult {
            http_status: response.http_status,
            success: parsed.success,
            code: parsed.code,
            message: parsed.message,
            signatures: parsed.signatures,
            duration_ms,
            endpoint,
            raw_body: response.body,
        })
    }

    async fn submit_to(
        &self,
        endpoint: &Endpoint,
        transactions: &[String],
    ) -> Result<SubmissionResponse> {
        self.retry
            .submit(
                self.transport.as_ref(),
                endpoint,
                &self.config.credential,
                transactions,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::mock::{refused, response, MockProber, SequencedTransport};
    use serde_json::json;

    fn test_config() -> Config {
        Config::builder()
            .credential("auth-token")
            .add_endpoint("ny", "http://127.0.0.1:9001")
            .add_endpoint("ams", "http://127.0.0.2:9001")
            .build()
            .unwrap()
    }

    fn txs() -> Vec<String> {
        vec!["tx-a".to_string(), "tx-b".to_string()]
    }

    #[tokio::test]
    async fn test_empty_transactions_rejected_before_network() {
        let prober = Arc::new(MockProber::new(&[("ny", true, 1)]));
        let transport = Arc::new(SequencedTransport::new());
        let client = FlashblockClient::with_components(test_config(), prober.clone(), transport.clone());

        let result = client.send_transactions(&[]).await;
        assert!(matches!(result, Err(SdkError::Config(_))));
        assert_eq!(prober.call_count(), 0);
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_success_on_fastest_endpoint() {
        let prober = Arc::new(MockProber::new(&[("ny", true, 80), ("ams", true, 20)]));
        let transport = Arc::new(SequencedTransport::new().script(
            "ams",
            vec![response(
                200,
                json!({"data": {"success": true, "code": 0, "message": "ok", "signatures": ["s1"]}}),
            )],
        ));
        let client = FlashblockClient::with_components(test_config(), prober, transport.clone());

        let result = client.send_transactions(&txs()).await.unwrap();
        assert_eq!(result.endpoint.name, "ams");
        assert_eq!(result.http_status, 200);
        assert!(result.success);
        assert_eq!(result.message, "ok");
        assert_eq!(result.signatures, vec!["s1"]);
        assert!(result.raw_body.contains_key("data"));
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failover_reports_second_endpoint() {
        let prober = Arc::new(MockProber::new(&[("ny", false, 1500), ("ams", true, 30)]));
        let transport = Arc::new(
            SequencedTransport::new()
                .script("ny", vec![refused()])
                .script(
                    "ams",
                    vec![response(200, json!({"success": true, "signatures": ["sigA"]}))],
                ),
        );
        let client = FlashblockClient::with_components(test_config(), prober.clone(), transport.clone());

        let result = client
            .send_transactions_with_preference(&txs(), Some("ny"))
            .await
            .unwrap();

        assert_eq!(result.endpoint.name, "ams");
        assert_eq!(result.signatures, vec!["sigA"]);
        assert_eq!(transport.calls_to("ny"), 3);
        assert_eq!(transport.calls_to("ams"), 1);
        // Preference skipped the first race; failover raced both endpoints
        assert_eq!(prober.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failover_failure_is_terminal() {
        let prober = Arc::new(MockProber::new(&[("ny", true, 10), ("ams", true, 20)]));
        let transport = Arc::new(SequencedTransport::new().script("ny", vec![refused()]));
        let client = FlashblockClient::with_components(test_config(), prober.clone(), transport.clone());

        let result = client.send_transactions(&txs()).await;

        assert!(result.unwrap_err().is_transport());
        // Three attempts on the selected endpoint, three after failover, no more
        assert_eq!(transport.call_count(), 6);
        assert_eq!(prober.call_count(), 4);
    }

    #[tokio::test]
    async fn test_server_error_is_returned_not_failed_over() {
        let prober = Arc::new(MockProber::new(&[("ny", true, 10), ("ams", true, 20)]));
        let transport = Arc::new(SequencedTransport::new().script(
            "ny",
            vec![response(503, json!({"success": false, "message": "overloaded"}))],
        ));
        let client = FlashblockClient::with_components(test_config(), prober.clone(), transport.clone());

        let result = client.send_transactions(&txs()).await.unwrap();

        assert_eq!(result.http_status, 503);
        assert!(!result.success);
        assert_eq!(result.message, "overloaded");
        assert!(result.signatures.is_empty());
        assert_eq!(result.endpoint.name, "ny");
        assert_eq!(transport.calls_to("ny"), 3);
        assert_eq!(transport.calls_to("ams"), 0);
        assert_eq!(prober.call_count(), 2);
    }

    #[tokio::test]
    async fn test_configured_preference_is_used() {
        let config = Config::builder()
            .credential("auth-token")
            .add_endpoint("ny", "http://127.0.0.1:9001")
            .add_endpoint("ams", "http://127.0.0.2:9001")
            .preferred_endpoint("ny")
            .build()
            .unwrap();
        let prober = Arc::new(MockProber::new(&[("ny", true, 90), ("ams", true, 1)]));
        let transport = Arc::new(
            SequencedTransport::new().script("ny", vec![response(200, json!({"success": true}))]),
        );
        let client = FlashblockClient::with_components(config, prober.clone(), transport);

        let result = client.send_transactions(&txs()).await.unwrap();
        assert_eq!(result.endpoint.name, "ny");
        assert_eq!(prober.call_count(), 0);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = test_config();
        config.endpoints.clear();
        assert!(matches!(FlashblockClient::new(config), Err(SdkError::Config(_))));
    }
}
