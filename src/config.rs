//! Configuration types for the Flashblock SDK

use crate::error::{Result, SdkError};
pub use crate::types::Endpoint;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::time::Duration;

/// Default per-probe timeout (1.5 seconds)
const DEFAULT_PROBE_TIMEOUT_MS: u64 = 1_500;

/// Default whole-request timeout for submissions (10 seconds)
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Default TCP connect timeout (5 seconds)
const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;

/// Connection pool defaults
const DEFAULT_TCP_KEEPALIVE_MS: u64 = 15_000;
const DEFAULT_POOL_IDLE_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 64;

/// Default in-place retries per endpoint (3 attempts total)
const DEFAULT_MAX_RETRIES: u32 = 2;

/// Public relay regions, in preference order for latency ties
pub const DEFAULT_ENDPOINT_REGIONS: &[&str] = &["ny", "slc", "ams", "fra", "singapore", "london"];

/// Published support (tip) addresses
pub const DEFAULT_TIP_ADDRESSES: &[&str] = &[
    "FLaShB3iXXTWE1vu9wQsChUKq3HFtpMAhb8kAh1pf1wi",
    "FLashhsorBmM9dLpuq6qATawcpqk1Y2aqaZfkd48iT3W",
    "FLaSHJNm5dWYzEgnHJWWJP5ccu128Mu61NJLxUf7mUXU",
    "FLaSHR4Vv7sttd6TyDF4yR1bJyAxRwWKbohDytEMu3wL",
    "FLASHRzANfcAKDuQ3RXv9hbkBy4WVEKDzoAgxJ56DiE4",
    "FLasHstqx11M8W56zrSEqkCyhMCCpr6ze6Mjdvqope5s",
    "FLAShWTjcweNT4NSotpjpxAkwxUr2we3eXQGhpTVzRwy",
    "FLasHXTqrbNvpWFB6grN47HGZfK6pze9HLNTgbukfPSk",
    "FLAshyAyBcKb39KPxSzXcepiS8iDYUhDGwJcJDPX4g2B",
    "FLAsHZTRcf3Dy1APaz6j74ebdMC6Xx4g6i9YxjyrDybR",
];

/// The public endpoint list
pub fn default_endpoints() -> Vec<Endpoint> {
    DEFAULT_ENDPOINT_REGIONS
        .iter()
        .map(|region| Endpoint::flashblock(region))
        .collect()
}

/// SDK Configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Authorization credential, forwarded verbatim
    pub credential: String,

    /// Candidate endpoints, in tie-break order
    pub endpoints: Vec<Endpoint>,

    /// Endpoint name to use without probing (optional)
    pub preferred_endpoint: Option<String>,

    /// Hard timeout for each liveness probe
    pub probe_timeout: Duration,

    /// Whole-request timeout for submissions
    pub request_timeout: Duration,

    /// TCP connect timeout
    pub connect_timeout: Duration,

    /// Keep-alive interval on pooled sockets
    pub tcp_keepalive: Duration,

    /// Maximum idle pooled connections per host
    pub pool_max_idle_per_host: usize,

    /// How long an idle pooled connection is kept
    pub pool_idle_timeout: Duration,

    /// In-place retries per endpoint on transport failure or 429/5xx
    pub max_retries: u32,

    /// Support addresses for `random_tip_address`
    pub tip_addresses: Vec<String>,
}

impl Config {
    /// Create a new configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.credential.trim().is_empty() {
            return Err(SdkError::config("credential is required"));
        }
        if self.endpoints.is_empty() {
            return Err(SdkError::config("at least one endpoint is required"));
        }

        let mut names = HashSet::with_capacity(self.endpoints.len());
        for endpoint in &self.endpoints {
            if endpoint.name.is_empty() {
                return Err(SdkError::config("endpoint name must not be empty"));
            }
            if !names.insert(endpoint.name.as_str()) {
                return Err(SdkError::config(format!(
                    "duplicate endpoint name: {}",
                    endpoint.name
                )));
            }
            if !(endpoint.base_url.starts_with("http://")
                || endpoint.base_url.starts_with("https://"))
            {
                return Err(SdkError::config(format!(
                    "endpoint {} must use an http(s) base URL, got {}",
                    endpoint.name, endpoint.base_url
                )));
            }
        }

        if self.probe_timeout.is_zero() {
            return Err(SdkError::config("probe_timeout must be non-zero"));
        }
        if self.request_timeout.is_zero() {
            return Err(SdkError::config("request_timeout must be non-zero"));
        }
        if self.connect_timeout.is_zero() {
            return Err(SdkError::config("connect_timeout must be non-zero"));
        }
        if self.tip_addresses.is_empty() {
            return Err(SdkError::config("at least one tip address is required"));
        }
        Ok(())
    }

    /// Pick a support address uniformly at random
    pub fn random_tip_address(&self) -> &str {
        self.tip_addresses
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or(DEFAULT_TIP_ADDRESSES[0])
    }
}

/// Configuration builder for ergonomic config creation
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    credential: Option<String>,
    endpoints: Option<Vec<Endpoint>>,
    preferred_endpoint: Option<String>,
    probe_timeout: Option<Duration>,
    request_timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    tcp_keepalive: Option<Duration>,
    pool_max_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
    max_retries: Option<u32>,
    tip_addresses: Option<Vec<String>>,
}

impl ConfigBuilder {
    /// Set the authorization credential (required)
    pub fn credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    /// Replace the candidate endpoint list
    pub fn endpoints(mut self, endpoints: Vec<Endpoint>) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Append one endpoint (starting from an empty list, not the defaults)
    pub fn add_endpoint(mut self, name: impl Into<String>, base_url: impl Into<String>) -> Self {
        self.endpoints
            .get_or_insert_with(Vec::new)
            .push(Endpoint::new(name, base_url));
        self
    }

    /// Prefer an endpoint by name (skips the latency race when it exists)
    pub fn preferred_endpoint(mut self, name: impl Into<String>) -> Self {
        self.preferred_endpoint = Some(name.into());
        self
    }

    /// Set the per-probe timeout
    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = Some(timeout);
        self
    }

    /// Set the submission request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the TCP connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the TCP keep-alive interval
    pub fn tcp_keepalive(mut self, interval: Duration) -> Self {
        self.tcp_keepalive = Some(interval);
        self
    }

    /// Set the idle connection bound per host
    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = Some(max);
        self
    }

    /// Set the idle connection eviction timeout
    pub fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Set in-place retries per endpoint
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Replace the tip address list
    pub fn tip_addresses(mut self, addresses: Vec<String>) -> Self {
        self.tip_addresses = Some(addresses);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        let config = Config {
            credential: self
                .credential
                .ok_or_else(|| SdkError::config("credential is required"))?,
            endpoints: self.endpoints.unwrap_or_else(default_endpoints),
            preferred_endpoint: self.preferred_endpoint.filter(|name| !name.is_empty()),
            probe_timeout: self
                .probe_timeout
                .unwrap_or_else(|| Duration::from_millis(DEFAULT_PROBE_TIMEOUT_MS)),
            request_timeout: self
                .request_timeout
                .unwrap_or_else(|| Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS)),
            connect_timeout: self
                .connect_timeout
                .unwrap_or_else(|| Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS)),
            tcp_keepalive: self
                .tcp_keepalive
                .unwrap_or_else(|| Duration::from_millis(DEFAULT_TCP_KEEPALIVE_MS)),
            pool_max_idle_per_host: self
                .pool_max_idle_per_host
                .unwrap_or(DEFAULT_POOL_MAX_IDLE_PER_HOST),
            pool_idle_timeout: self
                .pool_idle_timeout
                .unwrap_or_else(|| Duration::from_millis(DEFAULT_POOL_IDLE_TIMEOUT_MS)),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            tip_addresses: self.tip_addresses.unwrap_or_else(|| {
                DEFAULT_TIP_ADDRESSES.iter().map(|a| a.to_string()).collect()
            }),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_defaults() {
        let config = Config::builder().credential("token-123").build().unwrap();

        assert_eq!(config.credential, "token-123");
        assert_eq!(config.endpoints.len(), 6);
        assert_eq!(config.endpoints[0].name, "ny");
        assert_eq!(config.endpoints[5].base_url, "http://london.flashblock.trade");
        assert_eq!(config.probe_timeout, Duration::from_millis(1500));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.pool_max_idle_per_host, 64);
        assert_eq!(config.tip_addresses.len(), 10);
        assert!(config.preferred_endpoint.is_none());
    }

    #[test]
    fn test_config_builder_missing_credential() {
        let result = Config::builder().build();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("credential"));
    }

    #[test]
    fn test_config_builder_blank_credential() {
        let result = Config::builder().credential("   ").build();
        assert!(matches!(result, Err(SdkError::Config(_))));
    }

    #[test]
    fn test_config_empty_endpoints_rejected() {
        let result = Config::builder()
            .credential("token")
            .endpoints(vec![])
            .build();
        assert!(result.unwrap_err().to_string().contains("endpoint"));
    }

    #[test]
    fn test_config_duplicate_endpoint_rejected() {
        let result = Config::builder()
            .credential("token")
            .add_endpoint("a", "http://127.0.0.1:9000")
            .add_endpoint("a", "http://127.0.0.1:9001")
            .build();
        assert!(result.unwrap_err().to_string().contains("duplicate"));
    }

    #[test]
    fn test_config_non_http_endpoint_rejected() {
        let result = Config::builder()
            .credential("token")
            .add_endpoint("a", "ws://127.0.0.1:9000")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_add_endpoint_starts_from_empty_list() {
        let config = Config::builder()
            .credential("token")
            .add_endpoint("local", "http://127.0.0.1:9000")
            .build()
            .unwrap();
        assert_eq!(config.endpoints, vec![Endpoint::new("local", "http://127.0.0.1:9000")]);
    }

    #[test]
    fn test_empty_preference_is_dropped() {
        let config = Config::builder()
            .credential("token")
            .preferred_endpoint("")
            .build()
            .unwrap();
        assert!(config.preferred_endpoint.is_none());
    }

    #[test]
    fn test_zero_timeouts_rejected() {
        let result = Config::builder()
            .credential("token")
            .request_timeout(Duration::ZERO)
            .build();
        assert!(result.unwrap_err().to_string().contains("request_timeout"));

        let result = Config::builder()
            .credential("token")
            .connect_timeout(Duration::ZERO)
            .build();
        assert!(result.unwrap_err().to_string().contains("connect_timeout"));

        let result = Config::builder()
            .credential("token")
            .probe_timeout(Duration::ZERO)
            .build();
        assert!(result.unwrap_err().to_string().contains("probe_timeout"));
    }

    #[test]
    fn test_random_tip_address_is_from_list() {
        let config = Config::builder().credential("token").build().unwrap();
        for _ in 0..20 {
            let tip = config.random_tip_address();
            assert!(DEFAULT_TIP_ADDRESSES.contains(&tip));
        }
    }
}
