//! Error types for the Flashblock SDK

use std::time::Duration;
use thiserror::Error;

/// SDK error types
#[derive(Debug, Clone, Error)]
pub enum SdkError {
    /// Configuration or caller input error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No response could be obtained from an endpoint
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request timed out before a response arrived
    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    /// Endpoint answered in a way that cannot be used
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SdkError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        SdkError::Config(msg.into())
    }

    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        SdkError::Connection(msg.into())
    }

    /// Create a protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        SdkError::Protocol(msg.into())
    }

    /// Map a failed request, reporting the timeout it ran under
    pub fn from_request(e: reqwest::Error, timeout: Duration) -> Self {
        if e.is_timeout() {
            SdkError::Timeout(timeout)
        } else {
            SdkError::from(e)
        }
    }

    /// Whether this error means no HTTP response was obtained at all.
    ///
    /// Only these errors trigger in-place retries and endpoint failover.
    pub fn is_transport(&self) -> bool {
        matches!(self, SdkError::Connection(_) | SdkError::Timeout(_))
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            SdkError::Config(e.to_string())
        } else if e.is_redirect() || e.is_decode() || e.is_status() {
            SdkError::Protocol(e.to_string())
        } else {
            SdkError::Connection(e.to_string())
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
