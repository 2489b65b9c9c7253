//! Client configuration

use std::time::Duration;

use crate::{ClientResult, NetworkHttpClient, Session};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the restaurant backend
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DINE_API_URL | http://localhost:5000/api | API base URL |
/// | DINE_TIMEOUT_SECS | 30 | Request timeout, seconds |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:5000/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("DINE_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()),
            timeout: std::env::var("DINE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Create an HTTP client for `session` from this configuration
    pub fn build_http_client(&self, session: &Session) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self, session)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
