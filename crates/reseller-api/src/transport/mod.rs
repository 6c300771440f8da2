//! Transport seam between the client and the network.

mod http;

pub use http::HttpTransport;

use std::future::Future;
use std::time::Duration;

use crate::credentials::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::Result;
use crate::signer::SignedParams;

/// Versioned API root, relative to the base URL.
pub const API_ROOT: &str = "/api/reseller/v1/";

/// Sends signed requests and returns raw response bodies.
pub trait Transport: Send + Sync {
    /// Sends `params` to `path` under [`API_ROOT`].
    ///
    /// Returns the body of a 2xx response.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Transport`] for network failures and non-2xx
    /// statuses.
    fn send(
        &self,
        path: &str,
        params: &SignedParams,
    ) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// HTTP transport settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Scheme and host of the service.
    pub base_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl From<&ClientConfig> for TransportConfig {
    fn from(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            timeout: config.timeout(),
        }
    }
}
