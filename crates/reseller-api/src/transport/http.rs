//! reqwest-backed transport.

use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::{API_ROOT, Transport, TransportConfig};
use crate::error::{Error, Result};
use crate::signer::SignedParams;

/// HTTP transport issuing signed GET requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: Client,
    api_root: Url,
}

impl HttpTransport {
    /// Creates a transport for the configured service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the base URL does not parse, or a
    /// transport error if the HTTP client cannot be built.
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let api_root = Url::parse(&config.base_url)
            .and_then(|base| base.join(API_ROOT))
            .map_err(|e| Error::invalid_base_url(&e))?;
        let http_client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http_client,
            api_root,
        })
    }

    /// Returns the full endpoint URL for `path`, without a query.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` does not form a valid URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.api_root.join(path.trim_start_matches('/'))?)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, path: &str, params: &SignedParams) -> Result<Vec<u8>> {
        let mut url = self.endpoint(path)?;
        // Already canonical; `set_query` keeps existing escapes as they are.
        url.set_query(Some(&params.query_string()));

        let names: Vec<&str> = params.pairs().iter().map(|(k, _)| k.as_str()).collect();
        debug!(path, ?names, "Sending signed request");

        let response = self.http_client.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            warn!(path, error = %e, "Request failed");
            Error::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(path, status = status.as_u16(), "Service returned error status");
            return Err(Error::transport(
                Some(status.as_u16()),
                format!("HTTP {status}"),
            ));
        }

        let body = response.bytes().await.map_err(|e| {
            let e = e.without_url();
            warn!(path, error = %e, "Reading response body failed");
            Error::from(e)
        })?;
        debug!(path, bytes = body.len(), "Received response");
        Ok(body.to_vec())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_under_api_root() {
        let transport = HttpTransport::new(&TransportConfig {
            base_url: "https://api.example.com".into(),
            ..TransportConfig::default()
        })
        .unwrap();

        assert_eq!(
            transport.endpoint("account/claim").unwrap().as_str(),
            "https://api.example.com/api/reseller/v1/account/claim"
        );
        assert_eq!(
            transport.endpoint("/profiles").unwrap().as_str(),
            "https://api.example.com/api/reseller/v1/profiles"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpTransport::new(&TransportConfig {
            base_url: "not a url".into(),
            ..TransportConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert_eq!(err.message(), crate::error::INVALID_BASE_URL);
    }
}
