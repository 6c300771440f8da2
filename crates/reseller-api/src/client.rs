//! Account operations against the reseller service.

use std::sync::Arc;

use tracing::debug;

use crate::credentials::{ClientConfig, Credentials};
use crate::error::{Error, MISSING_PROFILE_FILTER, MISSING_USERNAME_OR_PASSWORD, Result};
use crate::response::Response;
use crate::signer::RequestSigner;
use crate::transport::{HttpTransport, Transport, TransportConfig};

/// Path of the claim operation.
pub const CLAIM_PATH: &str = "account/claim";
/// Path of the validity check.
pub const VALID_PATH: &str = "account/valid";
/// Path of the profile lookup.
pub const PROFILES_PATH: &str = "profiles";

/// Filter for [`Client::profiles`].
///
/// Either `username` together with `password`, or `partner_id_customer`,
/// must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFilter {
    /// Account username.
    pub username: Option<String>,
    /// Account password.
    pub password: Option<String>,
    /// Customer identifier on the partner side.
    pub partner_id_customer: Option<String>,
}

impl ProfileFilter {
    /// Filter by account login.
    #[must_use]
    pub fn account(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            partner_id_customer: None,
        }
    }

    /// Filter by partner-side customer id.
    #[must_use]
    pub fn customer(partner_id_customer: impl Into<String>) -> Self {
        Self {
            partner_id_customer: Some(partner_id_customer.into()),
            ..Self::default()
        }
    }

    /// Returns the request parameters, or an error if the filter is incomplete.
    fn params(&self) -> Result<Vec<(&str, &str)>> {
        let username = present(self.username.as_deref());
        let password = present(self.password.as_deref());
        let customer = present(self.partner_id_customer.as_deref());

        let mut params = Vec::with_capacity(3);
        match (username, password) {
            (Some(u), Some(p)) => {
                params.push(("username", u));
                params.push(("password", p));
            }
            (None, None) => {}
            _ => return Err(Error::missing_argument(MISSING_USERNAME_OR_PASSWORD)),
        }
        if let Some(c) = customer {
            params.push(("partner_id_customer", c));
        }

        if params.is_empty() {
            return Err(Error::missing_argument(MISSING_PROFILE_FILTER));
        }
        Ok(params)
    }
}

/// Reseller service client.
///
/// Cheap to clone; clones share credentials and transport.
#[derive(Debug)]
pub struct Client<T = HttpTransport> {
    credentials: Arc<Credentials>,
    transport: Arc<T>,
}

impl<T> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            credentials: Arc::clone(&self.credentials),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl Client<HttpTransport> {
    /// Creates a client talking HTTP to the configured service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if any credential key is missing or
    /// the base URL does not parse, or [`Error::Transport`] if the HTTP
    /// client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let credentials = Credentials::from_config(Some(config))?;
        let transport = HttpTransport::new(&TransportConfig::from(config))?;
        Ok(Self::with_transport(credentials, transport))
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client over any transport.
    #[must_use]
    pub fn with_transport(credentials: Credentials, transport: T) -> Self {
        Self {
            credentials: Arc::new(credentials),
            transport: Arc::new(transport),
        }
    }

    /// Returns the client's credentials.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Claims an existing account for this partner.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingArgument`] if `username` or `password` is
    /// empty, without contacting the service. Otherwise returns transport or
    /// response errors.
    pub async fn claim(&self, username: &str, password: &str) -> Result<Response> {
        let params = login_params(username, password)?;
        self.call(CLAIM_PATH, &params).await
    }

    /// Checks whether an account login is valid.
    ///
    /// An unknown account is not an error: the returned response has
    /// `success() == false`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingArgument`] if `username` or `password` is
    /// empty, without contacting the service. Otherwise returns transport or
    /// response errors.
    pub async fn check_valid(&self, username: &str, password: &str) -> Result<Response> {
        let params = login_params(username, password)?;
        self.call(VALID_PATH, &params).await
    }

    /// Lists profiles for an account or customer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingArgument`] if the filter has neither a full
    /// login nor a customer id. Otherwise returns transport or response
    /// errors.
    pub async fn profiles(&self, filter: &ProfileFilter) -> Result<Response> {
        let params = filter.params()?;
        self.call(PROFILES_PATH, &params).await
    }

    async fn call(&self, path: &str, params: &[(&str, &str)]) -> Result<Response> {
        let signer = RequestSigner::new(&self.credentials);
        let signed = signer.sign(signer.basic_data(), params)?;

        let body = self.transport.send(path, &signed).await?;
        let response = Response::from_bytes(&body)?;

        debug!(
            path,
            success = response.success(),
            result_code = response.result_code(),
            "Operation completed"
        );
        Ok(response)
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn login_params<'a>(username: &'a str, password: &'a str) -> Result<[(&'static str, &'a str); 2]> {
    if username.is_empty() || password.is_empty() {
        return Err(Error::missing_argument(MISSING_USERNAME_OR_PASSWORD));
    }
    Ok([("username", username), ("password", password)])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_params() {
        let params = login_params("jane", "pw").unwrap();
        assert_eq!(params, [("username", "jane"), ("password", "pw")]);

        for (u, p) in [("", "pw"), ("jane", ""), ("", "")] {
            let err = login_params(u, p).unwrap_err();
            assert_eq!(err.message(), "No username or password supplied");
        }
    }

    #[test]
    fn test_profile_filter_accepts() {
        let filter = ProfileFilter::account("u", "p");
        let params = filter.params().unwrap();
        assert_eq!(params, vec![("username", "u"), ("password", "p")]);

        let filter = ProfileFilter::customer("c-1");
        let params = filter.params().unwrap();
        assert_eq!(params, vec![("partner_id_customer", "c-1")]);

        let both = ProfileFilter {
            partner_id_customer: Some("c-1".into()),
            ..ProfileFilter::account("u", "p")
        };
        assert_eq!(both.params().unwrap().len(), 3);
    }

    #[test]
    fn test_profile_filter_rejects() {
        let err = ProfileFilter::default().params().unwrap_err();
        assert!(matches!(err, Error::MissingArgument { .. }));

        let username_only = ProfileFilter {
            username: Some("u".into()),
            ..ProfileFilter::default()
        };
        assert!(matches!(
            username_only.params().unwrap_err(),
            Error::MissingArgument { .. }
        ));

        let password_only = ProfileFilter {
            password: Some("p".into()),
            partner_id_customer: Some("c".into()),
            ..ProfileFilter::default()
        };
        assert!(password_only.params().is_err());
    }

    #[test]
    fn test_new_requires_credentials() {
        let err = Client::new(&ClientConfig::default()).unwrap_err();
        assert_eq!(err.message(), "Not all required keys are given");
    }

    #[test]
    fn test_new_with_complete_config() {
        let client = Client::new(&ClientConfig::new("p", "k", "s")).unwrap();
        assert_eq!(client.credentials().partner_id(), "p");
    }
}
