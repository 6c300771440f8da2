//! Client configuration and validated credentials.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default service location when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.reseller.example";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw client configuration, as read from a file or built in code.
///
/// Every field is optional here; [`Credentials::from_config`] decides
/// whether the record is complete.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Partner identifier.
    #[serde(default, alias = "partnerId", skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
    /// Profile key.
    #[serde(default, alias = "profileKey", skip_serializing_if = "Option::is_none")]
    pub profile_key: Option<String>,
    /// Shared signing secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// Service base URL (scheme and host).
    #[serde(default, alias = "baseUrl", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    #[serde(default, alias = "timeoutSecs", skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Creates a config holding the three credential keys.
    #[must_use]
    pub fn new(
        partner_id: impl Into<String>,
        profile_key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            partner_id: Some(partner_id.into()),
            profile_key: Some(profile_key.into()),
            secret: Some(secret.into()),
            ..Self::default()
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Fills unset fields from `other`.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self {
            partner_id: self.partner_id.or(other.partner_id),
            profile_key: self.profile_key.or(other.profile_key),
            secret: self.secret.or(other.secret),
            base_url: self.base_url.or(other.base_url),
            timeout_secs: self.timeout_secs.or(other.timeout_secs),
        }
    }

    /// Returns the configured base URL or the default.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Returns the configured timeout or the default.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

/// Validated credential set.
///
/// All three fields are non-empty. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    partner_id: String,
    profile_key: String,
    secret: String,
}

impl Credentials {
    /// Builds credentials from individual values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if any value is empty.
    pub fn new(
        partner_id: impl Into<String>,
        profile_key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self> {
        Self::from_config(Some(&ClientConfig::new(partner_id, profile_key, secret)))
    }

    /// Builds credentials from a configuration record.
    ///
    /// `None` stands for an absent record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] with "Not all required keys are given"
    /// if the record is absent or any key is missing or empty.
    pub fn from_config(config: Option<&ClientConfig>) -> Result<Self> {
        let config = config.ok_or_else(Error::configuration)?;

        match (
            non_empty(config.partner_id.as_deref()),
            non_empty(config.profile_key.as_deref()),
            non_empty(config.secret.as_deref()),
        ) {
            (Some(partner_id), Some(profile_key), Some(secret)) => Ok(Self {
                partner_id: partner_id.to_string(),
                profile_key: profile_key.to_string(),
                secret: secret.to_string(),
            }),
            _ => Err(Error::configuration()),
        }
    }

    /// Returns the partner identifier.
    #[must_use]
    pub fn partner_id(&self) -> &str {
        &self.partner_id
    }

    /// Returns the profile key.
    #[must_use]
    pub fn profile_key(&self) -> &str {
        &self.profile_key
    }

    pub(crate) fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("partner_id", &self.partner_id)
            .field("profile_key", &self.profile_key)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("partner_id", &self.partner_id)
            .field("profile_key", &self.profile_key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
