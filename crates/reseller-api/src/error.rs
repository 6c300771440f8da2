//! Error types for reseller API operations.

/// Result type alias for reseller API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Message carried by [`Error::Configuration`].
pub const MISSING_KEYS: &str = "Not all required keys are given";

/// Message carried by [`Error::Configuration`] for an unparseable base URL.
pub const INVALID_BASE_URL: &str = "Base URL is not a valid URL";

/// Message carried by [`Error::MissingArgument`] for account operations.
pub const MISSING_USERNAME_OR_PASSWORD: &str = "No username or password supplied";

/// Message carried by [`Error::MissingArgument`] for profile lookups.
pub const MISSING_PROFILE_FILTER: &str =
    "No username and password or partner_id_customer supplied";

/// Message carried by [`Error::InvalidInput`] for non-textual responses.
pub const RESPONSE_NOT_A_STRING: &str = "Response is not a String";

/// Reseller API error kinds.
///
/// Every variant carries a stable `error` message (see [`Error::message`]).
/// Callers should match on the variant rather than on the message text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Client configuration is incomplete or invalid. Raised at construction.
    #[error("{error}{}", fmt_detail(.detail.as_deref()))]
    Configuration {
        /// Stable error message.
        error: String,
        /// Optional detail.
        detail: Option<String>,
    },

    /// A required call argument is absent. Raised before any network attempt.
    #[error("{error}")]
    MissingArgument {
        /// Stable error message.
        error: String,
    },

    /// A utility was called with input of the wrong kind.
    #[error("{error}{}", fmt_detail(.detail.as_deref()))]
    InvalidInput {
        /// Stable error message.
        error: String,
        /// Optional detail.
        detail: Option<String>,
    },

    /// The response body could not be parsed as XML.
    #[error("{error}: {detail}")]
    MalformedResponse {
        /// Stable error message.
        error: String,
        /// Parser message.
        detail: String,
    },

    /// The response parsed but does not satisfy the response contract.
    #[error("{error}: {field}")]
    SchemaViolation {
        /// Stable error message.
        error: String,
        /// Offending field name.
        field: String,
    },

    /// Network or HTTP failure.
    #[error("{error}: {detail}")]
    Transport {
        /// Stable error message.
        error: String,
        /// HTTP status, if the server answered.
        status: Option<u16>,
        /// Underlying failure.
        detail: String,
    },
}

fn fmt_detail(detail: Option<&str>) -> String {
    detail.map(|d| format!(": {d}")).unwrap_or_default()
}

impl Error {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration() -> Self {
        Self::Configuration {
            error: MISSING_KEYS.to_string(),
            detail: None,
        }
    }

    /// Creates the configuration error for a base URL that does not parse.
    #[must_use]
    pub fn invalid_base_url(err: &url::ParseError) -> Self {
        Self::Configuration {
            error: INVALID_BASE_URL.to_string(),
            detail: Some(err.to_string()),
        }
    }

    /// Creates a missing argument error with the given message.
    #[must_use]
    pub fn missing_argument(error: impl Into<String>) -> Self {
        Self::MissingArgument {
            error: error.into(),
        }
    }

    /// Creates the error for a response that is not text.
    #[must_use]
    pub fn not_a_string() -> Self {
        Self::InvalidInput {
            error: RESPONSE_NOT_A_STRING.to_string(),
            detail: None,
        }
    }

    /// Creates an invalid input error with a custom message.
    #[must_use]
    pub fn invalid_input(error: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidInput {
            error: error.into(),
            detail: Some(detail.into()),
        }
    }

    /// Creates a malformed response error.
    #[must_use]
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            error: "Response is not valid XML".to_string(),
            detail: detail.into(),
        }
    }

    /// Creates a schema violation for a missing mandatory field.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::SchemaViolation {
            error: "Response is missing required fields".to_string(),
            field: field.into(),
        }
    }

    /// Creates a schema violation for a field whose text cannot be coerced.
    #[must_use]
    pub fn unexpected_type(field: impl Into<String>) -> Self {
        Self::SchemaViolation {
            error: "Response field has an unexpected type".to_string(),
            field: field.into(),
        }
    }

    /// Creates a transport error.
    #[must_use]
    pub fn transport(status: Option<u16>, detail: impl Into<String>) -> Self {
        Self::Transport {
            error: "Request to the reseller service failed".to_string(),
            status,
            detail: detail.into(),
        }
    }

    /// Returns the stable `error` message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Configuration { error, .. }
            | Self::MissingArgument { error }
            | Self::InvalidInput { error, .. }
            | Self::MalformedResponse { error, .. }
            | Self::SchemaViolation { error, .. }
            | Self::Transport { error, .. } => error,
        }
    }

    /// Returns the structured detail, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::MissingArgument { .. } => None,
            Self::Configuration { detail, .. } | Self::InvalidInput { detail, .. } => {
                detail.as_deref()
            }
            Self::MalformedResponse { detail, .. } | Self::Transport { detail, .. } => {
                Some(detail)
            }
            Self::SchemaViolation { field, .. } => Some(field),
        }
    }

    /// Returns true for failures a caller may reasonably retry.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

impl From<reqwest::Error> for Error {
    /// Drops the request URL first: its query carries the login and signature.
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        Self::transport(err.status().map(|s| s.as_u16()), err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Self::malformed(err.to_string())
    }
}

impl From<quick_xml::escape::EscapeError> for Error {
    fn from(err: quick_xml::escape::EscapeError) -> Self {
        Self::malformed(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::transport(None, format!("invalid URL: {err}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_message() {
        let err = Error::configuration();
        assert_eq!(err.message(), "Not all required keys are given");
        assert_eq!(err.to_string(), "Not all required keys are given");
        assert!(err.detail().is_none());
    }

    #[test]
    fn test_invalid_base_url_is_configuration() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err = Error::invalid_base_url(&parse_err);
        assert!(matches!(err, Error::Configuration { .. }));
        assert_eq!(err.message(), "Base URL is not a valid URL");
        assert_eq!(err.detail(), Some(parse_err.to_string().as_str()));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_not_a_string_message() {
        let err = Error::not_a_string();
        assert_eq!(err.message(), "Response is not a String");
        assert_eq!(err.to_string(), "Response is not a String");
    }

    #[test]
    fn test_schema_violation_names_field() {
        let err = Error::missing_field("success");
        assert_eq!(err.detail(), Some("success"));
        assert!(err.to_string().ends_with(": success"));
    }

    #[test]
    fn test_transport_is_distinct() {
        let err = Error::transport(Some(503), "HTTP 503");
        assert!(err.is_transport());
        assert!(!Error::malformed("eof").is_transport());
        assert!(matches!(err, Error::Transport { status: Some(503), .. }));
    }
}
