//! Request signing.
//!
//! Every call carries a [`BasicData`] envelope (partner id, profile key,
//! timestamp) followed by its own parameters. The signature is an
//! HMAC-SHA256 over the canonical query in this order:
//!
//! ```text
//! partner_id=..&profile_key=..&timestamp=..&<operation params in declared order>
//! ```
//!
//! Keys and values are encoded with [`encode_canonical`] and the hex digest is
//! appended as the final `signature` parameter.

use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

use crate::credentials::Credentials;
use crate::encoding::encode_canonical;
use crate::error::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Name of the appended digest parameter.
pub const SIGNATURE_PARAM: &str = "signature";

/// Identifying fields attached to every signed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BasicData {
    /// Partner identifier, copied verbatim.
    pub partner_id: String,
    /// Profile key, copied verbatim.
    pub profile_key: String,
    /// Seconds since the Unix epoch at creation.
    pub timestamp: i64,
}

impl BasicData {
    /// Creates an envelope stamped with the current time.
    #[must_use]
    pub fn new(credentials: &Credentials) -> Self {
        Self::with_timestamp(credentials, Utc::now().timestamp())
    }

    /// Creates an envelope with an explicit timestamp.
    #[must_use]
    pub fn with_timestamp(credentials: &Credentials, timestamp: i64) -> Self {
        Self {
            partner_id: credentials.partner_id().to_string(),
            profile_key: credentials.profile_key().to_string(),
            timestamp,
        }
    }

    fn into_pairs(self) -> [(String, String); 3] {
        [
            ("partner_id".to_string(), self.partner_id),
            ("profile_key".to_string(), self.profile_key),
            ("timestamp".to_string(), self.timestamp.to_string()),
        ]
    }
}

/// Signs outgoing parameters with the shared secret.
#[derive(Debug, Clone, Copy)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
}

impl<'a> RequestSigner<'a> {
    /// Creates a signer borrowing validated credentials.
    #[must_use]
    pub const fn new(credentials: &'a Credentials) -> Self {
        Self { credentials }
    }

    /// Builds a fresh envelope for one call.
    #[must_use]
    pub fn basic_data(&self) -> BasicData {
        BasicData::new(self.credentials)
    }

    /// Signs the envelope plus operation parameters.
    ///
    /// `params` keep the order given; the envelope always comes first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the HMAC rejects the secret as a key.
    pub fn sign(&self, basic: BasicData, params: &[(&str, &str)]) -> Result<SignedParams> {
        let pairs: Vec<(String, String)> = basic
            .into_pairs()
            .into_iter()
            .chain(
                params
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), (*v).to_string())),
            )
            .collect();

        let base = signature_base(&pairs);
        let signature = digest(self.credentials.secret(), &base)?;

        Ok(SignedParams {
            pairs,
            base,
            signature,
        })
    }
}

/// Renders `encode(key)=encode(value)` pairs joined with `&`.
#[must_use]
pub fn signature_base(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_canonical(k), encode_canonical(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn digest(secret: &[u8], message: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| Error::invalid_input("Secret is not a valid signing key", e.to_string()))?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Signed parameter list, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedParams {
    pairs: Vec<(String, String)>,
    base: String,
    signature: String,
}

impl SignedParams {
    /// Raw (unencoded) parameters in signing order, without the signature.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Looks up a raw parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Canonical string the digest was computed over.
    #[must_use]
    pub fn signature_base(&self) -> &str {
        &self.base
    }

    /// Lowercase hex HMAC-SHA256 digest.
    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Exact query string to put on the wire.
    #[must_use]
    pub fn query_string(&self) -> String {
        format!("{}&{SIGNATURE_PARAM}={}", self.base, self.signature)
    }
}
