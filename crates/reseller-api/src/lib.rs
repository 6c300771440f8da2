//! # reseller-api
//!
//! Client library for the reseller account service.
//!
//! ## Features
//!
//! - **Canonical encoding**: the service's strict percent-encoding
//!   ([`encode_canonical`])
//! - **Request signing**: per-call envelope plus HMAC-SHA256 over a fixed
//!   parameter order ([`RequestSigner`])
//! - **Typed responses**: XML bodies coerced through a static field table
//!   ([`Response`])
//! - **Account operations**: claim, validity check, profile lookup
//!   ([`Client`])
//!
//! ## Quick Start
//!
//! ```ignore
//! use reseller_api::{Client, ClientConfig, ProfileFilter};
//!
//! #[tokio::main]
//! async fn main() -> reseller_api::Result<()> {
//!     let config = ClientConfig::new("partner_id", "profile_key", "secret");
//!     let client = Client::new(&config)?;
//!
//!     let response = client.check_valid("username", "password").await?;
//!     if response.success() {
//!         println!("valid: {:?}", response.result_message());
//!     }
//!
//!     let profiles = client.profiles(&ProfileFilter::customer("c-1")).await?;
//!     println!("{}", serde_json::to_string_pretty(&profiles).unwrap());
//!     Ok(())
//! }
//! ```
//!
//! ### Static utilities
//!
//! ```ignore
//! use reseller_api::{Response, encode_canonical, legal_forms};
//!
//! assert_eq!(encode_canonical("a(b)!"), "a%28b%29%21");
//! assert!(!legal_forms().is_empty());
//!
//! let response = Response::parse("<r><success>1</success><resultcode>0</resultcode></r>")?;
//! assert!(response.success());
//! ```
//!
//! ## Errors
//!
//! Every failure is one variant of [`Error`], each carrying a stable
//! message. Transport failures are never reported as parse failures, and
//! no failure is turned into a default response.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod client;
pub mod credentials;
pub mod encoding;
mod error;
pub mod legal_forms;
pub mod response;
pub mod signer;
pub mod transport;

pub use client::{Client, ProfileFilter};
pub use credentials::{ClientConfig, Credentials};
pub use encoding::{decode_canonical, encode_canonical};
pub use error::{
    Error, INVALID_BASE_URL, MISSING_KEYS, MISSING_PROFILE_FILTER, MISSING_USERNAME_OR_PASSWORD,
    RESPONSE_NOT_A_STRING, Result,
};
pub use legal_forms::{LegalForm, legal_form, legal_forms};
pub use response::{FieldType, Fields, Response, Value};
pub use signer::{BasicData, RequestSigner, SignedParams};
pub use transport::{HttpTransport, Transport, TransportConfig};

// Clients are shared across tasks.
const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    let _ = assert_send_sync::<Client>;
    let _ = assert_send_sync::<Credentials>;
    let _ = assert_send_sync::<Error>;
};
