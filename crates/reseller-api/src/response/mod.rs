//! Typed response deserializer.
//!
//! Responses are XML documents whose root element holds the result fields:
//!
//! ```text
//! <response>
//!   <success>true</success>
//!   <resultcode>0</resultcode>
//!   <resultmessage>OK</resultmessage>
//! </response>
//! ```
//!
//! Leaf values are coerced by field name through a static table
//! ([`field_type`]), never by looking at the text. `success` and
//! `resultcode` are mandatory; a response without them is an error.

mod coerce;
mod tree;
mod value;

pub use coerce::{FieldType, field_type};
pub use value::{Fields, Value};

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::{Error, Result};

/// Parsed service response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    success: bool,
    result_code: i64,
    fields: Fields,
}

impl Response {
    /// Parses a textual XML response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedResponse`] if the text is not well-formed XML
    /// and [`Error::SchemaViolation`] if `success` or `resultcode` is missing
    /// or a typed field cannot be coerced.
    pub fn parse(raw: &str) -> Result<Self> {
        let fields = tree::read_document(raw)?;
        Self::from_fields(fields)
    }

    /// Parses a raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] ("Response is not a String") if the
    /// body is not UTF-8 text, before any XML parsing. Otherwise as
    /// [`Response::parse`].
    pub fn from_bytes(raw: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(raw).map_err(|_| Error::not_a_string())?;
        Self::parse(text)
    }

    /// Validates an already-built field map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaViolation`] if a mandatory field is absent or
    /// not of its declared type.
    pub fn from_fields(fields: Fields) -> Result<Self> {
        let success = match fields.get("success") {
            Some(Value::Boolean(b)) => *b,
            Some(_) => return Err(Error::unexpected_type("success")),
            None => return Err(Error::missing_field("success")),
        };
        let result_code = match fields.get("resultcode") {
            Some(Value::Integer(n)) => *n,
            Some(_) => return Err(Error::unexpected_type("resultcode")),
            None => return Err(Error::missing_field("resultcode")),
        };

        debug!(success, result_code, fields = fields.len(), "Parsed response");

        Ok(Self {
            success,
            result_code,
            fields,
        })
    }

    /// Returns the `success` flag.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.success
    }

    /// Returns the `resultcode`.
    #[must_use]
    pub const fn result_code(&self) -> i64 {
        self.result_code
    }

    /// Returns the `resultmessage`, if present.
    #[must_use]
    pub fn result_message(&self) -> Option<&str> {
        self.get("resultmessage").and_then(Value::as_str)
    }

    /// Looks up a top-level field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns all top-level fields, including `success` and `resultcode`.
    #[must_use]
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Consumes the response, returning its fields.
    #[must_use]
    pub fn into_fields(self) -> Fields {
        self.fields
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<response>
    <success>true</success>
    <resultcode>0</resultcode>
    <resultmessage>Account is valid</resultmessage>
</response>"#;

    #[test]
    fn test_parse_sample() {
        let response = Response::parse(SAMPLE).unwrap();
        assert!(response.success());
        assert_eq!(response.result_code(), 0);
        assert_eq!(response.result_message(), Some("Account is valid"));
        assert_eq!(response.get("success"), Some(&Value::Boolean(true)));
    }

    #[test]
    fn test_numeric_and_word_forms_agree() {
        let numeric = Response::parse(
            "<r><success>1</success><resultcode>5</resultcode><resultmessage>x</resultmessage></r>",
        )
        .unwrap();
        let word = Response::parse(
            "<r><success>true</success><resultcode>5</resultcode><resultmessage>x</resultmessage></r>",
        )
        .unwrap();
        assert_eq!(numeric, word);
        assert!(numeric.success());
    }

    #[test]
    fn test_missing_mandatory_fields() {
        let err = Response::parse("<r><resultcode>0</resultcode></r>").unwrap_err();
        assert_eq!(err, Error::missing_field("success"));

        let err = Response::parse("<r><success>false</success></r>").unwrap_err();
        assert_eq!(err, Error::missing_field("resultcode"));

        let err = Response::parse("<r/>").unwrap_err();
        assert!(matches!(err, Error::SchemaViolation { .. }));
    }

    #[test]
    fn test_mandatory_field_wrong_shape() {
        let err = Response::parse(
            "<r><success><nested>1</nested></success><resultcode>0</resultcode></r>",
        )
        .unwrap_err();
        assert_eq!(err, Error::unexpected_type("success"));

        let err = Response::parse("<r><success>maybe</success><resultcode>0</resultcode></r>")
            .unwrap_err();
        assert_eq!(err, Error::unexpected_type("success"));
    }

    #[test]
    fn test_malformed() {
        let err = Response::parse("<html><body>502 Bad Gateway").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[test]
    fn test_bad_attribute_is_malformed() {
        let err = Response::parse("<r a=><success>1</success><resultcode>0</resultcode></r>")
            .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[test]
    fn test_from_bytes_rejects_non_text() {
        let err = Response::from_bytes(&[0xff, 0xfe, 0x00, 0x01]).unwrap_err();
        assert_eq!(err.message(), "Response is not a String");
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn test_from_bytes_text() {
        let response = Response::from_bytes(SAMPLE.as_bytes()).unwrap();
        assert!(response.success());
    }

    #[test]
    fn test_serialize_to_json() {
        let response = Response::parse(SAMPLE).unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], serde_json::json!(true));
        assert_eq!(json["resultcode"], serde_json::json!(0));
        assert_eq!(json["resultmessage"], serde_json::json!("Account is valid"));
    }
}
