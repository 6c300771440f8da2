//! Canonical percent-encoding.
//!
//! The service verifies signatures against a strict URI-component encoding:
//! the standard component encoder, plus the six characters `~ * ' ( ) !`
//! escaped with lowercase hex. Alphanumerics and `-_.` pass through.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::error::{Error, Result};

/// Characters a URI-component encoder leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Escapes for characters the component encoder skips but the service expects encoded.
const fn reserved_escape(ch: char) -> Option<&'static str> {
    match ch {
        '~' => Some("%7e"),
        '*' => Some("%2a"),
        '\'' => Some("%27"),
        '(' => Some("%28"),
        ')' => Some("%29"),
        '!' => Some("%21"),
        _ => None,
    }
}

/// Encodes a raw field value into its canonical form.
///
/// Apply exactly once per raw value: `%` is itself encoded, so a second
/// pass double-encodes.
#[must_use]
pub fn encode_canonical(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());

    for chunk in utf8_percent_encode(raw, URI_COMPONENT) {
        for ch in chunk.chars() {
            match reserved_escape(ch) {
                Some(escape) => out.push_str(escape),
                None => out.push(ch),
            }
        }
    }

    out
}

/// Decodes a canonical string back to the raw value.
///
/// Accepts either hex case.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the decoded bytes are not UTF-8.
pub fn decode_canonical(encoded: &str) -> Result<String> {
    percent_decode_str(encoded)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| Error::invalid_input("Encoded value is not UTF-8", e.to_string()))
}
