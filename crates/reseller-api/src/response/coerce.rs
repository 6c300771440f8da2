//! Static coercion table for response leaves.

use super::value::Value;
use crate::error::{Error, Result};

/// Output type of a response leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// `true`/`false`/`1`/`0`.
    Boolean,
    /// Signed decimal integer.
    Integer,
    /// Text, kept as is.
    Text,
}

/// Fields with a non-text type. Anything not listed is text.
const COERCION_TABLE: &[(&str, FieldType)] = &[
    ("success", FieldType::Boolean),
    ("valid", FieldType::Boolean),
    ("claimed", FieldType::Boolean),
    ("active", FieldType::Boolean),
    ("resultcode", FieldType::Integer),
    ("count", FieldType::Integer),
    ("total", FieldType::Integer),
    ("profile_id", FieldType::Integer),
    ("resultmessage", FieldType::Text),
];

/// Returns the declared type for a field name.
#[must_use]
pub fn field_type(name: &str) -> FieldType {
    COERCION_TABLE
        .iter()
        .find(|(field, _)| *field == name)
        .map_or(FieldType::Text, |(_, ty)| *ty)
}

/// Coerces leaf text according to the table.
///
/// # Errors
///
/// Returns [`Error::SchemaViolation`] if a typed field holds text of the
/// wrong shape.
pub(crate) fn coerce_leaf(name: &str, text: &str) -> Result<Value> {
    match field_type(name) {
        FieldType::Boolean => parse_bool(text)
            .map(Value::Boolean)
            .ok_or_else(|| Error::unexpected_type(name)),
        FieldType::Integer => text
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| Error::unexpected_type(name)),
        FieldType::Text => Ok(Value::Text(text.to_string())),
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    if text == "1" || text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text == "0" || text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_table_types() {
        assert_eq!(field_type("success"), FieldType::Boolean);
        assert_eq!(field_type("resultcode"), FieldType::Integer);
        assert_eq!(field_type("resultmessage"), FieldType::Text);
        assert_eq!(field_type("anything_else"), FieldType::Text);
    }

    #[test]
    fn test_every_table_entry_accepts_its_form() {
        for (name, ty) in COERCION_TABLE {
            let sample = match ty {
                FieldType::Boolean => "true",
                FieldType::Integer => "12",
                FieldType::Text => "hello",
            };
            assert!(coerce_leaf(name, sample).is_ok(), "{name} rejected {sample}");
        }
    }

    #[test]
    fn test_boolean_surface_forms() {
        for text in ["true", "TRUE", "True", "1"] {
            assert_eq!(coerce_leaf("success", text).unwrap(), Value::Boolean(true));
        }
        for text in ["false", "FALSE", "0"] {
            assert_eq!(coerce_leaf("success", text).unwrap(), Value::Boolean(false));
        }
    }

    #[test]
    fn test_boolean_rejects_other_text() {
        for text in ["yes", "", "2", "truth"] {
            let err = coerce_leaf("success", text).unwrap_err();
            assert!(matches!(err, Error::SchemaViolation { ref field, .. } if field == "success"));
        }
    }

    #[test]
    fn test_integer() {
        assert_eq!(coerce_leaf("resultcode", "0").unwrap(), Value::Integer(0));
        assert_eq!(coerce_leaf("resultcode", "-42").unwrap(), Value::Integer(-42));
        assert!(coerce_leaf("resultcode", "4.2").is_err());
        assert!(coerce_leaf("resultcode", "").is_err());
    }

    #[test]
    fn test_type_fixed_by_name_not_value() {
        // A text field that looks boolean stays text.
        assert_eq!(
            coerce_leaf("resultmessage", "true").unwrap(),
            Value::Text("true".to_string())
        );
        assert_eq!(
            coerce_leaf("username", "1").unwrap(),
            Value::Text("1".to_string())
        );
    }
}
