//! Typed response values.

use std::collections::BTreeMap;

use serde::Serialize;

/// Field name to value mapping.
pub type Fields = BTreeMap<String, Value>;

/// A typed response value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Leaf coerced to a boolean.
    Boolean(bool),
    /// Leaf coerced to an integer.
    Integer(i64),
    /// Any other leaf.
    Text(String),
    /// Element with child elements.
    Object(Fields),
    /// Repeated sibling elements, in document order.
    List(Vec<Value>),
}

impl Value {
    /// Returns the boolean, if this is one.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is one.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the text, if this is a text leaf.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the nested fields, if this is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&Fields> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Looks up a nested field, if this is an object.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Self> {
        self.as_object().and_then(|fields| fields.get(name))
    }

    /// Iterates over list items, or over `self` alone when not a list.
    ///
    /// A single `<profile>` and several `<profile>` siblings read the same way.
    pub fn items(&self) -> std::slice::Iter<'_, Self> {
        match self {
            Self::List(items) => items.iter(),
            other => std::slice::from_ref(other).iter(),
        }
    }
}
