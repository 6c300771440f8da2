//! Legal forms of business entities accepted by the service.

use serde::Serialize;

/// A legal form: service key and display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegalForm {
    /// Value sent to the service.
    pub key: &'static str,
    /// Human-readable name.
    pub value: &'static str,
}

const fn form(key: &'static str, value: &'static str) -> LegalForm {
    LegalForm { key, value }
}

static LEGAL_FORMS: &[LegalForm] = &[
    form("eenmanszaak", "Eenmanszaak"),
    form("vof", "Vennootschap onder firma"),
    form("cv", "Commanditaire vennootschap"),
    form("maatschap", "Maatschap"),
    form("bv", "Besloten vennootschap"),
    form("nv", "Naamloze vennootschap"),
    form("vereniging", "Vereniging"),
    form("cooperatie", "Coöperatie"),
    form("stichting", "Stichting"),
    form("kerkgenootschap", "Kerkgenootschap"),
    form("buitenlandse_rechtsvorm", "Buitenlandse rechtsvorm"),
    form("particulier", "Particulier"),
    form("overheid", "Overheidsinstelling"),
    form("anders", "Anders"),
];

/// Returns the legal forms table in display order.
#[must_use]
pub fn legal_forms() -> &'static [LegalForm] {
    LEGAL_FORMS
}

/// Looks up a legal form by key.
#[must_use]
pub fn legal_form(key: &str) -> Option<&'static LegalForm> {
    LEGAL_FORMS.iter().find(|f| f.key == key)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_non_empty_with_key_and_value() {
        let forms = legal_forms();
        assert!(forms.len() > 1);
        for f in forms {
            assert!(!f.key.is_empty());
            assert!(!f.value.is_empty());
        }
    }

    #[test]
    fn test_keys_unique() {
        let keys: HashSet<_> = legal_forms().iter().map(|f| f.key).collect();
        assert_eq!(keys.len(), legal_forms().len());
    }

    #[test]
    fn test_lookup() {
        assert_eq!(legal_form("bv").unwrap().value, "Besloten vennootschap");
        assert!(legal_form("llc").is_none());
    }

    #[test]
    fn test_serializes_key_and_value() {
        let json = serde_json::to_value(legal_forms()).unwrap();
        assert_eq!(json[1]["key"], "vof");
        assert!(json[1].get("value").is_some());
    }
}
