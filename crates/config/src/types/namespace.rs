//! Module-like configuration namespaces.
//!
//! Responsibilities:
//! - Represent a resolved source of named attributes (an explicit module or
//!   an entry-point target).
//! - Build namespaces from any `Serialize` record or from explicit pairs.
//! - Define which attribute names count as configuration keys.
//!
//! Does NOT handle:
//! - Copying attributes into a `Config` (see `loader::module`).
//!
//! Invariants:
//! - A namespace keeps every attribute; filtering happens when it is applied.

use serde::Serialize;

use crate::loader::ConfigError;
use crate::types::{Config, ConfigValue};

/// Returns `true` for names that are configuration keys.
///
/// A key has at least one cased character, no lower-case characters, and
/// does not start with an underscore: `SECRET_KEY` and `DB2` qualify,
/// `secret_key`, `_PRIVATE` and `123` do not.
pub fn is_config_key(name: &str) -> bool {
    !name.starts_with('_')
        && name.chars().any(char::is_uppercase)
        && !name.chars().any(char::is_lowercase)
}

/// A read-only set of named attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Namespace {
    attrs: Vec<(String, ConfigValue)>,
}

impl Namespace {
    /// Build a namespace from the fields of a serializable record.
    ///
    /// Field names are taken as serialized, so upper-case fields (or
    /// `#[serde(rename_all = "SCREAMING_SNAKE_CASE")]`) become keys.
    pub fn from_serialize<T: Serialize + ?Sized>(record: &T) -> Result<Self, ConfigError> {
        match serde_json::to_value(record)? {
            ConfigValue::Object(map) => Ok(Self {
                attrs: map.into_iter().collect(),
            }),
            other => Err(ConfigError::NamespaceNotMapping {
                kind: value_kind(&other),
            }),
        }
    }

    /// Build a namespace from explicit attribute pairs.
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ConfigValue)>,
    {
        Self {
            attrs: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Every attribute, in declaration order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Only the attributes named like configuration keys.
    pub fn config_attrs(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.attrs().filter(|(k, _)| is_config_key(k))
    }

    /// Copy the configuration-key attributes into `config`.
    ///
    /// Returns the number of keys written.
    pub fn apply_to(&self, config: &mut Config) -> usize {
        let mut written = 0;
        for (key, value) in self.config_attrs() {
            config.insert(key, value.clone());
            written += 1;
        }
        written
    }

    /// Number of attributes, configuration keys or not.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Whether the namespace has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

fn value_kind(value: &ConfigValue) -> &'static str {
    match value {
        ConfigValue::Null => "null",
        ConfigValue::Bool(_) => "boolean",
        ConfigValue::Number(_) => "number",
        ConfigValue::String(_) => "string",
        ConfigValue::Array(_) => "sequence",
        ConfigValue::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_config_key() {
        assert!(is_config_key("SECRET_KEY"));
        assert!(is_config_key("DB2"));
        assert!(is_config_key("A"));
        assert!(!is_config_key("secret_key"));
        assert!(!is_config_key("Mixed_Case"));
        assert!(!is_config_key("_PRIVATE"));
        assert!(!is_config_key("123"));
        assert!(!is_config_key(""));
    }

    #[test]
    fn test_from_serialize_struct() {
        #[derive(Serialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        struct Settings {
            site_name: String,
            max_upload: u32,
        }

        let ns = Namespace::from_serialize(&Settings {
            site_name: "demo".into(),
            max_upload: 10,
        })
        .unwrap();

        let mut config = Config::new();
        assert_eq!(ns.apply_to(&mut config), 2);
        assert_eq!(config.get("SITE_NAME"), Some(&json!("demo")));
        assert_eq!(config.get("MAX_UPLOAD"), Some(&json!(10)));
    }

    #[test]
    fn test_lower_case_attributes_are_skipped() {
        let ns = Namespace::from_pairs([
            ("TESTVAR", json!(true)),
            ("helper", json!("ignored")),
            ("_HIDDEN", json!("ignored")),
        ]);

        let mut config = Config::new();
        ns.apply_to(&mut config);
        assert_eq!(config.len(), 1);
        assert_eq!(config.get("TESTVAR"), Some(&json!(true)));
    }

    #[test]
    fn test_non_mapping_record_rejected() {
        let result = Namespace::from_serialize(&vec![1, 2, 3]);
        assert!(matches!(
            result,
            Err(ConfigError::NamespaceNotMapping { kind: "sequence" })
        ));
    }
}
