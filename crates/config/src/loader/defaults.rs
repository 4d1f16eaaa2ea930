//! Required configuration values filled in after every other source.
//!
//! Responsibilities:
//! - Guarantee `SECRET_KEY`, `ALLOWED_HTML_TAGS` and `ALLOWED_HTML_ATTRS` are set.
//! - Raise a warning when the insecure secret-key placeholder is used.
//!
//! Does NOT handle:
//! - Generating a random secret; the placeholder is deliberately obvious.
//!
//! Invariants:
//! - Never overwrites a value that is already present.
//! - A `SECRET_KEY` explicitly set to null counts as unset.
//! - Running the pass twice yields the same mapping and no new warnings.

use serde_json::{Map, Value};

use super::report::ConfigWarning;
use crate::constants::{
    ALLOWED_HTML_ATTRS, ALLOWED_HTML_ATTRS_KEY, ALLOWED_HTML_TAGS, ALLOWED_HTML_TAGS_KEY,
    SECRET_KEY, SECRET_KEY_FALLBACK,
};
use crate::types::{Config, ConfigValue};

/// Fill in required keys that are still unset.
///
/// Returns one `ConfigWarning::InsecureSecretKey` if the placeholder secret
/// had to be assigned.
pub fn apply_defaults(config: &mut Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.get(SECRET_KEY).is_none_or(ConfigValue::is_null) {
        config.insert(SECRET_KEY, Value::String(SECRET_KEY_FALLBACK.to_string()));
        let warning = ConfigWarning::InsecureSecretKey;
        tracing::warn!("{}", warning);
        warnings.push(warning);
    }

    config.set_default(ALLOWED_HTML_TAGS_KEY, default_html_tags());
    config.set_default(ALLOWED_HTML_ATTRS_KEY, default_html_attrs());

    warnings
}

/// The default HTML tag allow-list as a configuration value.
pub fn default_html_tags() -> ConfigValue {
    Value::Array(
        ALLOWED_HTML_TAGS
            .iter()
            .map(|tag| Value::String((*tag).to_string()))
            .collect(),
    )
}

/// The default HTML attribute allow-list as a configuration value.
pub fn default_html_attrs() -> ConfigValue {
    let map: Map<String, Value> = ALLOWED_HTML_ATTRS
        .iter()
        .map(|(tag, attrs)| {
            let attrs = attrs.iter().map(|a| Value::String((*a).to_string())).collect();
            ((*tag).to_string(), Value::Array(attrs))
        })
        .collect();
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default() {
        let mut config = Config::new();
        let warnings = apply_defaults(&mut config);
        assert_eq!(warnings, vec![ConfigWarning::InsecureSecretKey]);
        assert_eq!(config.get("SECRET_KEY"), Some(&json!("CHANGE_ME")));

        let mut config: Config = [("SECRET_KEY", json!("thisisasecret"))].into_iter().collect();
        let warnings = apply_defaults(&mut config);
        assert!(warnings.is_empty());
        assert_eq!(config.get("SECRET_KEY"), Some(&json!("thisisasecret")));
    }

    #[test]
    fn test_null_secret_key_counts_as_unset() {
        let mut config: Config = [("SECRET_KEY", json!(null))].into_iter().collect();
        assert_eq!(apply_defaults(&mut config).len(), 1);
        assert_eq!(config.get("SECRET_KEY"), Some(&json!("CHANGE_ME")));
    }

    #[test]
    fn test_second_pass_is_quiet() {
        let mut config = Config::new();
        assert_eq!(apply_defaults(&mut config).len(), 1);
        let snapshot = config.clone();
        assert!(apply_defaults(&mut config).is_empty());
        assert_eq!(config, snapshot);
    }

    #[test]
    fn test_html_allow_lists() {
        let mut config = Config::new();
        apply_defaults(&mut config);

        let tags: Vec<String> = config.get_as("ALLOWED_HTML_TAGS").unwrap().unwrap();
        assert_eq!(tags.len(), 31);
        assert!(tags.iter().any(|t| t == "blockquote"));

        let attrs = config.get("ALLOWED_HTML_ATTRS").unwrap();
        assert_eq!(attrs["*"], json!(["class"]));
        assert_eq!(attrs["a"], json!(["href", "title", "name", "class", "rel"]));
    }

    #[test]
    fn test_existing_allow_lists_kept() {
        let mut config: Config = [
            ("SECRET_KEY", json!("s")),
            ("ALLOWED_HTML_TAGS", json!(["p"])),
            ("ALLOWED_HTML_ATTRS", json!({})),
        ]
        .into_iter()
        .collect();
        apply_defaults(&mut config);
        assert_eq!(config.get("ALLOWED_HTML_TAGS"), Some(&json!(["p"])));
        assert_eq!(config.get("ALLOWED_HTML_ATTRS"), Some(&json!({})));
    }
}
