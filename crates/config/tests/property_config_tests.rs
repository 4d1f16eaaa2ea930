//! Property-based tests for configuration merging.
//!
//! These tests use randomly generated inputs to check the merge rules that
//! must hold for any data, not just the hand-picked cases in unit tests.
//!
//! Test coverage:
//! - Literal parsing: integers and quoted strings parse back to themselves
//! - Environment loader: plain text that is not a literal survives unchanged
//! - Overrides: the last writer wins for every key
//! - Defaults: a second pass never changes the mapping

use proptest::prelude::*;
use serde_json::json;

use invenio_config::{
    Config, ConfigValue, Environment, apply_defaults, apply_overrides, load_environment,
    normalize_prefix, parse_literal,
};

/// Strategy for upper-case configuration keys.
fn key_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9_]{0,15}"
}

/// Strategy for string contents without quotes or backslashes.
fn plain_text_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,:/@-]{0,40}"
}

proptest! {
    #[test]
    fn prop_integers_parse_to_themselves(n in any::<i64>()) {
        prop_assert_eq!(parse_literal(&n.to_string()).unwrap(), json!(n));
    }

    #[test]
    fn prop_quoted_strings_parse_to_contents(s in plain_text_strategy()) {
        prop_assert_eq!(parse_literal(&format!("'{s}'")).unwrap(), json!(s.clone()));
        prop_assert_eq!(parse_literal(&format!("\"{s}\"")).unwrap(), json!(s));
    }

    #[test]
    fn prop_env_words_are_kept_verbatim(
        key in key_strategy(),
        words in prop::collection::vec("[a-z]{3,8}", 2..5),
    ) {
        // Two or more bare words never form a literal.
        let raw = words.join(" ");
        let env: Environment = [(format!("APP_{key}"), raw.clone())].into_iter().collect();
        let mut config = Config::new();
        load_environment(&mut config, &env, "APP_");
        prop_assert_eq!(config.get(&key), Some(&ConfigValue::String(raw)));
    }

    #[test]
    fn prop_last_override_wins(
        pairs in prop::collection::vec((key_strategy(), any::<i32>()), 1..20),
    ) {
        let mut config = Config::new();
        apply_overrides(&mut config, pairs.iter().map(|(k, v)| (k.clone(), json!(v))));

        for (key, _) in &pairs {
            let last = pairs.iter().rev().find(|(k, _)| k == key).map(|(_, v)| json!(v));
            prop_assert_eq!(config.get(key), last.as_ref());
        }
    }

    #[test]
    fn prop_defaults_are_idempotent(
        pairs in prop::collection::vec((key_strategy(), plain_text_strategy()), 0..10),
    ) {
        let mut config: Config = pairs.into_iter().map(|(k, v)| (k, json!(v))).collect();
        apply_defaults(&mut config);
        let snapshot = config.clone();
        prop_assert!(apply_defaults(&mut config).is_empty());
        prop_assert_eq!(config, snapshot);
    }

    #[test]
    fn prop_normalized_prefix_has_no_trailing_underscore(prefix in "[A-Z_]{0,12}") {
        let normalized = normalize_prefix(Some(&prefix));
        prop_assert!(!normalized.is_empty());
        prop_assert!(!normalized.ends_with('_'));
    }
}
