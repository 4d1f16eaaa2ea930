//! Configuration from prefixed environment variables.
//!
//! Responsibilities:
//! - Select variables whose name starts with the prefix and strip it to get the key.
//! - Parse each value as a literal, keeping the raw string when that fails.
//!
//! Does NOT handle:
//! - Reading the live process environment (the caller passes an `Environment`).
//! - Connection-string assembly (see `urls.rs`).
//!
//! Invariants:
//! - Prefix matching is case-sensitive.
//! - An empty value never clears a key: the existing value is re-used instead.
//!   An existing string is parsed again, any other value is kept as is, and a
//!   key with no existing value becomes null.
//! - A variable named exactly like the prefix has no key and is skipped.
//! - Literal parse failures are never fatal.

use crate::literal::parse_or_string;
use crate::types::{Config, ConfigValue, Environment};

/// Apply every `<prefix><KEY>` variable in `env` to `config`.
///
/// Returns the keys written, in variable-name order.
pub fn load_environment(config: &mut Config, env: &Environment, prefix: &str) -> Vec<String> {
    let mut applied = Vec::new();

    for (varname, raw) in env.with_prefix(prefix) {
        let key = &varname[prefix.len()..];
        if key.is_empty() {
            tracing::debug!(varname, "skipping variable with empty key");
            continue;
        }

        let value = if raw.is_empty() {
            match config.get(key) {
                Some(ConfigValue::String(existing)) => parse_or_string(existing),
                Some(existing) => existing.clone(),
                None => ConfigValue::Null,
            }
        } else {
            parse_or_string(raw)
        };

        tracing::debug!("{} = {}", key, value);
        config.insert(key, value);
        applied.push(key.to_string());
    }

    applied
}
