//! Configuration from an explicit module and from caller overrides.
//!
//! Responsibilities:
//! - Copy the configuration keys of an explicitly supplied namespace.
//! - Copy caller-supplied overrides without any filtering.

use crate::types::{Config, ConfigValue, Namespace};

/// Apply the configuration keys of `module`, if one is given.
///
/// Returns the number of keys written.
pub fn load_module(config: &mut Config, module: Option<&Namespace>) -> usize {
    let Some(module) = module else {
        return 0;
    };
    let written = module.apply_to(config);
    tracing::debug!(keys = written, "applied configuration module");
    written
}

/// Apply caller overrides, overwriting existing keys unconditionally.
pub fn apply_overrides<K, I>(config: &mut Config, overrides: I)
where
    K: Into<String>,
    I: IntoIterator<Item = (K, ConfigValue)>,
{
    config.update(overrides);
}
