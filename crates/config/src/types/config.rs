//! The configuration mapping attached to an application.
//!
//! Responsibilities:
//! - Store key/value pairs with last-writer-wins semantics.
//! - Offer fill-only writes (`set_default`) for fallback values.
//! - Offer typed extraction of values through serde.
//!
//! Does NOT handle:
//! - Key naming conventions (loaders filter before inserting).
//! - Precedence between sources (see `loader::builder`).
//!
//! Invariants:
//! - Iteration order is the sorted key order, so output is deterministic.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::loader::ConfigError;
use crate::types::Namespace;

/// A structured configuration value: string, boolean, number, null,
/// sequence or nested mapping.
pub type ConfigValue = serde_json::Value;

/// Mutable configuration mapping owned by the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config {
    values: BTreeMap<String, ConfigValue>,
}

impl Config {
    /// Create an empty configuration mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the configuration keys of `namespace` into a new mapping.
    pub fn from_namespace(namespace: &Namespace) -> Self {
        let mut config = Self::new();
        namespace.apply_to(&mut config);
        config
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    /// Look up a value and deserialize it into `T`.
    ///
    /// Returns `Ok(None)` if the key is absent and
    /// `ConfigError::InvalidValue` if the stored value has the wrong shape.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        self.values
            .get(key)
            .map(|value| {
                T::deserialize(value).map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: e.to_string(),
                })
            })
            .transpose()
    }

    /// Insert a value, returning whatever it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: ConfigValue) -> Option<ConfigValue> {
        self.values.insert(key.into(), value)
    }

    /// Insert a value only if the key is absent. Returns `true` if inserted.
    pub fn set_default(&mut self, key: impl Into<String>, value: ConfigValue) -> bool {
        match self.values.entry(key.into()) {
            btree_map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
            btree_map::Entry::Occupied(_) => false,
        }
    }

    /// Overwrite every key in `pairs`, unconditionally.
    pub fn update<K, I>(&mut self, pairs: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ConfigValue)>,
    {
        for (key, value) in pairs {
            self.values.insert(key.into(), value);
        }
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Remove `key`, returning its value if it was set.
    pub fn remove(&mut self, key: &str) -> Option<ConfigValue> {
        self.values.remove(key)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the mapping has no keys.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.values.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, ConfigValue)> for Config {
    fn from_iter<I: IntoIterator<Item = (K, ConfigValue)>>(iter: I) -> Self {
        let mut config = Config::new();
        config.update(iter);
        config
    }
}

impl IntoIterator for Config {
    type Item = (String, ConfigValue);
    type IntoIter = btree_map::IntoIter<String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
