//! Minimal host application model.

use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_INSTANCE_DIR, INSTANCE_CONFIG_EXTENSION};
use crate::types::Config;

/// Application object the loaders attach configuration to.
#[derive(Debug, Clone)]
pub struct App {
    name: String,
    instance_path: PathBuf,
    /// Configuration mapping, mutated in place by each loader.
    pub config: Config,
}

impl App {
    /// Create an application with an empty configuration and `./instance`
    /// as its instance folder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instance_path: PathBuf::from(DEFAULT_INSTANCE_DIR),
            config: Config::new(),
        }
    }

    /// Use `path` as the instance folder.
    pub fn with_instance_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.instance_path = path.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instance_path(&self) -> &Path {
        &self.instance_path
    }

    /// Location of the instance configuration file: `<instance_path>/<name>.cfg`.
    pub fn instance_config_file(&self) -> PathBuf {
        self.instance_path
            .join(format!("{}.{}", self.name, INSTANCE_CONFIG_EXTENSION))
    }
}
