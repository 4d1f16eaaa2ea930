//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that runs every loader in a fixed order.
//! - Provide `create_config_loader` for callers that want a plain loader function.
//! - Optionally load a `.env` file into the process environment first.
//!
//! Does NOT handle:
//! - The behavior of individual sources (see the sibling loader modules).
//!
//! Invariants / Assumptions:
//! - Order is: entry points, module, instance folder, overrides, environment, defaults.
//! - Each step overwrites earlier ones for the same key; defaults only fill gaps.
//! - The environment is captured when `load()` runs unless one was injected.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::sync::Arc;

use super::defaults::apply_defaults;
use super::entry_point::load_entry_points;
use super::env::load_environment;
use super::error::ConfigError;
use super::folder::load_instance_folder;
use super::module::{apply_overrides, load_module};
use super::report::{AppliedSource, LoadReport};
use crate::constants::{DEFAULT_ENTRY_POINT_GROUP, DEFAULT_LOADER_ENV_PREFIX};
use crate::registry::{self, EntryPointRegistry};
use crate::types::{App, Config, ConfigValue, Environment, Namespace};

/// Loader that assembles an application's configuration from every source.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    module: Option<Namespace>,
    env_prefix: String,
    registry: Option<Arc<EntryPointRegistry>>,
    entry_point_group: Option<String>,
    environment: Option<Environment>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a loader with the default prefix (`APP`), the default entry-point
    /// group and the process-wide entry-point registry.
    pub fn new() -> Self {
        Self {
            module: None,
            env_prefix: DEFAULT_LOADER_ENV_PREFIX.to_string(),
            registry: None,
            entry_point_group: Some(DEFAULT_ENTRY_POINT_GROUP.to_string()),
            environment: None,
        }
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Apply `module` after the entry points.
    pub fn with_module(mut self, module: Namespace) -> Self {
        self.module = Some(module);
        self
    }

    /// Read environment variables named `<prefix>_<KEY>`.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Use `registry` instead of the process-wide entry-point registry.
    pub fn with_registry(mut self, registry: Arc<EntryPointRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Scan `group` for entry points; `None` disables entry-point loading.
    pub fn with_entry_point_group(mut self, group: Option<&str>) -> Self {
        self.entry_point_group = group.map(str::to_string);
        self
    }

    /// Read variables from `environment` instead of the live process environment.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// The full variable prefix, including the trailing underscore.
    pub fn env_prefix(&self) -> String {
        format!("{}_", self.env_prefix)
    }

    /// Assemble `app.config` from every source, in precedence order.
    ///
    /// `overrides` are applied after the instance folder and before the
    /// environment.
    pub fn load<K, I>(&self, app: &mut App, overrides: I) -> Result<LoadReport, ConfigError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ConfigValue)>,
    {
        let mut report = LoadReport::default();

        let registry = self.registry.as_deref().unwrap_or_else(|| registry::global());
        for name in load_entry_points(&mut app.config, registry, self.entry_point_group.as_deref())? {
            report.sources.push(AppliedSource::EntryPoint { name });
        }

        load_module(&mut app.config, self.module.as_ref());
        if self.module.is_some() {
            report.sources.push(AppliedSource::Module);
        }

        if let Some(path) = load_instance_folder(app)? {
            report.sources.push(AppliedSource::InstanceFolder { path });
        }

        apply_overrides(&mut app.config, overrides);
        report.sources.push(AppliedSource::Overrides);

        let prefix = self.env_prefix();
        let captured;
        let environment = match &self.environment {
            Some(environment) => environment,
            None => {
                captured = Environment::capture();
                &captured
            }
        };
        load_environment(&mut app.config, environment, &prefix);
        report.sources.push(AppliedSource::Environment { prefix });

        report.warnings = apply_defaults(&mut app.config);
        report.sources.push(AppliedSource::Defaults);

        tracing::debug!(
            app = app.name(),
            keys = app.config.len(),
            warnings = report.warnings.len(),
            "configuration loaded"
        );
        Ok(report)
    }
}

/// Build a loader function for `module` and `env_prefix` (without the
/// trailing underscore).
///
/// The returned function takes the application and the keyword overrides.
pub fn create_config_loader(
    module: Option<Namespace>,
    env_prefix: &str,
) -> impl Fn(&mut App, Config) -> Result<LoadReport, ConfigError> + use<> {
    let mut loader = ConfigLoader::new().with_env_prefix(env_prefix);
    if let Some(module) = module {
        loader = loader.with_module(module);
    }
    move |app: &mut App, overrides: Config| loader.load(app, overrides)
}
