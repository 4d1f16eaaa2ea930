//! Configuration loaders and the orchestrator that runs them.
//!
//! Responsibilities:
//! - Load configuration from entry points, an explicit module, the instance
//!   folder, caller overrides and prefixed environment variables.
//! - Fill in required defaults and report non-fatal warnings.
//! - Provide a builder-pattern `ConfigLoader` that applies every source in a fixed order.
//! - Build database, broker and cache connection strings from the environment.
//!
//! Does NOT handle:
//! - Literal parsing (see `literal` module).
//! - Entry-point registration (see `registry` module).
//!
//! Invariants / Assumptions:
//! - Precedence, lowest to highest: defaults (fill-only), entry points, module,
//!   instance folder, overrides, environment.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

mod builder;
mod defaults;
mod entry_point;
mod env;
mod error;
mod folder;
mod module;
mod report;
mod urls;

#[cfg(test)]
mod tests;

pub use builder::{ConfigLoader, create_config_loader};
pub use defaults::{apply_defaults, default_html_attrs, default_html_tags};
pub use entry_point::load_entry_points;
pub use env::load_environment;
pub use error::ConfigError;
pub use folder::load_instance_folder;
pub use module::{apply_overrides, load_module};
pub use report::{AppliedSource, ConfigWarning, LoadReport};
pub use urls::{
    build_broker_url, build_broker_url_with, build_db_uri, build_db_uri_with, build_redis_url,
    build_redis_url_with, normalize_prefix,
};
