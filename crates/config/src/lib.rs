//! Configuration merging for Invenio-style applications.
//!
//! This crate assembles an application's configuration mapping from
//! registered entry points, an explicit module, the instance folder, caller
//! overrides and prefixed environment variables, then fills in required
//! defaults. It also builds database, broker and cache connection strings
//! from environment variables.

pub mod constants;
pub mod literal;
mod loader;
pub mod registry;
pub mod types;

pub use literal::{LiteralError, parse_assignments, parse_literal, parse_or_string};
pub use loader::{
    AppliedSource, ConfigError, ConfigLoader, ConfigWarning, LoadReport, apply_defaults,
    apply_overrides, build_broker_url, build_broker_url_with, build_db_uri, build_db_uri_with,
    build_redis_url, build_redis_url_with, create_config_loader, default_html_attrs,
    default_html_tags, load_entry_points, load_environment, load_instance_folder, load_module,
    normalize_prefix,
};
pub use registry::{EntryPoint, EntryPointRegistry, register_entry_point};
pub use types::{App, Config, ConfigValue, Environment, Namespace, is_config_key};
