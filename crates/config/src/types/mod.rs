//! Core data types shared by every loader.
//!
//! Responsibilities:
//! - Define the configuration mapping (`Config`) and its value type.
//! - Define the minimal host application (`App`) the loaders write into.
//! - Define configuration sources: resolved namespaces and environment snapshots.
//! - Define the upper-case naming convention for configuration keys.
//!
//! Does NOT handle:
//! - Reading sources or applying precedence (see `loader` module).
//! - Parsing literal text (see `literal` module).
//!
//! Invariants:
//! - Keys are unique within a `Config`; the last write wins.
//! - `Namespace` and `Environment` are read-only once built.

mod app;
mod config;
mod environment;
mod namespace;

pub use app::App;
pub use config::{Config, ConfigValue};
pub use environment::Environment;
pub use namespace::{Namespace, is_config_key};
