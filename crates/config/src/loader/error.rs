//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for every fatal loading failure.
//! - Wrap lower-level errors (I/O, literal parsing, entry-point resolution).
//!
//! Does NOT handle:
//! - Non-fatal conditions such as an insecure secret key (see `report.rs`).
//! - Literal parse failures of environment values, which fall back to the raw string.
//!
//! Invariants:
//! - All error variants include context for debugging (key names, paths, entry-point names).
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An entry point in the registry could not be resolved to a namespace.
    #[error("Failed to load entry point '{name}' in group '{group}': {source}")]
    EntryPoint {
        group: String,
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to read instance config file at {path}")]
    InstanceFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse instance config file at {path}: {message} (line {line}, column {column})")]
    InstanceFileParse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Configuration namespace must be a mapping, got a {kind}")]
    NamespaceNotMapping { kind: &'static str },

    #[error("Failed to serialize configuration namespace: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    ///
    /// SAFETY: This error does not include any raw dotenv content.
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}
