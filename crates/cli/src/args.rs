//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse `KEY=VALUE` overrides.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `commands` module).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::formatters::OutputFormat;

#[derive(Parser)]
#[command(name = "invenio-config")]
#[command(about = "Inspect the merged configuration of an Invenio application", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  invenio-config show --app-name invenio --instance-path ./instance\n  invenio-config show --app-name invenio --env-prefix INVENIO --set DEBUG=True\n  invenio-config urls --prefix MYSITE --redis-db 2 --format yaml\n"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assemble the application configuration and print it
    Show(ShowArgs),

    /// Print the database, broker and cache connection strings
    Urls(UrlsArgs),
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Application name; the instance file is `<instance-path>/<app-name>.cfg`
    #[arg(long, env = "INVENIO_CONFIG_APP_NAME")]
    pub app_name: String,

    /// Instance folder of the application
    #[arg(long, env = "INVENIO_CONFIG_INSTANCE_PATH", value_name = "DIR")]
    pub instance_path: Option<PathBuf>,

    /// Prefix of environment variables to read, without the trailing underscore
    #[arg(long, default_value = "APP")]
    pub env_prefix: String,

    /// JSON object whose upper-case keys are applied as the configuration module
    #[arg(long, value_name = "FILE.json")]
    pub module: Option<PathBuf>,

    /// Override a key; the value is parsed as a literal, falling back to a string
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub overrides: Vec<(String, String)>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct UrlsArgs {
    /// Variable prefix (default: INVENIO)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Cache database number
    #[arg(long, value_name = "N")]
    pub redis_db: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Split `KEY=VALUE` at the first `=`.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("invalid KEY=VALUE: no `=` found in `{s}`")),
    }
}
