//! invenio-config - inspect merged application configuration.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Run the configuration pipeline or the connection-string builders.
//! - Print results as JSON or YAML on stdout.
//!
//! Does NOT handle:
//! - Configuration merging itself (see `crates/config`).
//!
//! Invariants:
//! - `load_dotenv()` is called BEFORE CLI parsing to allow `.env` to provide clap defaults.
//! - Diagnostics go to stderr; stdout carries only the formatted result.

mod args;
mod commands;
mod error;
mod formatters;

use args::{Cli, Commands};
use clap::Parser;
use error::ExitCode;
use invenio_config::ConfigLoader;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    // Load .env file BEFORE CLI parsing so clap env defaults can read .env values
    if let Err(e) = ConfigLoader::new().load_dotenv() {
        eprintln!("Failed to load environment: {}", e);
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match cli.command {
        Commands::Show(args) => commands::show::run(args),
        Commands::Urls(args) => commands::urls::run(args),
    };

    let exit_code = match result {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "command failed");
            eprintln!("Error: {:#}", e);
            ExitCode::GeneralError
        }
    };

    std::process::exit(exit_code.as_i32());
}
