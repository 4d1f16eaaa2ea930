//! `show`: run the full configuration pipeline and print the result.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use invenio_config::{App, Config, ConfigLoader, Namespace, parse_or_string};

use crate::args::ShowArgs;
use crate::formatters::render;

pub fn run(args: ShowArgs) -> Result<()> {
    tracing::debug!(
        app = %args.app_name,
        env_prefix = %args.env_prefix,
        instance_path = ?args.instance_path,
        overrides = args.overrides.len(),
        "assembling configuration"
    );

    let mut loader = ConfigLoader::new().with_env_prefix(args.env_prefix.as_str());
    if let Some(path) = &args.module {
        loader = loader.with_module(read_module(path)?);
    }

    let mut app = App::new(args.app_name.as_str());
    if let Some(path) = &args.instance_path {
        app = app.with_instance_path(path);
    }

    let overrides: Config = args
        .overrides
        .iter()
        .map(|(key, raw)| (key.as_str(), parse_or_string(raw)))
        .collect();

    let report = loader
        .load(&mut app, overrides)
        .with_context(|| format!("Failed to load configuration for '{}'", args.app_name))?;

    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }

    println!("{}", render(&app.config, args.format)?);
    Ok(())
}

/// Read a JSON object file as a configuration module.
fn read_module(path: &Path) -> Result<Namespace> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read module file {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse module file {}", path.display()))?;
    Namespace::from_serialize(&value)
        .with_context(|| format!("Invalid module file {}", path.display()))
}
