//! Configuration from registered entry points.
//!
//! Responsibilities:
//! - Resolve every entry point of a group and copy its configuration keys.
//! - Apply entry points in ascending name order so later names win ties.
//!
//! Does NOT handle:
//! - Registering entry points (see `registry.rs`).
//!
//! Invariants:
//! - Registration order never affects the result; only names do.
//! - A failing entry point aborts loading with `ConfigError::EntryPoint`.

use super::error::ConfigError;
use crate::registry::EntryPointRegistry;
use crate::types::Config;

/// Apply all entry points registered under `group`.
///
/// `None` disables entry-point loading. Returns the names applied, in order.
pub fn load_entry_points(
    config: &mut Config,
    registry: &EntryPointRegistry,
    group: Option<&str>,
) -> Result<Vec<String>, ConfigError> {
    let Some(group) = group.filter(|g| !g.is_empty()) else {
        return Ok(Vec::new());
    };

    let mut entry_points = registry.iter_entry_points(group);
    entry_points.sort_by(|a, b| a.name().cmp(b.name()));

    let mut applied = Vec::with_capacity(entry_points.len());
    for ep in entry_points {
        let namespace = ep.load().map_err(|source| ConfigError::EntryPoint {
            group: group.to_string(),
            name: ep.name().to_string(),
            source,
        })?;
        let written = namespace.apply_to(config);
        tracing::debug!(group, entry_point = ep.name(), keys = written, "applied entry point");
        applied.push(ep.name().to_string());
    }
    Ok(applied)
}
