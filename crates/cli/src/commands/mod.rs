//! CLI command implementations.

pub mod show;
pub mod urls;
