//! Non-fatal outcomes of a loading pass.
//!
//! Responsibilities:
//! - Define warnings raised while filling in defaults.
//! - Record which sources were applied, in order, by the orchestrator.
//!
//! Invariants:
//! - Warnings never abort loading; the application still starts.

use std::fmt;
use std::path::PathBuf;

/// A non-fatal problem the operator should fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `SECRET_KEY` was not configured and the insecure placeholder is in use.
    InsecureSecretKey,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::InsecureSecretKey => {
                write!(f, "Set configuration variable SECRET_KEY with random string")
            }
        }
    }
}

/// A configuration source the orchestrator applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppliedSource {
    EntryPoint { name: String },
    Module,
    InstanceFolder { path: PathBuf },
    Overrides,
    Environment { prefix: String },
    Defaults,
}

/// Summary of a full loading pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Sources applied, in application order.
    pub sources: Vec<AppliedSource>,
    /// Warnings raised along the way.
    pub warnings: Vec<ConfigWarning>,
}

impl LoadReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
