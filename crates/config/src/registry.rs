//! Entry-point registry for externally contributed configuration.
//!
//! Responsibilities:
//! - Hold named, lazily resolved configuration namespaces grouped by an identifier.
//! - Provide a process-wide registry for packages that contribute defaults.
//!
//! Does NOT handle:
//! - Ordering or applying entry points (see `loader::entry_point`).
//!
//! Invariants:
//! - Entry points are returned in registration order; callers sort as needed.
//! - Loader functions are not called until the entry point is loaded.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::types::Namespace;

/// Function resolving an entry point to its namespace.
pub type EntryPointFn = dyn Fn() -> anyhow::Result<Namespace> + Send + Sync;

/// A named, lazily resolved configuration source.
#[derive(Clone)]
pub struct EntryPoint {
    name: String,
    loader: Arc<EntryPointFn>,
}

impl EntryPoint {
    pub fn new<F>(name: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> anyhow::Result<Namespace> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            loader: Arc::new(loader),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve the entry point.
    pub fn load(&self) -> anyhow::Result<Namespace> {
        (self.loader)()
    }
}

impl fmt::Debug for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPoint")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Thread-safe collection of entry points keyed by group.
#[derive(Debug, Default)]
pub struct EntryPointRegistry {
    groups: RwLock<BTreeMap<String, Vec<EntryPoint>>>,
}

impl EntryPointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entry point under `group`.
    pub fn register<F>(&self, group: impl Into<String>, name: impl Into<String>, loader: F)
    where
        F: Fn() -> anyhow::Result<Namespace> + Send + Sync + 'static,
    {
        self.add(group, EntryPoint::new(name, loader));
    }

    /// Register an already constructed entry point under `group`.
    pub fn add(&self, group: impl Into<String>, entry_point: EntryPoint) {
        let mut groups = self.groups.write().unwrap_or_else(PoisonError::into_inner);
        groups.entry(group.into()).or_default().push(entry_point);
    }

    /// Entry points registered under `group`, in registration order.
    pub fn iter_entry_points(&self, group: &str) -> Vec<EntryPoint> {
        let groups = self.groups.read().unwrap_or_else(PoisonError::into_inner);
        groups.get(group).cloned().unwrap_or_default()
    }
}

/// The process-wide registry used when a loader is not given one.
pub fn global() -> &'static EntryPointRegistry {
    static REGISTRY: OnceLock<EntryPointRegistry> = OnceLock::new();
    REGISTRY.get_or_init(EntryPointRegistry::new)
}

/// Register an entry point in the process-wide registry.
pub fn register_entry_point<F>(group: impl Into<String>, name: impl Into<String>, loader: F)
where
    F: Fn() -> anyhow::Result<Namespace> + Send + Sync + 'static,
{
    global().register(group, name, loader);
}
