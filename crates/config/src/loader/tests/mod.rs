//! Tests for the configuration loader orchestrator.
//!
//! Responsibilities:
//! - Test source precedence across a full loading pass.
//! - Test the `create_config_loader` factory against the live environment.
//! - Test `.env` loading and the `DOTENV_DISABLED` gate.
//!
//! Does NOT handle:
//! - Behavior of individual sources (tested next to each loader).
//!
//! Invariants:
//! - Tests that touch process-global state use `serial_test` and `env_lock()`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}
