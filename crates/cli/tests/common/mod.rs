//! Shared test utilities for invenio-config integration tests.
//!
//! Invariants / Assumptions:
//! - Commands are hermetic by default: no `.env` loading and no inherited
//!   configuration variables from the host.

use assert_cmd::Command;

/// Variables the CLI reads, directly or by prefix.
const HOST_PREFIXES: [&str; 3] = ["APP_", "INVENIO_", "MYSITE_"];
const HOST_VARS: [&str; 3] = ["SQLALCHEMY_DATABASE_URI", "BROKER_URL", "CACHE_REDIS_URL"];

/// Returns a hermetic `invenio-config` command for integration testing.
#[allow(dead_code)]
pub fn invenio_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("invenio-config");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");
    clear_host_env(&mut cmd);
    cmd
}

/// Remove every host variable that could leak into the loaded configuration.
#[allow(dead_code)]
pub fn clear_host_env(cmd: &mut Command) {
    for (key, _) in std::env::vars() {
        if HOST_PREFIXES.iter().any(|p| key.starts_with(p)) {
            cmd.env_remove(&key);
        }
    }
    for key in HOST_VARS {
        cmd.env_remove(key);
    }
}
