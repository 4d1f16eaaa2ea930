//! Connection strings assembled from environment variables.
//!
//! Responsibilities:
//! - Build the database URI, message-broker URL and cache URL.
//! - Normalize the variable prefix shared by the three builders.
//!
//! Does NOT handle:
//! - Validating or percent-encoding the assembled parts; values are used verbatim.
//!
//! Invariants:
//! - Each builder checks, in order: `<PREFIX>_<NAME>`, the bare `<NAME>`,
//!   the assembled form from individual parts, and finally a fixed default.
//! - Empty variables count as unset.
//! - The builders never fail; the default is always a usable string.

use crate::constants::{
    DEFAULT_BROKER_URL, DEFAULT_DB_URI, DEFAULT_REDIS_ADDRESS, DEFAULT_REDIS_PROTOCOL,
    DEFAULT_URL_PREFIX, REDIS_URL_SCHEMES,
};
use crate::types::Environment;

/// Normalize a variable prefix: missing or empty becomes `INVENIO`, and
/// trailing underscores are removed.
pub fn normalize_prefix(prefix: Option<&str>) -> String {
    match prefix.map(|p| p.trim_end_matches('_')) {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => DEFAULT_URL_PREFIX.to_string(),
    }
}

/// Database URI from the live process environment.
pub fn build_db_uri(prefix: Option<&str>) -> String {
    build_db_uri_with(&Environment::capture(), prefix)
}

/// Broker URL from the live process environment.
pub fn build_broker_url(prefix: Option<&str>) -> String {
    build_broker_url_with(&Environment::capture(), prefix)
}

/// Cache URL from the live process environment, using database `db` (default 0).
pub fn build_redis_url(prefix: Option<&str>, db: Option<u32>) -> String {
    build_redis_url_with(&Environment::capture(), prefix, db)
}

/// Collect `<prefix>_<part>` for every part, or `None` if any is missing.
fn all_parts<'a, const N: usize>(
    env: &'a Environment,
    prefix: &str,
    parts: [&str; N],
) -> Option<[&'a str; N]> {
    let mut values = [""; N];
    for (slot, part) in values.iter_mut().zip(parts) {
        *slot = env.get_non_empty(&format!("{prefix}_{part}"))?;
    }
    Some(values)
}

/// Database URI from `env`.
///
/// `<PREFIX>_SQLALCHEMY_DATABASE_URI`, then `SQLALCHEMY_DATABASE_URI`, then
/// `<PREFIX>_DB_{USER,PASSWORD,HOST,PORT,NAME,PROTOCOL}` (all required).
pub fn build_db_uri_with(env: &Environment, prefix: Option<&str>) -> String {
    let prefix = normalize_prefix(prefix);

    if let Some(uri) = env
        .get_non_empty(&format!("{prefix}_SQLALCHEMY_DATABASE_URI"))
        .or_else(|| env.get_non_empty("SQLALCHEMY_DATABASE_URI"))
    {
        return uri.to_string();
    }

    let db_prefix = format!("{prefix}_DB");
    if let Some([user, password, host, port, name, protocol]) = all_parts(
        env,
        &db_prefix,
        ["USER", "PASSWORD", "HOST", "PORT", "NAME", "PROTOCOL"],
    ) {
        return format!("{protocol}://{user}:{password}@{host}:{port}/{name}");
    }

    DEFAULT_DB_URI.to_string()
}

/// Broker URL from `env`.
///
/// `<PREFIX>_BROKER_URL`, then `BROKER_URL`, then
/// `<PREFIX>_AMQP_BROKER_{USER,PASSWORD,HOST,PORT,PROTOCOL}` (all required)
/// with an optional `<PREFIX>_AMQP_BROKER_VHOST`.
pub fn build_broker_url_with(env: &Environment, prefix: Option<&str>) -> String {
    let prefix = normalize_prefix(prefix);

    if let Some(url) = env
        .get_non_empty(&format!("{prefix}_BROKER_URL"))
        .or_else(|| env.get_non_empty("BROKER_URL"))
    {
        return url.to_string();
    }

    let broker_prefix = format!("{prefix}_AMQP_BROKER");
    if let Some([user, password, host, port, protocol]) = all_parts(
        env,
        &broker_prefix,
        ["USER", "PASSWORD", "HOST", "PORT", "PROTOCOL"],
    ) {
        let vhost = env
            .get(&format!("{broker_prefix}_VHOST"))
            .unwrap_or_default()
            .trim_start_matches('/');
        return format!("{protocol}://{user}:{password}@{host}:{port}/{vhost}");
    }

    DEFAULT_BROKER_URL.to_string()
}

/// Cache URL from `env`.
///
/// `<PREFIX>_CACHE_REDIS_URL`, then `CACHE_REDIS_URL`, accepted only with a
/// `redis://`, `rediss://` or `unix://` scheme; then
/// `<PREFIX>_KV_CACHE_{HOST,PORT}` (required) with optional `_PASSWORD` and
/// `_PROTOCOL`. Assembled and default URLs end with `/<db>`.
pub fn build_redis_url_with(env: &Environment, prefix: Option<&str>, db: Option<u32>) -> String {
    let prefix = normalize_prefix(prefix);
    let db = db.unwrap_or(0);

    if let Some(url) = env
        .get_non_empty(&format!("{prefix}_CACHE_REDIS_URL"))
        .or_else(|| env.get_non_empty("CACHE_REDIS_URL"))
        .filter(|url| REDIS_URL_SCHEMES.iter().any(|s| url.starts_with(s)))
    {
        return url.to_string();
    }

    let cache_prefix = format!("{prefix}_KV_CACHE");
    if let Some([host, port]) = all_parts(env, &cache_prefix, ["HOST", "PORT"]) {
        let protocol = env
            .get_non_empty(&format!("{cache_prefix}_PROTOCOL"))
            .unwrap_or(DEFAULT_REDIS_PROTOCOL);
        let password = env
            .get_non_empty(&format!("{cache_prefix}_PASSWORD"))
            .map(|p| format!(":{p}@"))
            .unwrap_or_default();
        return format!("{protocol}://{password}{host}:{port}/{db}");
    }

    format!("redis://{DEFAULT_REDIS_ADDRESS}/{db}")
}
