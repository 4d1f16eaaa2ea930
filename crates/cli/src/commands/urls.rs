//! `urls`: print the connection strings derived from the environment.

use anyhow::Result;
use invenio_config::{build_broker_url, build_db_uri, build_redis_url};
use serde::Serialize;

use crate::args::UrlsArgs;
use crate::formatters::render;

#[derive(Debug, Serialize)]
struct ConnectionUrls {
    #[serde(rename = "SQLALCHEMY_DATABASE_URI")]
    db_uri: String,
    #[serde(rename = "BROKER_URL")]
    broker_url: String,
    #[serde(rename = "CACHE_REDIS_URL")]
    redis_url: String,
}

pub fn run(args: UrlsArgs) -> Result<()> {
    let prefix = args.prefix.as_deref();
    tracing::debug!(prefix = ?prefix, redis_db = ?args.redis_db, "building connection strings");
    let urls = ConnectionUrls {
        db_uri: build_db_uri(prefix),
        broker_url: build_broker_url(prefix),
        redis_url: build_redis_url(prefix, args.redis_db),
    };
    println!("{}", render(&urls, args.format)?);
    Ok(())
}
