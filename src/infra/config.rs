//! Centralized configuration (environment variables + defaults).
//!
//! Binaries call `dotenv::dotenv()` first, so a `.env` file is honored.

use anyhow::Context;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://127.0.0.1:5432/wanderlust";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILTER: &str = "wanderlust=info,tower_http=info";

/// Which `DocumentStore` the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

fn var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Database URL, defaulting to the local `wanderlust` database.
pub fn database_url() -> String {
    var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

pub fn store_backend() -> anyhow::Result<StoreBackend> {
    match var("STORE_BACKEND").as_deref().map(str::to_ascii_lowercase).as_deref() {
        None | Some("postgres") => Ok(StoreBackend::Postgres),
        Some("memory") => Ok(StoreBackend::Memory),
        Some(other) => anyhow::bail!("STORE_BACKEND must be 'postgres' or 'memory', got '{}'", other),
    }
}

/// Address the HTTP server binds to (`BIND_ADDR`:`PORT`).
pub fn listen_addr() -> anyhow::Result<SocketAddr> {
    let host = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
    let port = match var("PORT") {
        Some(p) => p
            .trim()
            .parse::<u16>()
            .with_context(|| format!("PORT must be a valid port number, got '{}'", p))?,
        None => DEFAULT_PORT,
    };
    format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("BIND_ADDR '{}' is not a valid IP address", host))
}
