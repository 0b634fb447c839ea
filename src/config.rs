//! Runtime configuration from environment variables
//!
//! `main` loads a `.env` file (if present) before calling [`Config::from_env`].

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, Result};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_VENUES_PATH: &str = "data/venues.json";
const DEFAULT_CACHE_TTL_SECS: u64 = 5 * 60;
const DEFAULT_CACHE_CAPACITY: u64 = 1_000;
const DEFAULT_LOG_FILTER: &str = "delivery_fee=info,tower_http=info";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// JSON venue catalog
    pub venues_path: PathBuf,
    pub venue_cache_ttl: Duration,
    pub venue_cache_capacity: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR {:?}: {}", bind_addr, e)))?;

        let venues_path = lookup("VENUES_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_VENUES_PATH));

        let ttl_secs = parse_u64(&lookup, "VENUE_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)?;
        let venue_cache_capacity =
            parse_u64(&lookup, "VENUE_CACHE_CAPACITY", DEFAULT_CACHE_CAPACITY)?;
        if venue_cache_capacity == 0 {
            return Err(AppError::Config(
                "VENUE_CACHE_CAPACITY must be positive".to_string(),
            ));
        }

        Ok(Self {
            bind_addr,
            venues_path,
            venue_cache_ttl: Duration::from_secs(ttl_secs),
            venue_cache_capacity,
        })
    }
}

/// Log filter from a `RUST_LOG` value, falling back to the service defaults
/// only when it is unset or unparsable.
pub fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn parse_u64<F>(lookup: &F, key: &str, default: u64) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| AppError::Config(format!("{} {:?}: {}", key, raw, e))),
    }
}
