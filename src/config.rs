use std::{env, time::Duration};

/// Page size used by the catalog listing when the caller does not pick one.
pub const ITEMS_PER_PAGE: u64 = 10;

/// Larger requested page sizes are clamped down to this.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Upper bound of a basket line's unit price, in minor units. Matches the DTO validators.
pub const MAX_UNIT_PRICE: i64 = 1_000_000_000;

/// Upper bound of a basket line's quantity. Matches the DTO validators.
pub const MAX_QUANTITY: i32 = 10_000;

/// Cookie carrying the anonymous buyer token.
pub const BASKET_COOKIE_NAME: &str = "eShop";

/// Lifetime of the basket cookie (roughly ten years).
pub const BASKET_COOKIE_DAYS: i64 = 3650;

pub const DEFAULT_CATALOG_CACHE_SECONDS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub catalog_base_url: String,
    pub catalog_cache_ttl: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_env_with_port("APP_PORT", 3000)
    }

    /// Same as [`AppConfig::from_env`] but reads the listening port from `port_var`.
    pub fn from_env_with_port(port_var: &str, default_port: u16) -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite::memory:".to_string());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var(port_var)
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(default_port);
        let catalog_base_url = env::var("CATALOG_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}"));
        let cache_seconds = match env::var("CATALOG_CACHE_SECONDS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|err| anyhow::anyhow!("invalid CATALOG_CACHE_SECONDS {raw:?}: {err}"))?,
            Err(_) => DEFAULT_CATALOG_CACHE_SECONDS,
        };
        Ok(Self {
            port,
            database_url,
            host,
            catalog_base_url,
            catalog_cache_ttl: Duration::from_secs(cache_seconds),
        })
    }
}
