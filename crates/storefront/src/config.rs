//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `ROCKETSHOES_API_URL` - Base URL of the catalog and stock API (default: `http://localhost:3333`)
//! - `ROCKETSHOES_HTTP_TIMEOUT_SECS` - Request timeout for API calls (default: 10)
//! - `ROCKETSHOES_CATALOG_CACHE_TTL_SECS` - Product detail cache TTL (default: 300)
//! - `ROCKETSHOES_STORAGE_DIR` - Directory holding the storage slots (default: `.rocketshoes`)
//! - `ROCKETSHOES_CART_KEY` - Storage slot name for the cart (default: `@RocketShoes:cart`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Storage slot the cart is persisted under unless overridden.
pub const DEFAULT_CART_KEY: &str = "@RocketShoes:cart";

const DEFAULT_API_URL: &str = "http://localhost:3333";
const DEFAULT_STORAGE_DIR: &str = ".rocketshoes";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Catalog and stock API configuration
    pub catalog: CatalogConfig,
    /// Durable storage configuration
    pub storage: StorageConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Catalog and stock service configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL; `products/{id}` and `stock/{id}` are resolved against it
    pub api_url: Url,
    /// Per-request timeout
    pub http_timeout: Duration,
    /// How long product details stay cached
    pub cache_ttl: Duration,
}

/// Durable storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding one file per storage slot
    pub dir: PathBuf,
    /// Slot name the cart is stored under
    pub cart_key: String,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("ROCKETSHOES_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&api_url).map_err(|e| {
            ConfigError::InvalidEnvVar("ROCKETSHOES_API_URL".to_string(), e.to_string())
        })?;
        let http_timeout = Duration::from_secs(parse_or_default(
            &lookup,
            "ROCKETSHOES_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?);
        let cache_ttl = Duration::from_secs(parse_or_default(
            &lookup,
            "ROCKETSHOES_CATALOG_CACHE_TTL_SECS",
            DEFAULT_CACHE_TTL_SECS,
        )?);

        let dir = lookup("ROCKETSHOES_STORAGE_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);
        let cart_key = lookup("ROCKETSHOES_CART_KEY")
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CART_KEY.to_string());

        Ok(Self {
            catalog: CatalogConfig {
                api_url,
                http_timeout,
                cache_ttl,
            },
            storage: StorageConfig { dir, cart_key },
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional numeric variable, falling back to `default` when unset.
fn parse_or_default<F>(lookup: &F, key: &str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
