/// Configuration management for the API server
///
/// Configuration comes from environment variables, with a `.env` file loaded
/// first when present.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `CACHE_MAX_AGE_SECONDS`: max-age sent for cacheable reads (default: 60)
/// - `RUN_MIGRATIONS`: Apply bundled migrations at startup (default: true)
/// - `RUST_LOG`: Log filter (default: deployboard_api=debug,tower_http=debug)
/// - `LOG_FORMAT`: `json` for JSON log lines, anything else for text
///
/// The two logging variables are read by `LogSettings::from_env`, which runs
/// before `Config::from_env` so that startup errors are logged.
///
/// # Example
///
/// ```no_run
/// use deployboard_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins; `*` allows any origin
    pub cors_origins: Vec<String>,

    /// `max-age` for responses whose operation is cacheable
    pub cache_max_age_seconds: u64,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,

    /// Whether to apply migrations on startup
    pub run_migrations: bool,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a variable cannot be
    /// parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        Ok(Self {
            api: ApiConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env_or("API_PORT", 8080)?,
                cors_origins: parse_cors_origins(
                    &env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
                ),
                cache_max_age_seconds: env_or("CACHE_MAX_AGE_SECONDS", 60)?,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10)?,
                run_migrations: env_or("RUN_MIGRATIONS", true)?,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Whether any origin may call the API
    pub fn allows_any_origin(&self) -> bool {
        self.api.cors_origins.iter().any(|origin| origin == "*")
    }
}

/// Default `RUST_LOG` filter
pub const DEFAULT_LOG_FILTER: &str = "deployboard_api=debug,tower_http=debug";

/// Logging setup, read before the rest of the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// `EnvFilter` directives
    pub filter: String,

    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl LogSettings {
    /// Loads `.env`, then reads `RUST_LOG` and `LOG_FORMAT`
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_values(
            env::var("RUST_LOG").ok(),
            env::var("LOG_FORMAT").ok().as_deref(),
        )
    }

    /// Builds settings from raw variable values
    pub fn from_values(rust_log: Option<String>, log_format: Option<&str>) -> Self {
        Self {
            filter: rust_log
                .filter(|filter| !filter.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            json: log_format.is_some_and(|format| format.trim().eq_ignore_ascii_case("json")),
        }
    }
}

/// Reads and parses `name`, falling back to `default` when it is unset
fn env_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", name, e)),
        Err(_) => Ok(default),
    }
}

/// Splits a comma-separated origin list, dropping blanks
pub fn parse_cors_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
