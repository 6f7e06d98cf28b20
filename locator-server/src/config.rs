//! Locator server configuration
//!
//! | Variable | Default | |
//! |----------|---------|---|
//! | DATABASE_URL | - | full PostgreSQL URL, overrides the `DB_*` fields |
//! | DB_HOST | 127.0.0.1 | |
//! | DB_PORT | 5432 | |
//! | DB_USER | postgres | |
//! | DB_PASSWORD | - | |
//! | DB_NAME | storedetails | |
//! | DB_POOL_SIZE | 10 | max pooled connections |
//! | PORT | 3000 | HTTP port |
//! | UPLOAD_DIR | uploads | staging directory for uploaded files |
//! | MAX_UPLOAD_BYTES | 50MB | request body limit |
//! | ENVIRONMENT | development | |

use std::path::PathBuf;

use sqlx::postgres::PgConnectOptions;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Locator server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL (takes precedence over the individual fields)
    pub database_url: Option<String>,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: Option<String>,
    pub db_name: String,
    /// Connection pool capacity; callers beyond it wait for a free connection
    pub db_pool_size: u32,
    /// HTTP port
    pub http_port: u16,
    /// Staging directory for uploaded files
    pub upload_dir: PathBuf,
    /// Request body limit for the upload route
    pub max_upload_bytes: usize,
    /// Environment: development | staging | production
    pub environment: String,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, BoxError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let db_pool_size = parse_var(var("DB_POOL_SIZE")).unwrap_or(10);
        if db_pool_size == 0 {
            return Err("DB_POOL_SIZE must be greater than zero".into());
        }

        Ok(Self {
            database_url: var("DATABASE_URL"),
            db_host: var("DB_HOST").unwrap_or_else(|| "127.0.0.1".into()),
            db_port: parse_var(var("DB_PORT")).unwrap_or(5432),
            db_user: var("DB_USER").unwrap_or_else(|| "postgres".into()),
            db_password: var("DB_PASSWORD"),
            db_name: var("DB_NAME").unwrap_or_else(|| "storedetails".into()),
            db_pool_size,
            http_port: parse_var(var("PORT")).unwrap_or(3000),
            upload_dir: var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("uploads")),
            max_upload_bytes: parse_var(var("MAX_UPLOAD_BYTES"))
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".into()),
        })
    }

    /// Connection options for the store database
    pub fn connect_options(&self) -> Result<PgConnectOptions, BoxError> {
        if let Some(url) = &self.database_url {
            return Ok(url.parse::<PgConnectOptions>()?);
        }

        let mut opts = PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .database(&self.db_name);
        if let Some(password) = &self.db_password {
            opts = opts.password(password);
        }
        Ok(opts)
    }
}

fn parse_var<T: std::str::FromStr>(value: Option<String>) -> Option<T> {
    value.and_then(|v| v.trim().parse().ok())
}
