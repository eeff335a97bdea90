use std::env;

use dotenvy::dotenv;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing::{trace, trace_span};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("RECIPE_DB_PORT must be a port number, got {0:?}")]
    InvalidPort(String),

    #[error("RECIPE_DB_POOL_SIZE must be a positive integer, got {0:?}")]
    InvalidPoolSize(String),

    #[error("RECIPE_LOG_LEVEL must be one of off, error, warn, info, debug, trace; got {0:?}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Full connection string, used as is when set.
    pub url: Option<String>,
    /// `None` opens a fresh connection for every operation.
    pub pool_size: Option<u32>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 5432,
            user: "postgres".to_owned(),
            password: String::new(),
            database: "recipe_db".to_owned(),
            url: None,
            pool_size: None,
        }
    }
}

impl DatabaseConfig {
    /// libpq connection string. Values are quoted so passwords may contain
    /// spaces or quotes.
    pub fn connection_string(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        format!(
            "host={} port={} user={} password={} dbname={}",
            quote(&self.host),
            self.port,
            quote(&self.user),
            quote(&self.password),
            quote(&self.database),
        )
    }
}

fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let span = trace_span!("loading configuration");
        let _guard = span.enter();

        // A missing .env file is fine, the variables may come from the shell
        if dotenv().is_err() {
            trace!("No .env file loaded");
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = DatabaseConfig::default();
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match non_empty("RECIPE_DB_PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(port))?,
            None => defaults.port,
        };

        let pool_size = match non_empty("RECIPE_DB_POOL_SIZE") {
            Some(size) => match size.trim().parse::<u32>() {
                Ok(parsed) if parsed > 0 => Some(parsed),
                _ => return Err(ConfigError::InvalidPoolSize(size)),
            },
            None => None,
        };

        let log_level = match non_empty("RECIPE_LOG_LEVEL") {
            Some(level) => level
                .trim()
                .parse::<LevelFilter>()
                .map_err(|_| ConfigError::InvalidLogLevel(level))?,
            None => LevelFilter::INFO,
        };

        let database = DatabaseConfig {
            host: non_empty("RECIPE_DB_HOST").unwrap_or(defaults.host),
            port,
            user: non_empty("RECIPE_DB_USER").unwrap_or(defaults.user),
            // An empty password is a valid value
            password: lookup("RECIPE_DB_PASSWORD").unwrap_or(defaults.password),
            database: non_empty("RECIPE_DB_NAME").unwrap_or(defaults.database),
            url: non_empty("DATABASE_URL"),
            pool_size,
        };

        Ok(Self {
            database,
            log_level,
        })
    }
}
