//! Environment-driven runtime configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Error raised when an environment variable holds an unusable value.
#[derive(Debug, Error)]
#[error("invalid value for {var}: {value:?}")]
pub struct ConfigError {
    /// Offending variable name.
    pub var: &'static str,
    /// The rejected value.
    pub value: String,
}

/// Runtime configuration, sourced from `MEEPLE_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port the server binds.
    pub port: u16,
    /// Database connection URL.
    pub database_url: String,
    /// Pretty, verbose logging for local development.
    pub debug: bool,
    /// Load the fixture dataset on startup.
    pub seed_on_start: bool,
    /// Optional per-request timeout.
    pub request_timeout: Option<Duration>,
    /// Optional cap on in-flight requests.
    pub concurrency_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 9090,
            database_url: "sqlite::memory:".to_string(),
            debug: false,
            seed_on_start: true,
            request_timeout: None,
            concurrency_limit: None,
        }
    }
}

impl Config {
    /// Reads configuration from the environment, falling back to defaults
    /// for anything unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            port: parse_var("MEEPLE_PORT", defaults.port)?,
            database_url: env::var("MEEPLE_DATABASE_URL").unwrap_or(defaults.database_url),
            debug: flag("MEEPLE_DEBUG", defaults.debug),
            seed_on_start: flag("MEEPLE_SEED", defaults.seed_on_start),
            request_timeout: parse_opt_var("MEEPLE_REQUEST_TIMEOUT_SECS")?
                .map(Duration::from_secs),
            concurrency_limit: parse_opt_var("MEEPLE_CONCURRENCY_LIMIT")?,
        })
    }
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError { var, value }),
        Err(_) => Ok(default),
    }
}

fn parse_opt_var<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError { var, value }),
        Err(_) => Ok(None),
    }
}

fn flag(var: &'static str, default: bool) -> bool {
    match env::var(var) {
        Ok(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}
