use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use screencamp_core::prediction::ScorerCommand;

/// Errors raised while reading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has invalid value \"{value}\": {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// Everything except `DATABASE_URL` has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Maximum connections held by the pool (default: `10`).
    pub db_max_connections: u32,
    /// Delay between connection attempts at startup (default: `5`).
    pub db_retry_interval_secs: u64,
    /// HTTP request timeout in seconds (default: `60`).
    pub request_timeout_secs: u64,
    pub cors: CorsConfig,
    pub prediction: PredictionConfig,
}

/// Cross-origin allow-list.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Exact origins, parsed from comma-separated `CORS_ORIGINS`.
    pub origins: Vec<String>,
    /// Also accept loopback and private-network `http://` origins.
    pub allow_private_network: bool,
}

/// How the scoring process is launched and bounded.
#[derive(Debug, Clone)]
pub struct PredictionConfig {
    pub interpreter: String,
    pub script: PathBuf,
    pub working_directory: Option<PathBuf>,
    pub max_concurrent: usize,
    pub timeout_secs: u64,
}

impl PredictionConfig {
    pub fn command(&self) -> ScorerCommand {
        ScorerCommand {
            program: self.interpreter.clone(),
            args: vec![self.script.to_string_lossy().into_owned()],
            working_directory: self.working_directory.clone(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                  |
    /// |-----------------------------|--------------------------|
    /// | `HOST`                      | `0.0.0.0`                |
    /// | `PORT`                      | `3000`                   |
    /// | `DATABASE_URL`              | required                 |
    /// | `DB_MAX_CONNECTIONS`        | `10`                     |
    /// | `DB_RETRY_INTERVAL_SECS`    | `5`                      |
    /// | `REQUEST_TIMEOUT_SECS`      | `60`                     |
    /// | `CORS_ORIGINS`              | `http://localhost:5173`  |
    /// | `CORS_ALLOW_PRIVATE_NETWORK`| `true`                   |
    /// | `PYTHON`                    | `python3`                |
    /// | `PREDICT_SCRIPT`            | `predict.py`             |
    /// | `PREDICT_WORKDIR`           | unset                    |
    /// | `PREDICT_MAX_CONCURRENT`    | `4`                      |
    /// | `PREDICT_TIMEOUT_SECS`      | `45`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let origins = get("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let prediction = PredictionConfig {
            interpreter: get("PYTHON").unwrap_or_else(|| "python3".into()),
            script: get("PREDICT_SCRIPT")
                .unwrap_or_else(|| "predict.py".into())
                .into(),
            working_directory: get("PREDICT_WORKDIR").map(PathBuf::from),
            max_concurrent: parse_or(&get, "PREDICT_MAX_CONCURRENT", 4)?,
            timeout_secs: parse_or(&get, "PREDICT_TIMEOUT_SECS", 45)?,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&get, "PORT", 3000)?,
            database_url,
            db_max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 10)?,
            db_retry_interval_secs: parse_or(&get, "DB_RETRY_INTERVAL_SECS", 5)?,
            request_timeout_secs: parse_or(&get, "REQUEST_TIMEOUT_SECS", 60)?,
            cors: CorsConfig {
                origins,
                allow_private_network: parse_bool_or(&get, "CORS_ALLOW_PRIVATE_NETWORK", true)?,
            },
            prediction,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn parse_bool_or<G>(get: &G, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid {
                key,
                value: raw,
                reason: "expected true or false".into(),
            }),
        },
    }
}
