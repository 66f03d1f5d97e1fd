//! Configuration loaded from environment variables.
//!
//! Loading goes through a lookup function so parsing can be tested without
//! touching the process environment; [`ServiceConfig::from_env`] and
//! [`ServerConfig::from_env`] read the real environment.

use std::str::FromStr;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Which item store backs the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    DynamoDb {
        table_name: String,
        endpoint_url: Option<String>,
    },
    Memory,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "text" => Ok(Self::Pretty),
            other => Err(format!("unknown log format {other}")),
        }
    }
}

impl LogFormat {
    /// Read `LOG_FORMAT`, falling back to `default` when unset or invalid.
    pub fn from_env_or(default: LogFormat) -> Self {
        std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}

/// Settings shared by the Lambda and the local harness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub store: StoreConfig,
    /// Report conditional-check failures as `ConflictError` instead of
    /// `InternalError` (default: `false`).
    pub surface_conflict_errors: bool,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `STORE_BACKEND`           | `dynamodb` (or `memory`)   |
    /// | `DYNAMODB_TABLE_NAME`     | required for `dynamodb`    |
    /// | `DYNAMODB_ENDPOINT_URL`   | unset                      |
    /// | `SURFACE_CONFLICT_ERRORS` | `false`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend = non_empty(&lookup, "STORE_BACKEND").unwrap_or_else(|| "dynamodb".into());
        let store = match backend.to_ascii_lowercase().as_str() {
            "dynamodb" => StoreConfig::DynamoDb {
                table_name: non_empty(&lookup, "DYNAMODB_TABLE_NAME")
                    .ok_or(ConfigError::Missing("DYNAMODB_TABLE_NAME"))?,
                endpoint_url: non_empty(&lookup, "DYNAMODB_ENDPOINT_URL"),
            },
            "memory" => StoreConfig::Memory,
            _ => {
                return Err(ConfigError::Invalid {
                    var: "STORE_BACKEND",
                    value: backend,
                    reason: "expected dynamodb or memory".into(),
                })
            }
        };

        let surface_conflict_errors = parse_or(&lookup, "SURFACE_CONFLICT_ERRORS", false)?;

        Ok(Self {
            store,
            surface_conflict_errors,
        })
    }
}

/// Local HTTP harness configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub service: ServiceConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default   |
    /// |------------------------|-----------|
    /// | `HOST`                 | `0.0.0.0` |
    /// | `PORT`                 | `3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`      |
    ///
    /// plus everything read by [`ServiceConfig::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: non_empty(&lookup, "HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&lookup, "PORT", 3000)?,
            request_timeout_secs: parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?,
            service: ServiceConfig::from_lookup(lookup)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn non_empty<F>(lookup: &F, var: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(lookup, var) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}
