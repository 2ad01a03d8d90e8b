//! Process configuration, read once from the environment at startup.
//!
//! Environment variables:
//! - `STUDENTHUB_JWT_SECRET` (required, non-empty)
//! - `STUDENTHUB_TOKEN_TTL_SECS` (positive integer, default 3600)
//! - `STUDENTHUB_EXEMPT_PATHS` (comma-separated, replaces the defaults)
//! - `STUDENTHUB_HOST` (default `127.0.0.1`)
//! - `STUDENTHUB_PORT` (default `8080`)
//! - `CORS_ALLOWED_ORIGINS` (comma-separated; unset allows any origin, a
//!   value with no valid origin is rejected)

use std::time::Duration;

use crate::config::exempt_paths::ExemptPaths;
use crate::middleware::cors::parse_allowed_origins;
use crate::state::security_config::{SecurityConfig, DEFAULT_TOKEN_TTL};
use crate::AppError;

pub const JWT_SECRET_VAR: &str = "STUDENTHUB_JWT_SECRET";
pub const TOKEN_TTL_VAR: &str = "STUDENTHUB_TOKEN_TTL_SECS";
pub const EXEMPT_PATHS_VAR: &str = "STUDENTHUB_EXEMPT_PATHS";
pub const HOST_VAR: &str = "STUDENTHUB_HOST";
pub const PORT_VAR: &str = "STUDENTHUB_PORT";
pub const CORS_ORIGINS_VAR: &str = "CORS_ALLOWED_ORIGINS";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub security: SecurityConfig,
    pub exempt_paths: ExemptPaths,
    /// `None` allows any origin
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(JWT_SECRET_VAR)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| AppError::config(format!("{JWT_SECRET_VAR} must be set")))?;

        let token_ttl = match lookup(TOKEN_TTL_VAR) {
            Some(raw) => parse_ttl(&raw)?,
            None => DEFAULT_TOKEN_TTL,
        };

        let exempt_paths = lookup(EXEMPT_PATHS_VAR)
            .and_then(|raw| ExemptPaths::parse_list(&raw))
            .unwrap_or_default();

        let host = lookup(HOST_VAR).unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match lookup(PORT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("{PORT_VAR} must be a valid port number")))?,
            None => 8080,
        };

        let cors_allowed_origins = match lookup(CORS_ORIGINS_VAR) {
            Some(raw) => {
                let origins = parse_allowed_origins(&raw);
                if origins.is_empty() {
                    return Err(AppError::config(format!(
                        "{CORS_ORIGINS_VAR} is set but lists no valid http(s) origin"
                    )));
                }
                Some(origins)
            }
            None => None,
        };

        Ok(Self {
            host,
            port,
            security: SecurityConfig::new(secret.into_bytes()).with_token_ttl(token_ttl),
            exempt_paths,
            cors_allowed_origins,
        })
    }
}

fn parse_ttl(raw: &str) -> Result<Duration, AppError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(AppError::config(format!(
            "{TOKEN_TTL_VAR} must be a positive number of seconds"
        ))),
    }
}
