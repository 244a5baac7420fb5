//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use crate::error::AppError;
use crate::state::security_config::{SecurityConfig, DEFAULT_SESSION_TTL};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://127.0.0.1:5173"];

#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Security configuration
    pub jwt_secret: String,
    pub session_ttl: Duration,

    // CORS
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("BACKEND_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("BACKEND_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("BACKEND_PORT must be a valid port number, got '{raw}'"))
            })?,
            None => DEFAULT_PORT,
        };

        let jwt_secret = lookup("BACKEND_JWT_SECRET")
            .filter(|secret| !secret.trim().is_empty())
            .ok_or_else(|| AppError::config("BACKEND_JWT_SECRET must be set and non-empty"))?;

        let session_ttl = match lookup("SESSION_TTL_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(AppError::config(format!(
                        "SESSION_TTL_SECS must be a positive integer, got '{raw}'"
                    )))
                }
            },
            None => DEFAULT_SESSION_TTL,
        };

        let cors_allowed_origins = parse_origins(lookup("CORS_ALLOWED_ORIGINS").as_deref());

        Ok(Self {
            host,
            port,
            jwt_secret,
            session_ttl,
            cors_allowed_origins,
        })
    }

    pub fn security(&self) -> SecurityConfig {
        SecurityConfig::new(self.jwt_secret.as_bytes()).with_session_ttl(self.session_ttl)
    }
}

/// Comma-separated http(s) origins; falls back to the local dev frontend.
fn parse_origins(raw: Option<&str>) -> Vec<String> {
    let origins: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect()
    } else {
        origins
    }
}
