//! Configuration module for the incident console.
//!
//! All configuration is loaded from environment variables (and an optional `.env` file)
//! with sensible defaults. Command-line flags override individual values.

use std::env;
use std::time::Duration;

use crate::errors::AppError;
use crate::models::UserRole;
use crate::view::DEFAULT_PAGE_SIZE;

/// Console configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the incident backend
    pub api_url: String,
    /// Bearer token of the current session
    pub api_token: Option<String>,
    /// Role of the current session
    pub role: Option<UserRole>,
    /// Rows per page in every table
    pub page_size: usize,
    /// Interval between incident feed polls
    pub poll_interval: Duration,
    /// Timeout of a single backend request
    pub request_timeout: Duration,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8080".to_string(),
            api_token: None,
            role: None,
            page_size: DEFAULT_PAGE_SIZE,
            poll_interval: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let api_url = env::var("INCIDENTS_API_URL").unwrap_or(defaults.api_url);

        let api_token = env::var("INCIDENTS_API_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());

        let role = match env::var("INCIDENTS_ROLE") {
            Ok(raw) => Some(UserRole::parse(&raw).ok_or_else(|| {
                AppError::Config(format!("Invalid INCIDENTS_ROLE '{}'", raw))
            })?),
            Err(_) => None,
        };

        let page_size = parse_var("INCIDENTS_PAGE_SIZE")?.unwrap_or(defaults.page_size);

        let poll_interval = parse_var("INCIDENTS_POLL_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.poll_interval);

        let request_timeout = parse_var("INCIDENTS_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let log_level = env::var("INCIDENTS_LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Self {
            api_url,
            api_token,
            role,
            page_size,
            poll_interval,
            request_timeout,
            log_level,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::Config(format!("Invalid {} '{}'", name, raw))),
        Err(_) => Ok(None),
    }
}
