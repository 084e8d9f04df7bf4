//! Environment-driven configuration. Every knob has a `REGISTRA_*` variable
//! and a sensible default; validation happens here so the rest of the crate
//! can assume well-formed settings.

use crate::errors::ConfigError;
use crate::session::inactivity::{ActivityKind, InactivityConfig};
use std::{env, path::PathBuf, time::Duration};
use url::Url;

pub const ENV_API_URL: &str = "REGISTRA_API_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "REGISTRA_REQUEST_TIMEOUT_SECS";
pub const ENV_INACTIVITY_TIMEOUT: &str = "REGISTRA_INACTIVITY_TIMEOUT_SECS";
pub const ENV_WARNING: &str = "REGISTRA_WARNING_SECS";
pub const ENV_TRACKED_EVENTS: &str = "REGISTRA_TRACKED_EVENTS";
pub const ENV_TOKEN_PATH: &str = "REGISTRA_TOKEN_PATH";

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_INACTIVITY_TIMEOUT_SECS: u64 = 15 * 60;
const DEFAULT_WARNING_SECS: u64 = 60;

/// Resolved application configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub inactivity: InactivityConfig,
    /// Where the session token is persisted; `None` keeps it in memory only.
    pub token_path: Option<PathBuf>,
}

impl AppConfig {
    /// Loads and validates configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable fails to parse, the base URL is not a
    /// valid URL, or the warning lead is not shorter than the timeout.
    pub fn load() -> Result<Self, ConfigError> {
        let api_base_url =
            env::var(ENV_API_URL).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Url::parse(&api_base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: api_base_url.clone(),
            source,
        })?;

        let request_timeout =
            Duration::from_secs(env_secs(ENV_REQUEST_TIMEOUT, DEFAULT_REQUEST_TIMEOUT_SECS)?);
        let timeout =
            Duration::from_secs(env_secs(ENV_INACTIVITY_TIMEOUT, DEFAULT_INACTIVITY_TIMEOUT_SECS)?);
        let warning = Duration::from_secs(env_secs(ENV_WARNING, DEFAULT_WARNING_SECS)?);
        let inactivity = InactivityConfig::new(timeout, Some(warning), tracked_events()?)?;

        Ok(Self {
            api_base_url,
            request_timeout,
            inactivity,
            token_path: token_path(),
        })
    }
}

fn env_secs(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Err(_) => Ok(default),
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}

fn tracked_events() -> Result<Vec<ActivityKind>, ConfigError> {
    let Ok(raw) = env::var(ENV_TRACKED_EVENTS) else {
        return Ok(ActivityKind::defaults());
    };
    if raw.trim().is_empty() {
        return Ok(ActivityKind::defaults());
    }
    raw.split(',').map(|part| part.parse::<ActivityKind>()).collect()
}

fn token_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(ENV_TOKEN_PATH) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("registra").join("session-token"))
}
