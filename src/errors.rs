use std::time::Duration;
use thiserror::Error;

/// Reason the server attached to a 401 response body, when it attached one.
///
/// Only `"inactivity"` is given a distinct user-visible path; every other
/// value collapses into a plain unauthorized error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogoutReason {
    Inactivity,
}

/// Errors surfaced by the HTTP client adapter and everything built on it.
#[derive(Clone, Debug, Error)]
pub enum ApiError {
    #[error("config error: {0}")]
    Config(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("unauthorized")]
    Unauthorized { reason: Option<LogoutReason> },
    #[error("response error: {0}")]
    Parse(String),
}

/// Configuration problems detected while loading the environment or
/// building the route table. All of these fail fast at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
    #[error("invalid API base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unknown activity kind: {0:?}")]
    UnknownActivityKind(String),
    #[error("inactivity warning ({warning:?}) must be shorter than the timeout ({timeout:?})")]
    WarningNotBeforeTimeout { warning: Duration, timeout: Duration },
    #[error("duplicate route {field} {value:?}")]
    DuplicateRoute { field: &'static str, value: String },
    #[error("route {name:?} cannot require both authenticated and guest access")]
    ConflictingRouteFlags { name: String },
}

/// Errors from resolving a navigation attempt.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("unknown route {0:?}")]
    UnknownRoute(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}
