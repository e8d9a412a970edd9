//! Client configuration parsed from environment variables.

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Server origin, without a trailing slash.
    pub base_url: String,
    pub poll_interval: Duration,
    /// Whether the viewer is an operator (encargado). Decides which side
    /// messages are drawn on and gates closing conversations.
    pub viewer_is_operator: bool,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Raw `Cookie` header forwarded on every request.
    pub session_cookie: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            viewer_is_operator: false,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            session_cookie: None,
        }
    }
}

impl ChatConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `CHAT_BASE_URL`: default `http://127.0.0.1:5000`
    /// - `CHAT_POLL_INTERVAL_MS`: default 3000
    /// - `CHAT_VIEWER_IS_OPERATOR`: `true`/`false`, default false
    /// - `CHAT_REQUEST_TIMEOUT_SECS`: default 30
    /// - `CHAT_CONNECT_TIMEOUT_SECS`: default 10
    /// - `CHAT_SESSION_COOKIE`: raw cookie header value
    ///
    /// # Errors
    ///
    /// Returns an error when `CHAT_VIEWER_IS_OPERATOR` is not a boolean or the
    /// poll interval is zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(&std::env::var("CHAT_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into()));

        let poll_ms = env_parse("CHAT_POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS);
        if poll_ms == 0 {
            return Err(ConfigError::InvalidValue { var: "CHAT_POLL_INTERVAL_MS", value: "0".into() });
        }

        let viewer_is_operator = match std::env::var("CHAT_VIEWER_IS_OPERATOR") {
            Ok(raw) => parse_bool(&raw)
                .ok_or(ConfigError::InvalidValue { var: "CHAT_VIEWER_IS_OPERATOR", value: raw })?,
            Err(_) => false,
        };

        let session_cookie = std::env::var("CHAT_SESSION_COOKIE").ok().filter(|c| !c.trim().is_empty());

        Ok(Self {
            base_url,
            poll_interval: Duration::from_millis(poll_ms),
            viewer_is_operator,
            request_timeout: Duration::from_secs(env_parse("CHAT_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)),
            connect_timeout: Duration::from_secs(env_parse("CHAT_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)),
            session_cookie,
        })
    }
}

#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
