//! Server configuration
//!
//! Everything is read from the environment (optionally seeded from `.env`).
//! `from_lookup` takes the lookup as a closure so tests can supply values
//! without touching process state.

use std::net::{Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use thiserror::Error;
use waifu_integration_twitter::TwitterConfig;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_RATE_LIMIT_MAX: u32 = 100;
pub const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;
pub const DEFAULT_POST_INTERVAL_SECS: u64 = 60 * 60;
pub const DEFAULT_MEMORY_LOG_INTERVAL_SECS: u64 = 5 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Per-IP request cap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_requests: NonZeroU32,
    pub window: Duration,
}

#[derive(Clone)]
pub struct ServerConfig {
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: String,
    /// `None` disables the scheduled poster
    pub twitter: Option<TwitterConfig>,
    pub port: u16,
    pub allowed_origin: HeaderValue,
    pub rate_limit: RateLimitConfig,
    pub post_interval: Duration,
    pub memory_log_interval: Duration,
}

impl ServerConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let openai_api_key = get("OPENAI_API_KEY").ok_or(ConfigError::Missing("OPENAI_API_KEY"))?;

        let allowed_origin_raw =
            get("ALLOWED_ORIGIN").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());
        let allowed_origin =
            HeaderValue::from_str(&allowed_origin_raw).map_err(|e| ConfigError::Invalid {
                key: "ALLOWED_ORIGIN",
                value: allowed_origin_raw.clone(),
                reason: e.to_string(),
            })?;

        let max_requests: u32 = parse_or(&get, "RATE_LIMIT_MAX", DEFAULT_RATE_LIMIT_MAX)?;
        let max_requests = NonZeroU32::new(max_requests).ok_or_else(|| ConfigError::Invalid {
            key: "RATE_LIMIT_MAX",
            value: max_requests.to_string(),
            reason: "must be greater than zero".to_string(),
        })?;

        Ok(Self {
            openai_api_key,
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            twitter: TwitterConfig::from_parts(
                get("TWITTER_API_KEY"),
                get("TWITTER_API_SECRET"),
                get("TWITTER_ACCESS_TOKEN"),
                get("TWITTER_ACCESS_SECRET"),
            ),
            port: parse_or(&get, "PORT", DEFAULT_PORT)?,
            allowed_origin,
            rate_limit: RateLimitConfig {
                max_requests,
                window: positive_secs(&get, "RATE_LIMIT_WINDOW_SECS", DEFAULT_RATE_LIMIT_WINDOW_SECS)?,
            },
            post_interval: positive_secs(&get, "POST_INTERVAL_SECS", DEFAULT_POST_INTERVAL_SECS)?,
            memory_log_interval: positive_secs(
                &get,
                "MEMORY_LOG_INTERVAL_SECS",
                DEFAULT_MEMORY_LOG_INTERVAL_SECS,
            )?,
        })
    }

    /// Listen on all interfaces
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: raw,
            reason: e.to_string(),
        }),
    }
}

fn positive_secs<G>(get: &G, key: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let secs: u64 = parse_or(get, key, default)?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: secs.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

// Credentials stay out of logs.
impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("openai_api_key", &"***")
            .field("openai_model", &self.openai_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("twitter", &self.twitter.is_some())
            .field("port", &self.port)
            .field("allowed_origin", &self.allowed_origin)
            .field("rate_limit", &self.rate_limit)
            .field("post_interval", &self.post_interval)
            .field("memory_log_interval", &self.memory_log_interval)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_openai_key_is_fatal() {
        let err = ServerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OPENAI_API_KEY")));

        let err = ServerConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OPENAI_API_KEY")));
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-test")])).unwrap();

        assert_eq!(config.openai_model, DEFAULT_MODEL);
        assert_eq!(config.openai_base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.allowed_origin, DEFAULT_ALLOWED_ORIGIN);
        assert_eq!(config.rate_limit.max_requests.get(), DEFAULT_RATE_LIMIT_MAX);
        assert_eq!(config.rate_limit.window, Duration::from_secs(900));
        assert_eq!(config.post_interval, Duration::from_secs(3600));
        assert!(config.twitter.is_none());
    }

    #[test]
    fn test_overrides_and_twitter() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("PORT", "8080"),
            ("ALLOWED_ORIGIN", "https://waifu.example.com"),
            ("RATE_LIMIT_MAX", "10"),
            ("RATE_LIMIT_WINDOW_SECS", "60"),
            ("TWITTER_API_KEY", "k"),
            ("TWITTER_API_SECRET", "s"),
            ("TWITTER_ACCESS_TOKEN", "t"),
            ("TWITTER_ACCESS_SECRET", "ts"),
        ]))
        .unwrap();

        assert_eq!(config.addr().port(), 8080);
        assert_eq!(config.allowed_origin, "https://waifu.example.com");
        assert_eq!(config.rate_limit.max_requests.get(), 10);
        assert_eq!(config.rate_limit.window, Duration::from_secs(60));
        assert!(config.twitter.is_some());
    }

    #[test]
    fn test_partial_twitter_credentials_disable_poster() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("TWITTER_API_KEY", "k"),
            ("TWITTER_API_SECRET", "s"),
        ]))
        .unwrap();
        assert!(config.twitter.is_none());
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "sk"), ("PORT", "http")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let err = ServerConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk"),
            ("RATE_LIMIT_MAX", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "RATE_LIMIT_MAX", .. }));

        let err = ServerConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk"),
            ("POST_INTERVAL_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "POST_INTERVAL_SECS", .. }));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config =
            ServerConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-very-secret")])).unwrap();
        assert!(!format!("{:?}", config).contains("sk-very-secret"));
    }
}
