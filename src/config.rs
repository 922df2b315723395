//! Runtime configuration.
//!
//! Values come from the environment (a `.env` file is honoured via `dotenvy`);
//! the CLI can override them with flags.

use crate::error::ConfigError;
use std::time::Duration;
use url::Url;

pub const BASE_URL_ENV: &str = "ADDRESS_BOOK_BASE_URL";
/// Name used by the web front end; accepted so both share one `.env`.
pub const LEGACY_BASE_URL_ENV: &str = "NEXT_PUBLIC_URL";
pub const TIMEOUT_ENV: &str = "ADDRESS_BOOK_TIMEOUT_SECS";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend origin, e.g. `http://localhost:3000`. Never ends with `/`.
    pub base_url: Url,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: None,
        })
    }

    /// Load from the environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());
        let base_url = non_empty(BASE_URL_ENV)
            .or_else(|| non_empty(LEGACY_BASE_URL_ENV))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = match get(TIMEOUT_ENV) {
            Some(raw) if !raw.trim().is_empty() => Some(parse_timeout(&raw)?),
            _ => None,
        };

        Ok(Self {
            base_url: parse_base_url(&base_url)?,
            timeout,
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Base URL as a string without the trailing slash `Url` always adds.
    pub fn base_url_str(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|source| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme(value.to_string())),
    }
}

pub(crate) fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidTimeout {
            value: value.to_string(),
        })
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
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url_str(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_primary_env_wins_over_legacy() {
        let config = Config::from_lookup(lookup(&[
            (BASE_URL_ENV, "https://api.example.com"),
            (LEGACY_BASE_URL_ENV, "http://legacy:3000"),
        ]))
        .unwrap();
        assert_eq!(config.base_url_str(), "https://api.example.com");

        let legacy = Config::from_lookup(lookup(&[(LEGACY_BASE_URL_ENV, "http://legacy:3000")]))
            .unwrap();
        assert_eq!(legacy.base_url_str(), "http://legacy:3000");
    }

    #[test]
    fn test_blank_primary_falls_back_to_legacy() {
        let config = Config::from_lookup(lookup(&[
            (BASE_URL_ENV, "  "),
            (LEGACY_BASE_URL_ENV, "http://legacy:3000"),
        ]))
        .unwrap();
        assert_eq!(config.base_url_str(), "http://legacy:3000");

        let config =
            Config::from_lookup(lookup(&[(BASE_URL_ENV, ""), (LEGACY_BASE_URL_ENV, "")])).unwrap();
        assert_eq!(config.base_url_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_timeout_parsing() {
        let config = Config::from_lookup(lookup(&[(TIMEOUT_ENV, "15")])).unwrap();
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));

        let err = Config::from_lookup(lookup(&[(TIMEOUT_ENV, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(
            Config::new("not a url"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            Config::new("ftp://example.com"),
            Err(ConfigError::UnsupportedScheme(_))
        ));
    }
}
