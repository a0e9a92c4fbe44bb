//! Configuration loaded from environment variables.
//!
//! - `WOTD_DATABASE_URL`: SQLite database holding the daily word, saved words and settings
//! - `WOTD_RANDOM_WORD_URL`: random word service
//! - `WOTD_DICTIONARY_URL`: dictionary service, the word is appended as a path segment
//! - `WOTD_NOTIFICATIONS`: `local` to keep reminders in the local store, `off` for none
//! - `WOTD_LOG`: tracing filter, falls back to `RUST_LOG`

use std::env;
use std::str::FromStr;

use dictionary::Endpoints;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://word_of_the_day.db";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationMode {
    #[default]
    Local,
    Off,
}

impl FromStr for NotificationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "on" => Ok(NotificationMode::Local),
            "off" | "none" => Ok(NotificationMode::Off),
            _ => Err(ConfigError::Invalid {
                name: "WOTD_NOTIFICATIONS",
                value: s.to_owned(),
                reason: "expected 'local' or 'off'",
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub endpoints: Endpoints,
    pub notifications: NotificationMode,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            endpoints: Endpoints::default(),
            notifications: NotificationMode::default(),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Config::default();
        if let Some(url) = var("WOTD_DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(url) = var("WOTD_RANDOM_WORD_URL") {
            config.endpoints.random_word = validate_url("WOTD_RANDOM_WORD_URL", url)?;
        }
        if let Some(url) = var("WOTD_DICTIONARY_URL") {
            config.endpoints.dictionary = validate_url("WOTD_DICTIONARY_URL", url)?;
        }
        if let Some(mode) = var("WOTD_NOTIFICATIONS") {
            config.notifications = mode.parse()?;
        }
        if let Some(filter) = var("WOTD_LOG").or_else(|| var("RUST_LOG")) {
            config.log_filter = filter;
        }
        Ok(config)
    }
}

fn validate_url(name: &'static str, url: String) -> Result<String, ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url)
    } else {
        Err(ConfigError::Invalid {
            name,
            value: url,
            reason: "expected an http(s) URL",
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        assert_eq!(load(&[]).unwrap(), Config::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("WOTD_DATABASE_URL", "sqlite://other.db"),
            ("WOTD_DICTIONARY_URL", "http://localhost:9000/entries"),
            ("WOTD_NOTIFICATIONS", "OFF"),
            ("RUST_LOG", "debug"),
        ])
        .unwrap();
        assert_eq!(config.database_url, "sqlite://other.db");
        assert_eq!(config.endpoints.dictionary, "http://localhost:9000/entries");
        assert_eq!(config.endpoints.random_word, Endpoints::default().random_word);
        assert_eq!(config.notifications, NotificationMode::Off);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn wotd_log_wins_over_rust_log() {
        let config = load(&[("WOTD_LOG", "trace"), ("RUST_LOG", "debug")]).unwrap();
        assert_eq!(config.log_filter, "trace");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            load(&[("WOTD_NOTIFICATIONS", "push")]),
            Err(ConfigError::Invalid { name: "WOTD_NOTIFICATIONS", .. })
        ));
        assert!(matches!(
            load(&[("WOTD_RANDOM_WORD_URL", "ftp://words")]),
            Err(ConfigError::Invalid { name: "WOTD_RANDOM_WORD_URL", .. })
        ));
    }
}
