//! Client configuration loaded from the environment.

use std::time::Duration;

use crate::error::ConfigError;

/// Default service host used when `TRAINERDEX_HOST` is unset.
pub const DEFAULT_HOST: &str = "https://trainerdex.app/";

const DEFAULT_MAX_ATTEMPTS: u32 = 5;
const DEFAULT_INITIAL_BACKOFF_MS: u64 = 1000;

/// Settings for building an [`HttpConnector`](crate::HttpConnector).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the TrainerDex service
    pub host: String,
    /// API token sent as `Authorization: Token <token>`
    pub token: Option<String>,
    /// User agent sent with every request
    pub user_agent: String,
    /// Maximum attempts for requests failing with a retryable error
    pub max_attempts: u32,
    /// Backoff before the first retry, doubled on every subsequent attempt
    pub initial_backoff: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            token: None,
            user_agent: default_user_agent(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_backoff: Duration::from_millis(DEFAULT_INITIAL_BACKOFF_MS),
        }
    }
}

impl Config {
    /// Loads a `.env` file if one is present, then reads the configuration from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Variables
    /// - `TRAINERDEX_HOST` - Service base URL, defaults to [`DEFAULT_HOST`]
    /// - `TRAINERDEX_TOKEN` - Optional API token
    /// - `TRAINERDEX_USER_AGENT` - Optional user agent override
    /// - `TRAINERDEX_MAX_ATTEMPTS` - Positive integer, defaults to 5
    /// - `TRAINERDEX_INITIAL_BACKOFF_MS` - Integer milliseconds, defaults to 1000
    ///
    /// # Returns
    /// - `Ok(Config)` - Configuration with defaults applied for unset variables
    /// - `Err(ConfigError::InvalidEnvValue)` - A numeric variable failed to parse
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("TRAINERDEX_HOST")
            .filter(|host| !host.trim().is_empty())
            .unwrap_or(defaults.host);
        let token = lookup("TRAINERDEX_TOKEN").filter(|token| !token.trim().is_empty());
        let user_agent = lookup("TRAINERDEX_USER_AGENT").unwrap_or(defaults.user_agent);

        let max_attempts = match lookup("TRAINERDEX_MAX_ATTEMPTS") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(0) => {
                    return Err(ConfigError::InvalidEnvValue {
                        var: "TRAINERDEX_MAX_ATTEMPTS".to_string(),
                        reason: "must be at least 1".to_string(),
                    })
                }
                Ok(attempts) => attempts,
                Err(e) => {
                    return Err(ConfigError::InvalidEnvValue {
                        var: "TRAINERDEX_MAX_ATTEMPTS".to_string(),
                        reason: e.to_string(),
                    })
                }
            },
            None => defaults.max_attempts,
        };

        let initial_backoff = match lookup("TRAINERDEX_INITIAL_BACKOFF_MS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| ConfigError::InvalidEnvValue {
                    var: "TRAINERDEX_INITIAL_BACKOFF_MS".to_string(),
                    reason: e.to_string(),
                })?,
            None => defaults.initial_backoff,
        };

        Ok(Self {
            host,
            token,
            user_agent,
            max_attempts,
            initial_backoff,
        })
    }
}

fn default_user_agent() -> String {
    format!(
        "trainerdex-rs/{} (+https://github.com/TrainerDex/trainerdex-rs)",
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn applies_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.host, DEFAULT_HOST);
        assert!(config.token.is_none());
    }

    #[test]
    fn reads_all_variables() {
        let config = Config::from_lookup(lookup(&[
            ("TRAINERDEX_HOST", "http://localhost:8000/"),
            ("TRAINERDEX_TOKEN", "abc123"),
            ("TRAINERDEX_USER_AGENT", "TestBot/1.0"),
            ("TRAINERDEX_MAX_ATTEMPTS", "2"),
            ("TRAINERDEX_INITIAL_BACKOFF_MS", "10"),
        ]))
        .unwrap();

        assert_eq!(config.host, "http://localhost:8000/");
        assert_eq!(config.token.as_deref(), Some("abc123"));
        assert_eq!(config.user_agent, "TestBot/1.0");
        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.initial_backoff, Duration::from_millis(10));
    }

    #[test]
    fn rejects_invalid_attempts() {
        let zero = Config::from_lookup(lookup(&[("TRAINERDEX_MAX_ATTEMPTS", "0")]));
        assert!(matches!(zero, Err(ConfigError::InvalidEnvValue { .. })));

        let text = Config::from_lookup(lookup(&[("TRAINERDEX_MAX_ATTEMPTS", "many")]));
        assert!(matches!(text, Err(ConfigError::InvalidEnvValue { .. })));
    }

    #[test]
    fn blank_token_is_treated_as_unset() {
        let config = Config::from_lookup(lookup(&[("TRAINERDEX_TOKEN", "  ")])).unwrap();
        assert!(config.token.is_none());
    }
}
