use url::Url;

use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_USER_AGENT: &str = concat!("travel-marketplace/", env!("CARGO_PKG_VERSION"));

pub const ENV_BASE_URL: &str = "MARKETPLACE_API_URL";
pub const ENV_TIMEOUT_MS: &str = "MARKETPLACE_API_TIMEOUT_MS";
pub const ENV_USER_AGENT: &str = "MARKETPLACE_USER_AGENT";

// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let timeout_ms = match read(ENV_TIMEOUT_MS) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                ClientError::ConfigError(format!("invalid integer for {ENV_TIMEOUT_MS}: {raw}"))
            })?,
            None => defaults.timeout_ms,
        };

        let config = Self {
            base_url: read(ENV_BASE_URL).unwrap_or(defaults.base_url),
            timeout_ms,
            user_agent: read(ENV_USER_AGENT).unwrap_or(defaults.user_agent),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            ClientError::ConfigError(format!("invalid base url {}: {e}", self.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ClientError::ConfigError(format!(
                "base url must be http(s), got {}",
                url.scheme()
            )));
        }
        if self.timeout_ms == 0 {
            return Err(ClientError::ConfigError(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    // Joins the base url and an API path without doubling slashes
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.timeout_ms, 10_000);
    }

    #[test]
    fn test_reads_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "https://api.example.com/v1/"),
            (ENV_TIMEOUT_MS, " 2500 "),
            (ENV_USER_AGENT, ""),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://api.example.com/v1/");
        assert_eq!(config.timeout_ms, 2500);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(
            config.endpoint("/tours/42"),
            "https://api.example.com/v1/tours/42"
        );
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_MS, "soon")])).unwrap_err();
        assert!(matches!(err, ClientError::ConfigError(_)));

        let err = ClientConfig::from_lookup(lookup(&[(ENV_BASE_URL, "ftp://files")])).unwrap_err();
        assert!(matches!(err, ClientError::ConfigError(_)));

        let err = ClientConfig::from_lookup(lookup(&[(ENV_BASE_URL, "not a url")])).unwrap_err();
        assert!(matches!(err, ClientError::ConfigError(_)));

        let err = ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT_MS, "0")])).unwrap_err();
        assert!(matches!(err, ClientError::ConfigError(_)));
    }
}
