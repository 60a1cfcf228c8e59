//! Configuration for the service under test.

use std::time::Duration;

use sonda_application::{ApplicationError, ApplicationResult};
use url::Url;

/// Environment variable naming the base URL of the service under test.
pub const BASE_URL_ENV: &str = "SONDA_BASE_URL";

/// Environment variable overriding the per-request timeout in milliseconds.
pub const TIMEOUT_MS_ENV: &str = "SONDA_TIMEOUT_MS";

const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);
const DEFAULT_USER_AGENT: &str = concat!("sonda/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the service under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Base URL every request path is joined onto.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User agent presented to the service.
    pub user_agent: String,
}

impl ServiceConfig {
    /// Creates a configuration for the given base URL.
    ///
    /// A trailing slash is appended when missing so relative request paths
    /// join underneath the base path instead of replacing it.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Config`] when the URL cannot be parsed.
    pub fn new(base_url: &str) -> ApplicationResult<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let parsed = Url::parse(&normalized).map_err(|e| {
            ApplicationError::Config(format!("invalid base URL '{base_url}': {e}"))
        })?;
        Ok(Self {
            base_url: parsed,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads the configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Config`] when `SONDA_BASE_URL` is unset
    /// or empty, when the URL is invalid, or when `SONDA_TIMEOUT_MS` is not
    /// a positive integer.
    pub fn from_env() -> ApplicationResult<Self> {
        Self::from_vars(
            std::env::var(BASE_URL_ENV).ok(),
            std::env::var(TIMEOUT_MS_ENV).ok(),
        )
    }

    /// Builds the configuration from raw variable values.
    ///
    /// Parsing is separated from the environment reads so it can be tested
    /// without mutating process-global state.
    fn from_vars(
        base_url: Option<String>,
        timeout_ms: Option<String>,
    ) -> ApplicationResult<Self> {
        let base_url = base_url
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ApplicationError::Config(format!("{BASE_URL_ENV} is not set")))?;
        let mut config = Self::new(&base_url)?;
        if let Some(raw) = timeout_ms {
            config.timeout = parse_timeout_ms(&raw)?;
        }
        Ok(config)
    }
}

fn parse_timeout_ms(raw: &str) -> ApplicationResult<Duration> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .ok_or_else(|| {
            ApplicationError::Config(format!(
                "{TIMEOUT_MS_ENV} must be a positive integer, got '{raw}'"
            ))
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_new_appends_trailing_slash() {
        let config = ServiceConfig::new("https://service.example.com/api").unwrap();
        assert_eq!(config.base_url.as_str(), "https://service.example.com/api/");
    }

    #[test]
    fn test_new_keeps_existing_slash() {
        let config = ServiceConfig::new("https://service.example.com/api/").unwrap();
        assert_eq!(config.base_url.as_str(), "https://service.example.com/api/");
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let err = ServiceConfig::new("not a url").unwrap_err();
        assert!(err.to_string().contains("invalid base URL"));
    }

    #[test]
    fn test_from_vars_requires_base_url() {
        let err = ServiceConfig::from_vars(None, None).unwrap_err();
        assert_eq!(err.to_string(), "invalid configuration: SONDA_BASE_URL is not set");

        let err = ServiceConfig::from_vars(Some("  ".to_string()), None).unwrap_err();
        assert_eq!(err.to_string(), "invalid configuration: SONDA_BASE_URL is not set");
    }

    #[test]
    fn test_from_vars_parses_timeout() {
        let config = ServiceConfig::from_vars(
            Some("https://service.example.com".to_string()),
            Some("2500".to_string()),
        )
        .unwrap();
        assert_eq!(config.timeout, Duration::from_millis(2500));
    }

    #[test]
    fn test_from_vars_default_timeout() {
        let config =
            ServiceConfig::from_vars(Some("https://service.example.com".to_string()), None)
                .unwrap();
        assert_eq!(config.timeout, Duration::from_millis(10_000));
    }

    #[test]
    fn test_timeout_must_be_positive_integer() {
        for raw in ["0", "-5", "abc", ""] {
            let err = ServiceConfig::from_vars(
                Some("https://service.example.com".to_string()),
                Some(raw.to_string()),
            )
            .unwrap_err();
            assert!(err.to_string().contains("must be a positive integer"));
        }
    }
}
