//! Amazon scraper configuration.

use std::time::Duration;

use serde::Deserialize;

/// Connection, retry and pacing settings for the Amazon scraper.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AmazonConfig {
    /// Marketplace root, used to resolve relative product paths.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Total attempts per page, including the first.
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Backoff before the first retry; doubled for each further one.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// Lower bound of the random pause before every request.
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    /// Upper bound of the random pause before every request.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_base_url() -> String {
    "https://www.amazon.com".into()
}

fn default_user_agent() -> String {
    concat!("arbitrack/", env!("CARGO_PKG_VERSION"), " (price research)").into()
}

const fn default_timeout_ms() -> u64 {
    30_000
}

const fn default_connect_timeout_ms() -> u64 {
    10_000
}

const fn default_retry_max_attempts() -> u32 {
    3
}

const fn default_retry_backoff_ms() -> u64 {
    500
}

const fn default_min_delay_ms() -> u64 {
    1000
}

const fn default_max_delay_ms() -> u64 {
    3000
}

impl Default for AmazonConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl AmazonConfig {
    /// Backoff to wait after failed attempt number `attempt` (1-based).
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.saturating_sub(1).min(16);
        Duration::from_millis(self.retry_backoff_ms.saturating_mul(factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_per_attempt() {
        let config = AmazonConfig::default();
        assert_eq!(config.backoff(1), Duration::from_millis(500));
        assert_eq!(config.backoff(2), Duration::from_millis(1000));
        assert_eq!(config.backoff(3), Duration::from_millis(2000));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: AmazonConfig = toml::from_str("retry_max_attempts = 5").unwrap();
        assert_eq!(config.retry_max_attempts, 5);
        assert_eq!(config.base_url, "https://www.amazon.com");
        assert_eq!(config.min_delay_ms, 1000);
    }
}
