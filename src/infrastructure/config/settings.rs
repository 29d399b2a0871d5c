//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the database path can be
//! overridden with `ARBITRACK_DATABASE`.
//!
//! # Example
//!
//! ```no_run
//! use arbitrack::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("arbitrack.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::logging::LoggingConfig;
use crate::adapter::outbound::amazon::AmazonConfig;
use crate::adapter::outbound::static_source::StaticSourceConfig;
use crate::application::detection::Thresholds;
use crate::application::snapshot::ScrapeConfig;
use crate::error::{ConfigError, Result};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "arbitrack.toml";

/// Environment variable overriding [`Config::database`].
pub const DATABASE_ENV: &str = "ARBITRACK_DATABASE";

const MAX_CONCURRENCY: usize = 16;

/// Per-source settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub amazon: AmazonConfig,

    #[serde(default, rename = "static")]
    pub static_source: StaticSourceConfig,
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Path to SQLite database file.
    ///
    /// Defaults to "arbitrack.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Default detection thresholds; CLI flags override per run.
    #[serde(default)]
    pub detection: Thresholds,

    #[serde(default)]
    pub scrape: ScrapeConfig,

    #[serde(default)]
    pub sources: SourcesConfig,
}

fn default_database_path() -> String {
    "arbitrack.db".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            logging: LoggingConfig::default(),
            detection: Thresholds::default(),
            scrape: ScrapeConfig::default(),
            sources: SourcesConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content, applying environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with_env(content, |key| std::env::var(key).ok())
    }

    /// Parse configuration from TOML content with an explicit environment lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml_with_env<F>(content: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env(env);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Resolve configuration for a CLI run.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// used when present and built-in defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is read and fails to parse or validate.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            return Self::load(default_path);
        }
        debug!("No config file found, using defaults");
        Self::parse_toml("")
    }

    fn apply_env<F>(&mut self, env: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(database) = env(DATABASE_ENV).filter(|v| !v.trim().is_empty()) {
            self.database = database;
        }
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        if self.detection.min_profit_percent < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "min_profit_percent",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }
        if self
            .detection
            .min_profit_amount
            .is_some_and(|a| a < Decimal::ZERO)
        {
            return Err(ConfigError::InvalidValue {
                field: "min_profit_amount",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }
        if !(1..=MAX_CONCURRENCY).contains(&self.scrape.max_concurrency) {
            return Err(ConfigError::InvalidValue {
                field: "max_concurrency",
                reason: format!("must be between 1 and {MAX_CONCURRENCY}"),
            }
            .into());
        }
        if self.scrape.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        let amazon = &self.sources.amazon;
        if amazon.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        if let Err(e) = Url::parse(&amazon.base_url) {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: e.to_string(),
            }
            .into());
        }
        if amazon.retry_max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry_max_attempts",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if amazon.max_delay_ms < amazon.min_delay_ms {
            return Err(ConfigError::InvalidValue {
                field: "max_delay_ms",
                reason: "must be >= min_delay_ms".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::infrastructure::config::logging::LogFormat;
    use rust_decimal_macros::dec;

    fn parse(content: &str) -> Result<Config> {
        Config::parse_toml_with_env(content, |_| None)
    }

    fn invalid_field(result: Result<Config>) -> &'static str {
        match result {
            Err(Error::Config(ConfigError::InvalidValue { field, .. })) => field,
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.detection.min_profit_percent, dec!(5.0));
        assert_eq!(config.scrape.max_concurrency, 4);
        assert_eq!(config.sources.static_source.catalog.len(), 5);
    }

    #[test]
    fn full_file_parses() {
        let config = parse(
            r#"
            database = "data/prices.db"

            [logging]
            level = "debug"
            format = "json"

            [detection]
            min_profit_percent = 12.5
            min_profit_amount = 2

            [scrape]
            max_concurrency = 8
            timeout_secs = 30

            [sources.amazon]
            base_url = "https://www.amazon.co.uk"
            retry_max_attempts = 5
            min_delay_ms = 0
            max_delay_ms = 0

            [[sources.static.catalog]]
            name = "Kettle"
            price = "£19.99"
            "#,
        )
        .unwrap();

        assert_eq!(config.database, "data/prices.db");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.detection.min_profit_percent, dec!(12.5));
        assert_eq!(config.detection.min_profit_amount, Some(dec!(2)));
        assert_eq!(config.scrape.max_concurrency, 8);
        assert_eq!(config.sources.amazon.base_url, "https://www.amazon.co.uk");
        assert_eq!(config.sources.amazon.timeout_ms, 30_000);
        assert_eq!(config.sources.static_source.catalog.len(), 1);
        assert_eq!(config.sources.static_source.catalog[0].url, None);
    }

    #[test]
    fn env_overrides_database() {
        let config = Config::parse_toml_with_env("database = \"a.db\"", |key| {
            (key == DATABASE_ENV).then(|| "b.db".to_string())
        })
        .unwrap();
        assert_eq!(config.database, "b.db");
    }

    #[test]
    fn rejects_negative_threshold() {
        let result = parse("[detection]\nmin_profit_percent = -1");
        assert_eq!(invalid_field(result), "min_profit_percent");
    }

    #[test]
    fn rejects_out_of_range_concurrency() {
        assert_eq!(
            invalid_field(parse("[scrape]\nmax_concurrency = 0")),
            "max_concurrency"
        );
        assert_eq!(
            invalid_field(parse("[scrape]\nmax_concurrency = 17")),
            "max_concurrency"
        );
    }

    #[test]
    fn rejects_inverted_delay_bounds() {
        let result = parse("[sources.amazon]\nmin_delay_ms = 500\nmax_delay_ms = 100");
        assert_eq!(invalid_field(result), "max_delay_ms");
    }

    #[test]
    fn rejects_zero_attempts() {
        let result = parse("[sources.amazon]\nretry_max_attempts = 0");
        assert_eq!(invalid_field(result), "retry_max_attempts");
    }

    #[test]
    fn rejects_empty_database() {
        let result = parse("database = \"  \"");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "database" }))
        ));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let result = parse("database = ");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }
}
