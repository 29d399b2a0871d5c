//! Command-line interface definitions.
//!
//! Defines the CLI structure for the arbitrack application using `clap`.
//! Subcommands cover the whole workflow: scraping prices into snapshots,
//! detecting arbitrage in live or stored data, and browsing what has been
//! recorded.

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::application::detection::Thresholds;
use crate::application::finder::SnapshotSelector;
use crate::application::snapshot::ScrapeRequest;
use crate::domain::{SnapshotId, SourceKind};
use crate::error::{ConfigError, Result};

/// Cross-source price snapshots and arbitrage detection
#[derive(Parser, Debug)]
#[command(name = "arbitrack")]
#[command(version, about)]
pub struct Cli {
    /// Path to the configuration file [default: arbitrack.toml if present]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress status output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the arbitrack CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database and run migrations
    Init,

    /// Scrape products into a new snapshot
    Scrape(ScrapeArgs),

    /// Detect arbitrage opportunities without recording them
    Detect(DetectArgs),

    /// Detect arbitrage opportunities and record them
    Find(FindArgs),

    /// Show recorded opportunities
    History(HistoryArgs),

    /// List stored snapshots, newest first
    Snapshots(SnapshotsArgs),

    /// List stored items
    Items(ItemsArgs),
}

/// Rendering of command results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bordered table
    #[default]
    Table,
    /// Numbered plain text
    Text,
    /// Comma-separated values with a header row
    Csv,
    /// Pretty-printed JSON
    Json,
}

/// Output format and destination shared by reporting commands.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write results to this file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub path: Option<PathBuf>,
}

/// Live Amazon products to scrape.
#[derive(Args, Debug, Clone, Default)]
pub struct LiveArgs {
    /// Amazon product URL to scrape (repeatable)
    #[arg(short = 'a', long = "amazon-url", value_name = "URL")]
    pub amazon_urls: Vec<String>,

    /// Display name for the Amazon product at the same position (repeatable)
    #[arg(short = 'n', long = "amazon-name", value_name = "NAME")]
    pub amazon_names: Vec<String>,
}

impl LiveArgs {
    /// Whether names and URLs were given in different numbers.
    #[must_use]
    pub fn names_mismatch(&self) -> bool {
        !self.amazon_names.is_empty() && self.amazon_names.len() != self.amazon_urls.len()
    }

    #[must_use]
    pub fn request(&self, include_static: bool, snapshot_name: Option<String>) -> ScrapeRequest {
        ScrapeRequest {
            urls: self.amazon_urls.clone(),
            names: self.amazon_names.clone(),
            include_static,
            snapshot_name,
        }
    }
}

/// Arguments for the `scrape` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ScrapeArgs {
    #[command(flatten)]
    pub live: LiveArgs,

    /// Include the static catalog
    #[arg(short = 's', long = "static")]
    pub include_static: bool,

    /// Print the snapshot without storing it
    #[arg(long)]
    pub no_save: bool,

    /// Name for the snapshot [default: snapshot-YYYYMMDD-HHMMSS]
    #[arg(long, value_name = "NAME")]
    pub snapshot_name: Option<String>,
}

/// Arguments shared by `detect` and `find`.
///
/// Without `--snapshot-id` or `--latest` the products are scraped live:
/// the given Amazon URLs plus, unless `--no-static`, the static catalog.
#[derive(Args, Debug, Clone)]
pub struct DetectArgs {
    #[command(flatten)]
    pub live: LiveArgs,

    /// Include the static catalog in live detection (default)
    #[arg(long = "static", overrides_with = "no_static")]
    pub with_static: bool,

    /// Leave the static catalog out of live detection
    #[arg(long = "no-static", overrides_with = "with_static")]
    pub no_static: bool,

    /// Use the stored snapshot with this id
    #[arg(
        short = 's',
        long,
        value_name = "ID",
        conflicts_with_all = ["latest", "amazon_urls"]
    )]
    pub snapshot_id: Option<String>,

    /// Use the most recent stored snapshot
    #[arg(short = 'l', long, conflicts_with = "amazon_urls")]
    pub latest: bool,

    /// Minimum profit percentage [default: from config]
    #[arg(short = 'p', long = "min-profit", value_name = "PCT")]
    pub min_profit: Option<Decimal>,

    /// Minimum absolute profit [default: from config]
    #[arg(long = "min-profit-amount", value_name = "AMT")]
    pub min_profit_amount: Option<Decimal>,

    /// Name for a live snapshot
    #[arg(long, value_name = "NAME")]
    pub snapshot_name: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl DetectArgs {
    /// The stored snapshot to analyze, if one was selected.
    #[must_use]
    pub fn selector(&self) -> Option<SnapshotSelector> {
        match (&self.snapshot_id, self.latest) {
            (Some(id), _) => Some(SnapshotSelector::Id(SnapshotId::from(id.trim()))),
            (None, true) => Some(SnapshotSelector::Latest),
            (None, false) => None,
        }
    }

    #[must_use]
    pub fn live_request(&self) -> ScrapeRequest {
        self.live.request(!self.no_static, self.snapshot_name.clone())
    }

    /// Configured thresholds with command-line overrides applied.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` for a negative override.
    pub fn thresholds(&self, defaults: &Thresholds) -> Result<Thresholds> {
        let percent = self.min_profit.unwrap_or(defaults.min_profit_percent);
        let amount = self.min_profit_amount.or(defaults.min_profit_amount);
        check_non_negative("min_profit", Some(percent))?;
        check_non_negative("min_profit_amount", amount)?;
        Ok(Thresholds::new(percent, amount))
    }
}

/// Arguments for the `find` subcommand.
#[derive(Args, Debug, Clone)]
pub struct FindArgs {
    #[command(flatten)]
    pub detect: DetectArgs,

    /// Detect without recording opportunities or live snapshots
    #[arg(long)]
    pub no_save: bool,
}

/// Arguments for the `history` subcommand.
#[derive(Args, Debug, Clone)]
pub struct HistoryArgs {
    /// Show opportunities from this snapshot
    #[arg(short = 's', long, value_name = "ID", conflicts_with = "latest")]
    pub snapshot_id: Option<String>,

    /// Show opportunities from the most recent snapshot
    #[arg(short = 'l', long)]
    pub latest: bool,

    /// Show opportunities detected in the last N days
    #[arg(short = 'd', long, default_value_t = 7)]
    pub days: u32,

    /// Minimum profit percentage
    #[arg(short = 'p', long = "min-profit-percent", value_name = "PCT")]
    pub min_profit_percent: Option<Decimal>,

    /// Minimum absolute profit
    #[arg(short = 'a', long = "min-profit-amount", value_name = "AMT")]
    pub min_profit_amount: Option<Decimal>,

    /// Maximum number of results
    #[arg(long, default_value_t = 50)]
    pub limit: usize,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl HistoryArgs {
    #[must_use]
    pub fn selector(&self) -> Option<SnapshotSelector> {
        match (&self.snapshot_id, self.latest) {
            (Some(id), _) => Some(SnapshotSelector::Id(SnapshotId::from(id.trim()))),
            (None, true) => Some(SnapshotSelector::Latest),
            (None, false) => None,
        }
    }
}

/// Arguments for the `snapshots` subcommand.
#[derive(Args, Debug, Clone)]
pub struct SnapshotsArgs {
    /// Maximum number of snapshots
    #[arg(long, default_value_t = 20)]
    pub limit: usize,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for the `items` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ItemsArgs {
    /// Only items from this snapshot
    #[arg(short = 's', long, value_name = "ID")]
    pub snapshot_id: Option<String>,

    /// Only items from this source (amazon, static)
    #[arg(long, value_name = "SOURCE")]
    pub source: Option<SourceKind>,

    /// Maximum number of items
    #[arg(long, default_value_t = 100)]
    pub limit: usize,

    #[command(flatten)]
    pub output: OutputArgs,
}

fn check_non_negative(field: &'static str, value: Option<Decimal>) -> Result<()> {
    match value {
        Some(v) if v < Decimal::ZERO => Err(ConfigError::InvalidValue {
            field,
            reason: "must be 0 or greater".to_string(),
        }
        .into()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn detect_args(args: &[&str]) -> DetectArgs {
        match parse(args).command {
            Commands::Detect(args) => args,
            other => panic!("expected detect, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_init() {
        let cli = parse(&["arbitrack", "init"]);
        assert!(matches!(cli.command, Commands::Init));
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = parse(&["arbitrack", "snapshots", "-v", "--config", "alt.toml"]);
        assert_eq!(cli.verbose, 1);
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }

    #[test]
    fn scrape_collects_repeated_urls_and_names() {
        let cli = parse(&[
            "arbitrack",
            "scrape",
            "-a",
            "https://www.amazon.com/dp/B000000001",
            "-a",
            "https://www.amazon.com/dp/B000000002",
            "-n",
            "Kettle",
            "--static",
            "--snapshot-name",
            "morning",
        ]);
        let Commands::Scrape(args) = cli.command else {
            panic!("expected scrape");
        };
        assert_eq!(args.live.amazon_urls.len(), 2);
        assert_eq!(args.live.amazon_names, vec!["Kettle"]);
        assert!(args.live.names_mismatch());
        assert!(args.include_static);
        assert!(!args.no_save);

        let request = args.live.request(args.include_static, args.snapshot_name);
        assert_eq!(request.queries().len(), 3);
        assert_eq!(request.snapshot_name.as_deref(), Some("morning"));
    }

    #[test]
    fn detect_defaults_to_live_with_static() {
        let args = detect_args(&["arbitrack", "detect"]);
        assert!(args.selector().is_none());
        let request = args.live_request();
        assert!(request.include_static);
        assert!(!request.is_empty());
        assert_eq!(args.output.format, OutputFormat::Table);
    }

    #[test]
    fn detect_no_static_leaves_catalog_out() {
        let args = detect_args(&["arbitrack", "detect", "--no-static"]);
        assert!(args.live_request().is_empty());

        let args = detect_args(&["arbitrack", "detect", "--no-static", "--static"]);
        assert!(!args.live_request().is_empty());
    }

    #[test]
    fn detect_selects_stored_snapshots() {
        let args = detect_args(&["arbitrack", "detect", "--latest"]);
        assert_eq!(args.selector(), Some(SnapshotSelector::Latest));

        let args = detect_args(&["arbitrack", "detect", "-s", "abc"]);
        assert_eq!(
            args.selector(),
            Some(SnapshotSelector::Id(SnapshotId::from("abc")))
        );
    }

    #[test]
    fn detect_rejects_live_urls_with_stored_snapshot() {
        let result = Cli::try_parse_from([
            "arbitrack",
            "detect",
            "--latest",
            "-a",
            "https://www.amazon.com/dp/B000000001",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn detect_thresholds_fall_back_to_config() {
        let defaults = Thresholds::new(dec!(7.5), Some(dec!(1)));

        let args = detect_args(&["arbitrack", "detect"]);
        assert_eq!(args.thresholds(&defaults).unwrap(), defaults);

        let args = detect_args(&["arbitrack", "detect", "-p", "50", "--min-profit-amount", "3"]);
        assert_eq!(
            args.thresholds(&defaults).unwrap(),
            Thresholds::new(dec!(50), Some(dec!(3)))
        );
    }

    #[test]
    fn detect_rejects_negative_threshold() {
        let args = detect_args(&["arbitrack", "detect", "-p=-1"]);
        assert!(args.thresholds(&Thresholds::default()).is_err());
    }

    #[test]
    fn detect_parses_format_and_output() {
        let args = detect_args(&["arbitrack", "detect", "-f", "csv", "-o", "out.csv"]);
        assert_eq!(args.output.format, OutputFormat::Csv);
        assert_eq!(args.output.path, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn find_accepts_no_save() {
        let cli = parse(&["arbitrack", "find", "--latest", "--no-save"]);
        let Commands::Find(args) = cli.command else {
            panic!("expected find");
        };
        assert!(args.no_save);
        assert_eq!(args.detect.selector(), Some(SnapshotSelector::Latest));
    }

    #[test]
    fn history_defaults() {
        let cli = parse(&["arbitrack", "history"]);
        let Commands::History(args) = cli.command else {
            panic!("expected history");
        };
        assert_eq!(args.days, 7);
        assert_eq!(args.limit, 50);
        assert!(args.selector().is_none());
    }

    #[test]
    fn history_amount_short_flag() {
        let cli = parse(&["arbitrack", "history", "-a", "2.50", "-p", "10"]);
        let Commands::History(args) = cli.command else {
            panic!("expected history");
        };
        assert_eq!(args.min_profit_amount, Some(dec!(2.50)));
        assert_eq!(args.min_profit_percent, Some(dec!(10)));
    }

    #[test]
    fn items_parses_source() {
        let cli = parse(&["arbitrack", "items", "--source", "static"]);
        let Commands::Items(args) = cli.command else {
            panic!("expected items");
        };
        assert_eq!(args.source, Some(SourceKind::Static));
    }

    #[test]
    fn items_rejects_unknown_source() {
        assert!(Cli::try_parse_from(["arbitrack", "items", "--source", "ebay"]).is_err());
    }
}
