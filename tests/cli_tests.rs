//! CLI integration tests.
//!
//! Every test runs the binary inside its own temporary directory so the
//! default `arbitrack.db` lands there.

mod support;

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use support::http::{product_page, PageServer};

fn arbitrack(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("arbitrack");
    cmd.current_dir(dir)
        .env_remove("ARBITRACK_DATABASE")
        .env_remove("RUST_LOG");
    cmd
}

/// Config pointing the Amazon source at a local page server.
fn write_config(dir: &Path, server: &PageServer) -> String {
    let path = dir.join("test.toml");
    fs::write(
        &path,
        format!(
            r#"
[sources.amazon]
base_url = "{}"
min_delay_ms = 0
max_delay_ms = 0
retry_backoff_ms = 10
"#,
            server.base_url()
        ),
    )
    .expect("write config");
    path.to_string_lossy().into_owned()
}

/// Status output with ANSI color sequences removed.
fn plain(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            // CSI sequences end at the first letter
            for next in chars.by_ref() {
                if next.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[test]
fn plain_strips_color_codes() {
    assert_eq!(plain(b"Saved \x1b[32m1\x1b[39m new"), "Saved 1 new");
}

fn cable_server() -> PageServer {
    PageServer::start(vec![(
        "/dp/CABLE",
        vec![(200, product_page("Braided USB-C Cable 2m", "$5.00"))],
    )])
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    arbitrack(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scrape"))
        .stdout(predicate::str::contains("detect"))
        .stdout(predicate::str::contains("find"))
        .stdout(predicate::str::contains("history"));
}

#[test]
fn version_prints_name() {
    let dir = TempDir::new().unwrap();
    arbitrack(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("arbitrack"));
}

#[test]
fn init_creates_database() {
    let dir = TempDir::new().unwrap();
    arbitrack(dir.path()).arg("init").assert().success();
    assert!(dir.path().join("arbitrack.db").exists());
}

#[test]
fn database_path_follows_environment() {
    let dir = TempDir::new().unwrap();
    arbitrack(dir.path())
        .env("ARBITRACK_DATABASE", "custom.db")
        .arg("init")
        .assert()
        .success();
    assert!(dir.path().join("custom.db").exists());
}

#[test]
fn static_scrape_is_listed_in_snapshots() {
    let dir = TempDir::new().unwrap();
    arbitrack(dir.path())
        .args(["scrape", "--static", "--snapshot-name", "demo-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("USB Cable"));

    arbitrack(dir.path())
        .args(["snapshots", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("demo-run"));

    arbitrack(dir.path())
        .args(["items", "--source", "static", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("iPhone 16 256GB"));
}

#[test]
fn static_only_detection_finds_nothing() {
    let dir = TempDir::new().unwrap();
    arbitrack(dir.path())
        .arg("detect")
        .assert()
        .success()
        .stdout(predicate::str::contains("No arbitrage opportunities found."));
}

#[test]
fn scrape_without_products_warns() {
    let dir = TempDir::new().unwrap();
    arbitrack(dir.path())
        .arg("scrape")
        .assert()
        .success()
        .stderr(predicate::str::contains("Nothing to scrape"));
}

#[test]
fn find_records_once_per_snapshot() {
    let dir = TempDir::new().unwrap();
    let server = cable_server();
    let config = write_config(dir.path(), &server);

    let first = arbitrack(dir.path())
        .args(["--config", &config, "find", "-a"])
        .arg(server.url("/dp/CABLE"))
        .args(["-n", "USB Cable", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("USB Cable,amazon,5.00,static,9.99,4.99"))
        .get_output()
        .stderr
        .clone();
    assert!(
        plain(&first).contains("Saved 1 new opportunities (0 already recorded)"),
        "unexpected stderr: {}",
        plain(&first)
    );

    let second = arbitrack(dir.path())
        .args(["--config", &config, "find", "--latest"])
        .assert()
        .success()
        .get_output()
        .stderr
        .clone();
    assert!(
        plain(&second).contains("Saved 0 new opportunities (1 already recorded)"),
        "unexpected stderr: {}",
        plain(&second)
    );

    arbitrack(dir.path())
        .args(["--config", &config, "history", "-f", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Product,Buy From,Buy Price,Sell To,Sell Price,Profit,Profit %,Timestamp",
        ))
        .stdout(predicate::str::contains("USB Cable"));
}

#[test]
fn detect_writes_report_file() {
    let dir = TempDir::new().unwrap();
    let server = cable_server();
    let config = write_config(dir.path(), &server);

    arbitrack(dir.path())
        .args(["--config", &config, "detect", "-a"])
        .arg(server.url("/dp/CABLE"))
        .args(["-n", "USB Cable", "-f", "json", "-o", "report.json"])
        .assert()
        .success();

    let report = fs::read_to_string(dir.path().join("report.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(1));
    assert!(!dir.path().join("arbitrack.db").exists());
}

#[test]
fn unreachable_product_only_fails_build() {
    let dir = TempDir::new().unwrap();
    let server = cable_server();
    let config = write_config(dir.path(), &server);

    arbitrack(dir.path())
        .args(["--config", &config, "scrape", "-a"])
        .arg(server.url("/dp/MISSING"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty snapshot"));
}

#[test]
fn latest_on_empty_database_fails() {
    let dir = TempDir::new().unwrap();
    arbitrack(dir.path())
        .args(["detect", "--latest"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no snapshots"));
}

#[test]
fn negative_threshold_is_rejected() {
    let dir = TempDir::new().unwrap();
    arbitrack(dir.path())
        .args(["detect", "--min-profit=-1"])
        .assert()
        .failure();
}

#[test]
fn invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("arbitrack.toml"), "[scrape]\nmax_concurrency = 0\n").unwrap();
    arbitrack(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn snapshot_id_conflicts_with_amazon_url() {
    let dir = TempDir::new().unwrap();
    arbitrack(dir.path())
        .args(["detect", "-s", "abc", "-a", "https://www.amazon.com/dp/X"])
        .assert()
        .failure();
}
