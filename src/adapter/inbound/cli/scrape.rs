//! Handler for the `scrape` command and the live snapshot step shared with
//! `detect` and `find`.

use crate::adapter::inbound::cli::command::{LiveArgs, OutputFormat, ScrapeArgs};
use crate::adapter::inbound::cli::{output, render};
use crate::application::snapshot::{BuildOutcome, ScrapeRequest};
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::persistence::build_store;
use crate::infrastructure::factory::source::build_snapshot_builder;
use crate::port::outbound::store::SnapshotStore;

/// Execute the scrape command.
pub async fn execute(args: &ScrapeArgs, config: &Config) -> Result<()> {
    let request = args
        .live
        .request(args.include_static, args.snapshot_name.clone());
    if request.is_empty() {
        output::warning("Nothing to scrape");
        output::hint(&format!(
            "pass {} or {}",
            output::highlight("--amazon-url URL"),
            output::highlight("--static")
        ));
        return Ok(());
    }

    let outcome = build_live_snapshot(&request, &args.live, config).await?;
    let snapshot = &outcome.snapshot;
    render::emit(&render::items(snapshot.items(), OutputFormat::Table)?, None)?;

    if args.no_save {
        output::note("Snapshot not saved (--no-save)");
        return Ok(());
    }

    let store = build_store(config)?;
    store.save_snapshot(snapshot).await?;
    output::success(&format!(
        "Saved snapshot {} ({} items)",
        output::highlight(snapshot.id()),
        snapshot.len()
    ));
    Ok(())
}

/// Scrape a request into an in-memory snapshot, reporting per-query failures.
///
/// # Errors
///
/// `EmptySnapshot` when no query produced an item.
pub async fn build_live_snapshot(
    request: &ScrapeRequest,
    live: &LiveArgs,
    config: &Config,
) -> Result<BuildOutcome> {
    if live.names_mismatch() {
        output::warning(&format!(
            "{} names for {} URLs; names are matched to URLs by position",
            live.amazon_names.len(),
            live.amazon_urls.len()
        ));
    }

    let builder = build_snapshot_builder(config)?;
    let queries = request.queries();
    let pb = output::spinner(&format!("Scraping {} queries...", queries.len()));

    match builder
        .build(&queries, request.snapshot_name.as_deref())
        .await
    {
        Ok(outcome) => {
            output::spinner_success(
                &pb,
                &format!(
                    "Scraped {} items into {}",
                    outcome.snapshot.len(),
                    output::highlight(outcome.snapshot.name())
                ),
            );
            for failure in &outcome.failures {
                output::warning(&failure.to_string());
            }
            Ok(outcome)
        }
        Err(Error::EmptySnapshot { failures }) => {
            output::spinner_fail(&pb, "No items scraped");
            for failure in &failures {
                output::warning(&failure.to_string());
            }
            Err(Error::EmptySnapshot { failures })
        }
        Err(err) => {
            output::spinner_fail(&pb, "Scrape failed");
            Err(err)
        }
    }
}
