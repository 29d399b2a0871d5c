//! Handlers for the `detect` and `find` commands.

use crate::adapter::inbound::cli::command::{DetectArgs, FindArgs};
use crate::adapter::inbound::cli::{output, render, scrape};
use crate::application::detection::{Detector, Thresholds};
use crate::application::finder::SnapshotSelector;
use crate::domain::{Opportunity, Snapshot};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::persistence::{build_finder, build_store};

/// Execute the detect command. Nothing is written to the database.
pub async fn execute_detect(args: &DetectArgs, config: &Config) -> Result<()> {
    let thresholds = args.thresholds(&config.detection)?;

    let snapshot = match args.selector() {
        Some(selector) => {
            let finder = build_finder(build_store(config)?, thresholds.clone());
            let snapshot = finder.load(&selector).await?;
            describe_stored(&selector, &snapshot);
            snapshot
        }
        None => match live_snapshot(args, config).await? {
            Some(snapshot) => snapshot,
            None => return Ok(()),
        },
    };

    announce(&snapshot, &thresholds);
    let opportunities = Detector::new(thresholds).detect(snapshot.items());
    report(args, &opportunities)
}

/// Execute the find command: detect, then record the results.
///
/// A live snapshot is stored first so recorded opportunities reference it.
/// Repeating the command over the same stored snapshot records nothing new.
pub async fn execute_find(args: &FindArgs, config: &Config) -> Result<()> {
    let detect = &args.detect;
    let thresholds = detect.thresholds(&config.detection)?;
    let finder = build_finder(build_store(config)?, thresholds.clone());

    let (snapshot, stored) = match detect.selector() {
        Some(selector) => {
            let snapshot = finder.load(&selector).await?;
            describe_stored(&selector, &snapshot);
            (snapshot, true)
        }
        None => match live_snapshot(detect, config).await? {
            Some(snapshot) => (snapshot, false),
            None => return Ok(()),
        },
    };

    announce(&snapshot, &thresholds);

    if args.no_save {
        let opportunities = finder.detect(&snapshot);
        report(detect, &opportunities)?;
        output::note("Opportunities not saved (--no-save)");
        return Ok(());
    }

    let found = if stored {
        finder.find(&snapshot).await?
    } else {
        let found = finder.record_and_find(&snapshot).await?;
        output::success(&format!(
            "Saved snapshot {}",
            output::highlight(snapshot.id())
        ));
        found
    };

    report(detect, &found.opportunities)?;
    output::success(&format!(
        "Saved {} new opportunities ({} already recorded)",
        output::positive(found.saved.inserted),
        found.saved.skipped
    ));
    Ok(())
}

async fn live_snapshot(args: &DetectArgs, config: &Config) -> Result<Option<Snapshot>> {
    let request = args.live_request();
    if request.is_empty() {
        output::warning("No products found to analyze");
        output::hint(&format!(
            "pass {}, drop {}, or select a stored snapshot with {}",
            output::highlight("--amazon-url URL"),
            output::highlight("--no-static"),
            output::highlight("--latest")
        ));
        return Ok(None);
    }
    let outcome = scrape::build_live_snapshot(&request, &args.live, config).await?;
    Ok(Some(outcome.snapshot))
}

fn describe_stored(selector: &SnapshotSelector, snapshot: &Snapshot) {
    let label = match selector {
        SnapshotSelector::Latest => "Using latest snapshot",
        SnapshotSelector::Id(_) => "Using snapshot",
    };
    output::note(&format!(
        "{label} {} ('{}', {}, {} items)",
        snapshot.id(),
        snapshot.name(),
        snapshot.created_at().format("%Y-%m-%d %H:%M:%S"),
        snapshot.len()
    ));
}

fn announce(snapshot: &Snapshot, thresholds: &Thresholds) {
    let amount = thresholds
        .min_profit_amount
        .map(|a| format!(", min amount {a}"))
        .unwrap_or_default();
    output::note(&format!(
        "Analyzing {} products (min profit {}%{amount})",
        snapshot.len(),
        thresholds.min_profit_percent
    ));
}

fn report(args: &DetectArgs, opportunities: &[Opportunity]) -> Result<()> {
    let body = render::opportunities(opportunities, args.output.format, false)?;
    render::emit(&body, args.output.path.as_deref())
}
