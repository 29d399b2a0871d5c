//! Handler for the `history` command.

use chrono::{Duration, Utc};

use crate::adapter::inbound::cli::command::HistoryArgs;
use crate::adapter::inbound::cli::{output, render};
use crate::application::finder::SnapshotSelector;
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::persistence::build_store;
use crate::port::outbound::store::{OpportunityFilter, OpportunityStore, SnapshotStore};

/// Execute the history command.
///
/// With a snapshot selection the day window is ignored.
pub async fn execute(args: &HistoryArgs, config: &Config) -> Result<()> {
    let store = build_store(config)?;
    let mut filter = OpportunityFilter {
        min_profit_percent: args.min_profit_percent,
        min_profit_amount: args.min_profit_amount,
        limit: args.limit,
        ..OpportunityFilter::default()
    };

    match args.selector() {
        Some(SnapshotSelector::Id(id)) => {
            let snapshot = store
                .get_snapshot(&id)
                .await?
                .ok_or_else(|| Error::SnapshotNotFound(id.clone()))?;
            output::note(&format!(
                "Opportunities from snapshot {} ('{}')",
                snapshot.id(),
                snapshot.name()
            ));
            filter.snapshot_id = Some(id);
        }
        Some(SnapshotSelector::Latest) => {
            let latest = store
                .list_snapshots(1)
                .await?
                .into_iter()
                .next()
                .ok_or(Error::NoSnapshots)?;
            output::note(&format!(
                "Opportunities from latest snapshot {} ('{}')",
                latest.id, latest.name
            ));
            filter.snapshot_id = Some(latest.id);
        }
        None => {
            output::note(&format!(
                "Opportunities from the last {} days",
                args.days
            ));
            filter.since = Some(Utc::now() - Duration::days(i64::from(args.days)));
        }
    }

    let opportunities = store.query_opportunities(&filter).await?;
    output::note(&format!("Found {} opportunities", opportunities.len()));

    let body = render::opportunities(&opportunities, args.output.format, true)?;
    render::emit(&body, args.output.path.as_deref())
}
