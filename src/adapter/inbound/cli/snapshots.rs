//! Handlers for the `snapshots` and `items` listings.

use crate::adapter::inbound::cli::command::{ItemsArgs, SnapshotsArgs};
use crate::adapter::inbound::cli::render;
use crate::domain::SnapshotId;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::persistence::build_store;
use crate::port::outbound::store::{ItemFilter, SnapshotStore};

/// Execute the snapshots command.
pub async fn execute_list(args: &SnapshotsArgs, config: &Config) -> Result<()> {
    let store = build_store(config)?;
    let snapshots = store.list_snapshots(args.limit).await?;
    let body = render::snapshots(&snapshots, args.output.format)?;
    render::emit(&body, args.output.path.as_deref())
}

/// Execute the items command.
pub async fn execute_items(args: &ItemsArgs, config: &Config) -> Result<()> {
    let store = build_store(config)?;
    let filter = ItemFilter {
        snapshot_id: args.snapshot_id.as_deref().map(|id| SnapshotId::from(id.trim())),
        source: args.source,
        limit: args.limit,
    };
    let items = store.query_items(&filter).await?;
    let body = render::items(&items, args.output.format)?;
    render::emit(&body, args.output.path.as_deref())
}
