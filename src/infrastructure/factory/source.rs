//! Source factory: item sources and the snapshot builder.

use std::sync::Arc;

use tracing::debug;

use crate::adapter::outbound::amazon::AmazonSource;
use crate::adapter::outbound::static_source::StaticSource;
use crate::application::snapshot::{SnapshotBuilder, SourceSet};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Build every configured item source.
pub fn build_sources(config: &Config) -> Result<SourceSet> {
    let amazon = AmazonSource::from_config(config.sources.amazon.clone())?;
    let static_source = StaticSource::new(&config.sources.static_source);
    debug!(
        catalog_items = static_source.items().len(),
        "Item sources configured"
    );

    Ok(SourceSet::new()
        .with(Arc::new(amazon))
        .with(Arc::new(static_source)))
}

/// Build a snapshot builder over every configured source.
pub fn build_snapshot_builder(config: &Config) -> Result<SnapshotBuilder> {
    let sources = build_sources(config)?;
    Ok(SnapshotBuilder::new(sources, config.scrape.clone()))
}
