//! Persistence factory for the snapshot and opportunity stores.

use std::sync::Arc;

use crate::adapter::outbound::sqlite::SqliteStore;
use crate::application::detection::{Detector, Thresholds};
use crate::application::finder::OpportunityFinder;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Open the configured SQLite database, running pending migrations.
pub fn build_store(config: &Config) -> Result<Arc<SqliteStore>> {
    Ok(Arc::new(SqliteStore::open(&config.database)?))
}

/// Finder over the configured store with the given thresholds.
pub fn build_finder(
    store: Arc<SqliteStore>,
    thresholds: Thresholds,
) -> OpportunityFinder<SqliteStore> {
    OpportunityFinder::new(store, Detector::new(thresholds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RawItem, Snapshot, SourceKind};
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> Config {
        Config {
            database: dir.path().join("factory.db").display().to_string(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn built_finder_persists_through_store() {
        let dir = TempDir::new().unwrap();
        let store = build_store(&config_in(&dir)).unwrap();
        let finder = build_finder(store, Thresholds::new(dec!(5), None));

        let snapshot = Snapshot::create(
            None,
            Utc::now(),
            vec![
                RawItem::try_new(SourceKind::Amazon, "Lamp", dec!(20), None).unwrap(),
                RawItem::try_new(SourceKind::Static, "Lamp", dec!(25), None).unwrap(),
            ],
        );
        let report = finder.record_and_find(&snapshot).await.unwrap();
        assert_eq!(report.opportunities.len(), 1);
        assert_eq!(report.saved.inserted, 1);
    }
}
