//! "Find" use case: resolve a snapshot, detect, and record the results.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::application::detection::Detector;
use crate::domain::{Opportunity, Snapshot, SnapshotId};
use crate::error::{Error, Result};
use crate::port::outbound::store::{OpportunityStore, SaveReport, SnapshotStore};

/// Which stored snapshot to work on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSelector {
    Id(SnapshotId),
    Latest,
}

impl fmt::Display for SnapshotSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Latest => f.write_str("latest"),
        }
    }
}

/// Opportunities detected in one pass and what happened when storing them.
#[derive(Debug, Clone)]
pub struct FindReport {
    pub opportunities: Vec<Opportunity>,
    pub saved: SaveReport,
}

/// Detection over stored snapshots with idempotent persistence.
pub struct OpportunityFinder<S> {
    store: Arc<S>,
    detector: Detector,
}

impl<S> OpportunityFinder<S>
where
    S: SnapshotStore + OpportunityStore,
{
    pub fn new(store: Arc<S>, detector: Detector) -> Self {
        Self { store, detector }
    }

    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    /// Load the selected snapshot with its items.
    ///
    /// # Errors
    ///
    /// `SnapshotNotFound` for an unknown id, `NoSnapshots` when the store is
    /// empty, or any storage error.
    pub async fn load(&self, selector: &SnapshotSelector) -> Result<Snapshot> {
        match selector {
            SnapshotSelector::Id(id) => self
                .store
                .get_snapshot(id)
                .await?
                .ok_or_else(|| Error::SnapshotNotFound(id.clone())),
            SnapshotSelector::Latest => self
                .store
                .get_latest_snapshot()
                .await?
                .ok_or(Error::NoSnapshots),
        }
    }

    /// Detect without touching storage.
    pub fn detect(&self, snapshot: &Snapshot) -> Vec<Opportunity> {
        self.detector.detect(snapshot.items())
    }

    /// Detect and store the results of a snapshot that is already persisted.
    ///
    /// Re-running over the same snapshot inserts nothing new: previously
    /// stored pairs come back as `skipped`.
    pub async fn find(&self, snapshot: &Snapshot) -> Result<FindReport> {
        let opportunities = self.detect(snapshot);
        let saved = self.store.save_opportunities(&opportunities).await?;
        info!(
            snapshot_id = %snapshot.id(),
            found = opportunities.len(),
            inserted = saved.inserted,
            skipped = saved.skipped,
            "Opportunities recorded"
        );
        Ok(FindReport {
            opportunities,
            saved,
        })
    }

    /// Persist a freshly built snapshot, then [`find`](Self::find) over it.
    pub async fn record_and_find(&self, snapshot: &Snapshot) -> Result<FindReport> {
        self.store.save_snapshot(snapshot).await?;
        self.find(snapshot).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryStore;
    use crate::application::detection::Thresholds;
    use crate::domain::{RawItem, SourceKind};
    use crate::port::outbound::store::OpportunityFilter;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn widget_snapshot() -> Snapshot {
        Snapshot::create(
            Some("widgets"),
            Utc::now(),
            vec![
                RawItem::try_new(SourceKind::Amazon, "Widget", dec!(100.00), None).unwrap(),
                RawItem::try_new(SourceKind::Static, "Widget", dec!(130.00), None).unwrap(),
            ],
        )
    }

    fn finder() -> (Arc<MemoryStore>, OpportunityFinder<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let finder = OpportunityFinder::new(
            Arc::clone(&store),
            Detector::new(Thresholds::new(dec!(5.0), None)),
        );
        (store, finder)
    }

    #[tokio::test]
    async fn repeated_find_is_idempotent() {
        let (store, finder) = finder();
        let snapshot = widget_snapshot();

        let first = finder.record_and_find(&snapshot).await.unwrap();
        let second = finder.find(&snapshot).await.unwrap();

        assert_eq!(first.saved, SaveReport { inserted: 1, skipped: 0 });
        assert_eq!(second.saved, SaveReport { inserted: 0, skipped: 1 });
        let stored = store
            .query_opportunities(&OpportunityFilter::default())
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn load_latest_on_empty_store_fails() {
        let (_, finder) = finder();
        let err = finder.load(&SnapshotSelector::Latest).await.unwrap_err();
        assert!(matches!(err, Error::NoSnapshots));
    }

    #[tokio::test]
    async fn load_unknown_id_fails() {
        let (_, finder) = finder();
        let err = finder
            .load(&SnapshotSelector::Id(SnapshotId::from("nope")))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SnapshotNotFound(_)));
    }

    #[tokio::test]
    async fn load_by_id_round_trips_items() {
        let (store, finder) = finder();
        let snapshot = widget_snapshot();
        store.save_snapshot(&snapshot).await.unwrap();

        let loaded = finder
            .load(&SnapshotSelector::Id(snapshot.id().clone()))
            .await
            .unwrap();
        assert_eq!(loaded, snapshot);
        assert_eq!(finder.detect(&loaded).len(), 1);
    }
}
