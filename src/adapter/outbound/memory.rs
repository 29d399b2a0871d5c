//! In-memory store implementation for tests and throwaway runs.

use std::collections::HashSet;

use parking_lot::RwLock;

use crate::domain::{Item, ItemId, Opportunity, Snapshot, SnapshotId, SnapshotSummary};
use crate::error::{Error, Result};
use crate::port::outbound::store::{
    sort_by_profit, ItemFilter, OpportunityFilter, OpportunityStore, SaveReport, SnapshotStore,
};

type PairKey = (SnapshotId, ItemId, ItemId);

/// In-memory store. Snapshots are kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: RwLock<Vec<Snapshot>>,
    opportunities: RwLock<Vec<Opportunity>>,
    pairs: RwLock<HashSet<PairKey>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots newest first; later inserts win ties on `created_at`.
    fn newest_first(&self) -> Vec<Snapshot> {
        let mut snapshots = self.snapshots.read().clone();
        snapshots.reverse();
        snapshots.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        snapshots
    }
}

impl SnapshotStore for MemoryStore {
    async fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let mut snapshots = self.snapshots.write();
        if snapshots.iter().any(|s| s.id() == snapshot.id()) {
            return Err(Error::SnapshotExists(snapshot.id().clone()));
        }
        snapshots.push(snapshot.clone());
        Ok(())
    }

    async fn get_snapshot(&self, id: &SnapshotId) -> Result<Option<Snapshot>> {
        Ok(self
            .snapshots
            .read()
            .iter()
            .find(|s| s.id() == id)
            .cloned())
    }

    async fn get_latest_snapshot(&self) -> Result<Option<Snapshot>> {
        Ok(self.newest_first().into_iter().next())
    }

    async fn list_snapshots(&self, limit: usize) -> Result<Vec<SnapshotSummary>> {
        Ok(self
            .newest_first()
            .iter()
            .take(limit)
            .map(Snapshot::summary)
            .collect())
    }

    async fn query_items(&self, filter: &ItemFilter) -> Result<Vec<Item>> {
        Ok(self
            .newest_first()
            .iter()
            .filter(|s| filter.snapshot_id.as_ref().map_or(true, |id| s.id() == id))
            .flat_map(|s| s.items().iter())
            .filter(|i| filter.source.map_or(true, |k| i.source == k))
            .take(filter.limit)
            .cloned()
            .collect())
    }
}

impl OpportunityStore for MemoryStore {
    async fn save_opportunities(&self, opportunities: &[Opportunity]) -> Result<SaveReport> {
        {
            let snapshots = self.snapshots.read();
            if let Some(orphan) = opportunities
                .iter()
                .find(|o| !snapshots.iter().any(|s| s.id() == o.snapshot_id()))
            {
                return Err(Error::SnapshotNotFound(orphan.snapshot_id().clone()));
            }
        }

        let mut pairs = self.pairs.write();
        let mut stored = self.opportunities.write();
        let mut report = SaveReport::default();

        for opportunity in opportunities {
            let (snapshot, buy, sell) = opportunity.pair_key();
            if pairs.insert((snapshot.clone(), buy.clone(), sell.clone())) {
                stored.push(opportunity.clone());
                report.inserted += 1;
            } else {
                report.skipped += 1;
            }
        }
        Ok(report)
    }

    async fn query_opportunities(&self, filter: &OpportunityFilter) -> Result<Vec<Opportunity>> {
        let mut found: Vec<Opportunity> = self
            .opportunities
            .read()
            .iter()
            .filter(|o| {
                filter
                    .snapshot_id
                    .as_ref()
                    .map_or(true, |id| o.snapshot_id() == id)
            })
            .filter(|o| filter.admits(o))
            .cloned()
            .collect();
        sort_by_profit(&mut found);
        found.truncate(filter.limit);
        Ok(found)
    }
}
