//! Persistence ports for snapshots, items and opportunities.

use std::future::Future;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{Item, Opportunity, Snapshot, SnapshotId, SnapshotSummary, SourceKind};
use crate::error::Result;

/// Filter for opportunity queries. Every field is optional except `limit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpportunityFilter {
    pub snapshot_id: Option<SnapshotId>,
    /// Only opportunities detected at or after this instant.
    pub since: Option<DateTime<Utc>>,
    pub min_profit_percent: Option<Decimal>,
    pub min_profit_amount: Option<Decimal>,
    pub limit: usize,
}

impl Default for OpportunityFilter {
    fn default() -> Self {
        Self {
            snapshot_id: None,
            since: None,
            min_profit_percent: None,
            min_profit_amount: None,
            limit: 100,
        }
    }
}

impl OpportunityFilter {
    /// Whether an opportunity passes the threshold and time filters.
    ///
    /// The snapshot filter is left to the store, which usually pushes it
    /// down into its query.
    #[must_use]
    pub fn admits(&self, opportunity: &Opportunity) -> bool {
        self.since.map_or(true, |t| opportunity.detected_at() >= t)
            && self
                .min_profit_percent
                .map_or(true, |p| opportunity.profit_percent() >= p)
            && self
                .min_profit_amount
                .map_or(true, |a| opportunity.profit_amount() >= a)
    }
}

/// Filter for item queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFilter {
    pub snapshot_id: Option<SnapshotId>,
    pub source: Option<SourceKind>,
    pub limit: usize,
}

impl Default for ItemFilter {
    fn default() -> Self {
        Self {
            snapshot_id: None,
            source: None,
            limit: 100,
        }
    }
}

/// Outcome of an idempotent opportunity write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SaveReport {
    /// Rows written by this call.
    pub inserted: usize,
    /// Candidates whose (snapshot, buy, sell) triple was already stored.
    pub skipped: usize,
}

/// Storage operations for snapshots and their items.
pub trait SnapshotStore: Send + Sync {
    /// Persist a snapshot with all of its items atomically.
    ///
    /// Fails with `SnapshotExists` if the id was already written.
    fn save_snapshot(&self, snapshot: &Snapshot) -> impl Future<Output = Result<()>> + Send;

    /// Get a snapshot by ID, items in scrape order.
    fn get_snapshot(&self, id: &SnapshotId)
        -> impl Future<Output = Result<Option<Snapshot>>> + Send;

    /// The most recently created snapshot, if any.
    fn get_latest_snapshot(&self) -> impl Future<Output = Result<Option<Snapshot>>> + Send;

    /// Snapshot headers, newest first.
    fn list_snapshots(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<SnapshotSummary>>> + Send;

    /// Items matching the filter, newest snapshot first, scrape order within one.
    fn query_items(&self, filter: &ItemFilter) -> impl Future<Output = Result<Vec<Item>>> + Send;
}

/// Storage operations for detected opportunities.
pub trait OpportunityStore: Send + Sync {
    /// Insert opportunities, skipping any (snapshot, buy, sell) triple that
    /// already exists.
    fn save_opportunities(
        &self,
        opportunities: &[Opportunity],
    ) -> impl Future<Output = Result<SaveReport>> + Send;

    /// Opportunities matching the filter, by profit percent then amount, descending.
    fn query_opportunities(
        &self,
        filter: &OpportunityFilter,
    ) -> impl Future<Output = Result<Vec<Opportunity>>> + Send;
}

/// Orders opportunities the way every read returns them.
pub fn sort_by_profit(opportunities: &mut [Opportunity]) {
    opportunities.sort_by(|a, b| {
        b.profit_percent()
            .cmp(&a.profit_percent())
            .then_with(|| b.profit_amount().cmp(&a.profit_amount()))
    });
}
