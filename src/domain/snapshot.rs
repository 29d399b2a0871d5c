//! Point-in-time collections of observed items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::SnapshotId;
use super::item::{Item, RawItem};

/// An immutable, timestamped set of items collected in one scrape run.
///
/// Items keep scrape order. There are no mutators: once built, a snapshot
/// only ever gets read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    id: SnapshotId,
    name: String,
    created_at: DateTime<Utc>,
    items: Vec<Item>,
}

impl Snapshot {
    /// Create a snapshot from freshly fetched items.
    ///
    /// Every item is tagged with the new snapshot id and `created_at`.
    /// When `name` is `None` (or blank) one is derived from `created_at`.
    #[must_use]
    pub fn create(name: Option<&str>, created_at: DateTime<Utc>, raw: Vec<RawItem>) -> Self {
        let id = SnapshotId::new();
        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map_or_else(|| default_name(created_at), str::to_string);
        let items = raw
            .into_iter()
            .map(|r| Item::from_raw(r, id.clone(), created_at))
            .collect();

        Self {
            id,
            name,
            created_at,
            items,
        }
    }

    /// Reassemble a snapshot loaded from storage.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::SnapshotMismatch`] if any item belongs to a
    /// different snapshot.
    pub fn from_parts(
        id: SnapshotId,
        name: String,
        created_at: DateTime<Utc>,
        items: Vec<Item>,
    ) -> Result<Self, DomainError> {
        if let Some(stray) = items.iter().find(|i| i.snapshot_id != id) {
            return Err(DomainError::SnapshotMismatch {
                item_id: stray.id.clone(),
            });
        }
        Ok(Self {
            id,
            name,
            created_at,
            items,
        })
    }

    #[must_use]
    pub fn id(&self) -> &SnapshotId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Items in scrape order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Header view without items.
    #[must_use]
    pub fn summary(&self) -> SnapshotSummary {
        SnapshotSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
            item_count: self.items.len(),
        }
    }
}

/// Snapshot header used by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub id: SnapshotId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub item_count: usize,
}

/// Name used when the caller does not supply one.
#[must_use]
pub fn default_name(created_at: DateTime<Utc>) -> String {
    format!("snapshot-{}", created_at.format("%Y%m%d-%H%M%S"))
}
