//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Namespace for deterministic opportunity identifiers.
const OPPORTUNITY_NAMESPACE: Uuid = Uuid::from_u128(0x6f1d_2c4e_8a3b_4f7a_9c21_5e0b_d4a7_3f18);

/// Unique identifier for a snapshot.
///
/// Generated as UUID v4 for new snapshots, or constructed from an
/// existing string for persistence/deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SnapshotId(String);

impl SnapshotId {
    /// Create a new `SnapshotId` with a generated UUID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the snapshot ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SnapshotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SnapshotId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SnapshotId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for an item observed in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// Create a new `ItemId` with a generated UUID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the item ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier for a detected opportunity.
///
/// Derived from the snapshot and the two item ids (UUID v5), so detecting
/// the same pair twice yields the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpportunityId(String);

impl OpportunityId {
    /// Derive the id for a (snapshot, buy item, sell item) triple.
    #[must_use]
    pub fn derive(snapshot_id: &SnapshotId, buy_item_id: &ItemId, sell_item_id: &ItemId) -> Self {
        let key = format!("{snapshot_id}/{buy_item_id}/{sell_item_id}");
        Self(Uuid::new_v5(&OPPORTUNITY_NAMESPACE, key.as_bytes()).to_string())
    }

    /// Get the opportunity ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OpportunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OpportunityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_id_new_generates_unique_ids() {
        let a = SnapshotId::new();
        let b = SnapshotId::new();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn item_id_from_str_roundtrips() {
        let id = ItemId::from("item-1");
        assert_eq!(id.as_str(), "item-1");
        assert_eq!(format!("{id}"), "item-1");
    }

    #[test]
    fn opportunity_id_is_deterministic() {
        let snapshot = SnapshotId::from("s1");
        let buy = ItemId::from("a");
        let sell = ItemId::from("b");

        let first = OpportunityId::derive(&snapshot, &buy, &sell);
        let second = OpportunityId::derive(&snapshot, &buy, &sell);
        assert_eq!(first, second);
    }

    #[test]
    fn opportunity_id_depends_on_direction() {
        let snapshot = SnapshotId::from("s1");
        let a = ItemId::from("a");
        let b = ItemId::from("b");

        assert_ne!(
            OpportunityId::derive(&snapshot, &a, &b),
            OpportunityId::derive(&snapshot, &b, &a)
        );
    }
}
