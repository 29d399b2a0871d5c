//! Observed items: the producer-side [`RawItem`] and the persisted [`Item`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{ItemId, SnapshotId};
use super::price::round_money;
use super::product_key::ProductKey;
use super::source::SourceKind;

/// A normalized observation emitted by an item source.
///
/// Prices are already numeric here; raw text never travels past the source
/// that scraped it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    source: SourceKind,
    name: String,
    price: Decimal,
    url: Option<String>,
}

impl RawItem {
    /// Create a validated raw item.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyName`] for blank names and
    /// [`DomainError::NonPositivePrice`] for prices that are not positive.
    pub fn try_new(
        source: SourceKind,
        name: impl Into<String>,
        price: Decimal,
        url: Option<String>,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        let rounded = round_money(price);
        if rounded <= Decimal::ZERO {
            return Err(DomainError::NonPositivePrice { price });
        }
        Ok(Self {
            source,
            name,
            price: rounded,
            url,
        })
    }

    /// Replace the scraped title with a caller-supplied display name.
    ///
    /// Blank overrides are ignored.
    #[must_use]
    pub fn with_name_override(mut self, name: Option<&str>) -> Self {
        if let Some(name) = name.map(str::trim).filter(|n| !n.is_empty()) {
            self.name = name.to_string();
        }
        self
    }

    /// The source this item came from.
    #[must_use]
    pub const fn source(&self) -> SourceKind {
        self.source
    }

    /// Display name (scraped title or override).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price rounded to money precision.
    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    /// Product page URL, when known.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

/// A persisted observation owned by exactly one snapshot.
///
/// Immutable: a new price is a new item in a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub snapshot_id: SnapshotId,
    pub source: SourceKind,
    pub name: String,
    pub price: Decimal,
    pub url: Option<String>,
    pub scraped_at: DateTime<Utc>,
}

impl Item {
    /// Materialize a raw item inside a snapshot.
    #[must_use]
    pub fn from_raw(raw: RawItem, snapshot_id: SnapshotId, scraped_at: DateTime<Utc>) -> Self {
        Self {
            id: ItemId::new(),
            snapshot_id,
            source: raw.source,
            name: raw.name,
            price: raw.price,
            url: raw.url,
            scraped_at,
        }
    }

    /// The key this item is grouped under during detection.
    #[must_use]
    pub fn product_key(&self) -> ProductKey {
        ProductKey::from_name(&self.name)
    }
}
