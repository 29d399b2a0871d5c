//! Opportunity type with builder pattern.
//!
//! This module provides the `Opportunity` struct representing a detected
//! cross-source price gap, along with `OpportunityBuilder` for safe
//! construction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{ItemId, OpportunityId, SnapshotId};
use super::item::Item;
use super::price::round_money;
use super::source::SourceKind;

/// A detected arbitrage opportunity: buy one item, sell the other.
///
/// Use `Opportunity::builder()` to construct instances. The builder checks
/// the cross-source and positive-profit invariants and calculates the
/// derived fields (`profit_amount`, `profit_percent`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    pub(crate) id: OpportunityId,
    pub(crate) snapshot_id: SnapshotId,
    pub(crate) item_name: String,
    pub(crate) buy_item_id: ItemId,
    pub(crate) buy_source: SourceKind,
    pub(crate) buy_price: Decimal,
    pub(crate) buy_url: Option<String>,
    pub(crate) sell_item_id: ItemId,
    pub(crate) sell_source: SourceKind,
    pub(crate) sell_price: Decimal,
    pub(crate) sell_url: Option<String>,
    pub(crate) profit_amount: Decimal,
    pub(crate) profit_percent: Decimal,
    pub(crate) detected_at: DateTime<Utc>,
}

impl Opportunity {
    /// Create a new builder for constructing an Opportunity.
    pub fn builder<'a>() -> OpportunityBuilder<'a> {
        OpportunityBuilder::new()
    }

    pub fn id(&self) -> &OpportunityId {
        &self.id
    }

    pub fn snapshot_id(&self) -> &SnapshotId {
        &self.snapshot_id
    }

    /// Display name of the product (taken from the buy leg).
    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn buy_item_id(&self) -> &ItemId {
        &self.buy_item_id
    }

    pub fn buy_source(&self) -> SourceKind {
        self.buy_source
    }

    pub fn buy_price(&self) -> Decimal {
        self.buy_price
    }

    pub fn buy_url(&self) -> Option<&str> {
        self.buy_url.as_deref()
    }

    pub fn sell_item_id(&self) -> &ItemId {
        &self.sell_item_id
    }

    pub fn sell_source(&self) -> SourceKind {
        self.sell_source
    }

    pub fn sell_price(&self) -> Decimal {
        self.sell_price
    }

    pub fn sell_url(&self) -> Option<&str> {
        self.sell_url.as_deref()
    }

    /// Get the profit amount (sell_price - buy_price), 2 dp.
    pub fn profit_amount(&self) -> Decimal {
        self.profit_amount
    }

    /// Get the profit percentage (profit_amount / buy_price * 100), 2 dp.
    pub fn profit_percent(&self) -> Decimal {
        self.profit_percent
    }

    pub fn detected_at(&self) -> DateTime<Utc> {
        self.detected_at
    }

    /// The idempotence key: one row per pair within a snapshot.
    pub fn pair_key(&self) -> (&SnapshotId, &ItemId, &ItemId) {
        (&self.snapshot_id, &self.buy_item_id, &self.sell_item_id)
    }
}

/// Builder for constructing `Opportunity` instances.
///
/// # Example
///
/// ```ignore
/// let opportunity = Opportunity::builder()
///     .buy(&cheap_item)
///     .sell(&pricey_item)
///     .detected_at(Utc::now())
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct OpportunityBuilder<'a> {
    buy: Option<&'a Item>,
    sell: Option<&'a Item>,
    detected_at: Option<DateTime<Utc>>,
}

impl<'a> OpportunityBuilder<'a> {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the item to buy.
    pub fn buy(mut self, item: &'a Item) -> Self {
        self.buy = Some(item);
        self
    }

    /// Set the item to sell against.
    pub fn sell(mut self, item: &'a Item) -> Self {
        self.sell = Some(item);
        self
    }

    /// Set the detection timestamp (defaults to now).
    pub fn detected_at(mut self, at: DateTime<Utc>) -> Self {
        self.detected_at = Some(at);
        self
    }

    /// Build the Opportunity, calculating derived fields.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if a leg is missing, both legs share a source,
    /// the legs belong to different snapshots, or the sell price does not
    /// exceed the buy price.
    pub fn build(self) -> Result<Opportunity, DomainError> {
        let buy = self.buy.ok_or(DomainError::MissingField { field: "buy" })?;
        let sell = self.sell.ok_or(DomainError::MissingField { field: "sell" })?;

        if buy.source == sell.source {
            return Err(DomainError::SameSource {
                source_kind: buy.source,
            });
        }
        if sell.snapshot_id != buy.snapshot_id {
            return Err(DomainError::SnapshotMismatch {
                item_id: sell.id.clone(),
            });
        }
        if buy.price <= Decimal::ZERO {
            return Err(DomainError::NonPositivePrice { price: buy.price });
        }

        let profit_amount = round_money(sell.price - buy.price);
        if profit_amount <= Decimal::ZERO {
            return Err(DomainError::NonPositiveProfit {
                buy: buy.price,
                sell: sell.price,
            });
        }
        let profit_percent = round_money(profit_amount / buy.price * Decimal::ONE_HUNDRED);

        Ok(Opportunity {
            id: OpportunityId::derive(&buy.snapshot_id, &buy.id, &sell.id),
            snapshot_id: buy.snapshot_id.clone(),
            item_name: buy.name.clone(),
            buy_item_id: buy.id.clone(),
            buy_source: buy.source,
            buy_price: buy.price,
            buy_url: buy.url.clone(),
            sell_item_id: sell.id.clone(),
            sell_source: sell.source,
            sell_price: sell.price,
            sell_url: sell.url.clone(),
            profit_amount,
            profit_percent,
            detected_at: self.detected_at.unwrap_or_else(Utc::now),
        })
    }
}
