//! Domain validation errors for core domain types.
//!
//! This module defines errors that occur when domain invariants are violated.
//! These errors are returned by `try_new` constructors and the opportunity
//! builder.
//!
//! # Examples
//!
//! ```
//! use arbitrack::domain::error::DomainError;
//! use arbitrack::domain::item::RawItem;
//! use arbitrack::domain::source::SourceKind;
//! use rust_decimal_macros::dec;
//!
//! let result = RawItem::try_new(SourceKind::Static, "   ", dec!(9.99), None);
//! assert!(matches!(result, Err(DomainError::EmptyName)));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use super::id::ItemId;
use super::source::SourceKind;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Item names must contain at least one non-whitespace character.
    #[error("item name cannot be empty")]
    EmptyName,

    /// Prices must be strictly positive.
    #[error("price must be positive, got {price}")]
    NonPositivePrice {
        /// The invalid price that was provided.
        price: Decimal,
    },

    /// Both legs of an opportunity come from the same source.
    #[error("buy and sell items share source {source_kind}")]
    SameSource {
        /// The shared source.
        source_kind: SourceKind,
    },

    /// Sell price must exceed buy price.
    #[error("sell price {sell} must be greater than buy price {buy}")]
    NonPositiveProfit {
        /// The buy price.
        buy: Decimal,
        /// The sell price.
        sell: Decimal,
    },

    /// An opportunity leg belongs to a different snapshot.
    #[error("item {item_id} does not belong to the opportunity's snapshot")]
    SnapshotMismatch {
        /// The offending item.
        item_id: ItemId,
    },

    /// A required builder field was not provided.
    #[error("{field} is required")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },
}
