//! Source-agnostic domain logic.
//!
//! Everything here is pure: no I/O, no clocks except where a timestamp is
//! passed in, and every invariant of snapshots, items and opportunities is
//! checked at construction.

pub mod error;
pub mod id;
pub mod item;
pub mod opportunity;
pub mod price;
pub mod product_key;
pub mod snapshot;
pub mod source;

pub use error::DomainError;
pub use id::{ItemId, OpportunityId, SnapshotId};
pub use item::{Item, RawItem};
pub use opportunity::{Opportunity, OpportunityBuilder};
pub use price::{parse_price, round_money, PriceParseError, MONEY_DP};
pub use product_key::ProductKey;
pub use snapshot::{Snapshot, SnapshotSummary};
pub use source::SourceKind;
