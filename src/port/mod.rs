//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │ Amazon  │            │   Static    │              │   Store   │
//! │ Source  │            │   Source    │              │  Adapter  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! - [`outbound::source::ItemSource`] - fetch normalized items from one origin
//! - [`outbound::store::SnapshotStore`], [`outbound::store::OpportunityStore`] -
//!   the persistence gateway

pub mod outbound;
