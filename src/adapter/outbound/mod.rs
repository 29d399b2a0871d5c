//! Outbound adapters (driven side).
//!
//! Concrete implementations of the outbound ports: item sources and stores.

pub mod amazon;
pub mod memory;
pub mod sqlite;
pub mod static_source;
