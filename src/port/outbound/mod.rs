//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the infrastructure the core depends on: item
//! sources and durable storage.

pub mod source;
pub mod store;
