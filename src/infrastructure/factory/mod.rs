//! Factory modules for building infrastructure components.
//!
//! Provides factory functions that construct fully-configured components
//! from application configuration. Inbound adapters call these instead of
//! wiring adapters themselves.
//!
//! # Submodules
//!
//! - [`persistence`] - SQLite store construction
//! - [`source`] - Item sources and snapshot builder construction

pub mod persistence;
pub mod source;
