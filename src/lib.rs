//! Arbitrack - cross-source price snapshots and arbitrage detection.
//!
//! Prices for the same product are collected from several sources into an
//! immutable snapshot. Detection compares every cross-source pair inside a
//! snapshot and reports where buying on one source and selling on another
//! clears a minimum profit.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Snapshots, items, opportunities and price normalization
//! - [`port`] - Traits for item sources and persistence
//! - [`application`] - Snapshot building, detection, and the find workflow
//! - [`adapter`] - Amazon and static sources, SQLite and in-memory stores, CLI
//! - [`infrastructure`] - Configuration, logging, and component factories
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use arbitrack::adapter::outbound::static_source::{StaticSource, StaticSourceConfig};
//! use arbitrack::application::detection::{Detector, Thresholds};
//! use arbitrack::application::snapshot::{ScrapeConfig, SnapshotBuilder, SourceSet};
//! use arbitrack::port::outbound::source::Query;
//! use std::sync::Arc;
//!
//! # async fn run() -> arbitrack::error::Result<()> {
//! let sources = SourceSet::new().with(Arc::new(StaticSource::new(&StaticSourceConfig::default())));
//! let builder = SnapshotBuilder::new(sources, ScrapeConfig::default());
//! let outcome = builder.build(&[Query::static_catalog()], None).await?;
//! let opportunities = Detector::new(Thresholds::default()).detect(outcome.snapshot.items());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
