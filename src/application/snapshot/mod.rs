//! Snapshot building: turn scrape requests into immutable snapshots.

mod builder;
mod request;

pub use builder::{BuildOutcome, ScrapeConfig, SnapshotBuilder, SourceSet, CANCELLED};
pub use request::ScrapeRequest;
