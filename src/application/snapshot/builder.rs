//! Snapshot assembly from concurrent source fetches.
//!
//! # Cancellation
//!
//! The whole build runs under one deadline (`timeout_secs`). When it passes,
//! fetches still in flight are dropped and their queries are reported as
//! `Unavailable { reason: "cancelled" }`. Whatever completed before the
//! deadline becomes the snapshot; if nothing did, the build fails with
//! `EmptySnapshot`.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures_util::stream::{self, StreamExt};
use serde::Deserialize;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::domain::{RawItem, Snapshot, SourceKind};
use crate::error::{Error, Result, SourceError};
use crate::port::outbound::source::{ItemSource, Query, QueryFailure};

/// Reason attached to queries abandoned at the build deadline.
pub const CANCELLED: &str = "cancelled";

/// Concurrency and deadline settings for one build.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScrapeConfig {
    /// Maximum fetches in flight at once.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Deadline for the whole build, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_max_concurrency() -> usize {
    4
}

const fn default_timeout_secs() -> u64 {
    120
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ScrapeConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// The item sources available to a build, keyed by kind.
#[derive(Clone, Default)]
pub struct SourceSet {
    sources: HashMap<SourceKind, Arc<dyn ItemSource>>,
}

impl SourceSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source, replacing any previous one of the same kind.
    #[must_use]
    pub fn with(mut self, source: Arc<dyn ItemSource>) -> Self {
        self.sources.insert(source.kind(), source);
        self
    }

    #[must_use]
    pub fn get(&self, kind: SourceKind) -> Option<&Arc<dyn ItemSource>> {
        self.sources.get(&kind)
    }

    #[must_use]
    pub fn kinds(&self) -> Vec<SourceKind> {
        let mut kinds: Vec<_> = self.sources.keys().copied().collect();
        kinds.sort();
        kinds
    }
}

impl std::fmt::Debug for SourceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceSet")
            .field("sources", &self.kinds())
            .finish()
    }
}

/// A built snapshot plus every query that contributed nothing to it.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub snapshot: Snapshot,
    pub failures: Vec<QueryFailure>,
}

impl BuildOutcome {
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Runs queries against their sources and assembles a snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    sources: SourceSet,
    config: ScrapeConfig,
}

impl SnapshotBuilder {
    #[must_use]
    pub fn new(sources: SourceSet, config: ScrapeConfig) -> Self {
        Self { sources, config }
    }

    #[must_use]
    pub const fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Fetch every query and assemble the results into one snapshot.
    ///
    /// Items appear in query order regardless of completion order. Per-query
    /// failures are returned in [`BuildOutcome::failures`], also in query
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptySnapshot`] when no query produced an item.
    pub async fn build(&self, queries: &[Query], name: Option<&str>) -> Result<BuildOutcome> {
        let deadline = Instant::now() + self.config.timeout();
        let concurrency = self.config.max_concurrency.max(1);
        info!(
            queries = queries.len(),
            concurrency,
            timeout_secs = self.config.timeout_secs,
            "Building snapshot"
        );

        let mut slots: Vec<Option<std::result::Result<Vec<RawItem>, SourceError>>> =
            (0..queries.len()).map(|_| None).collect();

        {
            let mut fetches = stream::iter(queries.iter().enumerate())
                .map(|(index, query)| async move { (index, self.fetch_one(query).await) })
                .buffer_unordered(concurrency);

            loop {
                match tokio::time::timeout_at(deadline, fetches.next()).await {
                    Ok(Some((index, result))) => slots[index] = Some(result),
                    Ok(None) => break,
                    Err(_) => {
                        warn!(
                            timeout_secs = self.config.timeout_secs,
                            "Build deadline reached, abandoning in-flight fetches"
                        );
                        break;
                    }
                }
            }
        }

        let mut raw = Vec::new();
        let mut failures = Vec::new();
        for (query, slot) in queries.iter().zip(slots) {
            let error = match slot {
                Some(Ok(items)) => {
                    raw.extend(items);
                    continue;
                }
                Some(Err(e)) => e,
                None => SourceError::unavailable(query.source, CANCELLED),
            };
            warn!(query = %query, error = %error, "Query failed");
            failures.push(QueryFailure {
                query: query.clone(),
                error,
            });
        }

        if raw.is_empty() {
            return Err(Error::EmptySnapshot { failures });
        }

        let snapshot = Snapshot::create(name, Utc::now(), raw);
        info!(
            snapshot_id = %snapshot.id(),
            name = snapshot.name(),
            items = snapshot.len(),
            failed = failures.len(),
            "Snapshot built"
        );
        Ok(BuildOutcome { snapshot, failures })
    }

    async fn fetch_one(&self, query: &Query) -> std::result::Result<Vec<RawItem>, SourceError> {
        let Some(source) = self.sources.get(query.source) else {
            return Err(SourceError::unavailable(
                query.source,
                "source not configured",
            ));
        };

        debug!(query = %query, "Fetching");
        let items = source.fetch(query).await?;
        if items.is_empty() {
            return Err(SourceError::NotFound {
                query: query.target.clone(),
            });
        }
        debug!(query = %query, items = items.len(), "Fetched");
        Ok(items)
    }
}
