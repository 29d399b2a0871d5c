//! Item source port.
//!
//! Every origin of listing data (live marketplace pages, the demo catalog)
//! implements [`ItemSource`]. The snapshot builder and the detection engine
//! only ever see the normalized [`RawItem`]s it returns.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{RawItem, SourceKind};
use crate::error::SourceError;

/// One request against one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    /// Which source should answer.
    pub source: SourceKind,
    /// A product URL for `amazon`, a product name (or `*`) for `static`.
    pub target: String,
    /// Display name that replaces the scraped title.
    pub name_override: Option<String>,
}

impl Query {
    #[must_use]
    pub fn new(source: SourceKind, target: impl Into<String>) -> Self {
        Self {
            source,
            target: target.into(),
            name_override: None,
        }
    }

    /// Attach a display name used to correlate this listing across sources.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name_override = if name.trim().is_empty() {
            None
        } else {
            Some(name)
        };
        self
    }

    /// Query for the whole static catalog.
    #[must_use]
    pub fn static_catalog() -> Self {
        Self::new(SourceKind::Static, "*")
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.target)?;
        if let Some(name) = &self.name_override {
            write!(f, " as '{name}'")?;
        }
        Ok(())
    }
}

/// A query that produced no items, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryFailure {
    pub query: Query,
    pub error: SourceError,
}

impl fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.query, self.error)
    }
}

/// A capability that turns a query into normalized items.
///
/// Implementations own their parsing, pacing and retry rules. A failure
/// affects only the query it was raised for.
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// The source this implementation answers for.
    fn kind(&self) -> SourceKind;

    /// Fetch every listing matching `query`.
    ///
    /// The query's name override, when present, is already applied to the
    /// returned items.
    async fn fetch(&self, query: &Query) -> Result<Vec<RawItem>, SourceError>;
}
