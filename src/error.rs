use thiserror::Error;

use crate::domain::{DomainError, PriceParseError, SnapshotId, SourceKind};
use crate::port::outbound::source::QueryFailure;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Per-query failures raised by item sources.
///
/// None of these abort a multi-query build; the snapshot builder collects
/// them next to whatever succeeded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Network failure, blocked request, or a page that could not be read.
    #[error("{source_kind} unavailable: {reason}")]
    Unavailable {
        source_kind: SourceKind,
        reason: String,
    },

    /// The source has no listing for the query.
    #[error("no listing found for '{query}'")]
    NotFound { query: String },

    /// The listing was found but its price text was unusable.
    #[error(transparent)]
    PriceParse(#[from] PriceParseError),
}

impl SourceError {
    /// Shorthand for [`SourceError::Unavailable`].
    pub fn unavailable(source_kind: SourceKind, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            source_kind,
            reason: reason.into(),
        }
    }

    /// Whether trying the same query again later could succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Source(#[from] SourceError),

    /// Every query of a build failed; nothing was persisted.
    #[error("empty snapshot: all {} queries failed", failures.len())]
    EmptySnapshot { failures: Vec<QueryFailure> },

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("snapshot {0} not found")]
    SnapshotNotFound(SnapshotId),

    /// Snapshots are immutable; a second write with the same id is refused.
    #[error("snapshot {0} already exists")]
    SnapshotExists(SnapshotId),

    #[error("no snapshots found in database")]
    NoSnapshots,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Error::StorageUnavailable(err.to_string())
    }
}

impl From<diesel::r2d2::PoolError> for Error {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Error::StorageUnavailable(err.to_string())
    }
}
