use std::path::PathBuf;
use thiserror::Error;

/// Which side of a comparison could not be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingSide {
    First,
    Second,
    Both,
}

impl std::fmt::Display for MissingSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingSide::First => write!(f, "first record"),
            MissingSide::Second => write!(f, "second record"),
            MissingSide::Both => write!(f, "both records"),
        }
    }
}

/// Errors raised by the normalization and comparison engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The raw record has no usable identifier.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A comparison was requested without both records.
    #[error("Record missing for comparison: {0}")]
    RecordMissing(MissingSide),
}

impl EngineError {
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }
}

/// Errors raised by the catalog host layers (store, import, config).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Pokemon #{0} not found")]
    NotFound(i64),

    #[error("A Pokemon with id #{0} already exists")]
    DuplicateId(i64),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Type chart error: {0}")]
    TypeChart(String),
}

impl CatalogError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means a requested record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::NotFound(_) | CatalogError::Engine(EngineError::RecordMissing(_))
        )
    }
}

/// Type alias for Results using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

/// Type alias for Results using CatalogError
pub type CatalogResult<T> = Result<T, CatalogError>;
