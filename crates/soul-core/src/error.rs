use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("not found: {entity} with key {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("already registered: {key} at version {version}")]
    AlreadyExists { key: String, version: String },

    #[error("feature vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

impl Error {
    /// Returns `true` when the error indicates a missing record, a normal
    /// outcome for lookups rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` when the error indicates the backing store failed,
    /// which aborts batch operations rather than skipping one entry.
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::StoreUnavailable(_) | Self::Io(_)
        )
    }

    /// Returns `true` for a feature-vector dimension mismatch, which points
    /// at an extractor/store inconsistency rather than user input.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, Self::DimensionMismatch { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
