use thiserror::Error;

use repodex_records::RecordError;
use repodex_types::TypeError;

/// Errors from catalog key composition and decomposition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The key has too few segments, or a depth no catalog level uses.
    #[error("invalid reposet key length: {key}")]
    InvalidLength { key: String },

    /// The key does not live under the catalog root prefix.
    #[error("invalid reposet key prefix: {key}")]
    InvalidPrefix { key: String },

    /// The class segment is not a known store class.
    #[error("invalid reposet key class: {0}")]
    Class(#[from] TypeError),
}

/// Errors from catalog store operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No entry exists under the given key.
    #[error("catalog entry not found: {key}")]
    NotFound { key: String },

    /// A key failed to decompose during enumeration.
    #[error("invalid catalog key: {0}")]
    Key(#[from] KeyError),

    /// A catalog value failed to decode.
    #[error("invalid catalog value: {0}")]
    Record(#[from] RecordError),

    /// The underlying datastore failed.
    #[error("datastore error: {0}")]
    Backend(String),
}

/// Result alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
