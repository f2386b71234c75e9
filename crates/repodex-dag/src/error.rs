//! Error types for DAG-backed property storage.

use repodex_records::RecordError;
use repodex_types::ContentId;

/// Errors that can occur while persisting or reading property files.
#[derive(Debug, thiserror::Error)]
pub enum DagError {
    /// The directory has no entry with the requested name.
    #[error("no directory entry named {0:?}")]
    NotFound(String),

    /// The entry exists but is a subdirectory where a file was expected.
    #[error("entry {0:?} is not a property file")]
    WrongEntryType(String),

    /// A block that should be resolvable was absent from the DAG store.
    #[error("block {0} not present in the DAG store")]
    MissingBlock(ContentId),

    /// Record or envelope encode/decode failure.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Directory node encode/decode failure.
    #[error("directory node serialization error: {0}")]
    Serialization(String),

    /// Underlying block-store failure.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Convenience alias for DAG results.
pub type DagResult<T> = Result<T, DagError>;
