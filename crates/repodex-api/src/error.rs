use std::io;

use thiserror::Error;

use repodex_catalog::CatalogError;
use repodex_dag::DagError;
use repodex_layout::LayoutError;
use repodex_records::RecordError;

/// Errors surfaced by the high-level API.
///
/// Most variants pass through the taxonomy of the store that failed; the two
/// named variants are decisions this layer makes itself.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A reposet with this identity already exists in the catalog or on disk.
    #[error("reposet {kind}/{name} already exists")]
    AlreadyExists { kind: String, name: String },

    /// The operation needs a reposet that neither store knows about.
    #[error("reposet {kind}/{name} does not exist")]
    MissingReposet { kind: String, name: String },

    /// Catalog key or KV failure.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Record encode/decode failure.
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// DAG property store failure.
    #[error("property store error: {0}")]
    Dag(#[from] DagError),

    /// Local layout failure.
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Filesystem failure outside the layout manager.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Result alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
