//! Error types for layout and parameter-file operations.

/// Errors that can occur while composing paths or writing the layout.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// A reposet kind was empty where one is required.
    #[error("reposet kind must not be empty")]
    EmptyKind,

    /// A reposet name was empty where one is required.
    #[error("reposet name must not be empty")]
    EmptyName,

    /// The indexer path is absent from the configuration.
    #[error("indexer path is not configured")]
    MissingIndexPath,

    /// The corpus section is absent from the configuration.
    #[error("indexer corpus is not configured")]
    MissingCorpusConfig,

    /// The requested kind has no metadata field schema.
    #[error("no metadata fields configured for kind {0:?}")]
    KindNotConfigured(String),

    /// XML rendering failure.
    #[error("parameter rendering error: {0}")]
    Xml(String),

    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias for layout results.
pub type LayoutResult<T> = Result<T, LayoutError>;
