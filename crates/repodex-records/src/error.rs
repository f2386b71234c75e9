use crate::envelope::RecordKind;

/// Errors from record encoding and decoding.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// A record failed to serialize.
    #[error("record encode error: {0}")]
    Encode(String),

    /// Record bytes are malformed or truncated.
    #[error("record decode error: {0}")]
    Decode(String),

    /// An envelope carried a discriminator no known record kind uses.
    #[error("unknown record kind tag: {0}")]
    UnknownKind(u32),

    /// An envelope held a different record kind than the caller asked for.
    #[error("record kind mismatch: expected {expected}, got {actual}")]
    KindMismatch {
        expected: RecordKind,
        actual: RecordKind,
    },
}

/// Result alias for record operations.
pub type RecordResult<T> = Result<T, RecordError>;
