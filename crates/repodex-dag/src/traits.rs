//! Collaborator seams for content-addressed storage and pinning.

use repodex_types::ContentId;

use crate::error::DagResult;

/// Append-only, content-addressed block service.
///
/// Invariants implementations must uphold:
/// - `add` derives the identifier solely from the block bytes; adding the
///   same bytes twice returns the same identifier and stores one block.
/// - Blocks are immutable once added and come back byte-for-byte from `get`.
pub trait DagService: Send + Sync {
    /// Store a block, returning its content identifier.
    fn add(&self, data: &[u8]) -> DagResult<ContentId>;

    /// Fetch a block, or `None` when no block has that identifier.
    fn get(&self, id: &ContentId) -> DagResult<Option<Vec<u8>>>;

    /// Whether a block with this identifier is present.
    fn has(&self, id: &ContentId) -> DagResult<bool> {
        Ok(self.get(id)?.is_some())
    }
}

/// Retention contract of the DAG store's garbage collector.
///
/// Pinning is the caller's responsibility: [`PropStore`](crate::PropStore)
/// flushes directory roots but never pins them, so an unpinned reposet tree
/// is collectable.
pub trait Pinner: Send + Sync {
    /// Retain `id`, and everything reachable from it when `recursive`.
    fn pin(&self, id: &ContentId, recursive: bool) -> DagResult<()>;

    /// Persist the pin set.
    fn flush(&self) -> DagResult<()>;
}
