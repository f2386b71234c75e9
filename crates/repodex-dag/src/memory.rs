//! In-memory DAG service and pinner for testing and embedding.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use repodex_types::ContentId;

use crate::error::{DagError, DagResult};
use crate::traits::{DagService, Pinner};

/// An in-memory implementation of [`DagService`].
///
/// Blocks live in a `HashMap` behind a `RwLock` and are cloned on read.
/// Data is lost when the service is dropped.
#[derive(Default)]
pub struct MemDagService {
    blocks: RwLock<HashMap<ContentId, Vec<u8>>>,
}

impl MemDagService {
    /// Create a new empty block service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct blocks currently stored.
    pub fn len(&self) -> DagResult<usize> {
        let blocks = self
            .blocks
            .read()
            .map_err(|e| DagError::Storage(format!("lock poisoned: {e}")))?;
        Ok(blocks.len())
    }

    /// Returns `true` if no blocks are stored.
    pub fn is_empty(&self) -> DagResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl DagService for MemDagService {
    fn add(&self, data: &[u8]) -> DagResult<ContentId> {
        let id = ContentId::from_bytes(data);
        let mut blocks = self
            .blocks
            .write()
            .map_err(|e| DagError::Storage(format!("lock poisoned: {e}")))?;
        // Content addressing makes re-adding the same bytes a no-op.
        blocks.entry(id).or_insert_with(|| data.to_vec());
        Ok(id)
    }

    fn get(&self, id: &ContentId) -> DagResult<Option<Vec<u8>>> {
        let blocks = self
            .blocks
            .read()
            .map_err(|e| DagError::Storage(format!("lock poisoned: {e}")))?;
        Ok(blocks.get(id).cloned())
    }

    fn has(&self, id: &ContentId) -> DagResult<bool> {
        let blocks = self
            .blocks
            .read()
            .map_err(|e| DagError::Storage(format!("lock poisoned: {e}")))?;
        Ok(blocks.contains_key(id))
    }
}

impl std::fmt::Debug for MemDagService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len().unwrap_or(0);
        f.debug_struct("MemDagService")
            .field("block_count", &count)
            .finish()
    }
}

/// An in-memory implementation of [`Pinner`].
///
/// Records every pin request in order and counts pin-set flushes so tests
/// can assert on retention behavior.
#[derive(Debug, Default)]
pub struct MemPinner {
    pins: RwLock<Vec<(ContentId, bool)>>,
    flushes: AtomicUsize,
}

impl MemPinner {
    /// Create a new pinner with an empty pin set.
    pub fn new() -> Self {
        Self::default()
    }

    /// All pins recorded so far, in request order.
    pub fn pins(&self) -> DagResult<Vec<(ContentId, bool)>> {
        let pins = self
            .pins
            .read()
            .map_err(|e| DagError::Storage(format!("lock poisoned: {e}")))?;
        Ok(pins.clone())
    }

    /// Whether `id` has been pinned, recursively or not.
    pub fn is_pinned(&self, id: &ContentId) -> DagResult<bool> {
        let pins = self
            .pins
            .read()
            .map_err(|e| DagError::Storage(format!("lock poisoned: {e}")))?;
        Ok(pins.iter().any(|(pinned, _)| pinned == id))
    }

    /// Number of times the pin set was flushed.
    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

impl Pinner for MemPinner {
    fn pin(&self, id: &ContentId, recursive: bool) -> DagResult<()> {
        let mut pins = self
            .pins
            .write()
            .map_err(|e| DagError::Storage(format!("lock poisoned: {e}")))?;
        pins.push((*id, recursive));
        Ok(())
    }

    fn flush(&self) -> DagResult<()> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
