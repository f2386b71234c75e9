//! Property file store over a DAG-backed directory.

use std::sync::Arc;

use tracing::debug;

use repodex_records::{PropertyEnvelope, PropertyRecord, RecordKind};
use repodex_types::ContentId;

use crate::error::{DagError, DagResult};
use crate::node::{DirEntry, DirNode, EntryKind};
use crate::traits::DagService;

/// Named property files collected under a single directory root.
///
/// The store holds one [`DirNode`] in memory and persists it to the DAG on
/// every mutation, so [`root`](PropStore::root) always identifies the state
/// after the last completed call. Records go in wrapped in a
/// [`PropertyEnvelope`]; plain files (the reposet parameter file) go in as
/// raw bytes.
///
/// The store never pins. A caller that needs the tree to survive garbage
/// collection must pin the flushed root recursively itself. Mutations take
/// `&mut self`; sharing a store across threads requires external
/// serialization.
pub struct PropStore {
    dag: Arc<dyn DagService>,
    dir: DirNode,
    root: Option<ContentId>,
}

impl PropStore {
    /// Create a store over an empty directory.
    pub fn new(dag: Arc<dyn DagService>) -> Self {
        Self {
            dag,
            dir: DirNode::new(),
            root: None,
        }
    }

    /// Open the directory previously flushed under `root`.
    pub fn load(dag: Arc<dyn DagService>, root: ContentId) -> DagResult<Self> {
        let bytes = dag.get(&root)?.ok_or(DagError::MissingBlock(root))?;
        let dir = DirNode::from_bytes(&bytes)?;
        Ok(Self {
            dag,
            dir,
            root: Some(root),
        })
    }

    /// Wrap `record` in an envelope and write it as the file `name`.
    ///
    /// The directory is flushed before returning, so the new file is
    /// reachable from [`root`](PropStore::root). Returns the identifier of
    /// the file block, not of the directory.
    pub fn add_props(&mut self, name: &str, record: &PropertyRecord) -> DagResult<ContentId> {
        let bytes = PropertyEnvelope::seal(record)?.to_bytes()?;
        let id = self.write_file(name, &bytes)?;
        debug!(name, kind = %record.kind(), id = %id, "property record added");
        Ok(id)
    }

    /// Write raw bytes as the file `name`, without an envelope.
    pub fn add_file(&mut self, name: &str, data: &[u8]) -> DagResult<ContentId> {
        let id = self.write_file(name, data)?;
        debug!(name, id = %id, size = data.len(), "file added");
        Ok(id)
    }

    /// Identifier of the file `name`.
    ///
    /// Fails with [`DagError::NotFound`] when no entry has that name and
    /// with [`DagError::WrongEntryType`] when the entry is a subdirectory.
    pub fn has_props(&self, name: &str) -> DagResult<ContentId> {
        Ok(self.file_entry(name)?.id)
    }

    /// Read back the record stored under `name`, insisting on `kind`.
    ///
    /// A tag mismatch surfaces as [`RecordError::KindMismatch`] wrapped in
    /// [`DagError::Record`].
    ///
    /// [`RecordError::KindMismatch`]: repodex_records::RecordError::KindMismatch
    pub fn get_props(&self, name: &str, kind: RecordKind) -> DagResult<PropertyRecord> {
        let bytes = self.read_file(name)?;
        let envelope = PropertyEnvelope::from_bytes(&bytes)?;
        Ok(envelope.open_as(kind)?)
    }

    /// Read back the raw bytes of the file `name`.
    pub fn read_file(&self, name: &str) -> DagResult<Vec<u8>> {
        let id = self.file_entry(name)?.id;
        self.dag.get(&id)?.ok_or(DagError::MissingBlock(id))
    }

    /// Persist the directory node and return its identifier.
    pub fn flush(&mut self) -> DagResult<ContentId> {
        let bytes = self.dir.to_bytes()?;
        let root = self.dag.add(&bytes)?;
        self.root = Some(root);
        debug!(root = %root, entries = self.dir.len(), "directory flushed");
        Ok(root)
    }

    /// Identifier of the directory as of the last flush, if any.
    pub fn root(&self) -> Option<ContentId> {
        self.root
    }

    /// The in-memory directory listing.
    pub fn dir(&self) -> &DirNode {
        &self.dir
    }

    fn file_entry(&self, name: &str) -> DagResult<&DirEntry> {
        let entry = self
            .dir
            .child(name)
            .ok_or_else(|| DagError::NotFound(name.to_string()))?;
        if entry.kind != EntryKind::File {
            return Err(DagError::WrongEntryType(name.to_string()));
        }
        Ok(entry)
    }

    fn write_file(&mut self, name: &str, data: &[u8]) -> DagResult<ContentId> {
        let id = self.dag.add(data)?;
        // A block that cannot be read back must not end up linked.
        if !self.dag.has(&id)? {
            return Err(DagError::MissingBlock(id));
        }
        self.dir.insert(name, DirEntry::file(id, data.len() as u64));
        self.flush()?;
        Ok(id)
    }
}

impl std::fmt::Debug for PropStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropStore")
            .field("entries", &self.dir.len())
            .field("root", &self.root)
            .finish()
    }
}
