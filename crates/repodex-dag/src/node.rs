//! Directory nodes stored in the DAG.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use repodex_types::ContentId;

use crate::error::{DagError, DagResult};

/// What a directory entry points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    File,
    Directory,
}

/// One named link in a [`DirNode`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    /// Whether the link targets a file or a nested directory.
    pub kind: EntryKind,
    /// Identifier of the linked block.
    pub id: ContentId,
    /// Size of the linked block in bytes.
    pub size: u64,
}

impl DirEntry {
    /// A link to a file block.
    pub fn file(id: ContentId, size: u64) -> Self {
        Self {
            kind: EntryKind::File,
            id,
            size,
        }
    }

    /// A link to a nested directory block.
    pub fn directory(id: ContentId, size: u64) -> Self {
        Self {
            kind: EntryKind::Directory,
            id,
            size,
        }
    }
}

/// A directory listing persisted as a single DAG block.
///
/// Entries are kept sorted by name, so two directories with the same links
/// encode to the same bytes and therefore the same content identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirNode {
    entries: BTreeMap<String, DirEntry>,
}

impl DirNode {
    /// Create a new empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the entry linked under `name`.
    pub fn child(&self, name: &str) -> Option<&DirEntry> {
        self.entries.get(name)
    }

    /// Link `entry` under `name`, replacing any existing link.
    pub fn insert(&mut self, name: impl Into<String>, entry: DirEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Entry names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the directory has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode the directory to its block representation.
    pub fn to_bytes(&self) -> DagResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| DagError::Serialization(e.to_string()))
    }

    /// Decode a directory from its block representation.
    pub fn from_bytes(data: &[u8]) -> DagResult<Self> {
        bincode::deserialize(data).map_err(|e| DagError::Serialization(e.to_string()))
    }
}
