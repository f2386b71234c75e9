use serde::{Deserialize, Serialize};

use repodex_types::{ContentId, StoreClass};

use crate::error::{RecordError, RecordResult};

// ---------------------------------------------------------------------------
// CorpusDocRecord
// ---------------------------------------------------------------------------

/// Tracks one corpus document inside a repo shard.
///
/// Stored as a bare JSON catalog value under the document's catalog key. The
/// `doc` ID addresses the document's content in the DAG; `None` means the
/// slot is reserved but no content has been attached yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusDocRecord {
    /// Catalog class of the owning reposet.
    pub class: StoreClass,
    /// Reposet kind of the owning reposet.
    pub kind: String,
    /// Index of the repo shard holding this document.
    pub repo_index: i64,
    /// Content ID of the document, when attached.
    pub doc: Option<ContentId>,
}

impl CorpusDocRecord {
    /// Create a record for a document with attached content.
    pub fn new(class: StoreClass, kind: impl Into<String>, repo_index: i64, doc: ContentId) -> Self {
        Self {
            class,
            kind: kind.into(),
            repo_index,
            doc: Some(doc),
        }
    }

    /// Serialize to the catalog value encoding.
    pub fn to_bytes(&self) -> RecordResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| RecordError::Encode(e.to_string()))
    }

    /// Decode from the catalog value encoding.
    pub fn from_bytes(data: &[u8]) -> RecordResult<Self> {
        serde_json::from_slice(data).map_err(|e| RecordError::Decode(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// RepoRecord
// ---------------------------------------------------------------------------

/// Describes one repo shard of a reposet.
///
/// A single flat schema serves both the DAG property file and any KV-side
/// copies: shard tags, the local parameter-file path, and an advisory count
/// of documents added so far. `docs` is maintained best-effort and may lag
/// under concurrent writers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRecord {
    /// Catalog class of the owning reposet.
    pub class: StoreClass,
    /// Reposet kind.
    pub kind: String,
    /// Reposet name.
    pub name: String,
    /// Seconds since the reposet's creation when this shard was cut.
    pub offset: i64,
    /// Zero-based area slot.
    pub area: u8,
    /// Zero-based category slot.
    pub cat: u8,
    /// Local filesystem path of the shard's parameter file.
    pub path: String,
    /// Advisory count of documents in this shard.
    pub docs: u64,
}

impl RepoRecord {
    /// Serialize to the record payload encoding.
    pub fn to_bytes(&self) -> RecordResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| RecordError::Encode(e.to_string()))
    }

    /// Decode from the record payload encoding.
    pub fn from_bytes(data: &[u8]) -> RecordResult<Self> {
        serde_json::from_slice(data).map_err(|e| RecordError::Decode(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// ReposetRecord
// ---------------------------------------------------------------------------

/// Describes a reposet: its identity, limits, and member repos.
///
/// `params` addresses the immutable copy of the reposet's parameter file in
/// the DAG. `repo_keys` lists the catalog keys of the member repo shards in
/// creation order; the record is rewritten (never mutated in place) when a
/// shard is added.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReposetRecord {
    /// Catalog class.
    pub class: StoreClass,
    /// Reposet kind.
    pub kind: String,
    /// Reposet name.
    pub name: String,
    /// Creation time, whole seconds since UNIX epoch.
    pub created_at: u64,
    /// Maximum number of area slots.
    pub max_areas: u8,
    /// Maximum number of category slots.
    pub max_cats: u8,
    /// Maximum number of documents per shard.
    pub max_docs: u64,
    /// Content ID of the archived parameter file, once written.
    pub params: Option<ContentId>,
    /// Catalog keys of the member repo shards, in creation order.
    pub repo_keys: Vec<String>,
}

impl ReposetRecord {
    /// Serialize to the record payload encoding.
    pub fn to_bytes(&self) -> RecordResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| RecordError::Encode(e.to_string()))
    }

    /// Decode from the record payload encoding.
    pub fn from_bytes(data: &[u8]) -> RecordResult<Self> {
        serde_json::from_slice(data).map_err(|e| RecordError::Decode(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// ReposetPointer
// ---------------------------------------------------------------------------

/// The catalog value stored under a reposet key.
///
/// Points at the root of the reposet's property directory in the DAG. The
/// pointer is the only mutable piece of reposet state in the catalog: every
/// change to the property directory produces a new root, and the pointer is
/// repointed at it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReposetPointer {
    /// DAG root of the reposet's property directory.
    pub root: Option<ContentId>,
}

impl ReposetPointer {
    /// Create a pointer to the given directory root.
    pub fn new(root: ContentId) -> Self {
        Self { root: Some(root) }
    }

    /// Serialize to the catalog value encoding.
    pub fn to_bytes(&self) -> RecordResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| RecordError::Encode(e.to_string()))
    }

    /// Decode from the catalog value encoding.
    pub fn from_bytes(data: &[u8]) -> RecordResult<Self> {
        serde_json::from_slice(data).map_err(|e| RecordError::Decode(e.to_string()))
    }
}
