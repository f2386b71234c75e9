//! Property records for the repodex catalog.
//!
//! Reposets, repos, and corpus documents are described by small JSON-encoded
//! records. Records that live in the DAG are wrapped in a
//! [`PropertyEnvelope`], a tagged binary frame that survives without any
//! out-of-band type information; the catalog's KV values
//! ([`ReposetPointer`], [`CorpusDocRecord`]) are stored as bare JSON.
//!
//! # Key Types
//!
//! - [`CorpusDocRecord`] — One document's content ID within a repo
//! - [`RepoRecord`] — A repo shard: tags, parameter-file path, doc count
//! - [`ReposetRecord`] — A reposet: limits, params ID, member repo keys
//! - [`ReposetPointer`] — Catalog value pointing at a reposet's DAG root
//! - [`PropertyRecord`] — Closed union of the DAG-stored record kinds
//! - [`PropertyEnvelope`] — Tagged, length-delimited binary wrapper

pub mod envelope;
pub mod error;
pub mod records;

pub use envelope::{PropertyEnvelope, PropertyRecord, RecordKind};
pub use error::{RecordError, RecordResult};
pub use records::{CorpusDocRecord, RepoRecord, ReposetPointer, ReposetRecord};
