//! DAG-backed persistence for reposet property records.
//!
//! A reposet's durable state lives as immutable files in a content-addressed
//! DAG store: one enveloped record per repo plus one for the reposet itself,
//! collected under a directory node whose root identifier the catalog points
//! at. Everything written here is append-only; "changing" a record means
//! writing a new file, relinking the directory, and repointing the catalog.
//!
//! # Key Types
//! - [`DagService`] / [`MemDagService`]: append-only block storage.
//! - [`Pinner`] / [`MemPinner`]: garbage-collection retention seam.
//! - [`DirNode`]: one directory level, encoded as a single block.
//! - [`PropStore`]: named property files over a directory root.

pub mod error;
pub mod memory;
pub mod node;
pub mod props;
pub mod traits;

pub use error::{DagError, DagResult};
pub use memory::{MemDagService, MemPinner};
pub use node::{DirEntry, DirNode, EntryKind};
pub use props::PropStore;
pub use traits::{DagService, Pinner};
