//! High-level API for the repodex catalog.
//!
//! Provides a unified entry point over the three reposet stores: the KV
//! catalog, the content-addressed DAG, and the local filesystem layout.
//! This is the crate a command layer or embedding host depends on.

pub mod create;
pub mod error;
pub mod repodex;

pub use create::{CreatedRepo, CreatedReposet, ReposetLimits};
pub use error::{ApiError, ApiResult};
pub use repodex::Repodex;

// Re-export key types
pub use repodex_catalog::{CatalogEntry, CatalogKey, CatalogStore, ListOptions, MapDatastore};
pub use repodex_dag::{DagService, MemDagService, MemPinner, Pinner};
pub use repodex_layout::{IndexConfig, LayoutManager};
pub use repodex_records::{CorpusDocRecord, RepoRecord, ReposetRecord};
pub use repodex_types::{ContentId, ShardTags, StoreClass};
