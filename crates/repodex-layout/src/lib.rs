//! On-disk reposet layout for the external indexer.
//!
//! The indexer process reads its configuration from a mirrored filesystem
//! tree, one directory per reposet at
//! `<root>/reposet/<kind>/<name>/<shard>/` holding the XML parameter file
//! and the `index/`, `corpus/` and `metadata/` work directories. This crate
//! composes those paths, derives shard names from creation time, renders the
//! parameter file from an [`IndexConfig`], and creates the tree with the
//! modes the indexer expects.
//!
//! Only the parameter-file write is atomic (temp file, then rename).
//! Directory creation is not transactional; a failure can leave a partial
//! tree behind.
//!
//! # Key Types
//! - [`IndexConfig`]: indexer settings and per-kind metadata schemas.
//! - [`LayoutManager`]: path composition and tree creation under one root.
//! - [`ShardPlan`]: coordinates of a repo shard about to be created.

pub mod config;
pub mod error;
pub mod layout;
pub mod params;

pub use config::{CorpusConfig, IndexConfig, IndexerConfig, KindSchema, MetadataConfig};
pub use error::{LayoutError, LayoutResult};
pub use layout::{shard_tags, LayoutManager, ShardPlan, PARAMS_FILE};
