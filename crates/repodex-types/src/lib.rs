//! Foundation types for the repodex catalog.
//!
//! This crate provides the vocabulary shared by every other repodex crate:
//! content identifiers, the store-class discriminator, and the shard tags that
//! name a repo's working directory.
//!
//! # Key Types
//!
//! - [`ContentId`] — Content-addressed identifier (BLAKE3 hash)
//! - [`StoreClass`] — The two catalog classes, `infostore` and `metastore`
//! - [`ShardTags`] — Window/area/category/offset coordinates of one repo shard

pub mod class;
pub mod content;
pub mod error;
pub mod shard;

pub use class::StoreClass;
pub use content::ContentId;
pub use error::TypeError;
pub use shard::ShardTags;
