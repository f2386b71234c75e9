//! The repodex catalog: fast key-value lookup of reposets.
//!
//! The catalog is one of the three stores that together describe a reposet
//! (the others being the DAG property directory and the local filesystem
//! layout). It maps structured keys — reposet, repo, and corpus-document
//! levels under one fixed root prefix — to small JSON values, and supports
//! paginated, filtered enumeration.
//!
//! # Key Types
//!
//! - [`CatalogKey`] — Segmented key under the `/index/reposet` root
//! - [`Datastore`] — Storage seam; [`MapDatastore`] is the in-memory backend
//! - [`CatalogStore`] — Locked wrapper serializing access to one datastore
//! - [`list_reposets`] — Paginated, filtered enumeration of reposet entries

pub mod error;
pub mod key;
pub mod list;
pub mod memory;
pub mod store;
pub mod traits;

pub use error::{CatalogError, CatalogResult, KeyError};
pub use key::{CatalogKey, KeyLevel, ROOT_PREFIX};
pub use list::{list_reposets, CatalogEntry, ListOptions};
pub use memory::MapDatastore;
pub use store::CatalogStore;
pub use traits::{Datastore, Query, QueryCursor};
