//! In-memory datastore for testing and ephemeral catalogs.
//!
//! [`MapDatastore`] keeps all entries in a `BTreeMap` behind a `RwLock`, so
//! query cursors come back in sorted key order. It implements the full
//! [`Datastore`] trait and is the backend a [`CatalogStore`] starts with
//! before a persistent datastore is injected.
//!
//! [`CatalogStore`]: crate::store::CatalogStore

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::{CatalogError, CatalogResult};
use crate::key::CatalogKey;
use crate::traits::{Datastore, Query, QueryCursor};

/// An in-memory implementation of [`Datastore`].
///
/// All data lives in a `BTreeMap` behind a `RwLock`. Data is lost when the
/// store is dropped.
#[derive(Debug, Default)]
pub struct MapDatastore {
    entries: RwLock<BTreeMap<CatalogKey, Vec<u8>>>,
}

impl MapDatastore {
    /// Create a new empty datastore.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Datastore for MapDatastore {
    fn put(&self, key: &CatalogKey, value: Vec<u8>) -> CatalogResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| CatalogError::Backend(format!("lock poisoned: {e}")))?;
        entries.insert(key.clone(), value);
        Ok(())
    }

    fn get(&self, key: &CatalogKey) -> CatalogResult<Option<Vec<u8>>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| CatalogError::Backend(format!("lock poisoned: {e}")))?;
        Ok(entries.get(key).cloned())
    }

    fn delete(&self, key: &CatalogKey) -> CatalogResult<bool> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| CatalogError::Backend(format!("lock poisoned: {e}")))?;
        Ok(entries.remove(key).is_some())
    }

    fn has(&self, key: &CatalogKey) -> CatalogResult<bool> {
        let entries = self
            .entries
            .read()
            .map_err(|e| CatalogError::Backend(format!("lock poisoned: {e}")))?;
        Ok(entries.contains_key(key))
    }

    fn query(&self, query: &Query) -> CatalogResult<QueryCursor> {
        let entries = self
            .entries
            .read()
            .map_err(|e| CatalogError::Backend(format!("lock poisoned: {e}")))?;
        let snapshot: Vec<(CatalogKey, Vec<u8>)> = entries
            .iter()
            .filter(|(k, _)| match &query.prefix {
                Some(prefix) => k.as_str().starts_with(prefix.as_str()),
                None => true,
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(Box::new(snapshot.into_iter()))
    }
}
