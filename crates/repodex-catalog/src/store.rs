use std::sync::{Arc, Mutex, RwLock};

use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::key::CatalogKey;
use crate::memory::MapDatastore;
use crate::traits::{Datastore, Query, QueryCursor};

/// Locked wrapper over one key-value datastore.
///
/// The store serializes `put`, `get`, and `delete` behind a single store-wide
/// lock: concurrent callers block rather than interleave, which bounds
/// throughput but rules out torn reads on the KV layer. `has` and cursor
/// draining run outside that lock, as does everything after `query` has
/// obtained its snapshot.
///
/// The backing datastore is injected. A fresh store starts on an in-memory
/// [`MapDatastore`]; hosts replace it with a persistent backend via
/// [`swap_backend`] before any concurrent use begins — the swap itself is not
/// synchronized against in-flight operations.
///
/// [`swap_backend`]: CatalogStore::swap_backend
pub struct CatalogStore {
    op_lock: Mutex<()>,
    backend: RwLock<Arc<dyn Datastore>>,
}

impl CatalogStore {
    /// Create a store over the given backend.
    pub fn new(backend: Arc<dyn Datastore>) -> Self {
        Self {
            op_lock: Mutex::new(()),
            backend: RwLock::new(backend),
        }
    }

    /// Replace the backing datastore.
    ///
    /// Intended for startup only, to switch from the initial in-memory
    /// backend to the host's persistent one. Entries in the old backend are
    /// not migrated.
    pub fn swap_backend(&self, backend: Arc<dyn Datastore>) -> CatalogResult<()> {
        let mut current = self
            .backend
            .write()
            .map_err(|e| CatalogError::Backend(format!("lock poisoned: {e}")))?;
        *current = backend;
        debug!("catalog backend replaced");
        Ok(())
    }

    fn backend(&self) -> CatalogResult<Arc<dyn Datastore>> {
        let backend = self
            .backend
            .read()
            .map_err(|e| CatalogError::Backend(format!("lock poisoned: {e}")))?;
        Ok(backend.clone())
    }

    fn op_guard(&self) -> CatalogResult<std::sync::MutexGuard<'_, ()>> {
        self.op_lock
            .lock()
            .map_err(|e| CatalogError::Backend(format!("lock poisoned: {e}")))
    }

    /// Store a value under a key, replacing any previous value.
    pub fn put(&self, key: &CatalogKey, value: Vec<u8>) -> CatalogResult<()> {
        let _guard = self.op_guard()?;
        self.backend()?.put(key, value)?;
        debug!(key = %key, "catalog put");
        Ok(())
    }

    /// Read the value under a key.
    ///
    /// Fails with [`CatalogError::NotFound`] if no entry exists.
    pub fn get(&self, key: &CatalogKey) -> CatalogResult<Vec<u8>> {
        let _guard = self.op_guard()?;
        self.backend()?
            .get(key)?
            .ok_or_else(|| CatalogError::NotFound {
                key: key.as_str().to_string(),
            })
    }

    /// Check whether a key has an entry. Does not take the store lock.
    pub fn has(&self, key: &CatalogKey) -> CatalogResult<bool> {
        self.backend()?.has(key)
    }

    /// Remove the entry under a key.
    ///
    /// Fails with [`CatalogError::NotFound`] if no entry exists.
    pub fn delete(&self, key: &CatalogKey) -> CatalogResult<()> {
        let _guard = self.op_guard()?;
        if !self.backend()?.delete(key)? {
            return Err(CatalogError::NotFound {
                key: key.as_str().to_string(),
            });
        }
        debug!(key = %key, "catalog delete");
        Ok(())
    }

    /// Enumerate entries matching the query.
    ///
    /// The store lock is held only while the backend produces its snapshot
    /// cursor; draining the cursor happens lock-free.
    pub fn query(&self, query: &Query) -> CatalogResult<QueryCursor> {
        let _guard = self.op_guard()?;
        self.backend()?.query(query)
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(Arc::new(MapDatastore::new()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use repodex_types::StoreClass;

    use super::*;

    fn key(name: &str) -> CatalogKey {
        CatalogKey::reposet(StoreClass::Infostore, "blog", name)
    }

    #[test]
    fn put_then_get_and_has() {
        let store = CatalogStore::default();
        store.put(&key("a"), b"value".to_vec()).unwrap();
        assert_eq!(store.get(&key("a")).unwrap(), b"value".to_vec());
        assert!(store.has(&key("a")).unwrap());
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = CatalogStore::default();
        let err = store.get(&key("ghost")).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[test]
    fn delete_then_gone() {
        let store = CatalogStore::default();
        store.put(&key("a"), b"v".to_vec()).unwrap();
        store.delete(&key("a")).unwrap();
        assert!(!store.has(&key("a")).unwrap());
        assert!(matches!(
            store.get(&key("a")),
            Err(CatalogError::NotFound { .. })
        ));
    }

    #[test]
    fn delete_missing_is_not_found() {
        let store = CatalogStore::default();
        let err = store.delete(&key("ghost")).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[test]
    fn put_is_idempotent_per_key() {
        let store = CatalogStore::default();
        store.put(&key("a"), b"one".to_vec()).unwrap();
        store.put(&key("a"), b"two".to_vec()).unwrap();
        assert_eq!(store.get(&key("a")).unwrap(), b"two".to_vec());
    }

    #[test]
    fn query_returns_every_inserted_key() {
        let store = CatalogStore::default();
        let mut expected = BTreeSet::new();
        for i in 0..5 {
            let name = format!("set{i}");
            let value = format!("value{i}").into_bytes();
            store.put(&key(&name), value.clone()).unwrap();
            expected.insert((key(&name), value));
        }

        let seen: BTreeSet<(CatalogKey, Vec<u8>)> =
            store.query(&Query::default()).unwrap().collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn swap_backend_changes_view() {
        let store = CatalogStore::default();
        store.put(&key("old"), b"1".to_vec()).unwrap();

        let fresh = Arc::new(MapDatastore::new());
        fresh.put(&key("new"), b"2".to_vec()).unwrap();
        store.swap_backend(fresh).unwrap();

        assert!(!store.has(&key("old")).unwrap());
        assert_eq!(store.get(&key("new")).unwrap(), b"2".to_vec());
    }
}
