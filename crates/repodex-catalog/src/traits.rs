use crate::error::CatalogResult;
use crate::key::CatalogKey;

/// Filter for datastore enumeration. The default query matches every entry.
#[derive(Clone, Debug, Default)]
pub struct Query {
    /// Only yield entries whose key string starts with this prefix.
    pub prefix: Option<String>,
}

impl Query {
    /// A query scoped to keys under the given prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

/// Cursor over query results.
///
/// The cursor is a snapshot taken when the query was issued: it holds no
/// backend lock while being drained, and entries written after the query do
/// not appear. It is finite and not restartable.
pub type QueryCursor = Box<dyn Iterator<Item = (CatalogKey, Vec<u8>)> + Send>;

/// Key-value storage backend for the catalog.
///
/// All implementations must satisfy these invariants:
/// - `put` overwrites silently; the catalog layers its own semantics on top.
/// - `get` returns `Ok(None)` for a missing key, reserving `Err` for backend
///   failure.
/// - `query` observes every entry present at call time exactly once.
/// - All I/O errors are propagated, never silently ignored.
pub trait Datastore: Send + Sync {
    /// Store a value under a key, replacing any previous value.
    fn put(&self, key: &CatalogKey, value: Vec<u8>) -> CatalogResult<()>;

    /// Read the value under a key.
    ///
    /// Returns `Ok(None)` if no entry exists.
    fn get(&self, key: &CatalogKey) -> CatalogResult<Option<Vec<u8>>>;

    /// Remove the entry under a key. Returns `true` if an entry existed.
    fn delete(&self, key: &CatalogKey) -> CatalogResult<bool>;

    /// Check whether a key has an entry.
    ///
    /// Default implementation reads the value and discards it. Backends may
    /// override to avoid copying.
    fn has(&self, key: &CatalogKey) -> CatalogResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Enumerate entries matching the query.
    fn query(&self, query: &Query) -> CatalogResult<QueryCursor>;
}
