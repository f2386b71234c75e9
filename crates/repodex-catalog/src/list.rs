use tracing::debug;

use repodex_records::ReposetPointer;
use repodex_types::{ContentId, StoreClass};

use crate::error::CatalogResult;
use crate::key::KeyLevel;
use crate::store::CatalogStore;
use crate::traits::Query;

/// Filters and pagination for [`list_reposets`].
///
/// Empty `kind`/`name` strings are wildcards. Legacy catalog entries that
/// carry no kind match every kind filter.
#[derive(Clone, Debug)]
pub struct ListOptions {
    /// Match only reposets of this kind. Empty matches all.
    pub kind: String,
    /// Match only the reposet with this name. Empty matches all.
    pub name: String,
    /// Include metastore reposets.
    pub want_meta: bool,
    /// Include infostore reposets.
    pub want_data: bool,
    /// Page to start collecting matches on.
    pub page_offset: usize,
    /// Entries per page, and the maximum number of matches returned.
    pub page_size: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            kind: String::new(),
            name: String::new(),
            want_meta: true,
            want_data: true,
            page_offset: 0,
            page_size: 24,
        }
    }
}

/// One reposet as seen through the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Store class of the reposet.
    pub class: StoreClass,
    /// Reposet kind. Empty for legacy entries.
    pub kind: String,
    /// Reposet name.
    pub name: String,
    /// DAG root of the reposet's property directory, from the stored pointer.
    pub root: Option<ContentId>,
}

/// Enumerate reposet entries, filtered and paginated.
///
/// Streams the catalog snapshot in key order. Every streamed entry counts
/// toward the page counter, including repo- and document-level entries,
/// which share the namespace but are never listed. Matches are collected
/// once the page counter reaches `page_offset`, and enumeration stops as
/// soon as `page_size` matches are in hand.
///
/// A key that fails to decompose, or a value that fails to decode, aborts
/// the listing with that error.
pub fn list_reposets(store: &CatalogStore, opts: &ListOptions) -> CatalogResult<Vec<CatalogEntry>> {
    let cursor = store.query(&Query::default())?;

    let mut read_count = 0usize;
    let mut read_page = 0usize;
    let mut results = Vec::new();

    for (key, value) in cursor {
        // Entries seen, pages read. The counter resets to zero when a page
        // fills, so the entry that overflows a page lands on the next one.
        read_count += 1;
        if read_count > opts.page_size {
            read_count = 0;
            read_page += 1;
        }
        if read_page < opts.page_offset {
            continue;
        }

        match key.level()? {
            KeyLevel::Reposet => {}
            KeyLevel::Repo | KeyLevel::Doc => continue,
        }
        let (class, kind, name) = key.decompose_reposet()?;

        let class_wanted = (opts.want_meta && class == StoreClass::Metastore)
            || (opts.want_data && class == StoreClass::Infostore);
        let kind_matches = opts.kind.is_empty() || kind.is_empty() || opts.kind == kind;
        let name_matches = opts.name.is_empty() || opts.name == name;
        if !(class_wanted && kind_matches && name_matches) {
            continue;
        }

        let pointer = ReposetPointer::from_bytes(&value)?;
        results.push(CatalogEntry {
            class,
            kind,
            name,
            root: pointer.root,
        });
        if results.len() == opts.page_size {
            break;
        }
    }

    debug!(matches = results.len(), "catalog list");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use repodex_records::CorpusDocRecord;

    use crate::key::CatalogKey;

    use super::*;

    fn put_reposet(store: &CatalogStore, class: StoreClass, kind: &str, name: &str) {
        let key = CatalogKey::reposet(class, kind, name);
        let pointer = ReposetPointer::new(ContentId::from_bytes(name.as_bytes()));
        store.put(&key, pointer.to_bytes().unwrap()).unwrap();
    }

    /// Five blog/infostore reposets plus three entries that should not match
    /// a blog/infostore listing.
    fn seeded_store() -> CatalogStore {
        let store = CatalogStore::default();
        for i in 1..=5 {
            put_reposet(&store, StoreClass::Infostore, "blog", &format!("db{i}"));
        }
        put_reposet(&store, StoreClass::Infostore, "mail", "m1");
        put_reposet(&store, StoreClass::Infostore, "mail", "m2");
        put_reposet(&store, StoreClass::Metastore, "blog", "db1");
        store
    }

    fn blog_page(page_offset: usize) -> ListOptions {
        ListOptions {
            kind: "blog".to_string(),
            want_meta: false,
            want_data: true,
            page_offset,
            page_size: 2,
            ..ListOptions::default()
        }
    }

    // ---- Pagination ----

    #[test]
    fn first_page_returns_first_matches() {
        let store = seeded_store();
        let page = list_reposets(&store, &blog_page(0)).unwrap();
        let names: Vec<&str> = page.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["db1", "db2"]);
    }

    #[test]
    fn pages_do_not_overlap() {
        let store = seeded_store();
        let first = list_reposets(&store, &blog_page(0)).unwrap();
        let second = list_reposets(&store, &blog_page(1)).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
        for entry in &second {
            assert!(!first.contains(entry), "entry on both pages: {entry:?}");
        }
    }

    #[test]
    fn page_beyond_matches_is_empty() {
        let store = seeded_store();
        let page = list_reposets(&store, &blog_page(9)).unwrap();
        assert!(page.is_empty());
    }

    // ---- Filters ----

    #[test]
    fn default_options_list_everything() {
        let store = seeded_store();
        let all = list_reposets(&store, &ListOptions::default()).unwrap();
        assert_eq!(all.len(), 8);
    }

    #[test]
    fn class_filter_excludes_other_class() {
        let store = seeded_store();
        let opts = ListOptions {
            want_data: false,
            ..ListOptions::default()
        };
        let metas = list_reposets(&store, &opts).unwrap();
        assert_eq!(metas.len(), 1);
        assert_eq!(metas[0].class, StoreClass::Metastore);
    }

    #[test]
    fn name_filter_selects_one() {
        let store = seeded_store();
        let opts = ListOptions {
            name: "db3".to_string(),
            ..ListOptions::default()
        };
        let hits = list_reposets(&store, &opts).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "db3");
    }

    #[test]
    fn legacy_entry_matches_any_kind_filter() {
        let store = CatalogStore::default();
        let legacy = CatalogKey::from_raw("/index/reposet/infostore/oldset");
        let pointer = ReposetPointer::new(ContentId::from_bytes(b"oldset"));
        store.put(&legacy, pointer.to_bytes().unwrap()).unwrap();

        let opts = ListOptions {
            kind: "blog".to_string(),
            ..ListOptions::default()
        };
        let hits = list_reposets(&store, &opts).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, "");
        assert_eq!(hits[0].name, "oldset");
    }

    #[test]
    fn entry_root_comes_from_pointer() {
        let store = CatalogStore::default();
        put_reposet(&store, StoreClass::Infostore, "blog", "db1");
        let hits = list_reposets(&store, &ListOptions::default()).unwrap();
        assert_eq!(hits[0].root, Some(ContentId::from_bytes(b"db1")));
    }

    // ---- Deeper namespace levels ----

    #[test]
    fn repo_and_doc_entries_are_skipped() {
        let store = CatalogStore::default();
        put_reposet(&store, StoreClass::Infostore, "blog", "db1");

        let doc_key = CatalogKey::doc(StoreClass::Infostore, "blog", "db1", 0, 0);
        let doc = CorpusDocRecord::new(StoreClass::Infostore, "blog", 0, ContentId::from_bytes(b"d"));
        store.put(&doc_key, doc.to_bytes().unwrap()).unwrap();
        let repo_key = CatalogKey::repo(StoreClass::Infostore, "blog", "db1", 0);
        store.put(&repo_key, b"{}".to_vec()).unwrap();

        let hits = list_reposets(&store, &ListOptions::default()).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "db1");
    }

    // ---- Error propagation ----

    #[test]
    fn stray_key_aborts_listing() {
        let store = seeded_store();
        store
            .put(&CatalogKey::from_raw("/stray/key/a/b"), b"{}".to_vec())
            .unwrap();
        let err = list_reposets(&store, &ListOptions::default()).unwrap_err();
        assert!(matches!(err, crate::error::CatalogError::Key(_)));
    }

    #[test]
    fn undecodable_pointer_aborts_listing() {
        let store = CatalogStore::default();
        let key = CatalogKey::reposet(StoreClass::Infostore, "blog", "bad");
        store.put(&key, b"not json".to_vec()).unwrap();
        let err = list_reposets(&store, &ListOptions::default()).unwrap_err();
        assert!(matches!(err, crate::error::CatalogError::Record(_)));
    }
}
