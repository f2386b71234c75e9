use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use tracing::{debug, warn};

use repodex_catalog::{list_reposets, CatalogEntry, CatalogKey, CatalogStore, ListOptions};
use repodex_dag::{DagService, MemDagService, MemPinner, Pinner, PropStore};
use repodex_layout::{shard_tags, IndexConfig, LayoutManager, PARAMS_FILE};
use repodex_records::{
    CorpusDocRecord, PropertyRecord, RecordKind, RepoRecord, ReposetPointer, ReposetRecord,
};
use repodex_types::{ContentId, StoreClass};

use crate::create::{CreatedRepo, CreatedReposet, ReposetLimits};
use crate::error::{ApiError, ApiResult};

/// Directory entry holding the reposet record.
const REPOSET_PROPS: &str = "reposetprops";

/// Prefix of the directory entries holding repo records, one per shard.
const REPO_PROPS_PREFIX: &str = "repoprops-";

fn repo_props_name(index: i64) -> String {
    format!("{REPO_PROPS_PREFIX}{index}")
}

/// High-level entry point for the reposet catalog.
///
/// Ties the three stores together: the KV catalog for fast lookup, the DAG
/// for durable property records, and the local filesystem mirror consumed
/// by the external indexer. Creation walks them in a fixed order (local
/// directories, DAG records, catalog entry) and never rolls back, so a
/// failure partway leaves whatever was already written; [`reposet_exists`]
/// consults both ends of that sequence.
///
/// Mutations of one reposet must be serialized by the caller. Nothing here
/// locks across the three stores, and two concurrent shard additions can
/// lose one of the pointer updates.
///
/// [`reposet_exists`]: Repodex::reposet_exists
pub struct Repodex {
    catalog: Arc<CatalogStore>,
    dag: Arc<dyn DagService>,
    pinner: Arc<dyn Pinner>,
    layout: LayoutManager,
}

impl Repodex {
    /// Build the API over injected collaborators.
    pub fn new(
        catalog: Arc<CatalogStore>,
        dag: Arc<dyn DagService>,
        pinner: Arc<dyn Pinner>,
        layout: LayoutManager,
    ) -> Self {
        Self {
            catalog,
            dag,
            pinner,
            layout,
        }
    }

    /// Build the API over in-memory catalog, DAG and pin services.
    ///
    /// The filesystem mirror still writes under `index_root`. Intended for
    /// tests and embedding hosts that persist elsewhere.
    pub fn in_memory(index_root: impl Into<PathBuf>, config: IndexConfig) -> Self {
        Self {
            catalog: Arc::new(CatalogStore::default()),
            dag: Arc::new(MemDagService::new()),
            pinner: Arc::new(MemPinner::new()),
            layout: LayoutManager::new(index_root, config),
        }
    }

    // ---- Reposet operations ----

    /// Create a reposet with its first repo shard, named from the clock.
    pub fn create_reposet(
        &self,
        class: StoreClass,
        kind: &str,
        limits: &ReposetLimits,
    ) -> ApiResult<CreatedReposet> {
        self.create_reposet_at(class, kind, limits, SystemTime::now())
    }

    /// Create a reposet whose first shard is named from `now`.
    ///
    /// The reposet takes the shard's directory name as its own name. The
    /// parameter file and work directories are written first, then the
    /// property records go into the DAG and the root is pinned, and last
    /// the catalog entry is stored.
    pub fn create_reposet_at(
        &self,
        class: StoreClass,
        kind: &str,
        limits: &ReposetLimits,
        now: SystemTime,
    ) -> ApiResult<CreatedReposet> {
        let shard = shard_tags(now);
        let name = shard.dir_name();

        if self.reposet_exists(class, kind, &name)? {
            return Err(ApiError::AlreadyExists {
                kind: kind.to_string(),
                name,
            });
        }

        let reposet_root = self.layout.reposet_path(kind, &name)?;
        let plan = self.layout.plan_shard(&reposet_root, now);
        self.layout.write_param_file(&plan.param_file, kind)?;
        let shard_dir = self.layout.make_repo_subdirs(&plan.param_file)?;
        let param_bytes = fs::read(&plan.param_file)?;

        let mut props = PropStore::new(Arc::clone(&self.dag));
        let params_id = props.add_file(PARAMS_FILE, &param_bytes)?;

        let repo_key = CatalogKey::repo(class, kind, &name, 0);
        let repo = RepoRecord {
            class,
            kind: kind.to_string(),
            name: name.clone(),
            offset: 0,
            area: plan.shard.area,
            cat: plan.shard.cat,
            path: plan.param_file.display().to_string(),
            docs: 0,
        };
        props.add_props(&repo_props_name(0), &PropertyRecord::Repo(repo.clone()))?;

        let reposet = ReposetRecord {
            class,
            kind: kind.to_string(),
            name: name.clone(),
            created_at: plan.created_at,
            max_areas: limits.max_areas,
            max_cats: limits.max_cats,
            max_docs: limits.max_docs,
            params: Some(params_id),
            repo_keys: vec![repo_key.to_string()],
        };
        props.add_props(REPOSET_PROPS, &PropertyRecord::Reposet(reposet))?;

        let root = props.flush()?;
        self.pinner.pin(&root, true)?;
        self.pinner.flush()?;

        let reposet_key = CatalogKey::reposet(class, kind, &name);
        self.catalog
            .put(&reposet_key, ReposetPointer::new(root).to_bytes()?)?;
        self.catalog.put(&repo_key, repo.to_bytes()?)?;

        debug!(key = %reposet_key, root = %root, "reposet created");
        Ok(CreatedReposet {
            name,
            shard: plan.shard,
            root,
            params: params_id,
            path: shard_dir,
        })
    }

    /// Add a repo shard to an existing reposet, named from the clock.
    pub fn create_repo(
        &self,
        class: StoreClass,
        kind: &str,
        name: &str,
    ) -> ApiResult<CreatedRepo> {
        self.create_repo_at(class, kind, name, SystemTime::now())
    }

    /// Add a repo shard named from `now` to an existing reposet.
    ///
    /// Writes a new shard directory, appends a repo record to the property
    /// directory, and rewrites the reposet record with the new member key.
    /// The old records stay in the DAG; only the catalog pointer moves.
    pub fn create_repo_at(
        &self,
        class: StoreClass,
        kind: &str,
        name: &str,
        now: SystemTime,
    ) -> ApiResult<CreatedRepo> {
        if !self.reposet_exists(class, kind, name)? {
            return Err(ApiError::MissingReposet {
                kind: kind.to_string(),
                name: name.to_string(),
            });
        }

        let reposet_key = CatalogKey::reposet(class, kind, name);
        let pointer = ReposetPointer::from_bytes(&self.catalog.get(&reposet_key)?)?;
        let root = pointer.root.ok_or_else(|| ApiError::MissingReposet {
            kind: kind.to_string(),
            name: name.to_string(),
        })?;

        let mut props = PropStore::load(Arc::clone(&self.dag), root)?;
        let mut reposet = props
            .get_props(REPOSET_PROPS, RecordKind::Reposet)?
            .into_reposet()?;

        let reposet_root = self.layout.reposet_path(kind, name)?;
        let plan = self.layout.plan_shard(&reposet_root, now);
        self.layout.write_param_file(&plan.param_file, kind)?;
        let shard_dir = self.layout.make_repo_subdirs(&plan.param_file)?;

        let repo_index = reposet.repo_keys.len() as i64;
        let repo_key = CatalogKey::repo(class, kind, name, repo_index);
        let repo = RepoRecord {
            class,
            kind: kind.to_string(),
            name: name.to_string(),
            offset: plan.created_at.saturating_sub(reposet.created_at) as i64,
            area: plan.shard.area,
            cat: plan.shard.cat,
            path: plan.param_file.display().to_string(),
            docs: 0,
        };
        props.add_props(&repo_props_name(repo_index), &PropertyRecord::Repo(repo.clone()))?;

        reposet.repo_keys.push(repo_key.to_string());
        props.add_props(REPOSET_PROPS, &PropertyRecord::Reposet(reposet))?;

        let new_root = props.flush()?;
        self.pinner.pin(&new_root, true)?;
        self.pinner.flush()?;

        self.catalog
            .put(&reposet_key, ReposetPointer::new(new_root).to_bytes()?)?;
        self.catalog.put(&repo_key, repo.to_bytes()?)?;

        debug!(key = %repo_key, root = %new_root, "repo shard added");
        Ok(CreatedRepo {
            repo_index,
            shard: plan.shard,
            root: new_root,
            path: shard_dir,
        })
    }

    /// Whether a reposet exists in the catalog or on disk.
    ///
    /// The two stores can disagree after a crash mid-create; either one
    /// claiming the name is enough to refuse reuse. A disagreement is
    /// logged.
    pub fn reposet_exists(&self, class: StoreClass, kind: &str, name: &str) -> ApiResult<bool> {
        let in_catalog = self.catalog.has(&CatalogKey::reposet(class, kind, name))?;
        let on_disk = self.layout.reposet_dir_exists(kind, name)?;
        if in_catalog != on_disk {
            warn!(
                kind,
                name, in_catalog, on_disk, "catalog and filesystem disagree about reposet"
            );
        }
        Ok(in_catalog || on_disk)
    }

    // ---- Document operations ----

    /// Track a corpus document under its repo shard.
    ///
    /// The advisory doc count on the shard's catalog record is bumped
    /// best-effort; a failure there is logged and does not fail the add.
    pub fn add_document(
        &self,
        class: StoreClass,
        kind: &str,
        name: &str,
        repo_index: i64,
        doc_index: i64,
        doc: ContentId,
    ) -> ApiResult<CatalogKey> {
        let key = CatalogKey::doc(class, kind, name, repo_index, doc_index);
        let record = CorpusDocRecord::new(class, kind, repo_index, doc);
        self.catalog.put(&key, record.to_bytes()?)?;
        self.adjust_doc_count(class, kind, name, repo_index, 1);
        debug!(key = %key, "corpus document added");
        Ok(key)
    }

    /// Read back a tracked corpus document.
    pub fn get_document(
        &self,
        class: StoreClass,
        kind: &str,
        name: &str,
        repo_index: i64,
        doc_index: i64,
    ) -> ApiResult<CorpusDocRecord> {
        let key = CatalogKey::doc(class, kind, name, repo_index, doc_index);
        Ok(CorpusDocRecord::from_bytes(&self.catalog.get(&key)?)?)
    }

    /// Stop tracking a corpus document.
    ///
    /// Deleting an untracked document fails with the catalog's `NotFound`.
    /// The advisory doc count is decremented best-effort.
    pub fn remove_document(
        &self,
        class: StoreClass,
        kind: &str,
        name: &str,
        repo_index: i64,
        doc_index: i64,
    ) -> ApiResult<()> {
        let key = CatalogKey::doc(class, kind, name, repo_index, doc_index);
        self.catalog.delete(&key)?;
        self.adjust_doc_count(class, kind, name, repo_index, -1);
        debug!(key = %key, "corpus document removed");
        Ok(())
    }

    // ---- Queries ----

    /// Enumerate reposets through the catalog.
    pub fn list(&self, opts: &ListOptions) -> ApiResult<Vec<CatalogEntry>> {
        Ok(list_reposets(&self.catalog, opts)?)
    }

    /// Dereference a reposet's catalog pointer into its full record.
    pub fn reposet_record(
        &self,
        class: StoreClass,
        kind: &str,
        name: &str,
    ) -> ApiResult<ReposetRecord> {
        let key = CatalogKey::reposet(class, kind, name);
        let pointer = ReposetPointer::from_bytes(&self.catalog.get(&key)?)?;
        let root = pointer.root.ok_or_else(|| ApiError::MissingReposet {
            kind: kind.to_string(),
            name: name.to_string(),
        })?;
        let props = PropStore::load(Arc::clone(&self.dag), root)?;
        Ok(props
            .get_props(REPOSET_PROPS, RecordKind::Reposet)?
            .into_reposet()?)
    }

    /// Read the catalog's copy of a repo shard record.
    pub fn repo_record(
        &self,
        class: StoreClass,
        kind: &str,
        name: &str,
        repo_index: i64,
    ) -> ApiResult<RepoRecord> {
        let key = CatalogKey::repo(class, kind, name, repo_index);
        Ok(RepoRecord::from_bytes(&self.catalog.get(&key)?)?)
    }

    /// Render an empty document skeleton for `kind`.
    pub fn doc_template(&self, kind: &str) -> ApiResult<String> {
        Ok(self.layout.doc_template(kind)?)
    }

    // ---- Accessors ----

    /// The catalog store in use.
    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// The layout manager in use.
    pub fn layout(&self) -> &LayoutManager {
        &self.layout
    }

    fn adjust_doc_count(
        &self,
        class: StoreClass,
        kind: &str,
        name: &str,
        repo_index: i64,
        delta: i64,
    ) {
        if let Err(e) = self.try_adjust_doc_count(class, kind, name, repo_index, delta) {
            warn!(kind, name, repo_index, error = %e, "advisory doc count not updated");
        }
    }

    fn try_adjust_doc_count(
        &self,
        class: StoreClass,
        kind: &str,
        name: &str,
        repo_index: i64,
        delta: i64,
    ) -> ApiResult<()> {
        let key = CatalogKey::repo(class, kind, name, repo_index);
        let mut record = RepoRecord::from_bytes(&self.catalog.get(&key)?)?;
        record.docs = if delta < 0 {
            record.docs.saturating_sub(delta.unsigned_abs())
        } else {
            record.docs.saturating_add(delta as u64)
        };
        self.catalog.put(&key, record.to_bytes()?)?;
        Ok(())
    }
}

impl std::fmt::Debug for Repodex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repodex")
            .field("index_root", &self.layout.index_root())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Duration;

    use repodex_catalog::CatalogError;
    use repodex_layout::{CorpusConfig, IndexerConfig, KindSchema, MetadataConfig};
    use tempfile::tempdir;

    use super::*;

    fn sample_config() -> IndexConfig {
        IndexConfig {
            indexer: IndexerConfig {
                path: "index".to_string(),
                corpus: Some(CorpusConfig {
                    path: "corpus".to_string(),
                    class: "dms3".to_string(),
                    metadata: "metadata".to_string(),
                }),
                memory: None,
                stemmer: None,
                normalize: true,
                stopper: vec![],
            },
            metadata: MetadataConfig {
                kinds: vec![KindSchema {
                    name: "blog".to_string(),
                    fields: vec!["author".to_string(), "headline".to_string()],
                }],
            },
        }
    }

    fn harness(root: &Path) -> (Repodex, Arc<MemDagService>, Arc<MemPinner>) {
        let dag = Arc::new(MemDagService::new());
        let pinner = Arc::new(MemPinner::new());
        let api = Repodex::new(
            Arc::new(CatalogStore::default()),
            Arc::clone(&dag) as Arc<dyn DagService>,
            Arc::clone(&pinner) as Arc<dyn Pinner>,
            LayoutManager::new(root, sample_config()),
        );
        (api, dag, pinner)
    }

    fn epoch_plus(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn blog_at(api: &Repodex, secs: u64) -> CreatedReposet {
        api.create_reposet_at(
            StoreClass::Infostore,
            "blog",
            &ReposetLimits::default(),
            epoch_plus(secs),
        )
        .unwrap()
    }

    // ---- Reposet creation ----

    #[test]
    fn reposet_takes_the_first_shard_name() {
        let tmp = tempdir().unwrap();
        let (api, _, _) = harness(tmp.path());

        let created = blog_at(&api, 100);
        assert_eq!(created.name, "w100-a1-c1-o0");
        assert_eq!(created.shard.dir_name(), created.name);
        assert_eq!(
            created.path,
            tmp.path()
                .join("reposet/blog/w100-a1-c1-o0/w100-a1-c1-o0")
        );
    }

    #[test]
    fn create_populates_all_three_stores() {
        let tmp = tempdir().unwrap();
        let (api, dag, _) = harness(tmp.path());

        let created = blog_at(&api, 100);

        // Catalog.
        let key = CatalogKey::reposet(StoreClass::Infostore, "blog", &created.name);
        assert!(api.catalog().has(&key).unwrap());

        // DAG property directory.
        let props = PropStore::load(Arc::clone(&dag) as Arc<dyn DagService>, created.root).unwrap();
        let names: Vec<&str> = props.dir().names().collect();
        assert_eq!(names, vec!["params", "repoprops-0", "reposetprops"]);

        // Local filesystem.
        assert!(created.path.join("params").is_file());
        for sub in ["index", "corpus", "metadata"] {
            assert!(created.path.join(sub).is_dir());
        }
    }

    #[test]
    fn create_archives_the_param_file() {
        let tmp = tempdir().unwrap();
        let (api, dag, _) = harness(tmp.path());

        let created = blog_at(&api, 100);

        let props = PropStore::load(Arc::clone(&dag) as Arc<dyn DagService>, created.root).unwrap();
        let archived = props.read_file("params").unwrap();
        let on_disk = fs::read(created.path.join("params")).unwrap();
        assert_eq!(archived, on_disk);
        assert_eq!(props.has_props("params").unwrap(), created.params);
    }

    #[test]
    fn create_pins_the_root_recursively() {
        let tmp = tempdir().unwrap();
        let (api, _, pinner) = harness(tmp.path());

        let created = blog_at(&api, 100);

        assert!(pinner.pins().unwrap().contains(&(created.root, true)));
        assert!(pinner.flush_count() >= 1);
    }

    #[test]
    fn duplicate_reposet_is_rejected() {
        let tmp = tempdir().unwrap();
        let (api, _, _) = harness(tmp.path());

        blog_at(&api, 100);
        let err = api
            .create_reposet_at(
                StoreClass::Infostore,
                "blog",
                &ReposetLimits::default(),
                epoch_plus(100),
            )
            .unwrap_err();
        assert!(matches!(err, ApiError::AlreadyExists { .. }));
    }

    #[test]
    fn unconfigured_kind_creates_nothing() {
        let tmp = tempdir().unwrap();
        let (api, _, _) = harness(tmp.path());

        let err = api
            .create_reposet_at(
                StoreClass::Infostore,
                "wiki",
                &ReposetLimits::default(),
                epoch_plus(100),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            ApiError::Layout(repodex_layout::LayoutError::KindNotConfigured(_))
        ));
        assert!(api.list(&ListOptions::default()).unwrap().is_empty());
        assert!(!tmp.path().join("reposet/wiki").exists());
    }

    #[test]
    fn reposet_record_reflects_limits() {
        let tmp = tempdir().unwrap();
        let (api, _, _) = harness(tmp.path());

        let limits = ReposetLimits {
            max_docs: 1_000,
            ..ReposetLimits::default()
        };
        let created = api
            .create_reposet_at(StoreClass::Infostore, "blog", &limits, epoch_plus(100))
            .unwrap();

        let record = api
            .reposet_record(StoreClass::Infostore, "blog", &created.name)
            .unwrap();
        assert_eq!(record.created_at, 100);
        assert_eq!(record.max_docs, 1_000);
        assert_eq!(record.max_areas, 64);
        assert_eq!(record.params, Some(created.params));
        assert_eq!(record.repo_keys.len(), 1);
    }

    // ---- Shard addition ----

    #[test]
    fn create_repo_appends_a_shard() {
        let tmp = tempdir().unwrap();
        let (api, _, _) = harness(tmp.path());

        let created = blog_at(&api, 100);
        let added = api
            .create_repo_at(StoreClass::Infostore, "blog", &created.name, epoch_plus(250))
            .unwrap();

        assert_eq!(added.repo_index, 1);
        assert_eq!(added.shard.dir_name(), "w250-a1-c1-o0");
        assert!(added.path.join("corpus").is_dir());

        let record = api
            .reposet_record(StoreClass::Infostore, "blog", &created.name)
            .unwrap();
        assert_eq!(record.repo_keys.len(), 2);
        assert!(record.repo_keys[1].ends_with("/1"));

        let repo = api
            .repo_record(StoreClass::Infostore, "blog", &created.name, 1)
            .unwrap();
        assert_eq!(repo.offset, 150);
    }

    #[test]
    fn create_repo_repoints_the_catalog() {
        let tmp = tempdir().unwrap();
        let (api, dag, pinner) = harness(tmp.path());

        let created = blog_at(&api, 100);
        let added = api
            .create_repo_at(StoreClass::Infostore, "blog", &created.name, epoch_plus(250))
            .unwrap();
        assert_ne!(added.root, created.root);

        let key = CatalogKey::reposet(StoreClass::Infostore, "blog", &created.name);
        let pointer = ReposetPointer::from_bytes(&api.catalog().get(&key).unwrap()).unwrap();
        assert_eq!(pointer.root, Some(added.root));
        assert!(pinner.is_pinned(&added.root).unwrap());

        // The superseded directory stays resolvable in the DAG.
        let old = PropStore::load(Arc::clone(&dag) as Arc<dyn DagService>, created.root).unwrap();
        assert_eq!(old.dir().len(), 3);
    }

    #[test]
    fn create_repo_without_reposet_fails() {
        let tmp = tempdir().unwrap();
        let (api, _, _) = harness(tmp.path());

        let err = api
            .create_repo_at(
                StoreClass::Infostore,
                "blog",
                "w999-a1-c1-o0",
                epoch_plus(250),
            )
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingReposet { .. }));
    }

    // ---- Documents ----

    #[test]
    fn add_then_get_document() {
        let tmp = tempdir().unwrap();
        let (api, _, _) = harness(tmp.path());
        let created = blog_at(&api, 100);

        let doc = ContentId::from_bytes(b"post-1");
        api.add_document(StoreClass::Infostore, "blog", &created.name, 0, 0, doc)
            .unwrap();

        let record = api
            .get_document(StoreClass::Infostore, "blog", &created.name, 0, 0)
            .unwrap();
        assert_eq!(
            record,
            CorpusDocRecord::new(StoreClass::Infostore, "blog", 0, doc)
        );
    }

    #[test]
    fn add_document_bumps_the_advisory_count() {
        let tmp = tempdir().unwrap();
        let (api, _, _) = harness(tmp.path());
        let created = blog_at(&api, 100);

        for i in 0..2 {
            api.add_document(
                StoreClass::Infostore,
                "blog",
                &created.name,
                0,
                i,
                ContentId::from_bytes(&i.to_le_bytes()),
            )
            .unwrap();
        }

        let repo = api
            .repo_record(StoreClass::Infostore, "blog", &created.name, 0)
            .unwrap();
        assert_eq!(repo.docs, 2);
    }

    #[test]
    fn remove_document_decrements_the_count() {
        let tmp = tempdir().unwrap();
        let (api, _, _) = harness(tmp.path());
        let created = blog_at(&api, 100);

        api.add_document(
            StoreClass::Infostore,
            "blog",
            &created.name,
            0,
            0,
            ContentId::from_bytes(b"d"),
        )
        .unwrap();
        api.remove_document(StoreClass::Infostore, "blog", &created.name, 0, 0)
            .unwrap();

        let repo = api
            .repo_record(StoreClass::Infostore, "blog", &created.name, 0)
            .unwrap();
        assert_eq!(repo.docs, 0);
        assert!(matches!(
            api.get_document(StoreClass::Infostore, "blog", &created.name, 0, 0),
            Err(ApiError::Catalog(CatalogError::NotFound { .. }))
        ));
    }

    #[test]
    fn remove_missing_document_is_not_found() {
        let tmp = tempdir().unwrap();
        let (api, _, _) = harness(tmp.path());
        let created = blog_at(&api, 100);

        let err = api
            .remove_document(StoreClass::Infostore, "blog", &created.name, 0, 9)
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Catalog(CatalogError::NotFound { .. })
        ));
    }

    #[test]
    fn add_document_succeeds_without_a_repo_record() {
        let tmp = tempdir().unwrap();
        let (api, _, _) = harness(tmp.path());
        let created = blog_at(&api, 100);

        // Shard 7 was never created; the count bump has nothing to update
        // but the document itself is tracked.
        api.add_document(
            StoreClass::Infostore,
            "blog",
            &created.name,
            7,
            0,
            ContentId::from_bytes(b"stray"),
        )
        .unwrap();
        let record = api
            .get_document(StoreClass::Infostore, "blog", &created.name, 7, 0)
            .unwrap();
        assert_eq!(record.repo_index, 7);
    }

    // ---- Queries ----

    #[test]
    fn list_sees_created_reposets() {
        let tmp = tempdir().unwrap();
        let (api, _, _) = harness(tmp.path());

        let first = blog_at(&api, 100);
        let second = blog_at(&api, 200);

        let opts = ListOptions {
            kind: "blog".to_string(),
            ..ListOptions::default()
        };
        let entries = api.list(&opts).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec![first.name.as_str(), second.name.as_str()]);
        assert_eq!(entries[0].root, Some(first.root));
    }

    #[test]
    fn reposet_exists_consults_both_stores() {
        let tmp = tempdir().unwrap();
        let (api, _, _) = harness(tmp.path());
        let created = blog_at(&api, 100);

        assert!(api
            .reposet_exists(StoreClass::Infostore, "blog", &created.name)
            .unwrap());
        assert!(!api
            .reposet_exists(StoreClass::Infostore, "blog", "w999-a1-c1-o0")
            .unwrap());

        // Drop the catalog side; the directory alone still claims the name.
        let key = CatalogKey::reposet(StoreClass::Infostore, "blog", &created.name);
        api.catalog().delete(&key).unwrap();
        assert!(api
            .reposet_exists(StoreClass::Infostore, "blog", &created.name)
            .unwrap());
    }

    #[test]
    fn doc_template_comes_from_configuration() {
        let tmp = tempdir().unwrap();
        let (api, _, _) = harness(tmp.path());
        let text = api.doc_template("blog").unwrap();
        assert!(text.starts_with("<blog>"));
        assert!(text.contains("<author/>"));
    }

    // ---- In-memory constructor ----

    #[test]
    fn in_memory_runs_the_full_flow() {
        let tmp = tempdir().unwrap();
        let api = Repodex::in_memory(tmp.path(), sample_config());

        let created = api
            .create_reposet(StoreClass::Infostore, "blog", &ReposetLimits::default())
            .unwrap();
        assert!(created.name.starts_with('w'));

        let doc = ContentId::from_bytes(b"post");
        api.add_document(StoreClass::Infostore, "blog", &created.name, 0, 0, doc)
            .unwrap();
        let record = api
            .get_document(StoreClass::Infostore, "blog", &created.name, 0, 0)
            .unwrap();
        assert_eq!(record.doc, Some(doc));
        api.remove_document(StoreClass::Infostore, "blog", &created.name, 0, 0)
            .unwrap();
    }
}
