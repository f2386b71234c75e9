//! Path composition and directory creation under the index root.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tempfile::NamedTempFile;
use tracing::debug;

use repodex_types::ShardTags;

use crate::config::IndexConfig;
use crate::error::{LayoutError, LayoutResult};
use crate::params;

/// Name of the parameter file inside a shard directory.
pub const PARAMS_FILE: &str = "params";

/// Work directories the indexer expects inside every shard.
const REPO_SUBDIRS: [&str; 3] = ["index", "corpus", "metadata"];

/// Shard tags for a repo created at `now`.
///
/// Area, category and offset stay at their single-shard values; only the
/// window varies. Repos created within the same second therefore collide,
/// and callers that need distinct shards must space their creations.
pub fn shard_tags(now: SystemTime) -> ShardTags {
    let window = now
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    ShardTags::new(window, 0, 0, 0)
}

/// Filesystem coordinates of a repo shard about to be created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShardPlan {
    /// Where the parameter file goes.
    pub param_file: PathBuf,
    /// Shard tags derived from the creation time.
    pub shard: ShardTags,
    /// Creation time, whole seconds since the Unix epoch.
    pub created_at: u64,
}

/// Composes and creates the reposet tree under one index root.
///
/// Layout: `<root>/reposet/<kind>/<name>/<shard>/{params, index/, corpus/,
/// metadata/}`. The manager owns only the on-disk mirror; catalog entries
/// and DAG records are managed elsewhere, and nothing here keeps the three
/// in step after a crash.
#[derive(Clone, Debug)]
pub struct LayoutManager {
    index_root: PathBuf,
    config: IndexConfig,
}

impl LayoutManager {
    /// Create a manager over `index_root` with the given configuration.
    pub fn new(index_root: impl Into<PathBuf>, config: IndexConfig) -> Self {
        Self {
            index_root: index_root.into(),
            config,
        }
    }

    /// The configured index root.
    pub fn index_root(&self) -> &Path {
        &self.index_root
    }

    /// The index configuration in use.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// `<root>/reposet/<kind>/<name>`.
    pub fn reposet_path(&self, kind: &str, name: &str) -> LayoutResult<PathBuf> {
        if kind.is_empty() {
            return Err(LayoutError::EmptyKind);
        }
        if name.is_empty() {
            return Err(LayoutError::EmptyName);
        }
        Ok(self.index_root.join("reposet").join(kind).join(name))
    }

    /// Whether the reposet directory exists on disk.
    ///
    /// Checks the local filesystem only; the catalog may disagree after a
    /// crash.
    pub fn reposet_dir_exists(&self, kind: &str, name: &str) -> LayoutResult<bool> {
        Ok(self.reposet_path(kind, name)?.try_exists()?)
    }

    /// Plan a new shard under `reposet_root` from the clock reading `now`.
    pub fn plan_shard(&self, reposet_root: &Path, now: SystemTime) -> ShardPlan {
        let shard = shard_tags(now);
        ShardPlan {
            param_file: reposet_root.join(shard.dir_name()).join(PARAMS_FILE),
            created_at: shard.window,
            shard,
        }
    }

    /// Write the parameter file for `kind` at `filename`.
    ///
    /// Renders and validates first, creates parent directories (mode 0775),
    /// then writes through a temporary file in the target directory and
    /// renames it into place (mode 0660). A failure at any point leaves no
    /// file at `filename`.
    pub fn write_param_file(&self, filename: &Path, kind: &str) -> LayoutResult<()> {
        let xml = params::render_params(&self.config, kind)?;

        let parent = filename.parent().ok_or_else(|| no_parent(filename))?;
        make_dirs(parent, 0o775, true)?;

        let mut tmp = NamedTempFile::new_in(parent)?;
        io::Write::write_all(&mut tmp, &xml)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(0o660))?;
        }
        tmp.persist(filename).map_err(|e| LayoutError::Io(e.error))?;

        debug!(file = %filename.display(), kind, "parameter file written");
        Ok(())
    }

    /// Create the shard work directories next to `param_file`.
    ///
    /// The shard directory itself is created if missing (the parameter
    /// write normally made it already). Each of `index/`, `corpus/` and
    /// `metadata/` must not exist yet; a failure partway leaves the
    /// directories already created in place.
    pub fn make_repo_subdirs(&self, param_file: &Path) -> LayoutResult<PathBuf> {
        let repo_root = param_file.parent().ok_or_else(|| no_parent(param_file))?;
        make_dirs(repo_root, 0o775, true)?;
        for sub in REPO_SUBDIRS {
            make_dirs(&repo_root.join(sub), 0o660, false)?;
        }
        debug!(shard = %repo_root.display(), "shard work directories created");
        Ok(repo_root.to_path_buf())
    }

    /// Render an empty document template for `kind`.
    pub fn doc_template(&self, kind: &str) -> LayoutResult<String> {
        params::render_doc_template(&self.config, kind)
    }
}

fn no_parent(path: &Path) -> LayoutError {
    LayoutError::Io(io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("path {} has no parent directory", path.display()),
    ))
}

/// Create a directory with `mode`. Recursive creation tolerates existing
/// directories; non-recursive creation fails on them.
fn make_dirs(path: &Path, mode: u32, recursive: bool) -> LayoutResult<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(recursive);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;
    builder.create(path)?;
    Ok(())
}
