use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use repodex_types::{ContentId, ShardTags};

/// Sizing limits recorded on a new reposet.
///
/// The limits are descriptive: they are written into the reposet record for
/// the external indexer to honor, and nothing in this subsystem enforces
/// them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReposetLimits {
    /// Maximum number of area shards.
    pub max_areas: u8,
    /// Maximum number of category shards.
    pub max_cats: u8,
    /// Maximum number of documents per repo.
    pub max_docs: u64,
}

impl Default for ReposetLimits {
    fn default() -> Self {
        Self {
            max_areas: 64,
            max_cats: 64,
            max_docs: 50_000_000,
        }
    }
}

/// Result of creating a reposet together with its first repo shard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedReposet {
    /// Reposet name, taken from the first shard's directory name.
    pub name: String,
    /// Shard tags of the first repo.
    pub shard: ShardTags,
    /// DAG root of the reposet's property directory.
    pub root: ContentId,
    /// Content ID of the archived parameter file.
    pub params: ContentId,
    /// Local directory of the first shard.
    pub path: PathBuf,
}

/// Result of adding a repo shard to an existing reposet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRepo {
    /// Position of the new shard in the reposet's repo list.
    pub repo_index: i64,
    /// Shard tags of the new repo.
    pub shard: ShardTags,
    /// DAG root of the property directory after the addition.
    pub root: ContentId,
    /// Local directory of the new shard.
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_match_documented_values() {
        let limits = ReposetLimits::default();
        assert_eq!(limits.max_areas, 64);
        assert_eq!(limits.max_cats, 64);
        assert_eq!(limits.max_docs, 50_000_000);
    }

    #[test]
    fn limits_override_selectively() {
        let limits = ReposetLimits {
            max_docs: 1_000,
            ..ReposetLimits::default()
        };
        assert_eq!(limits.max_docs, 1_000);
        assert_eq!(limits.max_areas, 64);
    }
}
