use std::fmt;

use serde::{Deserialize, Serialize};

use repodex_types::StoreClass;

use crate::error::KeyError;

/// Root prefix every catalog key lives under.
pub const ROOT_PREFIX: &str = "/index/reposet";

/// The root prefix as segments, for element-wise prefix checks.
const ROOT_SEGMENTS: [&str; 2] = ["index", "reposet"];

/// Marker segment separating a repo index from a document index.
const CORPUS_SEGMENT: &str = "corpus";

/// How deep into the namespace a key reaches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyLevel {
    /// `/<root>/<class>/<kind>/<name>` (or the legacy shape without kind).
    Reposet,
    /// `/<root>/<class>/<kind>/<name>/<repoIndex>`.
    Repo,
    /// `/<root>/<class>/<kind>/<name>/<repoIndex>/corpus/<docIndex>`.
    Doc,
}

/// A normalized catalog key.
///
/// Keys are `/`-joined segment paths under [`ROOT_PREFIX`]. Construction
/// normalizes the string form: empty segments collapse, so composing with an
/// empty kind yields the 4-segment legacy shape that [`decompose_reposet`]
/// still accepts.
///
/// [`decompose_reposet`]: CatalogKey::decompose_reposet
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CatalogKey(String);

/// Join segments into a normalized key string, collapsing empties.
fn join(segments: &[&str]) -> String {
    let mut s = String::new();
    for seg in segments {
        for part in seg.split('/') {
            if part.is_empty() {
                continue;
            }
            s.push('/');
            s.push_str(part);
        }
    }
    if s.is_empty() {
        s.push('/');
    }
    s
}

impl CatalogKey {
    /// Key naming a reposet.
    pub fn reposet(class: StoreClass, kind: &str, name: &str) -> Self {
        Self(join(&[ROOT_PREFIX, class.as_str(), kind, name]))
    }

    /// Key naming one repo shard of a reposet.
    pub fn repo(class: StoreClass, kind: &str, name: &str, repo_index: i64) -> Self {
        Self(join(&[
            ROOT_PREFIX,
            class.as_str(),
            kind,
            name,
            &repo_index.to_string(),
        ]))
    }

    /// Key naming one corpus document within a repo shard.
    pub fn doc(class: StoreClass, kind: &str, name: &str, repo_index: i64, doc_index: i64) -> Self {
        Self(join(&[
            ROOT_PREFIX,
            class.as_str(),
            kind,
            name,
            &repo_index.to_string(),
            CORPUS_SEGMENT,
            &doc_index.to_string(),
        ]))
    }

    /// Normalize an arbitrary key string.
    pub fn from_raw(raw: &str) -> Self {
        Self(join(&[raw]))
    }

    /// The normalized string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key's segments, in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Validate the root prefix and minimum depth, returning the segments.
    fn checked_segments(&self) -> Result<Vec<&str>, KeyError> {
        let segs: Vec<&str> = self.segments().collect();
        if segs.len() < ROOT_SEGMENTS.len() + 2 {
            return Err(KeyError::InvalidLength {
                key: self.0.clone(),
            });
        }
        for (i, root_seg) in ROOT_SEGMENTS.iter().enumerate() {
            if segs[i] != *root_seg {
                return Err(KeyError::InvalidPrefix {
                    key: self.0.clone(),
                });
            }
        }
        Ok(segs)
    }

    /// Classify the key by namespace depth.
    pub fn level(&self) -> Result<KeyLevel, KeyError> {
        let segs = self.checked_segments()?;
        match segs.len() {
            4 | 5 => Ok(KeyLevel::Reposet),
            6 => Ok(KeyLevel::Repo),
            8 if segs[6] == CORPUS_SEGMENT => Ok(KeyLevel::Doc),
            _ => Err(KeyError::InvalidLength {
                key: self.0.clone(),
            }),
        }
    }

    /// Decompose a reposet-level key into `(class, kind, name)`.
    ///
    /// Accepts the 5-segment shape and the 4-segment legacy shape, which has
    /// no kind segment; the legacy shape decomposes with `kind == ""`.
    pub fn decompose_reposet(&self) -> Result<(StoreClass, String, String), KeyError> {
        let segs = self.checked_segments()?;
        let base = ROOT_SEGMENTS.len();
        match segs.len() {
            // Deprecated shape from before kinds existed.
            4 => Ok((
                segs[base].parse()?,
                String::new(),
                segs[base + 1].to_string(),
            )),
            5 => Ok((
                segs[base].parse()?,
                segs[base + 1].to_string(),
                segs[base + 2].to_string(),
            )),
            _ => Err(KeyError::InvalidLength {
                key: self.0.clone(),
            }),
        }
    }

    /// The reposet-level truncation of this key.
    ///
    /// For repo and document keys this drops the index segments; reposet keys
    /// come back unchanged.
    pub fn reposet_prefix(&self) -> Result<CatalogKey, KeyError> {
        let segs = self.checked_segments()?;
        let keep = segs.len().min(5);
        Ok(Self(join(&segs[..keep])))
    }
}

impl fmt::Debug for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CatalogKey({})", self.0)
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn compose_reposet_key() {
        let key = CatalogKey::reposet(StoreClass::Infostore, "blog", "myblog");
        assert_eq!(key.as_str(), "/index/reposet/infostore/blog/myblog");
    }

    #[test]
    fn compose_decompose_roundtrip() {
        let key = CatalogKey::reposet(StoreClass::Infostore, "blog", "myblog");
        let (class, kind, name) = key.decompose_reposet().unwrap();
        assert_eq!(class, StoreClass::Infostore);
        assert_eq!(kind, "blog");
        assert_eq!(name, "myblog");
    }

    #[test]
    fn legacy_key_decomposes_with_empty_kind() {
        let key = CatalogKey::from_raw("/index/reposet/metastore/oldname");
        let (class, kind, name) = key.decompose_reposet().unwrap();
        assert_eq!(class, StoreClass::Metastore);
        assert_eq!(kind, "");
        assert_eq!(name, "oldname");
    }

    #[test]
    fn composing_with_empty_kind_yields_legacy_shape() {
        let key = CatalogKey::reposet(StoreClass::Infostore, "", "nok");
        assert_eq!(key.as_str(), "/index/reposet/infostore/nok");
        let (_, kind, name) = key.decompose_reposet().unwrap();
        assert_eq!(kind, "");
        assert_eq!(name, "nok");
    }

    #[test]
    fn short_key_is_invalid_length() {
        let key = CatalogKey::from_raw("/index/reposet/infostore");
        assert!(matches!(
            key.decompose_reposet(),
            Err(KeyError::InvalidLength { .. })
        ));
    }

    #[test]
    fn wrong_prefix_is_rejected() {
        for raw in [
            "/index/blocks/infostore/blog/name",
            "/other/reposet/infostore/blog/name",
        ] {
            let key = CatalogKey::from_raw(raw);
            assert!(
                matches!(key.decompose_reposet(), Err(KeyError::InvalidPrefix { .. })),
                "accepted {raw:?}"
            );
        }
    }

    #[test]
    fn deep_key_does_not_decompose_as_reposet() {
        let key = CatalogKey::repo(StoreClass::Infostore, "blog", "myblog", 0);
        assert!(matches!(
            key.decompose_reposet(),
            Err(KeyError::InvalidLength { .. })
        ));
    }

    #[test]
    fn unknown_class_is_rejected() {
        let key = CatalogKey::from_raw("/index/reposet/blobstore/blog/name");
        assert!(matches!(key.decompose_reposet(), Err(KeyError::Class(_))));
    }

    #[test]
    fn doc_key_shape() {
        let key = CatalogKey::doc(StoreClass::Infostore, "blog", "myblog", 0, 7);
        assert_eq!(key.as_str(), "/index/reposet/infostore/blog/myblog/0/corpus/7");
    }

    #[test]
    fn key_levels() {
        let reposet = CatalogKey::reposet(StoreClass::Infostore, "blog", "b");
        let legacy = CatalogKey::from_raw("/index/reposet/infostore/b");
        let repo = CatalogKey::repo(StoreClass::Infostore, "blog", "b", 1);
        let doc = CatalogKey::doc(StoreClass::Infostore, "blog", "b", 1, 2);
        assert_eq!(reposet.level().unwrap(), KeyLevel::Reposet);
        assert_eq!(legacy.level().unwrap(), KeyLevel::Reposet);
        assert_eq!(repo.level().unwrap(), KeyLevel::Repo);
        assert_eq!(doc.level().unwrap(), KeyLevel::Doc);
    }

    #[test]
    fn seven_segment_key_has_no_level() {
        let key = CatalogKey::from_raw("/index/reposet/infostore/blog/b/0/corpus");
        assert!(matches!(key.level(), Err(KeyError::InvalidLength { .. })));
    }

    #[test]
    fn doc_key_truncates_to_its_reposet() {
        let doc = CatalogKey::doc(StoreClass::Metastore, "blog", "myblog", 3, 11);
        let truncated = doc.reposet_prefix().unwrap();
        let (class, kind, name) = truncated.decompose_reposet().unwrap();
        assert_eq!(class, StoreClass::Metastore);
        assert_eq!(kind, "blog");
        assert_eq!(name, "myblog");
    }

    #[test]
    fn from_raw_normalizes() {
        let key = CatalogKey::from_raw("index//reposet/infostore/blog//x/");
        assert_eq!(key.as_str(), "/index/reposet/infostore/blog/x");
    }

    proptest! {
        #[test]
        fn reposet_roundtrip(
            meta in any::<bool>(),
            kind in "[a-z][a-z0-9_-]{0,15}",
            name in "[a-z][a-z0-9_-]{0,15}",
        ) {
            let class = if meta { StoreClass::Metastore } else { StoreClass::Infostore };
            let key = CatalogKey::reposet(class, &kind, &name);
            let (c, k, n) = key.decompose_reposet().unwrap();
            prop_assert_eq!(c, class);
            prop_assert_eq!(k, kind);
            prop_assert_eq!(n, name);
        }

        #[test]
        fn doc_key_prefix_matches_reposet_key(
            kind in "[a-z][a-z0-9_-]{0,15}",
            name in "[a-z][a-z0-9_-]{0,15}",
            repo_index in 0i64..1000,
            doc_index in 0i64..1000,
        ) {
            let doc = CatalogKey::doc(StoreClass::Infostore, &kind, &name, repo_index, doc_index);
            let reposet = CatalogKey::reposet(StoreClass::Infostore, &kind, &name);
            prop_assert_eq!(doc.reposet_prefix().unwrap(), reposet);
        }
    }
}
