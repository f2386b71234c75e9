//! Index configuration consumed when rendering parameter files.

use serde::{Deserialize, Serialize};

/// Corpus location and classification settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Corpus directory, relative to the repo root.
    pub path: String,
    /// Corpus class the indexer should assume, e.g. `"dms3"`.
    pub class: String,
    /// Metadata directory, relative to the repo root.
    pub metadata: String,
}

/// Indexer process settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Index work directory, relative to the repo root. Required.
    pub path: String,
    /// Corpus settings. Required.
    pub corpus: Option<CorpusConfig>,
    /// Memory budget hint passed through to the indexer.
    pub memory: Option<String>,
    /// Stemmer name, when stemming is wanted.
    pub stemmer: Option<String>,
    /// Whether the indexer normalizes terms.
    pub normalize: bool,
    /// Stop words excluded from the index.
    pub stopper: Vec<String>,
}

/// Field schema for one content kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindSchema {
    /// The kind this schema applies to, e.g. `"blog"`.
    pub name: String,
    /// Searchable field names documents of this kind carry.
    pub fields: Vec<String>,
}

/// Metadata schemas across all configured kinds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    /// One schema per configured kind.
    pub kinds: Vec<KindSchema>,
}

/// Top-level index configuration.
///
/// A kind counts as configured only when its schema lists at least one
/// non-empty field name; an empty schema renders an unusable parameter
/// file and is treated the same as no schema at all.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Indexer process settings.
    pub indexer: IndexerConfig,
    /// Per-kind metadata schemas.
    pub metadata: MetadataConfig,
}

impl IndexConfig {
    /// The configured field names for `kind`, if a schema exists.
    pub fn kind_fields(&self, kind: &str) -> Option<&[String]> {
        self.metadata
            .kinds
            .iter()
            .find(|schema| schema.name == kind)
            .map(|schema| schema.fields.as_slice())
    }

    /// Whether `kind` has at least one non-empty configured field.
    pub fn is_kind_configured(&self, kind: &str) -> bool {
        self.kind_fields(kind)
            .map(|fields| fields.iter().any(|f| !f.is_empty()))
            .unwrap_or(false)
    }
}
