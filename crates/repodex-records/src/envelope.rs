use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RecordError, RecordResult};
use crate::records::{RepoRecord, ReposetRecord};

/// Discriminator for the record kinds an envelope can carry.
///
/// Tag values are part of the wire format and must never be renumbered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// A [`RepoRecord`]. Wire tag 0.
    Repo,
    /// A [`ReposetRecord`]. Wire tag 1.
    Reposet,
}

impl RecordKind {
    /// The wire tag for this kind.
    pub fn tag(&self) -> u32 {
        match self {
            Self::Repo => 0,
            Self::Reposet => 1,
        }
    }

    /// Parse a wire tag.
    pub fn from_tag(tag: u32) -> RecordResult<Self> {
        match tag {
            0 => Ok(Self::Repo),
            1 => Ok(Self::Reposet),
            other => Err(RecordError::UnknownKind(other)),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repo => write!(f, "repo"),
            Self::Reposet => write!(f, "reposet"),
        }
    }
}

/// Closed union of the records stored in a reposet's property directory.
///
/// The catalog only ever stores these two record shapes in the DAG; there is
/// no open extension point. Adding a kind means adding a variant and a wire
/// tag here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyRecord {
    Repo(RepoRecord),
    Reposet(ReposetRecord),
}

impl PropertyRecord {
    /// The wire kind of this record.
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Repo(_) => RecordKind::Repo,
            Self::Reposet(_) => RecordKind::Reposet,
        }
    }

    /// Serialize the inner record to its payload encoding.
    pub fn to_payload(&self) -> RecordResult<Vec<u8>> {
        match self {
            Self::Repo(r) => r.to_bytes(),
            Self::Reposet(r) => r.to_bytes(),
        }
    }

    /// Decode a record of the given kind from payload bytes.
    pub fn from_payload(kind: RecordKind, payload: &[u8]) -> RecordResult<Self> {
        match kind {
            RecordKind::Repo => Ok(Self::Repo(RepoRecord::from_bytes(payload)?)),
            RecordKind::Reposet => Ok(Self::Reposet(ReposetRecord::from_bytes(payload)?)),
        }
    }

    /// Extract the repo record, failing with a kind mismatch otherwise.
    pub fn into_repo(self) -> RecordResult<RepoRecord> {
        match self {
            Self::Repo(r) => Ok(r),
            other => Err(RecordError::KindMismatch {
                expected: RecordKind::Repo,
                actual: other.kind(),
            }),
        }
    }

    /// Extract the reposet record, failing with a kind mismatch otherwise.
    pub fn into_reposet(self) -> RecordResult<ReposetRecord> {
        match self {
            Self::Reposet(r) => Ok(r),
            other => Err(RecordError::KindMismatch {
                expected: RecordKind::Reposet,
                actual: other.kind(),
            }),
        }
    }
}

impl From<RepoRecord> for PropertyRecord {
    fn from(r: RepoRecord) -> Self {
        Self::Repo(r)
    }
}

impl From<ReposetRecord> for PropertyRecord {
    fn from(r: ReposetRecord) -> Self {
        Self::Reposet(r)
    }
}

/// Serialization shape of the envelope. Field order is the wire order.
#[derive(Serialize, Deserialize)]
struct RawEnvelope {
    kind: u32,
    payload: Vec<u8>,
}

/// Tagged binary wrapper for DAG-stored property records.
///
/// Wire format (bincode, fixed-width little-endian integers):
/// ```text
/// [4 bytes: record kind tag (little-endian u32)]
/// [8 bytes: payload length (little-endian u64)]
/// [N bytes: payload (JSON-encoded record)]
/// ```
///
/// The envelope is self-describing: a reader needs no out-of-band type
/// information to recover the record, and a reader expecting one kind can
/// detect that it was handed another.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyEnvelope {
    /// Which record kind the payload decodes to.
    pub kind: RecordKind,
    /// The record's payload bytes, opaque at this layer.
    pub payload: Vec<u8>,
}

impl PropertyEnvelope {
    /// Wrap pre-encoded payload bytes.
    pub fn new(kind: RecordKind, payload: Vec<u8>) -> Self {
        Self { kind, payload }
    }

    /// Encode a record and wrap it.
    pub fn seal(record: &PropertyRecord) -> RecordResult<Self> {
        Ok(Self {
            kind: record.kind(),
            payload: record.to_payload()?,
        })
    }

    /// Decode the wrapped record.
    pub fn open(&self) -> RecordResult<PropertyRecord> {
        PropertyRecord::from_payload(self.kind, &self.payload)
    }

    /// Decode the wrapped record, insisting on a particular kind.
    pub fn open_as(&self, expected: RecordKind) -> RecordResult<PropertyRecord> {
        if self.kind != expected {
            return Err(RecordError::KindMismatch {
                expected,
                actual: self.kind,
            });
        }
        self.open()
    }

    /// Serialize to the wire format.
    pub fn to_bytes(&self) -> RecordResult<Vec<u8>> {
        let raw = RawEnvelope {
            kind: self.kind.tag(),
            payload: self.payload.clone(),
        };
        bincode::serialize(&raw).map_err(|e| RecordError::Encode(e.to_string()))
    }

    /// Decode from the wire format.
    pub fn from_bytes(data: &[u8]) -> RecordResult<Self> {
        let raw: RawEnvelope =
            bincode::deserialize(data).map_err(|e| RecordError::Decode(e.to_string()))?;
        Ok(Self {
            kind: RecordKind::from_tag(raw.kind)?,
            payload: raw.payload,
        })
    }
}
