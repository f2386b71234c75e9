use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The two catalog classes a reposet can belong to.
///
/// Every catalog key and property record carries a class. `Infostore` holds
/// searchable document content; `Metastore` holds document metadata. The set
/// is closed: any other class string is rejected at the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreClass {
    Infostore,
    Metastore,
}

impl StoreClass {
    /// The canonical lowercase name used in catalog keys and record payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Infostore => "infostore",
            Self::Metastore => "metastore",
        }
    }

    /// All classes, in catalog-key order.
    pub const ALL: [StoreClass; 2] = [StoreClass::Infostore, StoreClass::Metastore];
}

impl fmt::Display for StoreClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StoreClass {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "infostore" => Ok(Self::Infostore),
            "metastore" => Ok(Self::Metastore),
            other => Err(TypeError::UnknownClass(other.to_string())),
        }
    }
}
