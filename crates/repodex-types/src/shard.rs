use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Coordinates of one repo shard within a reposet.
///
/// A shard is named by the second it was created (`window`), its area and
/// category slots, and its offset in seconds from the reposet's creation
/// time. The canonical directory-name rendering is
/// `w<window>-a<area+1>-c<cat+1>-o<offset>`: area and category are shown
/// one-based, matching the on-disk layout.
///
/// Two shards created within the same second get the same name. Callers that
/// need distinct shards take responsibility for spacing their creation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShardTags {
    /// Creation time, whole seconds since UNIX epoch.
    pub window: u64,
    /// Zero-based area slot.
    pub area: u8,
    /// Zero-based category slot.
    pub cat: u8,
    /// Seconds since the owning reposet's creation.
    pub offset: i64,
}

impl ShardTags {
    /// Create tags with explicit values.
    pub fn new(window: u64, area: u8, cat: u8, offset: i64) -> Self {
        Self {
            window,
            area,
            cat,
            offset,
        }
    }

    /// The canonical directory name for this shard.
    pub fn dir_name(&self) -> String {
        format!(
            "w{}-a{}-c{}-o{}",
            self.window,
            self.area as u32 + 1,
            self.cat as u32 + 1,
            self.offset
        )
    }
}

impl fmt::Display for ShardTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

impl fmt::Debug for ShardTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShardTags({})", self.dir_name())
    }
}

impl FromStr for ShardTags {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypeError::InvalidShardName(s.to_string());

        // splitn keeps a negative offset ("o-5") intact in the last piece.
        let mut parts = s.splitn(4, '-');
        let window = parts
            .next()
            .and_then(|p| p.strip_prefix('w'))
            .and_then(|p| p.parse::<u64>().ok())
            .ok_or_else(invalid)?;
        let area = parts
            .next()
            .and_then(|p| p.strip_prefix('a'))
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        let cat = parts
            .next()
            .and_then(|p| p.strip_prefix('c'))
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        let offset = parts
            .next()
            .and_then(|p| p.strip_prefix('o'))
            .and_then(|p| p.parse::<i64>().ok())
            .ok_or_else(invalid)?;

        // Names carry area/cat one-based; zero means a malformed name.
        if area == 0 || area > u8::MAX as u32 + 1 || cat == 0 || cat > u8::MAX as u32 + 1 {
            return Err(invalid());
        }

        Ok(Self {
            window,
            area: (area - 1) as u8,
            cat: (cat - 1) as u8,
            offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn dir_name_is_one_based() {
        let tags = ShardTags::new(1_700_000_000, 0, 0, 0);
        assert_eq!(tags.dir_name(), "w1700000000-a1-c1-o0");
    }

    #[test]
    fn dir_name_with_offsets() {
        let tags = ShardTags::new(42, 2, 7, -30);
        assert_eq!(tags.dir_name(), "w42-a3-c8-o-30");
    }

    #[test]
    fn parse_roundtrip() {
        let tags = ShardTags::new(1_700_000_000, 1, 3, 86_400);
        let parsed: ShardTags = tags.dir_name().parse().unwrap();
        assert_eq!(parsed, tags);
    }

    #[test]
    fn parse_rejects_zero_area() {
        assert!(matches!(
            "w100-a0-c1-o0".parse::<ShardTags>(),
            Err(TypeError::InvalidShardName(_))
        ));
    }

    #[test]
    fn parse_rejects_missing_pieces() {
        for bad in ["", "w100", "w100-a1", "w100-a1-c1", "w100-a1-c1-o0-x"] {
            assert!(bad.parse::<ShardTags>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn parse_rejects_wrong_prefixes() {
        assert!("x100-a1-c1-o0".parse::<ShardTags>().is_err());
        assert!("w100-b1-c1-o0".parse::<ShardTags>().is_err());
    }

    #[test]
    fn display_matches_dir_name() {
        let tags = ShardTags::new(9, 0, 1, 5);
        assert_eq!(format!("{tags}"), tags.dir_name());
    }

    proptest! {
        #[test]
        fn name_roundtrip(window in any::<u64>(), area in any::<u8>(), cat in any::<u8>(), offset in any::<i64>()) {
            let tags = ShardTags::new(window, area, cat, offset);
            let parsed: ShardTags = tags.dir_name().parse().unwrap();
            prop_assert_eq!(parsed, tags);
        }
    }
}
