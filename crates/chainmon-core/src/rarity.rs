//! Rarity tiers.
//!
//! Rarity is an ordered classification minted with each monster. It has no
//! effect in battle; trades are gated on the distance between two tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseRarityError;

/// Ordered rarity tier of a monster.
///
/// Tiers are ranked `Common = 0` through `Legendary = 3`; the derived
/// ordering follows the rank.
///
/// # Example
///
/// ```
/// use chainmon_core::Rarity;
///
/// let rarity: Rarity = "Epic".parse().unwrap();
/// assert_eq!(rarity.rank(), 2);
/// assert!(Rarity::Common < Rarity::Legendary);
/// assert_eq!(Rarity::Common.distance(Rarity::Legendary), 3);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    /// Rank 0.
    Common,
    /// Rank 1.
    Rare,
    /// Rank 2.
    Epic,
    /// Rank 3.
    Legendary,
}

impl Rarity {
    /// All tiers in rank order.
    pub const ALL: [Self; 4] = [Self::Common, Self::Rare, Self::Epic, Self::Legendary];

    /// Returns the tier's rank, `0..=3`.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Common => 0,
            Self::Rare => 1,
            Self::Epic => 2,
            Self::Legendary => 3,
        }
    }

    /// Returns the number of tiers between `self` and `other`.
    #[must_use]
    pub const fn distance(self, other: Self) -> u8 {
        self.rank().abs_diff(other.rank())
    }

    /// Returns the lowercase name used on-chain.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = ParseRarityError;

    /// Parses a tier name, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|rarity| rarity.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseRarityError {
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_follow_tier_order() {
        let ranks: Vec<u8> = Rarity::ALL.iter().map(|r| r.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
        assert!(Rarity::Rare < Rarity::Epic);
    }

    #[test]
    fn parse_is_case_and_whitespace_insensitive() {
        assert_eq!("common".parse::<Rarity>(), Ok(Rarity::Common));
        assert_eq!("  LEGENDARY ".parse::<Rarity>(), Ok(Rarity::Legendary));
        assert_eq!("Rare".parse::<Rarity>(), Ok(Rarity::Rare));
    }

    #[test]
    fn parse_rejects_unknown_tiers() {
        let err = "mythic".parse::<Rarity>().unwrap_err();
        assert_eq!(err.value, "mythic");
        assert!("".parse::<Rarity>().is_err());
    }

    #[test]
    fn distance_is_symmetric() {
        for a in Rarity::ALL {
            for b in Rarity::ALL {
                assert_eq!(a.distance(b), b.distance(a));
            }
            assert_eq!(a.distance(a), 0);
        }
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Rarity::Epic).unwrap();
        assert_eq!(json, "\"epic\"");
        let back: Rarity = serde_json::from_str("\"legendary\"").unwrap();
        assert_eq!(back, Rarity::Legendary);
    }
}
