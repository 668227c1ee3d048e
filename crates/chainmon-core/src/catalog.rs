//! Species → moveset table.
//!
//! The catalog maps a species tag to its ordered list of [`Move`]s. Each move
//! carries a [`DamageRule`] tag chosen when the table is defined, so the damage
//! function never matches on move names.
//!
//! # Fallback
//!
//! Every catalog has a fallback species. [`MoveCatalog::moves_for`] serves the
//! fallback moveset for any species it does not know, and the builder refuses
//! to produce a catalog whose fallback is missing or whose movesets are empty.
//! Lookups therefore always return at least one move.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::BattleError;

/// Mechanical effect class of a move.
///
/// Flavor text lives in [`Move::description`]; only this tag affects damage.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageRule {
    /// `max(0, attack - defense)`.
    #[default]
    Standard,
    /// Area fire attack: scaled-up standard damage with a chance to burn.
    Blaze,
    /// Chance to deal a multiplied critical strike.
    Critical,
}

/// A named move available to one species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Name shown in the battle log.
    pub name: String,
    /// Flavor text shown to players.
    pub description: String,
    /// Damage rule applied when the move is used.
    #[serde(default)]
    pub rule: DamageRule,
}

impl Move {
    /// Creates a move with an explicit damage rule.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, rule: DamageRule) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            rule,
        }
    }

    /// Creates a move using [`DamageRule::Standard`].
    #[must_use]
    pub fn standard(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, description, DamageRule::Standard)
    }
}

type MoveRow = (&'static str, &'static str, DamageRule);

const DRAGON_MOVES: &[MoveRow] = &[
    (
        "Fire Blast",
        "Deals high fire-based AoE damage to all enemies.",
        DamageRule::Blaze,
    ),
    (
        "Wing Shield",
        "Reduces incoming damage by 50% for 2 turns.",
        DamageRule::Standard,
    ),
    (
        "Ancient Roar",
        "Reduces all enemies' Speed and Defense stats.",
        DamageRule::Standard,
    ),
    (
        "Sky Strike",
        "Launches a high-impact attack from the air.",
        DamageRule::Standard,
    ),
    (
        "Inferno Surge",
        "Unleashes a devastating firestorm.",
        DamageRule::Standard,
    ),
];

const TIGER_MOVES: &[MoveRow] = &[
    (
        "Tiger Claw",
        "Delivers a powerful single-target slash.",
        DamageRule::Critical,
    ),
    (
        "Shadow Leap",
        "Instantly evades the next attack.",
        DamageRule::Standard,
    ),
    (
        "Pounce Strike",
        "Deals damage based on the target's Speed.",
        DamageRule::Standard,
    ),
    (
        "Ferocious Howl",
        "Boosts Attack and Speed stats.",
        DamageRule::Standard,
    ),
    (
        "Lunar Ambush",
        "Stealth-based attack with massive damage.",
        DamageRule::Standard,
    ),
];

const BASIC_MOVES: &[MoveRow] = &[
    (
        "Basic Attack",
        "Deals small single-target damage.",
        DamageRule::Standard,
    ),
    ("Defend", "Reduces incoming damage.", DamageRule::Standard),
    (
        "Quick Strike",
        "Fast, low-damage attack.",
        DamageRule::Standard,
    ),
    (
        "Charge Up",
        "Increases the power of the next move.",
        DamageRule::Standard,
    ),
    (
        "Recover",
        "Restores a small percentage of Health.",
        DamageRule::Standard,
    ),
];

/// Fallback species of the standard catalog.
pub const DEFAULT_SPECIES: &str = "Basic";

fn rows_to_moves(rows: &[MoveRow]) -> Vec<Move> {
    rows.iter()
        .map(|&(name, description, rule)| Move::new(name, description, rule))
        .collect()
}

/// Species → moveset table with a guaranteed fallback.
///
/// # Example
///
/// ```
/// use chainmon_core::{DamageRule, MoveCatalog};
///
/// let catalog = MoveCatalog::standard();
/// let tiger = catalog.moves_for("Tiger");
/// assert_eq!(tiger[0].name, "Tiger Claw");
/// assert_eq!(tiger[0].rule, DamageRule::Critical);
///
/// // Unknown species use the fallback moveset
/// assert_eq!(catalog.moves_for("Kraken"), catalog.moves_for("Basic"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCatalog {
    movesets: BTreeMap<String, Vec<Move>>,
    fallback: String,
}

impl MoveCatalog {
    /// Returns the catalog shipped with the game: `Dragon`, `Tiger`, and the
    /// fallback `Basic`.
    #[must_use]
    pub fn standard() -> Self {
        let movesets = BTreeMap::from([
            ("Dragon".to_string(), rows_to_moves(DRAGON_MOVES)),
            ("Tiger".to_string(), rows_to_moves(TIGER_MOVES)),
            (DEFAULT_SPECIES.to_string(), rows_to_moves(BASIC_MOVES)),
        ]);
        Self {
            movesets,
            fallback: DEFAULT_SPECIES.to_string(),
        }
    }

    /// Starts building a custom catalog.
    #[must_use]
    pub fn builder() -> MoveCatalogBuilder {
        MoveCatalogBuilder::default()
    }

    /// Returns the moveset for `species`, or the fallback moveset if the
    /// species is not registered. Never empty.
    #[must_use]
    pub fn moves_for(&self, species: &str) -> &[Move] {
        self.movesets
            .get(species)
            .or_else(|| self.movesets.get(&self.fallback))
            .map_or(&[], Vec::as_slice)
    }

    /// Returns true if `species` has its own moveset.
    #[must_use]
    pub fn contains(&self, species: &str) -> bool {
        self.movesets.contains_key(species)
    }

    /// Returns the fallback species tag.
    #[must_use]
    pub fn fallback_species(&self) -> &str {
        &self.fallback
    }

    /// Returns the registered species tags in sorted order.
    pub fn species(&self) -> impl Iterator<Item = &str> {
        self.movesets.keys().map(String::as_str)
    }
}

impl Default for MoveCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Builder for custom [`MoveCatalog`]s.
///
/// # Example
///
/// ```
/// use chainmon_core::{Move, MoveCatalog};
///
/// let catalog = MoveCatalog::builder()
///     .species("Slime", vec![Move::standard("Ooze", "Drips on the target.")])
///     .fallback("Slime")
///     .build()
///     .unwrap();
/// assert_eq!(catalog.moves_for("Anything")[0].name, "Ooze");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MoveCatalogBuilder {
    movesets: BTreeMap<String, Vec<Move>>,
    fallback: Option<String>,
}

impl MoveCatalogBuilder {
    /// Registers (or replaces) the moveset of `species`.
    #[must_use]
    pub fn species(mut self, species: impl Into<String>, moves: Vec<Move>) -> Self {
        self.movesets.insert(species.into(), moves);
        self
    }

    /// Names the species whose moveset serves unknown species.
    #[must_use]
    pub fn fallback(mut self, species: impl Into<String>) -> Self {
        self.fallback = Some(species.into());
        self
    }

    /// Validates and builds the catalog.
    ///
    /// When no fallback was named, the first registered species (in sorted
    /// order) is used.
    ///
    /// # Errors
    ///
    /// - [`BattleError::EmptyMoveset`] if any species has no moves
    /// - [`BattleError::UnknownSpecies`] if the fallback is not registered or
    ///   no species were registered at all
    pub fn build(self) -> Result<MoveCatalog, BattleError> {
        if let Some((species, _)) = self.movesets.iter().find(|(_, moves)| moves.is_empty()) {
            return Err(BattleError::EmptyMoveset {
                species: species.clone(),
            });
        }

        let fallback = match self.fallback {
            Some(name) => name,
            None => self
                .movesets
                .keys()
                .next()
                .cloned()
                .ok_or_else(|| BattleError::UnknownSpecies {
                    species: DEFAULT_SPECIES.to_string(),
                })?,
        };

        if !self.movesets.contains_key(&fallback) {
            return Err(BattleError::UnknownSpecies { species: fallback });
        }

        Ok(MoveCatalog {
            movesets: self.movesets,
            fallback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod standard_catalog_tests {
        use super::*;

        #[test]
        fn has_three_species_with_five_moves_each() {
            let catalog = MoveCatalog::standard();
            let species: Vec<&str> = catalog.species().collect();
            assert_eq!(species, vec!["Basic", "Dragon", "Tiger"]);
            for name in species {
                assert_eq!(catalog.moves_for(name).len(), 5, "{name}");
            }
        }

        #[test]
        fn tags_special_moves() {
            let catalog = MoveCatalog::standard();
            let rule_of = |species: &str, name: &str| {
                catalog
                    .moves_for(species)
                    .iter()
                    .find(|m| m.name == name)
                    .map(|m| m.rule)
            };
            assert_eq!(rule_of("Dragon", "Fire Blast"), Some(DamageRule::Blaze));
            assert_eq!(rule_of("Tiger", "Tiger Claw"), Some(DamageRule::Critical));
            assert_eq!(rule_of("Dragon", "Inferno Surge"), Some(DamageRule::Standard));
            assert!(catalog
                .moves_for("Basic")
                .iter()
                .all(|m| m.rule == DamageRule::Standard));
        }

        #[test]
        fn unknown_species_falls_back_to_basic() {
            let catalog = MoveCatalog::standard();
            assert!(!catalog.contains("Kraken"));
            assert_eq!(catalog.fallback_species(), "Basic");
            assert_eq!(catalog.moves_for("Kraken"), catalog.moves_for("Basic"));
            assert!(!catalog.moves_for("").is_empty());
        }

        #[test]
        fn lookup_is_case_sensitive() {
            let catalog = MoveCatalog::standard();
            assert_eq!(catalog.moves_for("dragon")[0].name, "Basic Attack");
        }
    }

    mod builder_tests {
        use super::*;

        fn slime() -> Vec<Move> {
            vec![Move::standard("Ooze", "Drips on the target.")]
        }

        #[test]
        fn builds_with_explicit_fallback() {
            let catalog = MoveCatalog::builder()
                .species("Slime", slime())
                .species(
                    "Wisp",
                    vec![Move::new("Flicker", "A hot flash.", DamageRule::Blaze)],
                )
                .fallback("Wisp")
                .build()
                .unwrap();
            assert_eq!(catalog.moves_for("Golem")[0].name, "Flicker");
            assert_eq!(catalog.moves_for("Slime")[0].name, "Ooze");
        }

        #[test]
        fn defaults_fallback_to_first_species() {
            let catalog = MoveCatalog::builder()
                .species("Wisp", slime())
                .species("Slime", slime())
                .build()
                .unwrap();
            assert_eq!(catalog.fallback_species(), "Slime");
        }

        #[test]
        fn rejects_missing_fallback() {
            let err = MoveCatalog::builder()
                .species("Slime", slime())
                .fallback("Golem")
                .build()
                .unwrap_err();
            assert_eq!(
                err,
                BattleError::UnknownSpecies {
                    species: "Golem".to_string()
                }
            );
        }

        #[test]
        fn rejects_empty_catalog() {
            let err = MoveCatalog::builder().build().unwrap_err();
            assert!(matches!(err, BattleError::UnknownSpecies { .. }));
        }

        #[test]
        fn rejects_empty_moveset() {
            let err = MoveCatalog::builder()
                .species("Slime", slime())
                .species("Ghost", Vec::new())
                .fallback("Slime")
                .build()
                .unwrap_err();
            assert_eq!(
                err,
                BattleError::EmptyMoveset {
                    species: "Ghost".to_string()
                }
            );
        }
    }

    #[test]
    fn move_rule_defaults_to_standard_when_deserialized() {
        let json = r#"{"name": "Bite", "description": "Chomp."}"#;
        let parsed: Move = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.rule, DamageRule::Standard);
    }
}
