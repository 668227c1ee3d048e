//! Test RNGs and combatant fixtures.
//!
//! The RNGs here implement [`BattleRng`] directly so a test can pin every roll
//! a battle makes: move picks, critical checks, and burn checks all consume
//! one value each, in that order.

use crate::monster::{Combatant, Monster};
use crate::rarity::Rarity;
use crate::rng::BattleRng;

// =============================================================================
// Deterministic RNGs
// =============================================================================

/// Returns the same roll forever.
///
/// A value of `0.9` picks the last move of a five-move set and never triggers
/// the default critical or burn chance.
#[derive(Debug, Clone, Copy)]
pub struct FixedRng {
    value: f64,
}

impl FixedRng {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl BattleRng for FixedRng {
    fn next_unit(&mut self) -> f64 {
        self.value
    }
}

/// Replays a list of rolls, wrapping around at the end, and counts draws.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<f64>,
    cursor: usize,
    draws: usize,
}

impl ScriptedRng {
    /// # Panics
    ///
    /// Panics if `values` is empty.
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "scripted rng needs at least one value");
        Self {
            values,
            cursor: 0,
            draws: 0,
        }
    }

    /// Number of rolls consumed so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl BattleRng for ScriptedRng {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        self.draws += 1;
        value
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// Tiger with 50 attack, 10 defense, 100 hp.
pub fn tiger() -> Combatant {
    Combatant::new("Stripes", "Tiger", 50, 10, 100, Rarity::Rare)
}

/// Basic monster with 10 attack, 5 defense, 30 hp.
pub fn basic() -> Combatant {
    Combatant::new("Pup", "Basic", 10, 5, 30, Rarity::Common)
}

/// A Basic monster record with the given token id and rarity string.
pub fn monster(token_id: u64, rarity: &str) -> Monster {
    Monster::new(token_id, format!("Mon #{token_id}"), "Basic", 10, 5, 30, rarity)
}
