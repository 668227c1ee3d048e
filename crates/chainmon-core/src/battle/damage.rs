//! Per-move damage and status evaluation.
//!
//! Damage starts from the standard rule `max(0, attack - defense)` and is then
//! shaped by the move's [`DamageRule`]. Results are never negative; they may
//! be fractional.
//!
//! # RNG consumption
//!
//! - `Standard`: no rolls
//! - `Blaze`: one roll (burn)
//! - `Critical`: one roll (crit)

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::catalog::{DamageRule, Move};
use crate::config::BattleConfig;
use crate::monster::Combatant;
use crate::rng::BattleRng;

bitflags! {
    /// Status effects a move inflicted on its target.
    ///
    /// Effects are reported in the [`MoveResult`] and the turn record; they do
    /// not yet alter later turns.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct StatusEffects: u8 {
        /// Target caught fire.
        const BURN = 1 << 0;
    }
}

/// Outcome of evaluating one move against one target.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MoveResult {
    /// Damage to subtract from the target's hp. Never negative.
    pub damage: f64,
    /// Status effects inflicted on the target.
    pub status: StatusEffects,
}

impl MoveResult {
    /// Returns true if the move burned its target.
    #[must_use]
    pub fn is_burn(&self) -> bool {
        self.status.contains(StatusEffects::BURN)
    }
}

/// Standard damage: attack minus defense, floored at zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn standard_damage(attacker: &Combatant, defender: &Combatant) -> f64 {
    attacker.attack.saturating_sub(defender.defense).max(0) as f64
}

/// Evaluates `mv` used by `attacker` against `defender`.
///
/// Neither combatant is modified; the caller applies the result.
///
/// # Example
///
/// ```
/// use chainmon_core::{compute_damage, BattleConfig, Combatant, DamageRule, Move, Rarity, SeededRng};
///
/// let attacker = Combatant::new("Ember", "Dragon", 30, 5, 100, Rarity::Epic);
/// let defender = Combatant::new("Pup", "Basic", 10, 10, 50, Rarity::Common);
/// let slash = Move::standard("Slash", "A plain hit.");
///
/// let result = compute_damage(&attacker, &defender, &slash, &BattleConfig::default(), &mut SeededRng::new(1));
/// assert_eq!(result.damage, 20.0);
/// ```
pub fn compute_damage<R: BattleRng + ?Sized>(
    attacker: &Combatant,
    defender: &Combatant,
    mv: &Move,
    config: &BattleConfig,
    rng: &mut R,
) -> MoveResult {
    let base = standard_damage(attacker, defender);

    match mv.rule {
        DamageRule::Standard => MoveResult {
            damage: base,
            status: StatusEffects::empty(),
        },
        DamageRule::Blaze => {
            let mut status = StatusEffects::empty();
            if rng.roll(config.burn_chance) {
                status.insert(StatusEffects::BURN);
            }
            MoveResult {
                damage: base * config.blaze_multiplier,
                status,
            }
        }
        DamageRule::Critical => {
            let damage = if rng.roll(config.critical_chance) {
                base * config.critical_multiplier
            } else {
                base
            };
            MoveResult {
                damage,
                status: StatusEffects::empty(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rarity::Rarity;
    use crate::tests::helpers::FixedRng;

    fn fighter(attack: i64, defense: i64) -> Combatant {
        Combatant::new("F", "Basic", attack, defense, 100, Rarity::Common)
    }

    fn blaze() -> Move {
        Move::new("Fire Blast", "Burns.", DamageRule::Blaze)
    }

    fn crit() -> Move {
        Move::new("Tiger Claw", "Slashes.", DamageRule::Critical)
    }

    mod standard_tests {
        use super::*;

        #[test]
        fn subtracts_defense_from_attack() {
            let result = compute_damage(
                &fighter(50, 0),
                &fighter(0, 5),
                &Move::standard("Hit", ""),
                &BattleConfig::default(),
                &mut FixedRng::new(0.0),
            );
            assert!((result.damage - 45.0).abs() < 1e-9);
            assert!(result.status.is_empty());
        }

        #[test]
        fn floors_at_zero_when_defense_exceeds_attack() {
            let result = compute_damage(
                &fighter(3, 0),
                &fighter(0, 40),
                &Move::standard("Hit", ""),
                &BattleConfig::default(),
                &mut FixedRng::new(0.0),
            );
            assert_eq!(result.damage, 0.0);
        }

        #[test]
        fn survives_extreme_stats() {
            let damage = standard_damage(&fighter(i64::MAX, 0), &fighter(0, i64::MIN));
            assert!(damage > 0.0);
        }
    }

    mod blaze_tests {
        use super::*;

        #[test]
        fn scales_damage_and_burns_on_low_roll() {
            let result = compute_damage(
                &fighter(20, 0),
                &fighter(0, 10),
                &blaze(),
                &BattleConfig::default(),
                &mut FixedRng::new(0.1),
            );
            assert!((result.damage - 15.0).abs() < 1e-9);
            assert!(result.is_burn());
        }

        #[test]
        fn no_burn_on_high_roll() {
            let result = compute_damage(
                &fighter(20, 0),
                &fighter(0, 10),
                &blaze(),
                &BattleConfig::default(),
                &mut FixedRng::new(0.9),
            );
            assert!((result.damage - 15.0).abs() < 1e-9);
            assert!(!result.is_burn());
        }

        #[test]
        fn never_negative_when_outclassed() {
            let result = compute_damage(
                &fighter(1, 0),
                &fighter(0, 99),
                &blaze(),
                &BattleConfig::default(),
                &mut FixedRng::new(0.0),
            );
            assert_eq!(result.damage, 0.0);
            assert!(result.is_burn());
        }
    }

    mod critical_tests {
        use super::*;

        #[test]
        fn doubles_on_low_roll() {
            let result = compute_damage(
                &fighter(20, 0),
                &fighter(0, 10),
                &crit(),
                &BattleConfig::default(),
                &mut FixedRng::new(0.1),
            );
            assert!((result.damage - 20.0).abs() < 1e-9);
        }

        #[test]
        fn standard_on_high_roll() {
            let result = compute_damage(
                &fighter(20, 0),
                &fighter(0, 10),
                &crit(),
                &BattleConfig::default(),
                &mut FixedRng::new(0.3),
            );
            assert!((result.damage - 10.0).abs() < 1e-9);
            assert!(result.status.is_empty());
        }

        #[test]
        fn honours_configured_multiplier() {
            let config = BattleConfig {
                critical_chance: 1.0,
                critical_multiplier: 3.0,
                ..BattleConfig::default()
            };
            let result = compute_damage(
                &fighter(20, 0),
                &fighter(0, 10),
                &crit(),
                &config,
                &mut FixedRng::new(0.99),
            );
            assert!((result.damage - 30.0).abs() < 1e-9);
        }
    }
}
