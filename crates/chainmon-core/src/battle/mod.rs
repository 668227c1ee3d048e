//! Turn-based battle resolution.
//!
//! [`BattleEngine::run`] plays two combatants against each other:
//!
//! 1. Both combatants are validated and copied; the caller's values are never
//!    touched.
//! 2. Each round, side A acts, then side B. An actor picks a move uniformly
//!    from its species' moveset, the damage rule is evaluated, and the
//!    target's hp drops (clamped at zero). A knockout ends the battle at once:
//!    the knocked-out side never gets its turn.
//! 3. If `max_rounds` rounds pass with both standing, the battle is cut off as
//!    a stalemate and the higher remaining hp wins, ties going to side A.
//!
//! # Invariants
//!
//! - The loop always terminates, whatever the RNG yields
//! - The engine holds no state between calls and performs no I/O
//! - Given the same combatants, config, and RNG sequence, the outcome is identical

mod damage;
mod outcome;
mod series;

pub use damage::{compute_damage, standard_damage, MoveResult, StatusEffects};
pub use outcome::{BattleEnd, BattleOutcome, Side, TurnRecord};
pub use series::SeriesReport;

use tracing::{debug, info, warn};

use crate::catalog::{Move, MoveCatalog};
use crate::config::BattleConfig;
use crate::error::{BattleError, ConfigError};
use crate::monster::Combatant;
use crate::rng::{BattleRng, SeededRng};

/// Resolves battles against a move catalog and balance configuration.
///
/// The engine is immutable once built and can be shared across threads.
///
/// # Example
///
/// ```
/// use chainmon_core::{BattleEnd, BattleEngine, Combatant, Rarity};
///
/// let engine = BattleEngine::new();
/// let a = Combatant::new("Stripes", "Tiger", 50, 10, 100, Rarity::Rare);
/// let b = Combatant::new("Pup", "Basic", 10, 5, 30, Rarity::Common);
///
/// let outcome = engine.run_seeded(&a, &b, 99).unwrap();
/// assert_eq!(outcome.winner.name, "Stripes");
/// assert_eq!(outcome.end, BattleEnd::Knockout);
/// assert_eq!(b.hp, 30.0); // inputs untouched
/// ```
#[derive(Debug, Clone, Default)]
pub struct BattleEngine {
    catalog: MoveCatalog,
    config: BattleConfig,
}

impl BattleEngine {
    /// Creates an engine with the standard catalog and default balance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with a custom catalog and configuration.
    ///
    /// # Errors
    ///
    /// Returns any error from [`BattleConfig::validate`].
    pub fn with_config(catalog: MoveCatalog, config: BattleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { catalog, config })
    }

    /// Returns the move catalog.
    #[must_use]
    pub fn catalog(&self) -> &MoveCatalog {
        &self.catalog
    }

    /// Returns the balance configuration.
    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Runs a battle between `a` and `b`, drawing randomness from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::InvalidCombatant`] if either combatant has
    /// non-positive hp or negative attack/defense. No turn is played.
    pub fn run<R: BattleRng + ?Sized>(
        &self,
        a: &Combatant,
        b: &Combatant,
        rng: &mut R,
    ) -> Result<BattleOutcome, BattleError> {
        a.validate()?;
        b.validate()?;

        let movesets = [self.moveset(a), self.moveset(b)];
        let mut fighters = [a.clone(), b.clone()];
        let mut turns = Vec::new();
        let mut log = Vec::new();

        for round in 1..=self.config.max_rounds {
            for actor in [Side::A, Side::B] {
                let [first, second] = &mut fighters;
                let (attacker, defender) = match actor {
                    Side::A => (&*first, second),
                    Side::B => (&*second, first),
                };

                let moves = movesets[actor.index()];
                let mv = &moves[rng.pick_index(moves.len())];
                let result = compute_damage(attacker, defender, mv, &self.config, &mut *rng);
                defender.take_damage(result.damage);

                debug!(
                    round,
                    actor = %attacker.name,
                    target = %defender.name,
                    target_side = %actor.opponent(),
                    move_name = %mv.name,
                    damage = result.damage,
                    burn = result.is_burn(),
                    target_hp = defender.hp,
                    "turn resolved"
                );

                log.push(turn_line(&attacker.name, &mv.name, result.damage));
                turns.push(TurnRecord {
                    round,
                    actor,
                    move_name: mv.name.clone(),
                    damage: result.damage,
                    status: result.status,
                    target_hp: defender.hp,
                });

                if defender.is_fainted() {
                    return Ok(finish(
                        fighters,
                        actor,
                        BattleEnd::Knockout,
                        round,
                        turns,
                        log,
                    ));
                }
            }
        }

        let rounds = self.config.max_rounds;
        let [first, second] = &fighters;
        let winner_side = if second.hp > first.hp { Side::B } else { Side::A };
        warn!(
            rounds,
            a = %first.name,
            a_hp = first.hp,
            b = %second.name,
            b_hp = second.hp,
            "battle hit round limit, resolving as stalemate"
        );
        log.push(format!("Stalemate: battle halted after {rounds} rounds."));

        Ok(finish(
            fighters,
            winner_side,
            BattleEnd::Stalemate,
            rounds,
            turns,
            log,
        ))
    }

    /// Runs a battle with a fresh [`SeededRng`] built from `seed`.
    ///
    /// # Errors
    ///
    /// Same as [`BattleEngine::run`].
    pub fn run_seeded(
        &self,
        a: &Combatant,
        b: &Combatant,
        seed: u64,
    ) -> Result<BattleOutcome, BattleError> {
        self.run(a, b, &mut SeededRng::new(seed))
    }

    fn moveset(&self, combatant: &Combatant) -> &[Move] {
        if !self.catalog.contains(&combatant.species) {
            warn!(
                combatant = %combatant.name,
                species = %combatant.species,
                fallback = %self.catalog.fallback_species(),
                "unknown species, using fallback moveset"
            );
        }
        self.catalog.moves_for(&combatant.species)
    }
}

/// Formats a turn log line; damage is shown truncated toward zero.
fn turn_line(actor: &str, move_name: &str, damage: f64) -> String {
    format!("{actor} used {move_name}, dealing {:.0} damage!", damage.trunc())
}

fn finish(
    fighters: [Combatant; 2],
    winner_side: Side,
    end: BattleEnd,
    rounds: u32,
    turns: Vec<TurnRecord>,
    log: Vec<String>,
) -> BattleOutcome {
    let [a, b] = fighters;
    let (winner, loser) = match winner_side {
        Side::A => (a, b),
        Side::B => (b, a),
    };

    info!(
        winner = %winner.name,
        loser = %loser.name,
        side = %winner_side,
        ?end,
        rounds,
        "battle finished"
    );

    BattleOutcome {
        winner,
        loser,
        winner_side,
        end,
        rounds,
        turns,
        log,
    }
}
