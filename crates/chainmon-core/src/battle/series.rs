//! Many independent battles between the same pair, run in parallel.
//!
//! Battle `i` of a series draws from stream `i` of the series seed, so the
//! report depends only on the inputs, never on how rayon schedules the work.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BattleEnd, BattleEngine, Side};
use crate::error::BattleError;
use crate::monster::Combatant;
use crate::rng::SeededRng;

/// Aggregate result of a battle series.
///
/// `a_wins` and `b_wins` include stalemates decided on remaining hp;
/// `stalemates` counts how many battles were decided that way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesReport {
    /// Battles played.
    pub battles: u32,
    /// Battles won by side A.
    pub a_wins: u32,
    /// Battles won by side B.
    pub b_wins: u32,
    /// Battles cut off at the round limit.
    pub stalemates: u32,
}

impl SeriesReport {
    /// Fraction of battles won by side A, `0.0` for an empty series.
    #[must_use]
    pub fn a_win_rate(&self) -> f64 {
        if self.battles == 0 {
            0.0
        } else {
            f64::from(self.a_wins) / f64::from(self.battles)
        }
    }

    fn record(mut self, winner: Side, end: BattleEnd) -> Self {
        self.battles += 1;
        match winner {
            Side::A => self.a_wins += 1,
            Side::B => self.b_wins += 1,
        }
        if end == BattleEnd::Stalemate {
            self.stalemates += 1;
        }
        self
    }

    fn merge(self, other: Self) -> Self {
        Self {
            battles: self.battles + other.battles,
            a_wins: self.a_wins + other.a_wins,
            b_wins: self.b_wins + other.b_wins,
            stalemates: self.stalemates + other.stalemates,
        }
    }
}

impl BattleEngine {
    /// Runs `battles` independent battles of `a` against `b` in parallel.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::InvalidCombatant`] if either combatant is invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use chainmon_core::{BattleEngine, Combatant, Rarity};
    ///
    /// let engine = BattleEngine::new();
    /// let a = Combatant::new("Ember", "Dragon", 30, 8, 90, Rarity::Epic);
    /// let b = Combatant::new("Stripes", "Tiger", 28, 10, 100, Rarity::Rare);
    ///
    /// let report = engine.simulate_series(&a, &b, 7, 64).unwrap();
    /// assert_eq!(report.battles, 64);
    /// assert_eq!(report.a_wins + report.b_wins, 64);
    /// assert_eq!(report, engine.simulate_series(&a, &b, 7, 64).unwrap());
    /// ```
    pub fn simulate_series(
        &self,
        a: &Combatant,
        b: &Combatant,
        seed: u64,
        battles: u32,
    ) -> Result<SeriesReport, BattleError> {
        a.validate()?;
        b.validate()?;

        let report = (0..battles)
            .into_par_iter()
            .map(|index| {
                let mut rng = SeededRng::for_stream(seed, u64::from(index));
                self.run(a, b, &mut rng)
                    .map(|outcome| SeriesReport::default().record(outcome.winner_side, outcome.end))
            })
            .try_reduce(SeriesReport::default, |left, right| Ok(left.merge(right)))?;

        debug!(
            seed,
            battles,
            a_wins = report.a_wins,
            b_wins = report.b_wins,
            stalemates = report.stalemates,
            "series finished"
        );
        Ok(report)
    }
}
