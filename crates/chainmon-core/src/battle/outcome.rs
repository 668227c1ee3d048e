//! Battle results: who won, how it ended, and what happened each turn.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::damage::StatusEffects;
use crate::monster::Combatant;

/// Which of the two combatants passed to a battle.
///
/// `A` is the first argument and always acts first in a round.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// First combatant (challenger).
    A,
    /// Second combatant (opponent).
    B,
}

impl Side {
    /// Returns the other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Index into a two-element `[A, B]` array.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// How a battle ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleEnd {
    /// One combatant was reduced to zero hp.
    Knockout,
    /// The round limit was reached with both combatants standing; the winner
    /// has the higher remaining hp, ties going to side A.
    Stalemate,
}

/// Structured record of a single turn. One per move log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// 1-based round the turn belongs to.
    pub round: u32,
    /// Side that acted.
    pub actor: Side,
    /// Move used.
    pub move_name: String,
    /// Damage dealt, before display truncation.
    pub damage: f64,
    /// Status effects inflicted.
    pub status: StatusEffects,
    /// Target hp after the hit.
    pub target_hp: f64,
}

/// Result of one battle.
///
/// `winner` and `loser` hold the combatants' final state. `log` holds one line
/// per turn in order, followed by a cutoff notice if the battle stalemated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleOutcome {
    /// Winning combatant, final hp.
    pub winner: Combatant,
    /// Losing combatant, final hp.
    pub loser: Combatant,
    /// Side the winner was passed as.
    pub winner_side: Side,
    /// How the battle ended.
    pub end: BattleEnd,
    /// Rounds started (a knockout mid-round counts the round).
    pub rounds: u32,
    /// One record per turn taken.
    pub turns: Vec<TurnRecord>,
    /// Human-readable battle log.
    pub log: Vec<String>,
}

impl BattleOutcome {
    /// Returns true if the battle was cut off at the round limit.
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        self.end == BattleEnd::Stalemate
    }

    /// One-line result suitable for a chat message.
    #[must_use]
    pub fn summary(&self) -> String {
        match self.end {
            BattleEnd::Knockout => {
                format!("{} wins against {}!", self.winner.name, self.loser.name)
            }
            BattleEnd::Stalemate => format!(
                "{} outlasts {} after {} rounds!",
                self.winner.name, self.loser.name, self.rounds
            ),
        }
    }
}
