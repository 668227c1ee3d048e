//! # Chainmon Core
//!
//! Battle resolution and trade validation for the chainmon collectible-monster
//! game.
//!
//! Monsters live on-chain; a chat front end fetches their stats and hands them
//! to this crate. Everything here is pure computation over in-memory values:
//! no I/O, no global state, no session tracking.
//!
//! ## Components
//!
//! - [`MoveCatalog`]: species → moveset table with a guaranteed fallback species
//! - [`BattleEngine`]: the turn loop, damage rule, and stalemate cutoff
//! - [`TradeValidator`]: the rarity-gap rule gating monster trades
//!
//! ## Usage
//!
//! ```
//! use chainmon_core::{BattleEngine, Combatant, Rarity, SeededRng};
//!
//! let engine = BattleEngine::new();
//! let tiger = Combatant::new("Stripes", "Tiger", 50, 10, 100, Rarity::Rare);
//! let pup = Combatant::new("Pup", "Basic", 10, 5, 30, Rarity::Common);
//!
//! let mut rng = SeededRng::new(7);
//! let outcome = engine.run(&tiger, &pup, &mut rng).unwrap();
//! assert_eq!(outcome.winner.name, "Stripes");
//! ```
//!
//! ## Determinism
//!
//! All randomness flows through a caller-supplied [`BattleRng`]. The same
//! combatants, configuration, and RNG sequence always produce the same
//! [`BattleOutcome`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod battle;
pub mod catalog;
pub mod config;
pub mod error;
pub mod monster;
pub mod rarity;
pub mod rng;
pub mod trade;

pub use battle::{
    compute_damage, BattleEnd, BattleEngine, BattleOutcome, MoveResult, SeriesReport, Side,
    StatusEffects, TurnRecord,
};
pub use catalog::{DamageRule, Move, MoveCatalog, MoveCatalogBuilder};
pub use config::{BattleConfig, CoreConfig, TradeConfig};
pub use error::{BattleError, ConfigError, ParseRarityError, TradeError};
pub use monster::{Combatant, Monster, TokenId, MINT_ATTACK, MINT_DEFENSE, MINT_HP};
pub use rarity::Rarity;
pub use rng::{BattleRng, SeededRng};
pub use trade::{TradeOutcome, TradeValidator, RARITY_MISMATCH};

#[cfg(test)]
mod tests;
