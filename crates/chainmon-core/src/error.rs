//! Error types for catalog construction, battles, trades, and configuration.
//!
//! Expected game outcomes (a loss, a stalemate, a rejected trade) are values,
//! not errors. The variants here cover malformed input only: data that should
//! never have reached the core and that the chat layer must turn into a
//! user-facing message.

use thiserror::Error;

use crate::monster::TokenId;

/// A rarity string that is not one of `common`, `rare`, `epic`, `legendary`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rarity `{value}` (expected common, rare, epic or legendary)")]
pub struct ParseRarityError {
    /// The offending input, as received.
    pub value: String,
}

/// Errors raised while building a move catalog or starting a battle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    /// A species lookup found neither the species nor a fallback moveset.
    ///
    /// A built [`MoveCatalog`](crate::MoveCatalog) always has a fallback, so
    /// this only surfaces from [`MoveCatalogBuilder::build`](crate::MoveCatalogBuilder::build).
    #[error("unknown species `{species}` and no fallback moveset is registered")]
    UnknownSpecies {
        /// The species that could not be resolved.
        species: String,
    },

    /// A species was registered without any moves.
    #[error("species `{species}` has an empty moveset")]
    EmptyMoveset {
        /// The species with no moves.
        species: String,
    },

    /// Combatant stats violate the battle preconditions.
    #[error("invalid combatant `{name}`: {reason}")]
    InvalidCombatant {
        /// Display name of the rejected combatant.
        name: String,
        /// Which precondition failed.
        reason: String,
    },

    /// The monster record carried a rarity outside the known tiers.
    #[error("monster `{name}` has invalid rarity: {source}")]
    InvalidRarity {
        /// Display name of the monster.
        name: String,
        /// The underlying parse failure.
        source: ParseRarityError,
    },
}

/// Errors raised while evaluating a trade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradeError {
    /// One of the monsters carried a rarity outside the known tiers.
    #[error("token {token_id} has invalid rarity: {source}")]
    InvalidRarity {
        /// Token whose rarity failed to parse.
        token_id: TokenId,
        /// The underlying parse failure.
        source: ParseRarityError,
    },
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A probability fell outside `[0, 1]`.
    #[error("`{field}` must be within [0, 1], got {value}")]
    ChanceOutOfRange {
        /// Name of the config field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A damage multiplier was negative or not finite.
    #[error("`{field}` must be a finite, non-negative multiplier, got {value}")]
    InvalidMultiplier {
        /// Name of the config field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// `max_rounds` was zero, which would end every battle before it starts.
    #[error("`max_rounds` must be at least 1")]
    ZeroRounds,

    /// The configuration document could not be parsed.
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
