//! Trade validation.
//!
//! Two monsters may be swapped when their rarity tiers are at most
//! `max_rarity_gap` apart (one tier by default). The validator only decides;
//! transferring ownership on-chain is the caller's job.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TradeConfig;
use crate::error::TradeError;
use crate::monster::{Monster, TokenId};
use crate::rarity::Rarity;

/// Rejection reason for trades whose rarities are too far apart.
pub const RARITY_MISMATCH: &str = "rarity mismatch";

/// Decision on a proposed trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TradeOutcome {
    /// The swap is allowed; the caller should transfer both tokens.
    Accepted {
        /// Token offered by the initiating player.
        offered: TokenId,
        /// Token requested in return.
        requested: TokenId,
    },
    /// The swap is not allowed.
    Rejected {
        /// Why the trade was refused.
        reason: String,
    },
}

impl TradeOutcome {
    /// Returns true if the trade may proceed.
    #[must_use]
    pub fn accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Returns the rejection reason, if rejected.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Accepted { .. } => None,
            Self::Rejected { reason } => Some(reason),
        }
    }
}

/// Stateless rarity-gap rule for trades.
///
/// # Example
///
/// ```
/// use chainmon_core::{Monster, TradeValidator};
///
/// let validator = TradeValidator::new();
/// let common = Monster::new(1, "Pup", "Basic", 10, 5, 30, "common");
/// let legendary = Monster::new(2, "Wyrm", "Dragon", 90, 40, 300, "legendary");
///
/// let outcome = validator.execute(&common, &legendary).unwrap();
/// assert!(!outcome.accepted());
/// assert_eq!(outcome.reason(), Some("rarity mismatch"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TradeValidator {
    config: TradeConfig,
}

impl TradeValidator {
    /// Creates a validator with the default one-tier gap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator with a custom configuration.
    #[must_use]
    pub fn with_config(config: TradeConfig) -> Self {
        Self { config }
    }

    /// Returns true if two tiers are close enough to trade.
    #[must_use]
    pub fn rarities_compatible(&self, first: Rarity, second: Rarity) -> bool {
        first.distance(second) <= self.config.max_rarity_gap
    }

    /// Returns true if the two monsters may be traded.
    ///
    /// # Errors
    ///
    /// Returns [`TradeError::InvalidRarity`] if either rarity is not a known tier.
    pub fn validate(&self, first: &Monster, second: &Monster) -> Result<bool, TradeError> {
        Ok(self.rarities_compatible(rarity_of(first)?, rarity_of(second)?))
    }

    /// Decides a trade of `offered` for `requested`.
    ///
    /// # Errors
    ///
    /// Returns [`TradeError::InvalidRarity`] if either rarity is not a known tier.
    pub fn execute(&self, offered: &Monster, requested: &Monster) -> Result<TradeOutcome, TradeError> {
        let outcome = if self.validate(offered, requested)? {
            TradeOutcome::Accepted {
                offered: offered.token_id,
                requested: requested.token_id,
            }
        } else {
            TradeOutcome::Rejected {
                reason: RARITY_MISMATCH.to_string(),
            }
        };

        debug!(
            offered = %offered.token_id,
            requested = %requested.token_id,
            accepted = outcome.accepted(),
            "trade evaluated"
        );
        Ok(outcome)
    }
}

fn rarity_of(monster: &Monster) -> Result<Rarity, TradeError> {
    monster.rarity().map_err(|source| TradeError::InvalidRarity {
        token_id: monster.token_id,
        source,
    })
}
