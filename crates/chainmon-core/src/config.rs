//! Tunable battle and trade parameters.
//!
//! Defaults reproduce the shipped game balance. A [`CoreConfig`] can be loaded
//! from JSON; every field is optional and falls back to its default.
//!
//! ```
//! use chainmon_core::CoreConfig;
//!
//! let config = CoreConfig::from_json(r#"{ "battle": { "max_rounds": 50 } }"#).unwrap();
//! assert_eq!(config.battle.max_rounds, 50);
//! assert_eq!(config.trade.max_rarity_gap, 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Battle balance parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Rounds (A then B) before a battle is cut off as a stalemate.
    pub max_rounds: u32,
    /// Probability that a critical-type move crits.
    pub critical_chance: f64,
    /// Damage multiplier of a critical strike.
    pub critical_multiplier: f64,
    /// Damage multiplier of a blaze-type move.
    pub blaze_multiplier: f64,
    /// Probability that a blaze-type move burns.
    pub burn_chance: f64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_rounds: 1000,
            critical_chance: 0.3,
            critical_multiplier: 2.0,
            blaze_multiplier: 1.5,
            burn_chance: 0.3,
        }
    }
}

impl BattleConfig {
    /// Checks that every field is usable.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        for (field, value) in [
            ("critical_chance", self.critical_chance),
            ("burn_chance", self.burn_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ChanceOutOfRange { field, value });
            }
        }
        for (field, value) in [
            ("critical_multiplier", self.critical_multiplier),
            ("blaze_multiplier", self.blaze_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidMultiplier { field, value });
            }
        }
        Ok(())
    }
}

/// Trade gating parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeConfig {
    /// Largest allowed rarity-tier distance between traded monsters.
    pub max_rarity_gap: u8,
}

impl Default for TradeConfig {
    fn default() -> Self {
        Self { max_rarity_gap: 1 }
    }
}

/// Combined configuration for the core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Battle parameters.
    pub battle: BattleConfig,
    /// Trade parameters.
    pub trade: TradeConfig,
}

impl CoreConfig {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Parse`] if the document is not valid JSON for this shape
    /// - any validation error from [`BattleConfig::validate`]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.battle.validate()?;
        Ok(config)
    }
}
