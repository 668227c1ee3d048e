//! Monster records and battle-scoped combatant snapshots.
//!
//! - [`TokenId`]: on-chain token identifier
//! - [`Monster`]: the record the monster-data provider reads from the chain
//! - [`Combatant`]: a validated, battle-scoped copy of a monster's combat stats
//!
//! A [`Monster`] is raw external data and is never trusted: numeric fields are
//! signed and rarity is a free-form string. Conversion into a [`Combatant`]
//! (or evaluation by the trade validator) is where that data gets checked.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{BattleError, ParseRarityError};
use crate::rarity::Rarity;
use crate::rng::BattleRng;

/// Attack range of a freshly minted monster.
pub const MINT_ATTACK: RangeInclusive<i64> = 10..=50;
/// Defense range of a freshly minted monster.
pub const MINT_DEFENSE: RangeInclusive<i64> = 5..=30;
/// HP range of a freshly minted monster.
pub const MINT_HP: RangeInclusive<i64> = 50..=100;

/// On-chain token identifier of a minted monster.
///
/// # Example
///
/// ```
/// use chainmon_core::TokenId;
///
/// let id = TokenId::new(42);
/// assert_eq!(id.as_u64(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(u64);

impl TokenId {
    /// Creates a `TokenId` from the raw token number.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw token number.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenId({})", self.0)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TokenId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// A minted monster as read from the chain.
///
/// Field names follow the contract's tuple layout; `species` is serialized as
/// `type` to match it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    /// Token identifier.
    pub token_id: TokenId,
    /// Display name.
    pub name: String,
    /// Species tag selecting the moveset.
    #[serde(rename = "type")]
    pub species: String,
    /// Attack stat.
    pub attack: i64,
    /// Defense stat.
    pub defense: i64,
    /// Maximum HP.
    pub hp: i64,
    /// Rarity tier name, unvalidated.
    pub rarity: String,
    /// Owning wallet address, when known.
    #[serde(default)]
    pub owner: Option<String>,
    /// Metadata URI, when known.
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl Monster {
    /// Creates a monster record with no owner or metadata URI.
    #[must_use]
    pub fn new(
        token_id: u64,
        name: impl Into<String>,
        species: impl Into<String>,
        attack: i64,
        defense: i64,
        hp: i64,
        rarity: impl Into<String>,
    ) -> Self {
        Self {
            token_id: TokenId::new(token_id),
            name: name.into(),
            species: species.into(),
            attack,
            defense,
            hp,
            rarity: rarity.into(),
            owner: None,
            token_uri: None,
        }
    }

    /// Rolls stats for a new mint.
    ///
    /// Attack, defense, and hp are drawn uniformly from [`MINT_ATTACK`],
    /// [`MINT_DEFENSE`], and [`MINT_HP`], then the rarity uniformly from all
    /// four tiers. Exactly four rolls are consumed, in that order.
    ///
    /// # Example
    ///
    /// ```
    /// use chainmon_core::{Monster, SeededRng};
    ///
    /// let first = Monster::roll(9, "Sprout", "Basic", &mut SeededRng::new(3));
    /// let again = Monster::roll(9, "Sprout", "Basic", &mut SeededRng::new(3));
    /// assert_eq!(first, again);
    /// assert!((10..=50).contains(&first.attack));
    /// assert!(first.rarity().is_ok());
    /// ```
    #[must_use]
    pub fn roll<R: BattleRng + ?Sized>(
        token_id: u64,
        name: impl Into<String>,
        species: impl Into<String>,
        rng: &mut R,
    ) -> Self {
        let attack = roll_stat(rng, &MINT_ATTACK);
        let defense = roll_stat(rng, &MINT_DEFENSE);
        let hp = roll_stat(rng, &MINT_HP);
        let rarity = Rarity::ALL[rng.pick_index(Rarity::ALL.len())];
        Self::new(token_id, name, species, attack, defense, hp, rarity.as_str())
    }

    /// Sets the owning wallet address.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Parses the rarity field.
    ///
    /// # Errors
    ///
    /// Returns [`ParseRarityError`] if the field is not a known tier.
    pub fn rarity(&self) -> Result<Rarity, ParseRarityError> {
        self.rarity.parse()
    }
}

fn roll_stat<R: BattleRng + ?Sized>(rng: &mut R, range: &RangeInclusive<i64>) -> i64 {
    let span = usize::try_from(range.end() - range.start() + 1).unwrap_or(1);
    range.start() + i64::try_from(rng.pick_index(span)).unwrap_or(0)
}

/// Battle-scoped snapshot of a monster's combat stats.
///
/// `hp` is fractional because some moves scale damage by non-integer factors;
/// it is clamped at zero and never goes negative. `attack` and `defense` are
/// static for the duration of a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    /// Display name used in the battle log.
    pub name: String,
    /// Species tag selecting the moveset.
    pub species: String,
    /// Attack stat.
    pub attack: i64,
    /// Defense stat.
    pub defense: i64,
    /// Current health.
    pub hp: f64,
    /// Health at the start of the battle.
    pub max_hp: f64,
    /// Rarity tier.
    pub rarity: Rarity,
}

impl Combatant {
    /// Creates a combatant at full health.
    ///
    /// No validation happens here; [`BattleEngine::run`](crate::BattleEngine::run)
    /// rejects invalid stats before the first turn.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(
        name: impl Into<String>,
        species: impl Into<String>,
        attack: i64,
        defense: i64,
        hp: i64,
        rarity: Rarity,
    ) -> Self {
        Self {
            name: name.into(),
            species: species.into(),
            attack,
            defense,
            hp: hp as f64,
            max_hp: hp as f64,
            rarity,
        }
    }

    /// Builds a validated combatant from an on-chain monster record.
    ///
    /// # Errors
    ///
    /// - [`BattleError::InvalidRarity`] if the rarity string is unknown
    /// - [`BattleError::InvalidCombatant`] if the stats fail [`Combatant::validate`]
    pub fn from_monster(monster: &Monster) -> Result<Self, BattleError> {
        let rarity = monster
            .rarity()
            .map_err(|source| BattleError::InvalidRarity {
                name: monster.name.clone(),
                source,
            })?;
        let combatant = Self::new(
            monster.name.clone(),
            monster.species.clone(),
            monster.attack,
            monster.defense,
            monster.hp,
            rarity,
        );
        combatant.validate()?;
        Ok(combatant)
    }

    /// Checks the battle preconditions: positive finite hp, non-negative
    /// attack and defense.
    ///
    /// # Errors
    ///
    /// Returns [`BattleError::InvalidCombatant`] naming the first failed check.
    pub fn validate(&self) -> Result<(), BattleError> {
        let reason = if !self.hp.is_finite() || self.hp <= 0.0 {
            format!("hp must be positive, got {}", self.hp)
        } else if self.attack < 0 {
            format!("attack must be non-negative, got {}", self.attack)
        } else if self.defense < 0 {
            format!("defense must be non-negative, got {}", self.defense)
        } else {
            return Ok(());
        };
        Err(BattleError::InvalidCombatant {
            name: self.name.clone(),
            reason,
        })
    }

    /// Returns true once hp has reached zero.
    #[must_use]
    pub fn is_fainted(&self) -> bool {
        self.hp <= 0.0
    }

    /// Returns current health as a fraction of starting health, `[0, 1]`.
    #[must_use]
    pub fn health_pct(&self) -> f64 {
        if self.max_hp > 0.0 {
            (self.hp / self.max_hp).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Subtracts damage from hp, clamping at zero.
    pub(crate) fn take_damage(&mut self, amount: f64) {
        self.hp = (self.hp - amount).max(0.0);
    }
}
