//! Injected randomness for battles.
//!
//! Every random decision in a battle (move selection, critical strikes, burn
//! procs) draws from a [`BattleRng`] supplied by the caller. Production code
//! uses [`SeededRng`], a ChaCha8 stream that can be replayed from its seed;
//! tests supply fixed or scripted sequences.
//!
//! # Roll contract
//!
//! A roll is a value in `[0, 1)`. A chance `p` triggers iff the roll is
//! strictly below `p`, so a chance of `0.0` never triggers and `1.0` always
//! does. Picking one of `len` items maps the roll `r` to `floor(r * len)`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform rolls for battle decisions.
///
/// Implementations must be deterministic for a given internal state. A single
/// instance must not be shared across concurrent battles without external
/// synchronization; the `&mut self` receivers enforce this at compile time.
pub trait BattleRng {
    /// Returns a uniformly distributed value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Picks an index in `0..len` uniformly.
    ///
    /// Returns `0` when `len` is zero; callers never pass an empty collection.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn pick_index(&mut self, len: usize) -> usize {
        let scaled = (self.next_unit() * len as f64) as usize;
        scaled.min(len.saturating_sub(1))
    }

    /// Rolls against `chance`, returning true when it triggers.
    fn roll(&mut self, chance: f64) -> bool {
        self.next_unit() < chance
    }
}

/// Deterministic ChaCha8-backed RNG that remembers its seed.
///
/// # Example
///
/// ```
/// use chainmon_core::{BattleRng, SeededRng};
///
/// let mut a = SeededRng::new(42);
/// let mut b = SeededRng::new(42);
/// assert_eq!(a.next_unit(), b.next_unit());
/// assert_eq!(a.seed(), 42);
/// ```
#[derive(Debug, Clone)]
pub struct SeededRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SeededRng {
    /// Creates an RNG seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates an RNG on an independent stream of the same seed.
    ///
    /// Streams never overlap, so battle `i` of a series can use stream `i`
    /// and stay reproducible no matter which thread runs it.
    #[must_use]
    pub fn for_stream(seed: u64, stream: u64) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(seed);
        inner.set_stream(stream);
        Self { inner, seed }
    }

    /// Creates an RNG from a freshly drawn seed.
    ///
    /// The seed is still recorded, so the battle can be replayed later.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Returns the seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl BattleRng for SeededRng {
    fn next_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f64);

    impl BattleRng for Constant {
        fn next_unit(&mut self) -> f64 {
            self.0
        }
    }

    #[test]
    fn seeded_sequences_repeat() {
        let mut a = SeededRng::new(12345);
        let mut b = SeededRng::new(12345);
        for _ in 0..32 {
            assert_eq!(a.next_unit(), b.next_unit());
        }
    }

    #[test]
    fn units_stay_in_range() {
        let mut rng = SeededRng::new(1);
        for _ in 0..1000 {
            let value = rng.next_unit();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn streams_diverge() {
        let mut a = SeededRng::for_stream(7, 0);
        let mut b = SeededRng::for_stream(7, 1);
        let first: Vec<f64> = (0..8).map(|_| a.next_unit()).collect();
        let second: Vec<f64> = (0..8).map(|_| b.next_unit()).collect();
        assert_ne!(first, second);
        assert_eq!(b.seed(), 7);
    }

    #[test]
    fn pick_index_maps_roll_to_bucket() {
        assert_eq!(Constant(0.0).pick_index(5), 0);
        assert_eq!(Constant(0.9).pick_index(5), 4);
        assert_eq!(Constant(0.39).pick_index(5), 1);
        assert_eq!(Constant(0.999_999).pick_index(3), 2);
        assert_eq!(Constant(0.5).pick_index(0), 0);
    }

    #[test]
    fn roll_is_strictly_below_chance() {
        assert!(Constant(0.29).roll(0.3));
        assert!(!Constant(0.3).roll(0.3));
        assert!(!Constant(0.0).roll(0.0));
        assert!(Constant(0.999).roll(1.0));
    }
}
