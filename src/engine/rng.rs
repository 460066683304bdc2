//! Deterministic random number generation.
//!
//! The one intentionally non-deterministic operation in the engine is the
//! drawing of initial orbital phases at catalog construction and reset. The
//! randomness source is an explicit, injectable generator rather than an
//! ambient call: seed it and every construct/reset sequence replays
//! bit-for-bit; build it from entropy and you get the casual behavior of a
//! screensaver orrery.

use rand::prelude::*;
use rand_pcg::Pcg64;

use crate::catalog::body::TAU;

/// Deterministic, reproducible random number generator.
///
/// Based on PCG (Permuted Congruential Generator): good statistical
/// properties, fast, and fully determined by its seed.
#[derive(Debug, Clone)]
pub struct SimRng {
    /// Seed this generator was created from, if seeded.
    seed: Option<u64>,
    /// Internal PCG state.
    rng: Pcg64,
}

impl SimRng {
    /// Create a seeded generator. Same seed, same sequence, every platform.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Create a generator seeded from OS entropy.
    ///
    /// Runs are not replayable; use [`SimRng::new`] for that.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            seed: None,
            rng: Pcg64::from_entropy(),
        }
    }

    /// The seed this generator was created from, if it was seeded.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Generate a random f64 in [0, 1).
    pub fn gen_f64(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Generate a random f64 in the given range.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn gen_range_f64(&mut self, min: f64, max: f64) -> f64 {
        assert!(min <= max, "Invalid range: min > max");
        min + (max - min) * self.gen_f64()
    }

    /// Generate a random orbital phase, uniform over [0, 2π).
    pub fn gen_angle(&mut self) -> f64 {
        self.gen_range_f64(0.0, TAU)
    }
}
