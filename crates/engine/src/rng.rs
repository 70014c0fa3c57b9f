//! Session-scoped randomness
//!
//! Every draw the engine makes goes through a [`RandomSource`] injected per
//! combat/evaluation session. Nothing in the core reaches for a thread-local
//! generator, so a fixed seed yields a fully reproducible session.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The engine's only source of randomness.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource {
    /// Uniform integer draw in `[0, max]`; 0 when `max <= 0`.
    fn roll_int(&mut self, max: i64) -> i64;

    /// Uniform continuous draw in `[0, max]`; 0 when `max <= 0`.
    fn roll_float(&mut self, max: f64) -> f64;

    /// Uniform draw in `[0, 1)`.
    fn unit(&mut self) -> f64;
}

/// Standard randomness backed by a seeded [`StdRng`].
///
/// The generator is seeded once per session and never re-seeded.
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl RandomSource for StdRandom {
    fn roll_int(&mut self, max: i64) -> i64 {
        if max <= 0 {
            return 0;
        }
        self.rng.gen_range(0..=max)
    }

    fn roll_float(&mut self, max: f64) -> f64 {
        if max <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(0.0..=max)
    }

    fn unit(&mut self) -> f64 {
        self.rng.gen()
    }
}
