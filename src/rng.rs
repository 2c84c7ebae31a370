//! Bounded random integers with no modulo bias.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::OsRng;
use rand::{RngCore, SeedableRng, TryRngCore};
use rand_chacha::ChaCha8Rng;

enum Backend {
    /// Operating-system entropy.
    Os,
    /// Deterministic generator, used for seeded runs and as the fallback
    /// when no OS entropy source is available.
    Chacha(ChaCha8Rng),
}

/// Uniform bounded-integer generator.
///
/// Draws from the operating system's entropy source when one is available and
/// degrades to a [`ChaCha8Rng`] seeded from the wall clock otherwise. Bounded
/// draws use rejection sampling, so every value in `[0, bound)` is equally
/// likely regardless of the bound.
pub struct RandomSource {
    backend: Backend,
}

impl RandomSource {
    /// Creates a generator backed by OS entropy, degrading to a time-seeded
    /// pseudo-random generator if the probe draw fails.
    #[must_use]
    pub fn new() -> Self {
        match OsRng.try_next_u32() {
            Ok(_) => Self { backend: Backend::Os },
            Err(err) => {
                tracing::warn!(%err, "no OS entropy source, falling back to ChaCha8");
                Self {
                    backend: Backend::Chacha(ChaCha8Rng::seed_from_u64(clock_seed())),
                }
            }
        }
    }

    /// Creates a deterministic generator for replays and tests.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            backend: Backend::Chacha(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    fn next_u32(&mut self) -> u32 {
        match &mut self.backend {
            Backend::Os => match OsRng.try_next_u32() {
                Ok(word) => word,
                Err(err) => {
                    tracing::warn!(%err, "OS entropy source failed mid-stream, degrading");
                    let mut rng = ChaCha8Rng::seed_from_u64(clock_seed());
                    let word = rng.next_u32();
                    self.backend = Backend::Chacha(rng);
                    word
                }
            },
            Backend::Chacha(rng) => rng.next_u32(),
        }
    }

    /// Returns a uniform integer in `[0, bound)`.
    ///
    /// Uses rejection sampling: draws at or above the largest multiple of
    /// `bound` not exceeding 2^32 are discarded and retried.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero.
    pub fn next_bounded(&mut self, bound: u32) -> u32 {
        assert!(bound > 0, "bound must be positive");

        let limit = (1u64 << 32) / u64::from(bound) * u64::from(bound);
        loop {
            let word = self.next_u32();
            if u64::from(word) < limit {
                return word % bound;
            }
        }
    }

    /// `next_bounded` for index arithmetic.
    ///
    /// # Panics
    ///
    /// Panics if `bound` is zero or does not fit in a `u32`.
    pub fn next_index(&mut self, bound: usize) -> usize {
        let bound = u32::try_from(bound).expect("bound must fit in u32");
        self.next_bounded(bound) as usize
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}
