//! Deterministic random number generation.
//!
//! Spawn behaviors roll debris counts and scatter offsets. Rolling them from
//! a seeded stream keeps every damage/heal sequence reproducible, which the
//! scenario tests depend on.
//!
//! ```
//! use destructible::core::SimRng;
//!
//! let mut a = SimRng::new(42);
//! let mut b = SimRng::new(42);
//! assert_eq!(a.gen_inclusive(1, 6), b.gen_inclusive(1, 6));
//!
//! // Independent streams for independent purposes
//! let mut spawns = a.for_context("spawn");
//! let roll = spawns.gen_inclusive(0, 10);
//! assert!(roll <= 10);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct SimRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SimRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Uniform integer in `[min, max]`, both inclusive.
    ///
    /// Returns `min` when the range is empty or degenerate.
    pub fn gen_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.inner.gen_range(min..=max)
    }

    /// Uniform offset in `[-extent, extent]`.
    ///
    /// Non-positive extents always produce `0.0`.
    pub fn gen_offset(&mut self, extent: f32) -> f32 {
        if extent <= 0.0 || !extent.is_finite() {
            return 0.0;
        }
        self.inner.gen_range(-extent..=extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = SimRng::new(42);
        let mut rng2 = SimRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_inclusive(0, 1000), rng2.gen_inclusive(0, 1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = SimRng::new(1);
        let mut rng2 = SimRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_inclusive(0, 1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_inclusive(0, 1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_inclusive_bounds() {
        let mut rng = SimRng::new(7);
        let mut seen_min = false;
        let mut seen_max = false;

        for _ in 0..500 {
            let roll = rng.gen_inclusive(2, 4);
            assert!((2..=4).contains(&roll));
            seen_min |= roll == 2;
            seen_max |= roll == 4;
        }

        assert!(seen_min && seen_max, "both ends of the range should be reachable");
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = SimRng::new(7);
        assert_eq!(rng.gen_inclusive(3, 3), 3);
        assert_eq!(rng.gen_inclusive(5, 1), 5);
    }

    #[test]
    fn test_offset_bounds() {
        let mut rng = SimRng::new(9);
        for _ in 0..200 {
            let dx = rng.gen_offset(0.5);
            assert!((-0.5..=0.5).contains(&dx));
        }
        assert_eq!(rng.gen_offset(0.0), 0.0);
        assert_eq!(rng.gen_offset(-1.0), 0.0);
        assert_eq!(rng.gen_offset(f32::NAN), 0.0);
    }

    #[test]
    fn test_context_streams() {
        let rng = SimRng::new(42);
        let mut a1 = rng.for_context("spawn");
        let mut a2 = rng.for_context("spawn");
        let mut b = rng.for_context("scatter");

        let seq_a1: Vec<_> = (0..10).map(|_| a1.gen_inclusive(0, 1000)).collect();
        let seq_a2: Vec<_> = (0..10).map(|_| a2.gen_inclusive(0, 1000)).collect();
        let seq_b: Vec<_> = (0..10).map(|_| b.gen_inclusive(0, 1000)).collect();

        assert_eq!(seq_a1, seq_a2);
        assert_ne!(seq_a1, seq_b);
    }
}
