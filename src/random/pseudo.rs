//! Pseudo-random sources
//!
//! `PseudoSource` draws from the `rand` crate's thread-local RNG for normal
//! use. `SeededPseudoSource` is reproducible for tests and for `--seed`.

use crate::random::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Pseudo-random source backed by rand's ThreadRng
#[derive(Debug, Default)]
pub struct PseudoSource;

impl PseudoSource {
    /// Create a new pseudo-random source
    pub fn new() -> Self {
        Self
    }
}

impl RandomSource for PseudoSource {
    fn name(&self) -> &'static str {
        "pseudo"
    }

    fn float(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }

    // Override for efficiency - one thread_rng handle for the whole run
    fn floats(&self, n: usize) -> Vec<f64> {
        let mut rng = rand::thread_rng();
        (0..n).map(|_| rng.gen::<f64>()).collect()
    }
}

/// Seeded pseudo-random source for deterministic runs
#[derive(Debug)]
pub struct SeededPseudoSource {
    rng: Mutex<StdRng>,
}

impl SeededPseudoSource {
    /// Create a new seeded source
    ///
    /// Using the same seed will produce the same sequence of random values.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededPseudoSource {
    fn name(&self) -> &'static str {
        "pseudo-seeded"
    }

    fn float(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen::<f64>()
    }

    fn floats(&self, n: usize) -> Vec<f64> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        (0..n).map(|_| rng.gen::<f64>()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pseudo_source_floats() {
        let source = PseudoSource::new();
        let floats = source.floats(100);
        assert_eq!(floats.len(), 100);
        for f in &floats {
            assert!(*f >= 0.0 && *f < 1.0);
        }
    }

    #[test]
    fn test_seeded_source_reproducible() {
        let source1 = SeededPseudoSource::new(42);
        let source2 = SeededPseudoSource::new(42);

        assert_eq!(source1.floats(100), source2.floats(100));
    }

    #[test]
    fn test_seeded_source_floats_in_range() {
        let source = SeededPseudoSource::new(12345);

        for f in source.floats(1000) {
            assert!((0.0..1.0).contains(&f), "Float {} out of range [0, 1)", f);
        }
    }
}
