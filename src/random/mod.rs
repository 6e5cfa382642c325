//! Random sources for supplier creation
//!
//! This module defines the `RandomSource` trait and its implementations.
//! Randomness is only consulted when a batch is created (counts, names,
//! target distances, ratings). Everything derived afterwards is a pure
//! function of what creation baked in.

pub mod pseudo;

/// Trait for random number sources
///
/// Implementations must be thread-safe (Send + Sync) so an engine can sit
/// behind the async server's shared state.
pub trait RandomSource: Send + Sync {
    /// Returns the source name (e.g., "pseudo", "pseudo-seeded")
    fn name(&self) -> &'static str;

    /// Generate a single random float uniformly distributed in [0.0, 1.0)
    fn float(&self) -> f64;

    /// Generate n random floats, each uniformly distributed in [0.0, 1.0)
    ///
    /// Default implementation calls float() n times.
    fn floats(&self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.float()).collect()
    }

    /// Uniform integer in `[min, max]` (inclusive). Returns `min` if `max < min`.
    fn range_usize(&self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        // float() < 1.0 keeps this below span
        min + ((self.float() * span as f64) as usize).min(span - 1)
    }

    /// Uniform float in `[min, max)`
    fn range_f64(&self, min: f64, max: f64) -> f64 {
        min + self.float() * (max - min)
    }

    /// Pick `count` distinct indices from `0..len`, in draw order
    ///
    /// Partial Fisher-Yates. `count` is clamped to `len`.
    fn pick_distinct(&self, count: usize, len: usize) -> Vec<usize> {
        let count = count.min(len);
        let mut indices: Vec<usize> = (0..len).collect();

        for i in 0..count {
            let j = self.range_usize(i, len - 1);
            indices.swap(i, j);
        }

        indices.truncate(count);
        indices
    }
}

/// Get a random source, seeded when a seed is given
pub fn get_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(pseudo::SeededPseudoSource::new(seed)),
        None => Box::new(pseudo::PseudoSource::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::pseudo::SeededPseudoSource;
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_range_usize_inclusive_bounds() {
        let source = SeededPseudoSource::new(7);
        let mut seen = HashSet::new();

        for _ in 0..500 {
            let n = source.range_usize(3, 5);
            assert!((3..=5).contains(&n));
            seen.insert(n);
        }

        assert_eq!(seen.len(), 3, "every value in [3, 5] should come up");
    }

    #[test]
    fn test_range_usize_degenerate() {
        let source = SeededPseudoSource::new(7);
        assert_eq!(source.range_usize(5, 5), 5);
        assert_eq!(source.range_usize(5, 2), 5);
    }

    #[test]
    fn test_range_f64_within_band() {
        let source = SeededPseudoSource::new(99);
        for _ in 0..500 {
            let d = source.range_f64(0.3, 2.0);
            assert!((0.3..2.0).contains(&d));
        }
    }

    #[test]
    fn test_pick_distinct() {
        let source = SeededPseudoSource::new(1);

        let picked = source.pick_distinct(5, 25);
        assert_eq!(picked.len(), 5);

        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), 5);
        assert!(picked.iter().all(|&i| i < 25));
    }

    #[test]
    fn test_pick_distinct_clamps_to_len() {
        let source = SeededPseudoSource::new(1);

        let mut picked = source.pick_distinct(10, 4);
        picked.sort_unstable();
        assert_eq!(picked, vec![0, 1, 2, 3]);

        assert!(source.pick_distinct(3, 0).is_empty());
    }

    #[test]
    fn test_get_source() {
        assert_eq!(get_source(None).name(), "pseudo");
        assert_eq!(get_source(Some(42)).name(), "pseudo-seeded");
    }
}
