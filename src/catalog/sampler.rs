//! Batch sampling
//!
//! `NamePool` tracks which names have been handed out since the last reset
//! so two batches shown one after the other don't repeat names.
//! `EntitySampler` owns a pool and turns a reference point into a batch of
//! placed suppliers.
//!
//! `sample_entities` takes `&mut self`: read, recycle, draw and mark happen
//! as one unit. Share a sampler across threads behind a lock, never by
//! splitting those steps.

use crate::catalog::SUPPLIER_NAMES;
use crate::coord::Coordinates;
use crate::random::RandomSource;
use crate::supplier::{PlacedSupplier, Supplier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Inclusive distance band suppliers are placed in, in kilometers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceBand {
    pub min_km: f64,
    pub max_km: f64,
}

impl Default for DistanceBand {
    fn default() -> Self {
        Self {
            min_km: 0.3,
            max_km: 2.0,
        }
    }
}

/// Finite name list plus the set drawn since the last reset
#[derive(Debug, Clone)]
pub struct NamePool {
    names: Vec<String>,
    used: HashSet<String>,
}

impl NamePool {
    /// Create a pool from a list of names (duplicates collapse)
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let names = names
            .into_iter()
            .map(Into::<String>::into)
            .filter(|name| seen.insert(name.clone()))
            .collect();

        Self {
            names,
            used: HashSet::new(),
        }
    }

    /// Pool backed by the built-in supplier names
    pub fn from_catalog() -> Self {
        Self::new(SUPPLIER_NAMES.iter().copied())
    }

    /// Total number of names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names drawn since the last reset
    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    /// Unused names, in pool order
    pub fn available(&self) -> Vec<&str> {
        self.names
            .iter()
            .filter(|name| !self.used.contains(name.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Record names as drawn
    pub fn mark_used<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.used.extend(names.into_iter().map(Into::<String>::into));
    }

    /// Forget every drawn name
    pub fn reset(&mut self) {
        self.used.clear();
    }
}

impl Default for NamePool {
    fn default() -> Self {
        Self::from_catalog()
    }
}

/// Draws batches of suppliers around a reference point
#[derive(Debug, Clone, Default)]
pub struct EntitySampler {
    pool: NamePool,
    distance_band: DistanceBand,
}

impl EntitySampler {
    /// Create a sampler over `pool`, placing suppliers within `distance_band`
    pub fn new(pool: NamePool, distance_band: DistanceBand) -> Self {
        Self {
            pool,
            distance_band,
        }
    }

    pub fn pool(&self) -> &NamePool {
        &self.pool
    }

    pub fn distance_band(&self) -> DistanceBand {
        self.distance_band
    }

    /// Sample a batch around `reference`, stamped with the current time
    pub fn sample_entities(
        &mut self,
        reference: Coordinates,
        min_count: usize,
        max_count: usize,
        rng: &dyn RandomSource,
    ) -> Vec<PlacedSupplier> {
        self.sample_entities_at(reference, min_count, max_count, Utc::now(), rng)
    }

    /// Sample a batch around `reference` with an explicit creation time
    ///
    /// # Algorithm
    /// 1. Draw a count in `[min_count, max_count]` (capped at the pool size)
    /// 2. If fewer names are unused than requested, reset the used set
    /// 3. Draw that many distinct unused names
    /// 4. Create and place a supplier per name, in draw order
    /// 5. Mark the names as used
    pub fn sample_entities_at(
        &mut self,
        reference: Coordinates,
        min_count: usize,
        max_count: usize,
        created_at: DateTime<Utc>,
        rng: &dyn RandomSource,
    ) -> Vec<PlacedSupplier> {
        let requested = rng
            .range_usize(min_count, max_count.max(min_count))
            .min(self.pool.len());

        if self.pool.available().len() < requested {
            debug!(
                used = self.pool.used_count(),
                requested,
                "Name pool exhausted, recycling"
            );
            self.pool.reset();
        }

        let names: Vec<String> = {
            let available = self.pool.available();
            rng.pick_distinct(requested, available.len())
                .into_iter()
                .map(|i| available[i].to_string())
                .collect()
        };

        let suppliers = names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let target = rng.range_f64(self.distance_band.min_km, self.distance_band.max_km);
                let supplier = Supplier::create(name, index, created_at, target, rng);
                PlacedSupplier::place(supplier, reference)
            })
            .collect();

        self.pool.mark_used(names);
        suppliers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::pseudo::SeededPseudoSource;
    use std::collections::HashSet;

    fn reference() -> Coordinates {
        Coordinates::new(9.0782, 126.1967)
    }

    #[test]
    fn test_pool_dedupes() {
        let pool = NamePool::new(["a", "b", "a"]);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_available_keeps_pool_order() {
        let mut pool = NamePool::new(["a", "b", "c", "d"]);
        pool.mark_used(["b"]);
        assert_eq!(pool.available(), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_count_within_band() {
        let source = SeededPseudoSource::new(11);
        let mut sampler = EntitySampler::default();

        for _ in 0..20 {
            let batch = sampler.sample_entities(reference(), 5, 8, &source);
            assert!((5..=8).contains(&batch.len()));
        }
    }

    #[test]
    fn test_names_unique_within_batch() {
        let source = SeededPseudoSource::new(11);
        let mut sampler = EntitySampler::default();

        let batch = sampler.sample_entities(reference(), 8, 8, &source);
        let names: HashSet<_> = batch.iter().map(|p| p.supplier.name.clone()).collect();
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn test_no_repeats_until_pool_resets() {
        let source = SeededPseudoSource::new(2024);
        let mut sampler = EntitySampler::default();
        let mut seen = HashSet::new();

        // 5 batches of 5 use up exactly the 25-name pool
        for _ in 0..5 {
            for placed in sampler.sample_entities(reference(), 5, 5, &source) {
                assert!(
                    seen.insert(placed.supplier.name.clone()),
                    "{} drawn twice before reset",
                    placed.supplier.name
                );
            }
        }

        assert_eq!(sampler.pool().used_count(), 25);
    }

    #[test]
    fn test_recycles_when_too_few_remain() {
        let source = SeededPseudoSource::new(8);
        let mut sampler = EntitySampler::default();

        // Leave exactly 3 names unused
        let names: Vec<&str> = SUPPLIER_NAMES.iter().copied().take(22).collect();
        sampler.pool.mark_used(names);
        assert_eq!(sampler.pool().available().len(), 3);

        let batch = sampler.sample_entities(reference(), 5, 5, &source);

        assert_eq!(batch.len(), 5);
        assert_eq!(sampler.pool().used_count(), 5);
    }

    #[test]
    fn test_distances_within_band() {
        let source = SeededPseudoSource::new(77);
        let mut sampler = EntitySampler::default();

        for placed in sampler.sample_entities(reference(), 8, 8, &source) {
            let target = placed.supplier.target_distance_km;
            assert!((0.3..2.0).contains(&target));
            assert!((placed.distance_km - target).abs() <= target * 0.01);
        }
    }

    #[test]
    fn test_indices_follow_draw_order() {
        let source = SeededPseudoSource::new(77);
        let mut sampler = EntitySampler::default();

        let batch = sampler.sample_entities(reference(), 6, 6, &source);
        for (i, placed) in batch.iter().enumerate() {
            assert_eq!(placed.supplier.index, i);
            assert!(placed.supplier.id.ends_with(&format!("-{}", i)));
        }
    }

    #[test]
    fn test_request_larger_than_pool_is_capped() {
        let source = SeededPseudoSource::new(1);
        let mut sampler = EntitySampler::new(NamePool::new(["a", "b", "c"]), DistanceBand::default());

        let batch = sampler.sample_entities(reference(), 10, 10, &source);
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn test_same_seed_same_batch() {
        let created_at = Utc::now();
        let mut first = EntitySampler::default();
        let mut second = EntitySampler::default();

        let a = first.sample_entities_at(reference(), 5, 8, created_at, &SeededPseudoSource::new(9));
        let b = second.sample_entities_at(reference(), 5, 8, created_at, &SeededPseudoSource::new(9));

        assert_eq!(a, b);
    }
}
