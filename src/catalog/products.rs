//! Product and service lists
//!
//! Products are reproducible per supplier id: the category picks come from
//! a source seeded with the id hash, and each category contributes a run of
//! items starting at an offset derived from the same hash. Services carry no
//! such requirement and use the caller's random source.

use crate::catalog::{PRODUCT_CATALOG, SERVICES};
use crate::coord::position::id_hash;
use crate::random::pseudo::SeededPseudoSource;
use crate::random::RandomSource;

/// Fewest products a supplier lists
pub const MIN_PRODUCTS: usize = 8;

/// Most products a supplier lists
pub const MAX_PRODUCTS: usize = 12;

/// Category count bounds
const MIN_CATEGORIES: usize = 3;
const MAX_CATEGORIES: usize = 5;

/// Service count bounds
const MIN_SERVICES: usize = 3;
const MAX_SERVICES: usize = 5;

/// Products for the supplier with this id
///
/// Returns 8-12 items. The same id always yields the same list.
pub fn generate_products(id: &str) -> Vec<String> {
    let hash = id_hash(id);
    let source = SeededPseudoSource::new(hash);

    let span = (MAX_PRODUCTS - MIN_PRODUCTS + 1) as u64;
    let target = MIN_PRODUCTS + (hash % span) as usize;

    let category_count = source.range_usize(MIN_CATEGORIES, MAX_CATEGORIES);
    let categories = source.pick_distinct(category_count, PRODUCT_CATALOG.len());
    let run = target.div_ceil(categories.len().max(1));

    let mut products = Vec::with_capacity(run * categories.len());
    for &category_index in &categories {
        let (_, items) = PRODUCT_CATALOG[category_index];
        let start = ((hash + category_index as u64) % items.len() as u64) as usize;

        products.extend((0..run).map(|k| items[(start + k) % items.len()].to_string()));
    }

    products.truncate(target);
    products
}

/// 3-5 distinct services, freshly drawn
pub fn generate_services(rng: &dyn RandomSource) -> Vec<String> {
    let count = rng.range_usize(MIN_SERVICES, MAX_SERVICES);
    rng.pick_distinct(count, SERVICES.len())
        .into_iter()
        .map(|i| SERVICES[i].to_string())
        .collect()
}
