//! Deterministic supplier placement
//!
//! A supplier's marker position is a pure function of its id, its draw
//! index, the point the batch was generated around and its target distance.
//! Nothing here consults a random source, so a re-render always lands the
//! marker on the same spot.

use crate::constants::geo::{GOLDEN_ANGLE_DEGREES, KM_PER_DEGREE_LAT};
use crate::coord::Coordinates;

/// Stable hash of a supplier id: the sum of its character code points
///
/// Collisions are expected and harmless; the hash only spreads markers and
/// flavours product lists.
pub fn id_hash(id: &str) -> u64 {
    id.chars().map(|c| u64::from(u32::from(c))).sum()
}

/// Bearing in degrees [0, 360) for the supplier at `index`
///
/// Consecutive indices are stepped by ~137.5 degrees so a batch fans out
/// around the reference point instead of clustering on one side.
pub fn bearing_degrees(id: &str, index: usize) -> f64 {
    // Hash reduced first so the f64 conversion stays exact
    let base = (id_hash(id) % 360) as f64;
    (base + index as f64 * GOLDEN_ANGLE_DEGREES).rem_euclid(360.0)
}

/// Place a supplier `target_distance_km` away from `reference`
///
/// # Arguments
/// * `id` - Supplier id
/// * `index` - Position of the supplier within its batch
/// * `reference` - Point the batch is generated around
/// * `target_distance_km` - Desired distance from `reference`
///
/// # Algorithm
/// - angle = (hash(id) + index * 137.5) mod 360
/// - Convert the polar offset to lat/lng using a flat local scale:
///   111.32 km per degree of latitude, shrunk by cos(lat) for longitude
pub fn generate_position(
    id: &str,
    index: usize,
    reference: Coordinates,
    target_distance_km: f64,
) -> Coordinates {
    let angle = bearing_degrees(id, index).to_radians();

    let km_per_deg_lng = KM_PER_DEGREE_LAT * reference.lat.to_radians().cos();

    let delta_lat = angle.cos() * target_distance_km / KM_PER_DEGREE_LAT;
    let delta_lng = angle.sin() * target_distance_km / km_per_deg_lng;

    Coordinates::new(reference.lat + delta_lat, reference.lng + delta_lng)
}
