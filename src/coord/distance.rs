//! Great-circle distance
//!
//! Haversine on a sphere of radius 6371 km. Good to well under a percent at
//! the few-kilometre scale suppliers are placed at.

use crate::constants::geo::EARTH_RADIUS_KM;
use crate::coord::Coordinates;

/// Calculate the distance between two points in kilometers (Haversine formula)
///
/// # Arguments
/// * `a` - First point
/// * `b` - Second point
///
/// # Returns
/// Distance in kilometers. Symmetric, and exactly 0.0 when `a == b`.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1.0 for antipodal points
    let c = 2.0 * h.min(1.0).sqrt().atan2((1.0 - h).max(0.0).sqrt());

    EARTH_RADIUS_KM * c
}

/// Check if a point is within `radius_km` of a center
pub fn is_within(point: Coordinates, center: Coordinates, radius_km: f64) -> bool {
    haversine_km(point, center) <= radius_km
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_same_point_is_zero() {
        let p = Coordinates::new(9.0782, 126.1967);
        assert_eq!(haversine_km(p, p), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let butuan = Coordinates::new(8.9475, 125.5406);
        let surigao = Coordinates::new(9.7843, 125.4888);

        assert_eq!(haversine_km(butuan, surigao), haversine_km(surigao, butuan));
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let a = Coordinates::new(9.0, 126.0);
        let b = Coordinates::new(10.0, 126.0);

        // 6371 * pi / 180
        assert_relative_eq!(haversine_km(a, b), 111.195, epsilon = 0.01);
    }

    #[test]
    fn test_manila_to_cebu() {
        let manila = Coordinates::new(14.5995, 120.9842);
        let cebu = Coordinates::new(10.3157, 123.8854);

        let distance = haversine_km(manila, cebu);
        assert!(
            (distance - 570.0).abs() < 15.0,
            "Distance {} should be approximately 570 km",
            distance
        );
    }

    #[test]
    fn test_triangle_inequality() {
        let manila = Coordinates::new(14.5995, 120.9842);
        let cebu = Coordinates::new(10.3157, 123.8854);
        let davao = Coordinates::new(7.1907, 125.4553);

        let direct = haversine_km(manila, davao);
        let via_cebu = haversine_km(manila, cebu) + haversine_km(cebu, davao);
        assert!(direct <= via_cebu + 1e-9);
    }

    #[test]
    fn test_antipodes_do_not_produce_nan() {
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.0, 180.0);

        let distance = haversine_km(a, b);
        assert!(distance.is_finite());
        assert_relative_eq!(distance, EARTH_RADIUS_KM * std::f64::consts::PI, epsilon = 1e-6);
    }

    #[test]
    fn test_is_within() {
        let center = Coordinates::new(9.0782, 126.1967);

        assert!(is_within(center, center, 0.5));

        // ~0.45 km north
        let inside = Coordinates::new(9.0782 + 0.004, 126.1967);
        assert!(is_within(inside, center, 0.5));

        // ~2.2 km north
        let outside = Coordinates::new(9.0782 + 0.02, 126.1967);
        assert!(!is_within(outside, center, 0.5));
    }
}
