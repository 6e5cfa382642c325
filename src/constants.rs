//! Centralized constants for the supplier-radar crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in kilometers
    pub const EARTH_RADIUS_KM: f64 = 6371.0;

    /// Kilometers per degree of latitude (approximate, varies slightly with latitude)
    pub const KM_PER_DEGREE_LAT: f64 = 111.32;

    /// Angular step between consecutively indexed suppliers, in degrees.
    /// Approximates the golden angle so neighbours never line up.
    pub const GOLDEN_ANGLE_DEGREES: f64 = 137.5;
}

/// External API endpoints
pub mod api {
    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";
}

/// Last-fix cache
pub mod cache {
    /// How long a remembered IP fix stays usable, in seconds
    pub const LAST_FIX_TTL_SECS: i64 = 3600;

    /// File the last IP fix is kept in, under the app cache directory
    pub const LAST_FIX_FILE: &str = "last_fix.json";
}
