//! Coordinates and reference points
//!
//! This module handles:
//! - The `Coordinates` value type and its range validation
//! - Great-circle distance between coordinates
//! - Deterministic supplier placement around a reference point
//! - Choosing which reference point distances are measured from

pub mod distance;
pub mod position;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Parses `"lat,lng"`, as typed on the command line or in query strings
impl std::str::FromStr for Coordinates {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (lat, lng) = s.split_once(',').ok_or_else(|| {
            Error::InvalidCoordinates(format!("Expected \"lat,lng\", got \"{}\"", s))
        })?;

        let lat: f64 = lat.trim().parse().map_err(|_| {
            Error::InvalidCoordinates(format!("Invalid latitude: {}", lat.trim()))
        })?;
        let lng: f64 = lng.trim().parse().map_err(|_| {
            Error::InvalidCoordinates(format!("Invalid longitude: {}", lng.trim()))
        })?;

        let coords = Self::new(lat, lng);
        coords.validate()?;
        Ok(coords)
    }
}

/// Where the active reference point came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// Explicitly clicked by the user
    Pinned,
    /// Latest position from the geolocation provider
    Gps,
    /// Point the current batch was generated around
    Base,
    /// Set directly by a reference change; outranks the others until the
    /// pin, GPS fix or base moves
    Manual,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pinned => write!(f, "pinned"),
            Self::Gps => write!(f, "gps"),
            Self::Base => write!(f, "base"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// The reference point distances are currently measured from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveReference {
    pub kind: ReferenceKind,
    pub coords: Coordinates,
}

/// Pick the reference point to measure distances from
///
/// Priority is pinned, then GPS, then base. Returns `None` only when no
/// point is known at all.
pub fn resolve_active_reference(
    pinned: Option<Coordinates>,
    gps: Option<Coordinates>,
    base: Option<Coordinates>,
) -> Option<ActiveReference> {
    pinned
        .map(|coords| ActiveReference {
            kind: ReferenceKind::Pinned,
            coords,
        })
        .or_else(|| {
            gps.map(|coords| ActiveReference {
                kind: ReferenceKind::Gps,
                coords,
            })
        })
        .or_else(|| {
            base.map(|coords| ActiveReference {
                kind: ReferenceKind::Base,
                coords,
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ranges() {
        assert!(Coordinates::new(9.0782, 126.1967).validate().is_ok());
        assert!(Coordinates::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinates::new(90.1, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -180.5).validate().is_err());
    }

    #[test]
    fn test_parse_coordinates() {
        let coords: Coordinates = "9.0782, 126.1967".parse().unwrap();
        assert_eq!(coords, Coordinates::new(9.0782, 126.1967));

        assert!("9.0782".parse::<Coordinates>().is_err());
        assert!("north,126".parse::<Coordinates>().is_err());
        assert!("95,126".parse::<Coordinates>().is_err());
    }

    #[test]
    fn test_pinned_wins_over_everything() {
        let pin = Coordinates::new(10.0, 124.0);
        let gps = Coordinates::new(9.5, 125.0);
        let base = Coordinates::new(9.0, 126.0);

        let active = resolve_active_reference(Some(pin), Some(gps), Some(base)).unwrap();
        assert_eq!(active.kind, ReferenceKind::Pinned);
        assert_eq!(active.coords, pin);
    }

    #[test]
    fn test_gps_wins_over_base() {
        let gps = Coordinates::new(9.5, 125.0);
        let base = Coordinates::new(9.0, 126.0);

        let active = resolve_active_reference(None, Some(gps), Some(base)).unwrap();
        assert_eq!(active.kind, ReferenceKind::Gps);
        assert_eq!(active.coords, gps);
    }

    #[test]
    fn test_base_is_last_resort() {
        let base = Coordinates::new(9.0, 126.0);
        let active = resolve_active_reference(None, None, Some(base)).unwrap();
        assert_eq!(active.kind, ReferenceKind::Base);

        assert!(resolve_active_reference(None, None, None).is_none());
    }
}
