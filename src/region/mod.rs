//! Land/water classification
//!
//! A coarse heuristic, not a geofence: a coordinate is "on land" when it sits
//! inside the permitted bounding region and outside every open-water
//! exclusion rectangle. Coordinates that fail are snapped to a configured
//! anchor, chosen first-match-wins from an ordered table.
//!
//! Some coastal and island coordinates are misclassified. That is inherent
//! to rectangles and is left as is.

pub mod defaults;

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An inclusive lat/lng rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Region {
    /// Create a region from its bounds
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Whether `c` lies inside the rectangle (edges included)
    pub fn contains(&self, c: Coordinates) -> bool {
        (self.min_lat..=self.max_lat).contains(&c.lat)
            && (self.min_lng..=self.max_lng).contains(&c.lng)
    }

    /// Check that the bounds are ordered and finite
    pub fn validate(&self) -> Result<()> {
        let bounds = [self.min_lat, self.max_lat, self.min_lng, self.max_lng];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(Error::Config(format!("Region bounds must be finite: {:?}", self)));
        }
        if self.min_lat > self.max_lat || self.min_lng > self.max_lng {
            return Err(Error::Config(format!(
                "Region minimum exceeds maximum: {:?}",
                self
            )));
        }
        Ok(())
    }
}

/// A named stretch of open water inside the bounding region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exclusion {
    pub name: String,
    pub region: Region,
}

/// A fallback location used for water coordinates near `region`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorRule {
    pub name: String,
    pub region: Region,
    pub anchor: Coordinates,
}

/// Outcome of running a raw coordinate through the classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationCheck {
    /// Coordinate to operate on (the input when it was already valid)
    pub coords: Coordinates,
    /// True when `coords` differs from the input
    pub corrected: bool,
}

/// The full classification table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTable {
    /// Overall permitted operating area
    pub bounding: Region,

    /// Open-water rectangles, checked in order
    #[serde(default)]
    pub exclusions: Vec<Exclusion>,

    /// Fallback anchors, first match wins
    #[serde(default)]
    pub anchors: Vec<AnchorRule>,

    /// Used when no anchor region matches
    pub default_anchor: Coordinates,
}

impl RegionTable {
    /// Whether `c` is inside the bounding region and clear of all exclusions
    pub fn is_on_land(&self, c: Coordinates) -> bool {
        self.bounding.contains(c) && self.exclusion_at(c).is_none()
    }

    /// Name of the first exclusion containing `c`, if any
    pub fn exclusion_at(&self, c: Coordinates) -> Option<&str> {
        self.exclusions
            .iter()
            .find(|e| e.region.contains(c))
            .map(|e| e.name.as_str())
    }

    /// Return `c` unchanged if it is on land, otherwise the matching anchor
    ///
    /// Total and idempotent provided the table has passed `validate`, since
    /// every anchor is then itself on land.
    pub fn nearest_valid_location(&self, c: Coordinates) -> Coordinates {
        if self.is_on_land(c) {
            return c;
        }

        self.anchors
            .iter()
            .find(|rule| rule.region.contains(c))
            .map(|rule| rule.anchor)
            .unwrap_or(self.default_anchor)
    }

    /// Classify and correct in one step
    pub fn check(&self, c: Coordinates) -> LocationCheck {
        let coords = self.nearest_valid_location(c);
        LocationCheck {
            coords,
            corrected: coords != c,
        }
    }

    /// Check the table is self-consistent
    ///
    /// Every anchor, and the default anchor, must classify as land. Without
    /// that, correcting a coordinate could yield another invalid one.
    pub fn validate(&self) -> Result<()> {
        self.bounding.validate()?;

        for exclusion in &self.exclusions {
            exclusion.region.validate().map_err(|e| {
                Error::Config(format!("Exclusion '{}': {}", exclusion.name, e))
            })?;
        }

        for rule in &self.anchors {
            rule.region
                .validate()
                .map_err(|e| Error::Config(format!("Anchor '{}': {}", rule.name, e)))?;

            if !self.is_on_land(rule.anchor) {
                return Err(Error::Config(format!(
                    "Anchor '{}' at {} is not on land",
                    rule.name, rule.anchor
                )));
            }
        }

        if !self.is_on_land(self.default_anchor) {
            return Err(Error::Config(format!(
                "Default anchor {} is not on land",
                self.default_anchor
            )));
        }

        Ok(())
    }
}

impl Default for RegionTable {
    fn default() -> Self {
        defaults::philippines()
    }
}
