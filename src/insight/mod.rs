//! Location insight
//!
//! Runs a coordinate through the region table and returns a descriptive
//! payload for it. The payload is mock data, deterministic in the resolved
//! coordinate so the same spot always reads the same.

use crate::catalog::SUPPLIER_NAMES;
use crate::coord::Coordinates;
use crate::region::{LocationCheck, RegionTable};
use serde::{Deserialize, Serialize};

/// Zone classification for a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Commercial,
    Residential,
    MixedUse,
    Agricultural,
    Industrial,
}

impl Zone {
    const ALL: [Zone; 5] = [
        Zone::Commercial,
        Zone::Residential,
        Zone::MixedUse,
        Zone::Agricultural,
        Zone::Industrial,
    ];
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Commercial => write!(f, "commercial"),
            Self::Residential => write!(f, "residential"),
            Self::MixedUse => write!(f, "mixed_use"),
            Self::Agricultural => write!(f, "agricultural"),
            Self::Industrial => write!(f, "industrial"),
        }
    }
}

/// Rough pedestrian activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FootTraffic {
    Low,
    Moderate,
    High,
}

/// Descriptive payload for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInsight {
    /// Coordinate as supplied
    pub requested: Coordinates,
    /// Coordinate the insight describes
    pub resolved: Coordinates,
    /// True when `resolved` differs from `requested`
    pub corrected: bool,
    pub zone: Zone,
    /// Residents per square kilometer
    pub population_density: u32,
    pub foot_traffic: FootTraffic,
    pub nearby_businesses: Vec<String>,
}

/// Validates coordinates and builds insight payloads
#[derive(Debug, Clone, Default)]
pub struct InsightFetcher {
    regions: RegionTable,
}

impl InsightFetcher {
    pub fn new(regions: RegionTable) -> Self {
        Self { regions }
    }

    /// Insight for `coords`, after correcting it onto land
    pub fn fetch(&self, coords: Coordinates) -> LocationInsight {
        let LocationCheck {
            coords: resolved,
            corrected,
        } = self.regions.check(coords);

        // ~100 m cells so nearby clicks agree
        let cell = cell_key(resolved);
        let zone = Zone::ALL[(cell % Zone::ALL.len() as u64) as usize];
        let population_density = 150 + ((cell / 7) % 4850) as u32;
        let foot_traffic = match (zone, population_density) {
            (Zone::Commercial | Zone::MixedUse, d) if d > 2000 => FootTraffic::High,
            (Zone::Agricultural | Zone::Industrial, _) => FootTraffic::Low,
            (_, d) if d > 3500 => FootTraffic::High,
            _ => FootTraffic::Moderate,
        };

        let start = (cell % SUPPLIER_NAMES.len() as u64) as usize;
        let count = 2 + (cell % 3) as usize;
        let nearby_businesses = (0..count)
            .map(|k| SUPPLIER_NAMES[(start + k * 7) % SUPPLIER_NAMES.len()].to_string())
            .collect();

        LocationInsight {
            requested: coords,
            resolved,
            corrected,
            zone,
            population_density,
            foot_traffic,
            nearby_businesses,
        }
    }
}

fn cell_key(c: Coordinates) -> u64 {
    let lat = ((c.lat + 90.0) * 1000.0).round() as u64;
    let lng = ((c.lng + 180.0) * 1000.0).round() as u64;
    lat.wrapping_mul(360_001).wrapping_add(lng).wrapping_mul(2_654_435_761) >> 7
}
