//! Reference deployment tables (Philippines)

use crate::coord::Coordinates;
use crate::region::{AnchorRule, Exclusion, Region, RegionTable};

/// Default anchor: Surigao del Sur, Mindanao
pub const MINDANAO_ANCHOR: Coordinates = Coordinates {
    lat: 9.0782,
    lng: 126.1967,
};

/// Metro Manila
pub const LUZON_ANCHOR: Coordinates = Coordinates {
    lat: 14.5995,
    lng: 120.9842,
};

/// Cebu City
pub const VISAYAS_ANCHOR: Coordinates = Coordinates {
    lat: 10.3157,
    lng: 123.8854,
};

/// Bounding box, open-water exclusions and anchors for the Philippine archipelago
pub fn philippines() -> RegionTable {
    RegionTable {
        bounding: Region::new(4.5, 21.0, 116.0, 127.0),
        exclusions: vec![
            exclusion("south_china_sea", Region::new(4.5, 21.0, 116.0, 119.0)),
            exclusion("philippine_sea", Region::new(4.5, 21.0, 126.6, 127.0)),
            exclusion("luzon_strait", Region::new(19.5, 21.0, 116.0, 127.0)),
            exclusion("sulu_sea", Region::new(6.5, 9.0, 119.5, 122.0)),
            exclusion("celebes_sea", Region::new(4.5, 6.0, 119.0, 124.0)),
        ],
        anchors: vec![
            AnchorRule {
                name: "luzon".to_string(),
                region: Region::new(12.5, 21.0, 116.0, 127.0),
                anchor: LUZON_ANCHOR,
            },
            AnchorRule {
                name: "visayas".to_string(),
                region: Region::new(10.0, 12.5, 121.0, 127.0),
                anchor: VISAYAS_ANCHOR,
            },
        ],
        default_anchor: MINDANAO_ANCHOR,
    }
}

fn exclusion(name: &str, region: Region) -> Exclusion {
    Exclusion {
        name: name.to_string(),
        region,
    }
}
