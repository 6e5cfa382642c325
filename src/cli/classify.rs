//! Classify command handler

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::region::RegionTable;
use clap::Args;

/// Classify command arguments
#[derive(Args)]
pub struct ClassifyArgs {
    /// Latitude
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,
}

/// Run the classify command
pub fn run(args: ClassifyArgs) -> Result<()> {
    let coords = Coordinates::new(args.lat, args.lng);
    coords.validate()?;

    let config = Config::load()?;
    println!("{}", describe(&config.region_table(), coords));

    Ok(())
}

/// One-line verdict for `coords`
fn describe(regions: &RegionTable, coords: Coordinates) -> String {
    if regions.is_on_land(coords) {
        return format!("{}: land", coords);
    }

    let reason = match regions.exclusion_at(coords) {
        Some(name) => format!("water ({})", name),
        None => "outside service area".to_string(),
    };
    format!(
        "{}: {}, nearest valid location {}",
        coords,
        reason,
        regions.nearest_valid_location(coords)
    )
}
