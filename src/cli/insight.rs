//! Insight command handler

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::insight::InsightFetcher;
use clap::Args;

/// Insight command arguments
#[derive(Args)]
pub struct InsightArgs {
    /// Latitude
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,
}

/// Run the insight command
pub fn run(args: InsightArgs) -> Result<()> {
    let coords = Coordinates::new(args.lat, args.lng);
    coords.validate()?;

    let config = Config::load()?;
    let insight = InsightFetcher::new(config.region_table()).fetch(coords);

    if insight.corrected {
        eprintln!("Note: {} is outside the service area; showing {}", coords, insight.resolved);
    }
    println!("{}", serde_json::to_string_pretty(&insight)?);

    Ok(())
}
