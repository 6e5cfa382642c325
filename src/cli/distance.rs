//! Distance command handler

use crate::coord::distance::haversine_km;
use crate::coord::Coordinates;
use crate::error::Result;
use clap::Args;

/// Distance command arguments
#[derive(Args)]
pub struct DistanceArgs {
    /// First point as "lat,lng"
    #[arg(allow_hyphen_values = true)]
    pub from: Coordinates,

    /// Second point as "lat,lng"
    #[arg(allow_hyphen_values = true)]
    pub to: Coordinates,
}

/// Run the distance command
pub fn run(args: DistanceArgs) -> Result<()> {
    println!("{:.3} km", haversine_km(args.from, args.to));
    Ok(())
}
