//! Generate command handler
//!
//! Places a batch of suppliers around a location and prints it.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter};
use crate::geo::start_location;
use crate::random::get_source;
use crate::supplier::engine::SupplierEngine;
use clap::Args;

/// Generate command arguments
#[derive(Args)]
pub struct GenerateArgs {
    /// Latitude
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Use current location (IP geolocation)
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub here: bool,

    /// Smallest batch size
    #[arg(long)]
    pub min: Option<usize>,

    /// Largest batch size
    #[arg(long)]
    pub max: Option<usize>,

    /// Seed for reproducible batches
    #[arg(long, short = 's')]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the generate command
pub async fn run(args: GenerateArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let mut config = Config::load()?;

    // Command-line overrides go through the same validation as the file
    if let Some(min) = args.min {
        config.generation.batch_min = min;
    }
    if let Some(max) = args.max {
        config.generation.batch_max = max;
    }
    config.validate()?;

    let start = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => {
            let coords = Coordinates::new(lat, lng);
            coords.validate()?;
            coords
        }
        _ => start_location(&config, args.here).await,
    };

    let format = args.format.unwrap_or_else(|| config.generation.format.clone());
    let formatter =
        get_formatter(&format).ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;

    let mut engine = SupplierEngine::new(
        config.region_table(),
        config.engine_settings(),
        get_source(args.seed),
    );
    engine.initialize(start);

    for notice in engine.take_notices() {
        eprintln!("Note: {}", notice.message);
    }

    let output = formatter.format(&engine.snapshot(), &config)?;

    // Write output
    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
