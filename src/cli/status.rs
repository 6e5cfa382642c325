//! Status command handler
//!
//! Shows the active configuration and, optionally, server status.

use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Check if server is running (tries to connect)
    #[arg(long)]
    pub server: bool,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let config = Config::load()?;

    // Check server status if requested
    if args.server {
        check_server_status(&config).await;
    }

    println!("supplier-radar v{}", env!("CARGO_PKG_VERSION"));
    println!();

    let settings = config.engine_settings();
    println!("Generation:");
    println!(
        "  Distance band: {:.1} - {:.1} km",
        settings.distance_band.min_km, settings.distance_band.max_km
    );
    println!(
        "  Batch size:    {} - {}",
        settings.batch_size.min, settings.batch_size.max
    );
    println!();

    let regions = config.region_table();
    println!("Service area:");
    println!(
        "  Bounding:       lat {} to {}, lng {} to {}",
        regions.bounding.min_lat,
        regions.bounding.max_lat,
        regions.bounding.min_lng,
        regions.bounding.max_lng
    );
    println!("  Water areas:    {}", regions.exclusions.len());
    println!("  Anchors:        {}", regions.anchors.len());
    println!("  Default anchor: {}", regions.default_anchor);

    Ok(())
}

/// Check if the server is running
async fn check_server_status(config: &Config) {
    let url = format!("http://{}/api/status", config.server_addr());

    match reqwest::get(&url).await {
        Ok(response) => {
            if response.status().is_success() {
                println!("Server: RUNNING on {}", config.server_addr());
                if let Ok(status) = response.json::<serde_json::Value>().await {
                    if let Some(version) = status.get("version").and_then(|v| v.as_str()) {
                        println!("  Version: {}", version);
                    }
                    if let Some(count) = status.get("suppliers").and_then(|v| v.as_u64()) {
                        println!("  Suppliers: {}", count);
                    }
                    if let Some(uptime) = status.get("uptime_secs").and_then(|v| v.as_u64()) {
                        println!("  Uptime: {}s", uptime);
                    }
                }
            } else {
                println!("Server: ERROR (status {})", response.status());
            }
        }
        Err(_) => {
            println!("Server: NOT RUNNING on {}", config.server_addr());
        }
    }
    println!();
}
