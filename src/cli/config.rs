//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::{Error, Result};
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "generation.batch_max")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    // Show path
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    // Reset config
    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            show_all_config(&config);
        }

        // Key only: show that value
        (Some(key), None) => {
            if let Some(value) = config.get(key) {
                println!("{}", value);
            } else {
                eprintln!("Available keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }

        // Value without key: not valid
        (None, Some(_)) => {
            return Err(Error::Config("Must specify a key to set a value".to_string()));
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    let g = &config.generation;
    println!("[generation]");
    println!("distance_min_km = {}", g.distance_min_km);
    println!("distance_max_km = {}", g.distance_max_km);
    println!("batch_min = {}", g.batch_min);
    println!("batch_max = {}", g.batch_max);
    println!("format = \"{}\"", g.format);
    println!();

    let r = &config.region;
    println!("[region]");
    println!(
        "bounding = lat {}..{}, lng {}..{}",
        r.bounding.min_lat, r.bounding.max_lat, r.bounding.min_lng, r.bounding.max_lng
    );
    println!("default_anchor = {}", r.default_anchor);
    for exclusion in &r.exclusions {
        println!("exclusion {} (water)", exclusion.name);
    }
    for rule in &r.anchors {
        println!("anchor {} -> {}", rule.name, rule.anchor);
    }
    println!();

    println!("[server]");
    println!("host = \"{}\"", config.server.host);
    println!("port = {}", config.server.port);
    println!();

    println!("[location]");
    println!("default_here = {}", config.location.default_here);
}
