//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/supplier-radar/config.toml

pub mod defaults;

use crate::catalog::sampler::DistanceBand;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::region::RegionTable;
use crate::supplier::engine::{BatchSizeBand, EngineSettings};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Batch generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Land/water classification tables
    #[serde(default)]
    pub region: RegionTable,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Location settings
    #[serde(default)]
    pub location: LocationConfig,
}

/// Batch generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Closest a supplier is placed, in km
    #[serde(default = "default_distance_min")]
    pub distance_min_km: f64,

    /// Farthest a supplier is placed, in km
    #[serde(default = "default_distance_max")]
    pub distance_max_km: f64,

    /// Smallest batch size
    #[serde(default = "default_batch_min")]
    pub batch_min: usize,

    /// Largest batch size
    #[serde(default = "default_batch_max")]
    pub batch_max: usize,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Location settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    /// If true, IP geolocation is used when no location is given
    #[serde(default)]
    pub default_here: bool,
}

// Default value functions for serde
fn default_distance_min() -> f64 {
    DEFAULT_DISTANCE_MIN_KM
}
fn default_distance_max() -> f64 {
    DEFAULT_DISTANCE_MAX_KM
}
fn default_batch_min() -> usize {
    DEFAULT_BATCH_MIN
}
fn default_batch_max() -> usize {
    DEFAULT_BATCH_MAX
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            distance_min_km: default_distance_min(),
            distance_max_km: default_distance_max(),
            batch_min: default_batch_min(),
            batch_max: default_batch_max(),
            format: default_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            Self::load_from(&path)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Check bands and region table are usable
    pub fn validate(&self) -> Result<()> {
        let g = &self.generation;

        let finite = g.distance_min_km.is_finite() && g.distance_max_km.is_finite();
        if !(finite && g.distance_min_km > 0.0 && g.distance_min_km <= g.distance_max_km) {
            return Err(Error::InvalidBand(format!(
                "Distance band [{}, {}] km must be finite, positive and ordered",
                g.distance_min_km, g.distance_max_km
            )));
        }
        if g.batch_min == 0 || g.batch_min > g.batch_max {
            return Err(Error::InvalidBand(format!(
                "Batch size band [{}, {}] must be at least 1 and ordered",
                g.batch_min, g.batch_max
            )));
        }

        self.region.validate()
    }

    /// Engine tunables from the generation section
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            distance_band: DistanceBand {
                min_km: self.generation.distance_min_km,
                max_km: self.generation.distance_max_km,
            },
            batch_size: BatchSizeBand {
                min: self.generation.batch_min,
                max: self.generation.batch_max,
            },
        }
    }

    /// Classification tables
    pub fn region_table(&self) -> RegionTable {
        self.region.clone()
    }

    /// Starting location when nothing better is known
    pub fn default_anchor(&self) -> Coordinates {
        self.region.default_anchor
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["generation", "distance_min_km"] => Some(self.generation.distance_min_km.to_string()),
            ["generation", "distance_max_km"] => Some(self.generation.distance_max_km.to_string()),
            ["generation", "batch_min"] => Some(self.generation.batch_min.to_string()),
            ["generation", "batch_max"] => Some(self.generation.batch_max.to_string()),
            ["generation", "format"] => Some(self.generation.format.clone()),

            ["region", "default_anchor"] => Some(format!(
                "{},{}",
                self.region.default_anchor.lat, self.region.default_anchor.lng
            )),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["location", "default_here"] => Some(self.location.default_here.to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid, the value doesn't parse, or the
    /// result fails validation. On error the config is left unchanged.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["generation", "distance_min_km"] => {
                updated.generation.distance_min_km = parse_value(key, value)?;
            }
            ["generation", "distance_max_km"] => {
                updated.generation.distance_max_km = parse_value(key, value)?;
            }
            ["generation", "batch_min"] => {
                updated.generation.batch_min = parse_value(key, value)?;
            }
            ["generation", "batch_max"] => {
                updated.generation.batch_max = parse_value(key, value)?;
            }
            ["generation", "format"] => {
                updated.generation.format = value.to_string();
            }

            ["region", "default_anchor"] => {
                updated.region.default_anchor = value.parse()?;
            }

            ["server", "host"] => {
                updated.server.host = value.to_string();
            }
            ["server", "port"] => {
                updated.server.port = parse_value(key, value)?;
            }

            ["location", "default_here"] => {
                updated.location.default_here = parse_value(key, value)?;
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "generation.distance_min_km",
            "generation.distance_max_km",
            "generation.batch_min",
            "generation.batch_max",
            "generation.format",
            "region.default_anchor",
            "server.host",
            "server.port",
            "location.default_here",
        ]
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid value for {}: {}", key, value)))
}
