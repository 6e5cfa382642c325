//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default lower bound of the placement band, in km
pub const DEFAULT_DISTANCE_MIN_KM: f64 = 0.3;

/// Default upper bound of the placement band, in km
pub const DEFAULT_DISTANCE_MAX_KM: f64 = 2.0;

/// Default smallest batch
pub const DEFAULT_BATCH_MIN: usize = 5;

/// Default largest batch
pub const DEFAULT_BATCH_MAX: usize = 8;

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7979;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "supplier-radar";
