//! Error types for supplier-radar
//!
//! The simulation core is total and never returns these. They only surface
//! at the edges: parsing user input, config files, geolocation and HTTP.

use thiserror::Error;

/// Main error type for supplier-radar operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid band: {0}")]
    InvalidBand(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Geo error: {0}")]
    Geo(String),
}

/// Result type alias for supplier-radar operations
pub type Result<T> = std::result::Result<T, Error>;
