//! Geolocation boundary
//!
//! Where a starting coordinate comes from when the user didn't type one.
//! Providers can fail (no network, denied, timed out); callers fall back to
//! the configured default anchor and carry on.

pub mod ip_location;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A located position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Display name (address or description)
    pub display_name: String,
}

impl GeoLocation {
    pub fn coords(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// Trait for geolocation providers
pub trait GeolocationProvider: Send + Sync {
    /// Locate the current device
    fn locate(&self) -> impl std::future::Future<Output = Result<GeoLocation>> + Send;
}

/// Turn a provider outcome into a starting coordinate
///
/// Failures and out-of-range fixes both yield `default_anchor`. The result
/// still goes through the region table inside the engine.
pub fn resolve_start(located: Result<GeoLocation>, default_anchor: Coordinates) -> Coordinates {
    match located {
        Ok(location) => {
            let coords = location.coords();
            match coords.validate() {
                Ok(()) => coords,
                Err(e) => {
                    warn!("Ignoring geolocation fix: {}", e);
                    default_anchor
                }
            }
        }
        Err(e) => {
            warn!("Geolocation unavailable, using default location: {}", e);
            default_anchor
        }
    }
}

/// Locate with `provider`, falling back to `default_anchor`
pub async fn locate_or_default<P: GeolocationProvider>(
    provider: &P,
    default_anchor: Coordinates,
) -> Coordinates {
    resolve_start(provider.locate().await, default_anchor)
}

/// Starting coordinate for a new engine
///
/// Uses IP geolocation when `here` is set or the config asks for it,
/// otherwise the configured default anchor.
pub async fn start_location(config: &Config, here: bool) -> Coordinates {
    let anchor = config.default_anchor();
    if here || config.location.default_here {
        locate_or_default(&get_ip_locator(), anchor).await
    } else {
        anchor
    }
}

/// Get the IP location service
pub fn get_ip_locator() -> ip_location::IpLocator {
    ip_location::IpLocator::new()
}
