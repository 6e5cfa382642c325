//! Starting position from the caller's public IP
//!
//! The fix is coarse (city level) and only seeds the first batch, so the last
//! answer is remembered on disk for a while instead of asking on every start.

use crate::constants::api::IP_API_URL;
use crate::constants::cache::{LAST_FIX_FILE, LAST_FIX_TTL_SECS};
use crate::error::{Error, Result};
use crate::geo::{GeoLocation, GeolocationProvider};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// Give up on the lookup after this; the caller falls back to the default anchor
const LOOKUP_TIMEOUT_SECS: u64 = 5;

/// Looks up the caller's position by IP
#[derive(Debug)]
pub struct IpLocator {
    client: reqwest::Client,
    last_fix: Option<LastFixFile>,
}

impl IpLocator {
    /// Locator remembering its last fix in the user cache directory
    pub fn new() -> Self {
        let path = dirs::cache_dir()
            .map(|dir| dir.join(crate::config::defaults::APP_DIR_NAME).join(LAST_FIX_FILE));
        Self::with_last_fix(path.map(LastFixFile::new))
    }

    /// Locator with an explicit last-fix file, or none to always ask
    pub fn with_last_fix(last_fix: Option<LastFixFile>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(LOOKUP_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { client, last_fix }
    }

    async fn lookup(&self) -> Result<GeoLocation> {
        let response = self
            .client
            .get(IP_API_URL)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Geo(format!("IP lookup failed: {}", e)))?;

        let body: LookupBody = response
            .json()
            .await
            .map_err(|e| Error::Geo(format!("Unreadable IP lookup answer: {}", e)))?;

        GeoLocation::try_from(body)
    }
}

impl Default for IpLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl GeolocationProvider for IpLocator {
    async fn locate(&self) -> Result<GeoLocation> {
        let now = Utc::now();

        if let Some(fix) = self.last_fix.as_ref().and_then(|f| f.fresh_at(now)) {
            debug!("Reusing IP fix near {}", fix.display_name);
            return Ok(fix);
        }

        let fix = self.lookup().await?;
        if let Some(file) = &self.last_fix {
            file.remember(&fix, now);
        }
        Ok(fix)
    }
}

/// Answer from the lookup service
#[derive(Debug, Deserialize)]
struct LookupBody {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    #[serde(rename = "regionName")]
    region: Option<String>,
    country: Option<String>,
}

impl TryFrom<LookupBody> for GeoLocation {
    type Error = Error;

    fn try_from(body: LookupBody) -> Result<Self> {
        if body.status != "success" {
            return Err(Error::Geo(format!("IP lookup answered '{}'", body.status)));
        }
        let (Some(lat), Some(lng)) = (body.lat, body.lon) else {
            return Err(Error::Geo("IP lookup answer has no position".to_string()));
        };

        let place: Vec<String> = [body.city, body.region, body.country]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();

        Ok(GeoLocation {
            lat,
            lng,
            display_name: if place.is_empty() {
                "Unknown Location".to_string()
            } else {
                place.join(", ")
            },
        })
    }
}

/// On-disk record of the most recent IP fix
#[derive(Debug, Clone)]
pub struct LastFixFile {
    path: PathBuf,
    ttl: Duration,
}

#[derive(Serialize, Deserialize)]
struct StoredFix {
    fix: GeoLocation,
    taken_at: DateTime<Utc>,
}

impl LastFixFile {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ttl: Duration::seconds(LAST_FIX_TTL_SECS),
        }
    }

    /// The stored fix, if one exists and is younger than the TTL at `now`
    pub fn fresh_at(&self, now: DateTime<Utc>) -> Option<GeoLocation> {
        let raw = std::fs::read(&self.path).ok()?;
        let stored: StoredFix = serde_json::from_slice(&raw).ok()?;

        let age = now.signed_duration_since(stored.taken_at);
        (age >= Duration::zero() && age < self.ttl).then_some(stored.fix)
    }

    /// Store `fix` as taken at `now`; write failures are logged and dropped
    pub fn remember(&self, fix: &GeoLocation, now: DateTime<Utc>) {
        let stored = StoredFix {
            fix: fix.clone(),
            taken_at: now,
        };

        let written = self
            .path
            .parent()
            .map_or(Ok(()), std::fs::create_dir_all)
            .and_then(|()| {
                let json = serde_json::to_vec_pretty(&stored)?;
                std::fs::write(&self.path, json)
            });

        if let Err(e) = written {
            debug!("Could not store IP fix at {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn butuan() -> GeoLocation {
        GeoLocation {
            lat: 8.9475,
            lng: 125.5406,
            display_name: "Butuan City".to_string(),
        }
    }

    fn body(json: &str) -> LookupBody {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_locator_without_file_remembers_nothing() {
        let locator = IpLocator::with_last_fix(None);
        assert!(locator.last_fix.is_none());
    }

    #[test]
    fn test_remembered_fix_is_reused_within_ttl() {
        let dir = TempDir::new().unwrap();
        let file = LastFixFile::new(dir.path().join("nested").join("fix.json"));
        let now = Utc::now();

        assert!(file.fresh_at(now).is_none());

        file.remember(&butuan(), now);

        let later = now + Duration::minutes(30);
        let fix = file.fresh_at(later).unwrap();
        assert_eq!(fix.lat, 8.9475);
        assert_eq!(fix.display_name, "Butuan City");
    }

    #[test]
    fn test_remembered_fix_expires() {
        let dir = TempDir::new().unwrap();
        let file = LastFixFile::new(dir.path().join("fix.json"));
        let now = Utc::now();

        file.remember(&butuan(), now);

        assert!(file.fresh_at(now + Duration::seconds(LAST_FIX_TTL_SECS)).is_none());
        assert!(file.fresh_at(now - Duration::minutes(1)).is_none());
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fix.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(LastFixFile::new(path).fresh_at(Utc::now()).is_none());
    }

    #[test]
    fn test_lookup_answer_names_the_place() {
        let fix = GeoLocation::try_from(body(
            r#"{"status":"success","lat":7.07,"lon":125.61,"city":"Davao City","regionName":"Davao","country":"Philippines"}"#,
        ))
        .unwrap();

        assert_eq!(fix.lat, 7.07);
        assert_eq!(fix.lng, 125.61);
        assert_eq!(fix.display_name, "Davao City, Davao, Philippines");
    }

    #[test]
    fn test_failed_lookup_is_an_error() {
        let result = GeoLocation::try_from(body(r#"{"status":"fail","lat":null,"lon":null}"#));
        assert!(matches!(result, Err(Error::Geo(_))));

        let result = GeoLocation::try_from(body(r#"{"status":"success","lat":7.07}"#));
        assert!(result.is_err());
    }

    #[test]
    fn test_unnamed_place() {
        let fix = GeoLocation::try_from(body(
            r#"{"status":"success","lat":7.07,"lon":125.61,"city":""}"#,
        ))
        .unwrap();
        assert_eq!(fix.display_name, "Unknown Location");
    }
}
