//! Configuration module for the explore pipeline.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::models::Coordinate;

/// Radius of the POI query around the user, in meters.
pub const DEFAULT_RADIUS_M: u32 = 2000;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Overpass interpreter endpoint
    pub overpass_url: String,
    /// Nominatim base URL used for reverse geocoding
    pub nominatim_url: String,
    /// Wikipedia base URL used for page summaries
    pub wikipedia_url: String,
    /// Travel guide server hosting the saved-location endpoints
    pub app_url: String,
    /// IP geolocation endpoint
    pub ip_locate_url: String,
    /// Cookie header forwarded to the app server (carries session and csrftoken)
    pub cookies: Option<String>,
    /// Fixed position used instead of device geolocation
    pub fixed_position: Option<Coordinate>,
    /// Search radius in meters
    pub radius_m: u32,
    /// Upper bound on a single geolocation attempt
    pub locate_timeout: Duration,
    /// How old a cached position may be before it is re-requested
    pub position_max_age: Duration,
    /// Client-wide timeout for outbound HTTP requests
    pub request_timeout: Duration,
    /// User agent sent to the map data providers
    pub user_agent: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            overpass_url: "https://overpass-api.de/api/interpreter".to_string(),
            nominatim_url: "https://nominatim.openstreetmap.org".to_string(),
            wikipedia_url: "https://en.wikipedia.org".to_string(),
            app_url: "http://127.0.0.1:8000".to_string(),
            ip_locate_url: "https://ipapi.co/json/".to_string(),
            cookies: None,
            fixed_position: None,
            radius_m: DEFAULT_RADIUS_M,
            locate_timeout: Duration::from_secs(10),
            position_max_age: Duration::from_secs(300),
            request_timeout: Duration::from_secs(30),
            user_agent: concat!("travelguide-explore/", env!("CARGO_PKG_VERSION")).to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let latitude = parse_var::<f64>("TRAVELGUIDE_LATITUDE");
        let longitude = parse_var::<f64>("TRAVELGUIDE_LONGITUDE");
        let fixed_position = match (latitude, longitude) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            (None, None) => None,
            _ => {
                tracing::warn!(
                    "Only one of TRAVELGUIDE_LATITUDE/TRAVELGUIDE_LONGITUDE is set, ignoring both"
                );
                None
            }
        };

        Self {
            overpass_url: string_var("TRAVELGUIDE_OVERPASS_URL", defaults.overpass_url),
            nominatim_url: string_var("TRAVELGUIDE_NOMINATIM_URL", defaults.nominatim_url),
            wikipedia_url: string_var("TRAVELGUIDE_WIKIPEDIA_URL", defaults.wikipedia_url),
            app_url: string_var("TRAVELGUIDE_APP_URL", defaults.app_url),
            ip_locate_url: string_var("TRAVELGUIDE_IP_LOCATE_URL", defaults.ip_locate_url),
            cookies: env::var("TRAVELGUIDE_COOKIES").ok(),
            fixed_position,
            radius_m: parse_var("TRAVELGUIDE_RADIUS_M").unwrap_or(defaults.radius_m),
            locate_timeout: parse_var("TRAVELGUIDE_LOCATE_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.locate_timeout),
            position_max_age: parse_var("TRAVELGUIDE_POSITION_MAX_AGE_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.position_max_age),
            request_timeout: parse_var("TRAVELGUIDE_REQUEST_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            user_agent: string_var("TRAVELGUIDE_USER_AGENT", defaults.user_agent),
            log_level: string_var("TRAVELGUIDE_LOG_LEVEL", defaults.log_level),
        }
    }
}

fn string_var(name: &str, default: String) -> String {
    env::var(name).unwrap_or(default)
}

/// Parse a variable, warning and returning `None` when it is set but malformed.
fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}", name, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // Clear any existing env vars
        for name in [
            "TRAVELGUIDE_OVERPASS_URL",
            "TRAVELGUIDE_NOMINATIM_URL",
            "TRAVELGUIDE_WIKIPEDIA_URL",
            "TRAVELGUIDE_APP_URL",
            "TRAVELGUIDE_IP_LOCATE_URL",
            "TRAVELGUIDE_COOKIES",
            "TRAVELGUIDE_LATITUDE",
            "TRAVELGUIDE_LONGITUDE",
            "TRAVELGUIDE_RADIUS_M",
            "TRAVELGUIDE_LOCATE_TIMEOUT_SECS",
            "TRAVELGUIDE_POSITION_MAX_AGE_SECS",
            "TRAVELGUIDE_REQUEST_TIMEOUT_SECS",
            "TRAVELGUIDE_USER_AGENT",
            "TRAVELGUIDE_LOG_LEVEL",
        ] {
            env::remove_var(name);
        }

        let config = Config::from_env();

        assert_eq!(config.overpass_url, "https://overpass-api.de/api/interpreter");
        assert_eq!(config.nominatim_url, "https://nominatim.openstreetmap.org");
        assert!(config.cookies.is_none());
        assert!(config.fixed_position.is_none());
        assert_eq!(config.radius_m, 2000);
        assert_eq!(config.locate_timeout, Duration::from_secs(10));
        assert_eq!(config.position_max_age, Duration::from_secs(300));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        env::set_var("TRAVELGUIDE_TEST_GARBAGE_RADIUS", "two thousand");
        assert_eq!(parse_var::<u32>("TRAVELGUIDE_TEST_GARBAGE_RADIUS"), None);

        env::set_var("TRAVELGUIDE_TEST_GARBAGE_RADIUS", " 1500 ");
        assert_eq!(parse_var::<u32>("TRAVELGUIDE_TEST_GARBAGE_RADIUS"), Some(1500));
        env::remove_var("TRAVELGUIDE_TEST_GARBAGE_RADIUS");
    }
}
