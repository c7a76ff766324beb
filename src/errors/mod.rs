//! Error handling module for the explore pipeline.
//!
//! Provides centralized error types with stable codes and user-facing messages.

use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const LOCATION_UNAVAILABLE: &str = "LOCATION_UNAVAILABLE";
    pub const UPSTREAM_ERROR: &str = "UPSTREAM_ERROR";
    pub const ENRICHMENT_ERROR: &str = "ENRICHMENT_ERROR";
    pub const PERSISTENCE_ERROR: &str = "PERSISTENCE_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Why the device position could not be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationError {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Unsupported,
}

impl LocationError {
    /// Message shown in the landmark panel when locating fails.
    pub fn user_message(&self) -> &'static str {
        match self {
            LocationError::PermissionDenied => {
                "Location access denied. Please enable location services."
            }
            LocationError::PositionUnavailable => "Location unavailable. Please try again.",
            LocationError::Timeout => "Location request timed out. Please try again.",
            LocationError::Unsupported => "Unable to get your location.",
        }
    }
}

impl std::fmt::Display for LocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LocationError::PermissionDenied => "permission denied",
            LocationError::PositionUnavailable => "position unavailable",
            LocationError::Timeout => "timed out",
            LocationError::Unsupported => "geolocation unsupported",
        };
        f.write_str(name)
    }
}

impl std::error::Error for LocationError {}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Device position could not be determined
    LocationUnavailable(LocationError),
    /// POI query failed or returned garbage
    Upstream(String),
    /// Reverse geocoding or summary lookup failed
    Enrichment(String),
    /// Saved-location request failed
    Persistence(String),
    /// Invalid configuration
    Config(String),
    /// Internal error
    Internal(String),
}

impl AppError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::LocationUnavailable(_) => codes::LOCATION_UNAVAILABLE,
            AppError::Upstream(_) => codes::UPSTREAM_ERROR,
            AppError::Enrichment(_) => codes::ENRICHMENT_ERROR,
            AppError::Persistence(_) => codes::PERSISTENCE_ERROR,
            AppError::Config(_) => codes::CONFIG_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::LocationUnavailable(cause) => cause.to_string(),
            AppError::Upstream(msg) => msg.clone(),
            AppError::Enrichment(msg) => msg.clone(),
            AppError::Persistence(msg) => msg.clone(),
            AppError::Config(msg) => msg.clone(),
            AppError::Internal(msg) => msg.clone(),
        }
    }

    /// Message suitable for showing to the person using the page.
    pub fn user_message(&self) -> String {
        match self {
            AppError::LocationUnavailable(cause) => cause.user_message().to_string(),
            AppError::Upstream(_) => "Failed to load landmarks. Please try again.".to_string(),
            AppError::Persistence(_) => {
                "Could not update your travel plan. Please try again.".to_string()
            }
            AppError::Enrichment(_) | AppError::Config(_) | AppError::Internal(_) => {
                "Something went wrong.".to_string()
            }
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<LocationError> for AppError {
    fn from(err: LocationError) -> Self {
        tracing::warn!("Geolocation error: {}", err);
        AppError::LocationUnavailable(err)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("HTTP error: {:?}", err);
        AppError::Upstream(format!("HTTP error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Upstream(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_messages_are_distinct() {
        let all = [
            LocationError::PermissionDenied,
            LocationError::PositionUnavailable,
            LocationError::Timeout,
            LocationError::Unsupported,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.user_message(), b.user_message());
            }
        }
    }

    #[test]
    fn test_display_includes_code() {
        let err = AppError::Persistence("save rejected".to_string());
        assert_eq!(err.to_string(), "PERSISTENCE_ERROR: save rejected");
    }

    #[test]
    fn test_upstream_user_message_is_retryable() {
        let err = AppError::Upstream("502".to_string());
        assert_eq!(
            err.user_message(),
            "Failed to load landmarks. Please try again."
        );
    }

    #[test]
    fn test_location_error_converts() {
        let err: AppError = LocationError::Timeout.into();
        assert_eq!(err.error_code(), codes::LOCATION_UNAVAILABLE);
        assert_eq!(
            err.user_message(),
            "Location request timed out. Please try again."
        );
    }
}
