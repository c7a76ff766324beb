//! Geographic coordinates and timestamped device positions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Raw coordinate label used when no place name is known.
    pub fn label(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// A device-reported coordinate and when it was reported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub coordinate: Coordinate,
    pub timestamp: DateTime<Utc>,
}

impl Position {
    pub fn now(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            timestamp: Utc::now(),
        }
    }

    /// Whether this position is older than `max_age` at `now`.
    pub fn is_stale(&self, now: DateTime<Utc>, max_age: std::time::Duration) -> bool {
        match chrono::Duration::from_std(max_age) {
            Ok(max_age) => now - self.timestamp > max_age,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_label_uses_four_decimals() {
        let c = Coordinate::new(40.712776, -74.005974);
        assert_eq!(c.label(), "40.7128, -74.0060");
    }

    #[test]
    fn test_position_staleness() {
        let reported = Position::now(Coordinate::new(1.0, 2.0));
        let later = reported.timestamp + chrono::Duration::seconds(301);
        assert!(reported.is_stale(later, Duration::from_secs(300)));
        assert!(!reported.is_stale(reported.timestamp, Duration::from_secs(300)));
    }
}
