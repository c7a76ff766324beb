//! Reverse geocoding for the "you are here" label.

use super::{endpoint, Gateway};
use crate::errors::AppError;
use crate::models::{Coordinate, ReverseGeocodeResponse};

/// Zoom level asking Nominatim for city-sized results.
const REVERSE_ZOOM: &str = "10";

impl Gateway {
    /// Best-effort place name for a coordinate.
    ///
    /// Returns the first comma-separated part of the display name, or `None`
    /// on any failure.
    pub async fn reverse_geocode(&self, at: Coordinate) -> Option<String> {
        match self.try_reverse_geocode(at).await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!("{}", AppError::Enrichment(format!("reverse geocode: {}", e)));
                None
            }
        }
    }

    /// Place name, falling back to the raw coordinate.
    pub async fn location_label(&self, at: Coordinate) -> String {
        self.reverse_geocode(at)
            .await
            .unwrap_or_else(|| at.label())
    }

    async fn try_reverse_geocode(&self, at: Coordinate) -> Result<Option<String>, reqwest::Error> {
        let url = endpoint(&self.config.nominatim_url, "reverse");
        let response: ReverseGeocodeResponse = self
            .client
            .get(url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", at.latitude.to_string()),
                ("lon", at.longitude.to_string()),
                ("zoom", REVERSE_ZOOM.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(response.display_name.as_deref().and_then(first_part))
    }
}

fn first_part(display_name: &str) -> Option<String> {
    display_name
        .split(',')
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_part_of_display_name() {
        assert_eq!(
            first_part("Manhattan, New York County, New York, United States").as_deref(),
            Some("Manhattan")
        );
        assert_eq!(first_part("").as_deref(), None);
        assert_eq!(first_part(" , Somewhere").as_deref(), None);
    }
}
