//! Wire models for the Overpass and Nominatim responses.

use std::collections::HashMap;

use serde::Deserialize;

use super::{Coordinate, LandmarkId};

/// Key-value annotations attached to a map feature.
pub type TagBag = HashMap<String, String>;

/// Overpass interpreter response.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// Latitude/longitude pair as Overpass spells it.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

/// A node or way returned by an `out center;` query.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: LandmarkId,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<LatLon>,
    #[serde(default)]
    pub tags: TagBag,
}

impl OverpassElement {
    /// Nodes carry their own coordinate, ways only a centroid.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self.kind.as_str() {
            "node" => Some(Coordinate::new(self.lat?, self.lon?)),
            "way" => self.center.map(|c| Coordinate::new(c.lat, c.lon)),
            _ => None,
        }
    }
}

/// A POI worth turning into a landmark: named and located.
#[derive(Debug, Clone)]
pub struct RawPoi {
    pub id: LandmarkId,
    pub name: String,
    pub position: Coordinate,
    pub tags: TagBag,
}

impl RawPoi {
    pub fn from_element(element: OverpassElement) -> Option<Self> {
        let position = element.coordinate()?;
        let name = element
            .tags
            .get("name")
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())?
            .to_string();
        Some(Self {
            id: element.id,
            name,
            position,
            tags: element.tags,
        })
    }
}

/// Nominatim reverse geocoding response.
#[derive(Debug, Clone, Deserialize)]
pub struct ReverseGeocodeResponse {
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Wikipedia REST page summary.
#[derive(Debug, Clone, Deserialize)]
pub struct PageSummaryResponse {
    #[serde(default)]
    pub extract: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub source: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn element(value: serde_json::Value) -> OverpassElement {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_node_uses_own_coordinate() {
        let e = element(json!({
            "type": "node", "id": 1, "lat": 48.86, "lon": 2.33,
            "tags": {"name": "Louvre"}
        }));
        assert_eq!(e.coordinate(), Some(Coordinate::new(48.86, 2.33)));
    }

    #[test]
    fn test_way_uses_center() {
        let e = element(json!({
            "type": "way", "id": 2, "center": {"lat": 1.5, "lon": 2.5},
            "tags": {"name": "Park"}
        }));
        assert_eq!(e.coordinate(), Some(Coordinate::new(1.5, 2.5)));
    }

    #[test]
    fn test_way_without_center_is_skipped() {
        let e = element(json!({"type": "way", "id": 3, "tags": {"name": "Lost"}}));
        assert!(RawPoi::from_element(e).is_none());
    }

    #[test]
    fn test_unnamed_element_is_skipped() {
        let e = element(json!({"type": "node", "id": 4, "lat": 0.0, "lon": 0.0}));
        assert!(RawPoi::from_element(e).is_none());
    }
}
