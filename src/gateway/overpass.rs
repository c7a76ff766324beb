//! Nearby POI query against an Overpass interpreter.

use super::Gateway;
use crate::errors::AppError;
use crate::models::{Coordinate, OverpassElement, OverpassResponse};

/// Tag filters combined into the nearby query, as (key, value).
pub const POI_FILTERS: [(&str, &str); 6] = [
    ("tourism", "attraction"),
    ("historic", "monument"),
    ("tourism", "museum"),
    ("leisure", "park"),
    ("amenity", "restaurant"),
    ("shop", "mall"),
];

/// Server-side timeout requested in the query header, in seconds.
const QUERY_TIMEOUT_SECS: u32 = 25;

/// Build the Overpass QL union of node and way filters around `origin`.
pub fn nearby_query(origin: Coordinate, radius_m: u32) -> String {
    let around = format!(
        "(around:{},{},{})",
        radius_m, origin.latitude, origin.longitude
    );
    let mut query = format!("[out:json][timeout:{}];\n(\n", QUERY_TIMEOUT_SECS);
    for element in ["node", "way"] {
        for (key, value) in POI_FILTERS {
            query.push_str(&format!("  {}[\"{}\"=\"{}\"]{};\n", element, key, value, around));
        }
    }
    query.push_str(");\nout center;\n");
    query
}

impl Gateway {
    /// Fetch raw POIs within `radius_m` meters of `origin`.
    pub async fn query_nearby(
        &self,
        origin: Coordinate,
        radius_m: u32,
    ) -> Result<Vec<OverpassElement>, AppError> {
        let query = nearby_query(origin, radius_m);
        tracing::debug!("Querying Overpass at {:?} within {} m", origin, radius_m);

        let response = self
            .client
            .post(&self.config.overpass_url)
            .form(&[("data", query.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Overpass returned {}", status);
            return Err(AppError::Upstream(format!(
                "Failed to fetch landmarks: {}",
                status
            )));
        }

        let body: OverpassResponse = response.json().await?;
        tracing::info!("Overpass returned {} elements", body.elements.len());
        Ok(body.elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_covers_nodes_and_ways() {
        let query = nearby_query(Coordinate::new(40.0, -74.0), 2000);

        assert!(query.starts_with("[out:json][timeout:25];"));
        assert!(query.trim_end().ends_with("out center;"));
        for (key, value) in POI_FILTERS {
            let filter = format!("[\"{}\"=\"{}\"](around:2000,40,-74);", key, value);
            assert!(query.contains(&format!("node{}", filter)), "{}", query);
            assert!(query.contains(&format!("way{}", filter)), "{}", query);
        }
        assert_eq!(query.matches("around:").count(), 12);
    }
}
