//! Turns raw POIs into landmark records.
//!
//! Conversion runs the geo heuristics; enrichment asks the encyclopedia for a
//! summary when a POI links to an article and has no description of its own.
//! Enrichment happens concurrently
//! but the output keeps the provider order, and a failed lookup never drops
//! a record.

use std::collections::HashSet;

use futures::future::join_all;

use crate::errors::AppError;
use crate::gateway::{Gateway, Summary};
use crate::geo;
use crate::models::{Coordinate, LandmarkRecord, OverpassElement, RawPoi};

/// Query the POIs around `origin` and build enriched landmark records.
pub async fn discover(
    gateway: &Gateway,
    origin: Coordinate,
    radius_m: u32,
) -> Result<Vec<LandmarkRecord>, AppError> {
    let elements = gateway.query_nearby(origin, radius_m).await?;
    let candidates = nearby_candidates(elements, origin);

    let records = join_all(
        candidates
            .into_iter()
            .map(|(poi, distance_km)| enrich(gateway, poi, distance_km)),
    )
    .await;

    tracing::info!("Discovered {} landmarks near {:?}", records.len(), origin);
    Ok(records)
}

/// Named, located POIs within the display cutoff, with their distance.
///
/// Nodes and ways are numbered separately, so an id can repeat; the first
/// element with a given id wins.
pub fn nearby_candidates(
    elements: Vec<OverpassElement>,
    origin: Coordinate,
) -> Vec<(RawPoi, f64)> {
    let mut seen = HashSet::new();
    elements
        .into_iter()
        .filter_map(RawPoi::from_element)
        .filter(|poi| {
            let first = seen.insert(poi.id.clone());
            if !first {
                tracing::debug!("Skipping duplicate POI id {}", poi.id);
            }
            first
        })
        .map(|poi| {
            let distance = geo::distance_km(origin, poi.position);
            (poi, distance)
        })
        .filter(|(_, distance)| *distance <= geo::MAX_DISTANCE_KM)
        .collect()
}

async fn enrich(gateway: &Gateway, poi: RawPoi, distance_km: f64) -> LandmarkRecord {
    let summary = match geo::encyclopedia_title(&poi.tags) {
        Some(title) if !has_own_description(&poi) => gateway.fetch_summary(&title).await,
        _ => None,
    };
    build_record(poi, distance_km, summary)
}

fn has_own_description(poi: &RawPoi) -> bool {
    poi.tags
        .get("description")
        .is_some_and(|d| !d.trim().is_empty())
}

/// Assemble a record from a POI and an optional encyclopedia summary.
///
/// A summary description only replaces the computed one when the tags carry
/// no explicit description; a summary thumbnail beats any tag image.
pub fn build_record(poi: RawPoi, distance_km: f64, summary: Option<Summary>) -> LandmarkRecord {
    let summary = summary.unwrap_or_default();
    let description = match summary.description {
        Some(text) if !has_own_description(&poi) => text,
        _ => geo::describe(&poi.tags),
    };
    let image_url = summary
        .thumbnail_url
        .or_else(|| geo::extract_image(&poi.tags));

    LandmarkRecord {
        category: geo::classify(&poi.tags),
        reference_url: geo::reference_url(&poi.tags),
        id: poi.id,
        name: poi.name,
        position: poi.position,
        distance_km,
        description,
        image_url,
    }
}
