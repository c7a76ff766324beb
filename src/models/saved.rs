//! Wire models for the saved-location endpoints of the travel guide server.

use serde::{Deserialize, Serialize};

use super::LandmarkId;

/// Response of `GET /get-saved-locations/`.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedLocationsResponse {
    pub success: bool,
    #[serde(default)]
    pub saved_place_ids: Vec<LandmarkId>,
}

/// Body of `POST /save-location/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveLocationRequest {
    pub place_id: LandmarkId,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub types: Vec<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
}

/// Generic `{success}` envelope returned by the mutating endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}
