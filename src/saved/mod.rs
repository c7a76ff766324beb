//! Saved-location bridge.
//!
//! Tracks which landmarks the signed-in user already bookmarked on the travel
//! guide server and flips that status through the save/unsave endpoints.

use std::collections::HashSet;

use reqwest::{Client, RequestBuilder};
use serde::Serialize;

use crate::config::Config;
use crate::errors::AppError;
use crate::gateway::endpoint;
use crate::models::{
    LandmarkId, LandmarkRecord, SaveLocationRequest, SavedLocationsResponse, SuccessResponse,
};

/// Cookie holding the cross-site request forgery token.
pub const CSRF_COOKIE: &str = "csrftoken";
/// Header the server expects the token in.
pub const CSRF_HEADER: &str = "X-CSRFToken";

const NO_ADDRESS: &str = "No address available";

/// Bookmark state of a single landmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SaveState {
    Saved,
    Unsaved,
}

/// Identifiers bookmarked server-side, in string form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedSet {
    ids: HashSet<LandmarkId>,
}

impl SavedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &LandmarkId) -> bool {
        self.ids.contains(id)
    }

    pub fn state_of(&self, id: &LandmarkId) -> SaveState {
        if self.contains(id) {
            SaveState::Saved
        } else {
            SaveState::Unsaved
        }
    }

    /// Returns `false` if the id was already present.
    pub fn insert(&mut self, id: LandmarkId) -> bool {
        self.ids.insert(id)
    }

    pub fn remove(&mut self, id: &LandmarkId) -> bool {
        self.ids.remove(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<LandmarkId> for SavedSet {
    fn from_iter<I: IntoIterator<Item = LandmarkId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Read a cookie value out of a `Cookie` header, percent-decoded.
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key != name {
            return None;
        }
        let decoded = urlencoding::decode(value)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| value.to_string());
        Some(decoded)
    })
}

/// Client for the saved-location endpoints.
#[derive(Clone)]
pub struct SavedLocationBridge {
    client: Client,
    base_url: String,
    cookies: Option<String>,
    csrf_token: Option<String>,
}

impl SavedLocationBridge {
    pub fn new(client: Client, config: &Config) -> Self {
        let cookies = config.cookies.clone();
        let csrf_token = cookies
            .as_deref()
            .and_then(|c| cookie_value(c, CSRF_COOKIE));
        if cookies.is_some() && csrf_token.is_none() {
            tracing::warn!("No {} cookie configured, saving will be rejected", CSRF_COOKIE);
        }
        Self {
            client,
            base_url: config.app_url.clone(),
            cookies,
            csrf_token,
        }
    }

    fn with_cookies(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.cookies {
            Some(cookies) => request.header(reqwest::header::COOKIE, cookies),
            None => request,
        }
    }

    fn post(&self, path: &str) -> RequestBuilder {
        let request = self.with_cookies(self.client.post(endpoint(&self.base_url, path)));
        match &self.csrf_token {
            Some(token) => request.header(CSRF_HEADER, token),
            None => request,
        }
    }

    /// Fetch the user's saved landmark identifiers.
    pub async fn load_saved(&self) -> Result<SavedSet, AppError> {
        let request = self.with_cookies(
            self.client
                .get(endpoint(&self.base_url, "get-saved-locations/")),
        );
        let response = request.send().await.map_err(persistence_error)?;
        if !response.status().is_success() {
            return Err(AppError::Persistence(format!(
                "Loading saved locations returned {}",
                response.status()
            )));
        }
        let body: SavedLocationsResponse = response.json().await.map_err(persistence_error)?;
        if !body.success {
            return Err(AppError::Persistence(
                "Server refused to list saved locations".to_string(),
            ));
        }

        let saved: SavedSet = body.saved_place_ids.into_iter().collect();
        tracing::info!("Loaded {} saved locations", saved.len());
        Ok(saved)
    }

    /// Flip the bookmark state of `record`.
    ///
    /// On success `saved` is updated and the new state returned; on failure
    /// `saved` is left untouched.
    pub async fn toggle_save(
        &self,
        saved: &mut SavedSet,
        record: &LandmarkRecord,
    ) -> Result<SaveState, AppError> {
        match saved.state_of(&record.id) {
            SaveState::Saved => {
                self.unsave(&record.id).await?;
                saved.remove(&record.id);
                tracing::info!("Removed {} from travel plan", record.id);
                Ok(SaveState::Unsaved)
            }
            SaveState::Unsaved => {
                self.save(record).await?;
                saved.insert(record.id.clone());
                tracing::info!("Saved {} to travel plan", record.id);
                Ok(SaveState::Saved)
            }
        }
    }

    async fn save(&self, record: &LandmarkRecord) -> Result<(), AppError> {
        let payload = save_request(record);
        let response = self
            .post("save-location/")
            .json(&payload)
            .send()
            .await
            .map_err(persistence_error)?;
        expect_success(response).await
    }

    async fn unsave(&self, id: &LandmarkId) -> Result<(), AppError> {
        let path = format!(
            "remove-saved-location-ajax/{}/",
            urlencoding::encode(id.as_str())
        );
        let response = self
            .post(&path)
            .send()
            .await
            .map_err(persistence_error)?;
        expect_success(response).await
    }
}

/// Denormalized save payload the server stores as-is.
pub fn save_request(record: &LandmarkRecord) -> SaveLocationRequest {
    let address = if record.description.trim().is_empty() {
        NO_ADDRESS.to_string()
    } else {
        record.description.clone()
    };
    SaveLocationRequest {
        place_id: record.id.clone(),
        name: record.name.clone(),
        address,
        latitude: record.position.latitude,
        longitude: record.position.longitude,
        types: vec![record.category.label().to_string()],
        rating: None,
        user_ratings_total: None,
    }
}

async fn expect_success(response: reqwest::Response) -> Result<(), AppError> {
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Persistence(format!("Server returned {}", status)));
    }
    let body: SuccessResponse = response.json().await.map_err(persistence_error)?;
    if body.success {
        Ok(())
    } else {
        Err(AppError::Persistence(
            body.error
                .unwrap_or_else(|| "Server rejected the request".to_string()),
        ))
    }
}

fn persistence_error(err: reqwest::Error) -> AppError {
    tracing::warn!("Saved-location request failed: {}", err);
    AppError::Persistence(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Coordinate};

    #[test]
    fn test_numeric_and_string_ids_share_membership() {
        let ids: Vec<LandmarkId> = serde_json::from_str(r#"[12345, "678"]"#).unwrap();
        let saved: SavedSet = ids.into_iter().collect();
        assert!(saved.contains(&LandmarkId::from("12345")));
        assert!(saved.contains(&LandmarkId::from(678)));
        assert_eq!(saved.state_of(&LandmarkId::from(1)), SaveState::Unsaved);
    }

    #[test]
    fn test_insert_does_not_duplicate() {
        let mut saved = SavedSet::new();
        assert!(saved.insert(LandmarkId::from(5)));
        assert!(!saved.insert(LandmarkId::from("5")));
        assert_eq!(saved.len(), 1);
    }

    #[test]
    fn test_cookie_value() {
        let cookies = "sessionid=abc; csrftoken=tok%3D123; theme=dark";
        assert_eq!(cookie_value(cookies, "csrftoken").as_deref(), Some("tok=123"));
        assert_eq!(cookie_value(cookies, "sessionid").as_deref(), Some("abc"));
        assert_eq!(cookie_value(cookies, "csrf"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
    }

    #[test]
    fn test_save_request_payload() {
        let record = LandmarkRecord {
            id: LandmarkId::from(42),
            name: "Bryant Park".to_string(),
            category: Category::Park,
            position: Coordinate::new(40.7536, -73.9832),
            distance_km: 0.7,
            description: String::new(),
            reference_url: None,
            image_url: None,
        };
        let json = serde_json::to_value(save_request(&record)).unwrap();
        assert_eq!(json["place_id"], "42");
        assert_eq!(json["address"], NO_ADDRESS);
        assert_eq!(json["types"], serde_json::json!(["Park"]));
        assert!(json["rating"].is_null());
        assert!(json["user_ratings_total"].is_null());
    }
}
