//! Presentation of the catalog as a list panel and as map markers.
//!
//! The builders in this module are pure: they turn records into view models
//! that a surface renders however it likes. [`PresentationSync`] keeps the
//! two surfaces reconciled with the catalog.

mod memory;
mod sync;
mod terminal;

pub use memory::*;
pub use sync::*;
pub use terminal::*;

use serde::Serialize;

use crate::models::{
    Category, CategoryFilter, CategoryStyle, Coordinate, LandmarkId, LandmarkRecord,
};
use crate::saved::SaveState;

/// Zoom used when centering on the user.
pub const USER_ZOOM: u8 = 15;
/// Zoom used when centering on a selected landmark.
pub const LANDMARK_ZOOM: u8 = 16;

pub const PANEL_TITLE: &str = "Nearby Landmarks";
pub const LOADING_MESSAGE: &str = "Finding landmarks near you...";

/// Visible state of the save/unsave control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveAffordance {
    pub state: SaveState,
    pub icon: &'static str,
    pub color: &'static str,
    pub title: &'static str,
}

impl SaveAffordance {
    pub fn for_state(state: SaveState) -> Self {
        match state {
            SaveState::Saved => Self {
                state,
                icon: "bi-bookmark-check",
                color: "#10b981",
                title: "Remove from travel plan",
            },
            SaveState::Unsaved => Self {
                state,
                icon: "bi-bookmark-plus",
                color: "#6366f1",
                title: "Save to travel plan",
            },
        }
    }
}

/// One entry of the landmark list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkCard {
    pub id: LandmarkId,
    pub name: String,
    pub category: Category,
    pub style: CategoryStyle,
    pub distance_label: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub affordance: SaveAffordance,
}

/// Content of a marker popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupView {
    pub name: String,
    pub category: Category,
    pub style: CategoryStyle,
    pub distance_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
}

/// A landmark marker and its popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerView {
    pub id: LandmarkId,
    pub position: Coordinate,
    pub style: CategoryStyle,
    pub popup: PopupView,
}

/// Title and count badge of the landmark panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelHeader {
    pub title: &'static str,
    pub badge: String,
}

/// Everything the list panel can show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PanelView {
    Loading {
        message: String,
    },
    Error {
        message: String,
    },
    Empty {
        header: PanelHeader,
        message: String,
        hint: String,
    },
    Landmarks {
        header: PanelHeader,
        cards: Vec<LandmarkCard>,
    },
}

impl PanelView {
    pub fn loading() -> Self {
        PanelView::Loading {
            message: LOADING_MESSAGE.to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        PanelView::Error {
            message: message.into(),
        }
    }
}

pub fn distance_label(distance_km: f64) -> String {
    format!("{:.1} km away", distance_km)
}

pub fn landmark_card(record: &LandmarkRecord, state: SaveState) -> LandmarkCard {
    LandmarkCard {
        id: record.id.clone(),
        name: record.name.clone(),
        category: record.category,
        style: record.category.style(),
        distance_label: distance_label(record.distance_km),
        description: record.description.clone(),
        reference_url: record.reference_url.clone(),
        image_url: record.image_url.clone(),
        affordance: SaveAffordance::for_state(state),
    }
}

pub fn marker_view(record: &LandmarkRecord) -> MarkerView {
    let style = record.category.style();
    MarkerView {
        id: record.id.clone(),
        position: record.position,
        style,
        popup: PopupView {
            name: record.name.clone(),
            category: record.category,
            style,
            distance_label: distance_label(record.distance_km),
            reference_url: record.reference_url.clone(),
        },
    }
}

/// Badge shows the total for "all", `shown/total` otherwise.
pub fn panel_header(total: usize, shown: usize, filter: CategoryFilter) -> PanelHeader {
    let badge = match filter {
        CategoryFilter::All => total.to_string(),
        CategoryFilter::Only(_) => format!("{}/{}", shown, total),
    };
    PanelHeader {
        title: PANEL_TITLE,
        badge,
    }
}
