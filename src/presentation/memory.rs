//! Headless surfaces that keep what they were asked to display in memory.
//!
//! Used by the JSON output of the binary and by tests.

use std::collections::BTreeMap;

use super::{
    LandmarkCard, ListSurface, MapSurface, MarkerHandle, MarkerView, PanelView, SaveAffordance,
};
use crate::models::{Coordinate, LandmarkId};

#[derive(Debug, Default)]
pub struct MemoryMap {
    next_handle: u64,
    live: BTreeMap<MarkerHandle, MarkerView>,
    views: Vec<(Coordinate, u8)>,
    opened: Vec<LandmarkId>,
    user: Option<Coordinate>,
}

impl MemoryMap {
    pub fn live_markers(&self) -> usize {
        self.live.len()
    }

    pub fn markers(&self) -> impl Iterator<Item = &MarkerView> {
        self.live.values()
    }

    /// Identifiers of the markers on the map, in placement order.
    pub fn marker_ids(&self) -> Vec<String> {
        self.live.values().map(|m| m.id.to_string()).collect()
    }

    pub fn opened_ids(&self) -> Vec<String> {
        self.opened.iter().map(|id| id.to_string()).collect()
    }

    pub fn last_view(&self) -> Option<(Coordinate, u8)> {
        self.views.last().copied()
    }

    pub fn user(&self) -> Option<Coordinate> {
        self.user
    }
}

impl MapSurface for MemoryMap {
    fn add_marker(&mut self, marker: &MarkerView) -> MarkerHandle {
        self.next_handle += 1;
        let handle = MarkerHandle(self.next_handle);
        self.live.insert(handle, marker.clone());
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.live.remove(&handle);
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.views.push((center, zoom));
    }

    fn open_popup(&mut self, handle: MarkerHandle) {
        if let Some(marker) = self.live.get(&handle) {
            self.opened.push(marker.id.clone());
        }
    }

    fn show_user(&mut self, at: Coordinate) {
        self.user = Some(at);
    }
}

#[derive(Debug, Default)]
pub struct MemoryList {
    panel: Option<PanelView>,
    label: Option<String>,
    selected: Option<LandmarkId>,
    notices: Vec<String>,
}

impl MemoryList {
    pub fn panel(&self) -> Option<&PanelView> {
        self.panel.as_ref()
    }

    pub fn cards(&self) -> &[LandmarkCard] {
        match &self.panel {
            Some(PanelView::Landmarks { cards, .. }) => cards,
            _ => &[],
        }
    }

    pub fn card_ids(&self) -> Vec<String> {
        self.cards().iter().map(|c| c.id.to_string()).collect()
    }

    pub fn card(&self, id: &LandmarkId) -> Option<&LandmarkCard> {
        self.cards().iter().find(|c| &c.id == id)
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn selected(&self) -> Option<&LandmarkId> {
        self.selected.as_ref()
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }
}

impl ListSurface for MemoryList {
    fn show_panel(&mut self, panel: &PanelView) {
        self.panel = Some(panel.clone());
        self.selected = None;
    }

    fn set_location_label(&mut self, label: &str) {
        self.label = Some(label.to_string());
    }

    fn mark_selected(&mut self, id: &LandmarkId) {
        self.selected = Some(id.clone());
    }

    fn set_affordance(&mut self, id: &LandmarkId, affordance: &SaveAffordance) {
        if let Some(PanelView::Landmarks { cards, .. }) = &mut self.panel {
            if let Some(card) = cards.iter_mut().find(|c| &c.id == id) {
                card.affordance = affordance.clone();
            }
        }
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
