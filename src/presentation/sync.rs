//! Keeps the list panel and the map markers in step with the catalog.

use super::{
    landmark_card, marker_view, panel_header, MarkerView, PanelView, SaveAffordance,
    LANDMARK_ZOOM,
};
use crate::catalog::Catalog;
use crate::models::{Coordinate, LandmarkId};
use crate::saved::{SaveState, SavedSet};

/// Opaque reference to a marker placed on a map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerHandle(pub u64);

/// The map widget, reduced to what the explore page needs from it.
pub trait MapSurface {
    fn add_marker(&mut self, marker: &MarkerView) -> MarkerHandle;
    fn remove_marker(&mut self, handle: MarkerHandle);
    fn set_view(&mut self, center: Coordinate, zoom: u8);
    fn open_popup(&mut self, handle: MarkerHandle);
    /// Place or move the "you are here" marker.
    fn show_user(&mut self, at: Coordinate);
}

/// The landmark panel next to the map.
pub trait ListSurface {
    fn show_panel(&mut self, panel: &PanelView);
    fn set_location_label(&mut self, label: &str);
    /// Highlight one entry and un-highlight every other.
    fn mark_selected(&mut self, id: &LandmarkId);
    fn set_affordance(&mut self, id: &LandmarkId, affordance: &SaveAffordance);
    /// Transient message, e.g. a failed save.
    fn notify(&mut self, message: &str);
}

struct PlacedMarker {
    id: LandmarkId,
    handle: MarkerHandle,
    position: Coordinate,
}

/// Owns both surfaces and the markers currently placed on the map.
pub struct PresentationSync<M, L> {
    map: M,
    list: L,
    markers: Vec<PlacedMarker>,
    selected: Option<LandmarkId>,
}

impl<M: MapSurface, L: ListSurface> PresentationSync<M, L> {
    pub fn new(map: M, list: L) -> Self {
        Self {
            map,
            list,
            markers: Vec::new(),
            selected: None,
        }
    }

    /// Replace list and markers wholesale with the catalog's filtered view.
    pub fn render(&mut self, catalog: &Catalog, saved: &SavedSet) {
        self.clear();

        let shown = catalog.filtered();
        let header = panel_header(catalog.all().len(), shown.len(), catalog.filter());

        if shown.is_empty() {
            let (message, hint) = if catalog.is_empty() {
                (
                    "No landmarks found nearby.",
                    "Try moving to a different location.",
                )
            } else {
                (
                    "No landmarks found for this filter.",
                    "Try selecting a different landmark type or moving to a different location.",
                )
            };
            self.list.show_panel(&PanelView::Empty {
                header,
                message: message.to_string(),
                hint: hint.to_string(),
            });
            return;
        }

        let cards = shown
            .iter()
            .map(|r| landmark_card(r, saved.state_of(&r.id)))
            .collect();
        self.list.show_panel(&PanelView::Landmarks { header, cards });

        for record in shown {
            let handle = self.map.add_marker(&marker_view(record));
            self.markers.push(PlacedMarker {
                id: record.id.clone(),
                handle,
                position: record.position,
            });
        }
        tracing::debug!("Rendered {} landmarks", self.markers.len());
    }

    /// Remove every landmark marker.
    pub fn clear(&mut self) {
        for marker in self.markers.drain(..) {
            self.map.remove_marker(marker.handle);
        }
        self.selected = None;
    }

    /// Highlight a rendered landmark, center the map on it and open its popup.
    ///
    /// Returns `false` if the landmark is not currently rendered.
    pub fn select(&mut self, id: &LandmarkId) -> bool {
        let Some(marker) = self.markers.iter().find(|m| &m.id == id) else {
            return false;
        };
        self.list.mark_selected(id);
        self.map.set_view(marker.position, LANDMARK_ZOOM);
        self.map.open_popup(marker.handle);
        self.selected = Some(id.clone());
        true
    }

    pub fn update_affordance(&mut self, id: &LandmarkId, state: SaveState) {
        self.list
            .set_affordance(id, &SaveAffordance::for_state(state));
    }

    pub fn show_loading(&mut self) {
        self.list.show_panel(&PanelView::loading());
    }

    pub fn show_error(&mut self, message: &str) {
        self.list.show_panel(&PanelView::error(message));
    }

    pub fn notify(&mut self, message: &str) {
        self.list.notify(message);
    }

    pub fn set_location_label(&mut self, label: &str) {
        self.list.set_location_label(label);
    }

    pub fn show_user(&mut self, at: Coordinate, zoom: u8) {
        self.map.set_view(at, zoom);
        self.map.show_user(at);
    }

    pub fn selected(&self) -> Option<&LandmarkId> {
        self.selected.as_ref()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    pub fn into_surfaces(self) -> (M, L) {
        (self.map, self.list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryFilter, LandmarkRecord};
    use crate::presentation::{MemoryList, MemoryMap};

    fn record(id: i64, category: Category, lat: f64, distance_km: f64) -> LandmarkRecord {
        LandmarkRecord {
            id: LandmarkId::from(id),
            name: format!("Place {}", id),
            category,
            position: Coordinate::new(lat, -74.0),
            distance_km,
            description: "Interesting place to visit.".to_string(),
            reference_url: None,
            image_url: None,
        }
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.load(vec![
            record(1, Category::Park, 40.001, 0.1),
            record(2, Category::Museum, 40.002, 0.2),
            // same coordinate as #2 on purpose
            record(3, Category::Park, 40.002, 0.3),
        ]);
        catalog
    }

    fn sync() -> PresentationSync<MemoryMap, MemoryList> {
        PresentationSync::new(MemoryMap::default(), MemoryList::default())
    }

    #[test]
    fn test_one_marker_and_card_per_record() {
        let mut sync = sync();
        let catalog = catalog();
        sync.render(&catalog, &SavedSet::new());

        assert_eq!(sync.marker_count(), 3);
        assert_eq!(sync.map().marker_ids(), sync.list().card_ids());
    }

    #[test]
    fn test_rerender_leaves_no_orphans() {
        let mut sync = sync();
        let mut catalog = catalog();
        sync.render(&catalog, &SavedSet::new());

        catalog.apply_filter(CategoryFilter::Only(Category::Park));
        sync.render(&catalog, &SavedSet::new());

        assert_eq!(sync.map().live_markers(), 2);
        assert_eq!(sync.map().marker_ids(), vec!["1", "3"]);
        assert_eq!(sync.list().card_ids(), vec!["1", "3"]);
    }

    #[test]
    fn test_render_reflects_saved_set() {
        let mut sync = sync();
        let saved: SavedSet = vec![LandmarkId::from("2")].into_iter().collect();
        sync.render(&catalog(), &saved);

        let states: Vec<SaveState> = sync
            .list()
            .cards()
            .iter()
            .map(|c| c.affordance.state)
            .collect();
        assert_eq!(
            states,
            vec![SaveState::Unsaved, SaveState::Saved, SaveState::Unsaved]
        );
    }

    #[test]
    fn test_select_opens_popup_by_identity() {
        let mut sync = sync();
        sync.render(&catalog(), &SavedSet::new());

        assert!(sync.select(&LandmarkId::from(3)));
        assert_eq!(sync.list().selected(), Some(&LandmarkId::from(3)));
        assert_eq!(sync.map().opened_ids(), vec!["3"]);
        assert_eq!(
            sync.map().last_view(),
            Some((Coordinate::new(40.002, -74.0), LANDMARK_ZOOM))
        );
    }

    #[test]
    fn test_selection_does_not_survive_rerender() {
        let mut sync = sync();
        let catalog = catalog();
        sync.render(&catalog, &SavedSet::new());
        sync.select(&LandmarkId::from(1));
        sync.render(&catalog, &SavedSet::new());

        assert!(sync.selected().is_none());
        assert!(sync.list().selected().is_none());
    }

    #[test]
    fn test_select_unknown_is_noop() {
        let mut sync = sync();
        sync.render(&catalog(), &SavedSet::new());
        assert!(!sync.select(&LandmarkId::from(99)));
        assert!(sync.map().opened_ids().is_empty());
    }

    #[test]
    fn test_empty_filter_shows_empty_panel() {
        let mut sync = sync();
        let mut catalog = catalog();
        catalog.apply_filter(CategoryFilter::Only(Category::ShoppingMall));
        sync.render(&catalog, &SavedSet::new());

        assert_eq!(sync.marker_count(), 0);
        match sync.list().panel() {
            Some(PanelView::Empty { header, message, .. }) => {
                assert_eq!(header.badge, "0/3");
                assert_eq!(message, "No landmarks found for this filter.");
            }
            other => panic!("unexpected panel {:?}", other),
        }
    }
}
