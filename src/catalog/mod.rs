//! In-memory landmark catalog: the latest fetch and the filtered view of it.

use crate::geo::MAX_DISTANCE_KM;
use crate::models::{CategoryFilter, LandmarkId, LandmarkRecord};

/// Single source of truth for what the list and the map display.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    all: Vec<LandmarkRecord>,
    filtered: Vec<LandmarkRecord>,
    filter: CategoryFilter,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the catalog with a fresh fetch.
    ///
    /// Records beyond [`MAX_DISTANCE_KM`] are dropped, the rest are sorted by
    /// distance (ties keep provider order), and the filter resets to all.
    pub fn load(&mut self, records: Vec<LandmarkRecord>) {
        let mut all: Vec<_> = records
            .into_iter()
            .filter(|r| r.distance_km <= MAX_DISTANCE_KM)
            .collect();
        all.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

        self.filtered = all.clone();
        self.all = all;
        self.filter = CategoryFilter::All;
    }

    /// Recompute the filtered view from `all`.
    pub fn apply_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.filtered = self
            .all
            .iter()
            .filter(|r| filter.matches(r.category))
            .cloned()
            .collect();
    }

    pub fn all(&self) -> &[LandmarkRecord] {
        &self.all
    }

    pub fn filtered(&self) -> &[LandmarkRecord] {
        &self.filtered
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Look a record up among the currently displayed ones.
    pub fn find(&self, id: &LandmarkId) -> Option<&LandmarkRecord> {
        self.filtered.iter().find(|r| &r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Coordinate};

    fn record(id: i64, category: Category, distance_km: f64) -> LandmarkRecord {
        LandmarkRecord {
            id: LandmarkId::from(id),
            name: format!("Place {}", id),
            category,
            position: Coordinate::new(40.0, -74.0),
            distance_km,
            description: "Interesting place to visit.".to_string(),
            reference_url: None,
            image_url: None,
        }
    }

    fn sample() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.load(vec![
            record(1, Category::Park, 1.9),
            record(2, Category::Museum, 0.4),
            record(3, Category::Park, 0.8),
            record(4, Category::Restaurant, 2.5),
            record(5, Category::Museum, 0.8),
        ]);
        catalog
    }

    fn ids(records: &[LandmarkRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_load_cuts_and_sorts() {
        let catalog = sample();
        assert_eq!(ids(catalog.all()), vec!["2", "3", "5", "1"]);
        assert!(catalog.all().iter().all(|r| r.distance_km <= 2.0));
        assert!(catalog
            .all()
            .windows(2)
            .all(|w| w[0].distance_km <= w[1].distance_km));
        assert_eq!(catalog.filtered(), catalog.all());
    }

    #[test]
    fn test_load_scenario_keeps_two_nearest() {
        let mut catalog = Catalog::new();
        catalog.load(vec![
            record(1, Category::Landmark, 3.0),
            record(2, Category::Landmark, 1.5),
            record(3, Category::Landmark, 0.5),
        ]);
        let distances: Vec<f64> = catalog.all().iter().map(|r| r.distance_km).collect();
        assert_eq!(distances, vec![0.5, 1.5]);
    }

    #[test]
    fn test_filter_all_is_identity() {
        let mut catalog = sample();
        catalog.apply_filter(CategoryFilter::Only(Category::Park));
        catalog.apply_filter(CategoryFilter::All);
        assert_eq!(catalog.filtered(), catalog.all());
    }

    #[test]
    fn test_filter_is_ordered_subsequence_and_idempotent() {
        let mut catalog = sample();
        catalog.apply_filter(CategoryFilter::Only(Category::Park));
        let once = catalog.filtered().to_vec();
        assert_eq!(ids(&once), vec!["3", "1"]);
        assert!(once.iter().all(|r| r.category == Category::Park));

        catalog.apply_filter(CategoryFilter::Only(Category::Park));
        assert_eq!(catalog.filtered(), once.as_slice());
        assert_eq!(catalog.all().len(), 4);
    }

    #[test]
    fn test_filter_without_matches_is_empty() {
        let mut catalog = sample();
        catalog.apply_filter(CategoryFilter::Only(Category::ShoppingMall));
        assert!(catalog.filtered().is_empty());
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_reload_resets_filter() {
        let mut catalog = sample();
        catalog.apply_filter(CategoryFilter::Only(Category::Museum));
        catalog.load(vec![record(9, Category::Park, 0.1)]);
        assert_eq!(catalog.filter(), CategoryFilter::All);
        assert_eq!(ids(catalog.filtered()), vec!["9"]);
        assert!(catalog.find(&LandmarkId::from(2)).is_none());
    }
}
