//! Landmark records, categories and their display styles.

use serde::{Deserialize, Deserializer, Serialize};

use super::Coordinate;

/// Provider-assigned identifier, always compared in string form.
///
/// Overpass hands out integers while the app server may echo them back as
/// strings, so both deserialize to the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LandmarkId(String);

impl LandmarkId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LandmarkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for LandmarkId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for LandmarkId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for LandmarkId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for LandmarkId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Signed(i64),
            Unsigned(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Signed(n) => Self(n.to_string()),
            RawId::Unsigned(n) => Self(n.to_string()),
            RawId::Text(s) => Self(s),
        })
    }
}

/// Landmark classification shown in the list and on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Tourist Attraction")]
    TouristAttraction,
    Monument,
    Museum,
    Park,
    Restaurant,
    #[serde(rename = "Shopping Mall")]
    ShoppingMall,
    Landmark,
}

/// Fixed color, icon and background tint for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStyle {
    pub color: &'static str,
    pub icon: &'static str,
    pub background: &'static str,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::TouristAttraction,
        Category::Monument,
        Category::Museum,
        Category::Park,
        Category::Restaurant,
        Category::ShoppingMall,
        Category::Landmark,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::TouristAttraction => "Tourist Attraction",
            Category::Monument => "Monument",
            Category::Museum => "Museum",
            Category::Park => "Park",
            Category::Restaurant => "Restaurant",
            Category::ShoppingMall => "Shopping Mall",
            Category::Landmark => "Landmark",
        }
    }

    pub fn style(&self) -> CategoryStyle {
        let (color, icon, background) = match self {
            Category::TouristAttraction => ("#3b82f6", "bi-star-fill", "#dbeafe"),
            Category::Monument => ("#8b5cf6", "bi-building", "#ede9fe"),
            Category::Museum => ("#06b6d4", "bi-collection", "#cffafe"),
            Category::Park => ("#10b981", "bi-tree-fill", "#d1fae5"),
            Category::Restaurant => ("#f59e0b", "bi-cup-hot-fill", "#fef3c7"),
            Category::ShoppingMall => ("#ef4444", "bi-shop", "#fee2e2"),
            Category::Landmark => ("#6366f1", "bi-geo-alt-fill", "#e0e7ff"),
        };
        CategoryStyle {
            color,
            icon,
            background,
        }
    }

    /// Accepts the display label ("Shopping Mall") or a snake-case token
    /// ("shopping_mall"), case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        Category::ALL
            .into_iter()
            .find(|c| c.label().to_ascii_lowercase() == wanted)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which part of the catalog the list and map show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(CategoryFilter::All);
        }
        Category::parse(s).map(CategoryFilter::Only)
    }

    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

/// A nearby landmark as shown on the explore page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandmarkRecord {
    pub id: LandmarkId,
    pub name: String,
    pub category: Category,
    pub position: Coordinate,
    /// Distance from the user at fetch time
    pub distance_km: f64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_ids_are_equal() {
        let from_number: LandmarkId = serde_json::from_str("12345").unwrap();
        let from_string: LandmarkId = serde_json::from_str("\"12345\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number, LandmarkId::from(12345));
    }

    #[test]
    fn test_category_parse_accepts_labels_and_tokens() {
        assert_eq!(Category::parse("Shopping Mall"), Some(Category::ShoppingMall));
        assert_eq!(Category::parse("shopping_mall"), Some(Category::ShoppingMall));
        assert_eq!(
            Category::parse("tourist-attraction"),
            Some(Category::TouristAttraction)
        );
        assert_eq!(Category::parse("zoo"), None);
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!(CategoryFilter::parse("ALL"), Some(CategoryFilter::All));
        assert_eq!(
            CategoryFilter::parse("museum"),
            Some(CategoryFilter::Only(Category::Museum))
        );
        assert_eq!(CategoryFilter::parse("nope"), None);
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::TouristAttraction).unwrap();
        assert_eq!(json, "\"Tourist Attraction\"");
    }

    #[test]
    fn test_every_category_has_distinct_color() {
        let mut colors: Vec<_> = Category::ALL.iter().map(|c| c.style().color).collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), Category::ALL.len());
    }
}
