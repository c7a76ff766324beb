//! Pure helpers over coordinates and OSM tag bags.
//!
//! Nothing in here touches the network; the gateway and discovery modules
//! call these to turn raw POIs into landmark records.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Category, Coordinate, TagBag};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Landmarks further away than this are never shown.
pub const MAX_DISTANCE_KM: f64 = 2.0;

const ENCYCLOPEDIA_BASE: &str = "https://en.wikipedia.org/wiki/";
const GENERIC_DESCRIPTION: &str = "Interesting place to visit.";

static LANGUAGE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2}:").unwrap());

static FLICKR_PHOTO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"flickr\.com/photos/[^/]+/(\d+)").unwrap());

/// Great-circle distance between two coordinates in kilometers.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    // rounding can push h past 1 for antipodal points
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Ordered (key, value, category) rules; the first match wins.
const CATEGORY_RULES: &[(&str, &str, Category)] = &[
    ("tourism", "attraction", Category::TouristAttraction),
    ("historic", "monument", Category::Monument),
    ("historic", "castle", Category::Monument),
    ("historic", "ruins", Category::Monument),
    ("historic", "church", Category::Monument),
    ("tourism", "museum", Category::Museum),
    ("leisure", "park", Category::Park),
    ("amenity", "restaurant", Category::Restaurant),
    ("amenity", "cafe", Category::Restaurant),
    ("amenity", "bar", Category::Restaurant),
    ("amenity", "pub", Category::Restaurant),
    ("shop", "mall", Category::ShoppingMall),
    ("amenity", "theatre", Category::TouristAttraction),
    ("amenity", "cinema", Category::TouristAttraction),
    ("leisure", "sports_centre", Category::TouristAttraction),
    ("amenity", "hospital", Category::Landmark),
    ("amenity", "school", Category::Landmark),
    ("amenity", "university", Category::Landmark),
    ("amenity", "bank", Category::Landmark),
    ("amenity", "post_office", Category::Landmark),
    ("amenity", "police", Category::Landmark),
    ("amenity", "fire_station", Category::Landmark),
];

/// Classify a tag bag into a landmark category.
pub fn classify(tags: &TagBag) -> Category {
    CATEGORY_RULES
        .iter()
        .find(|(key, value, _)| tags.get(*key).map(String::as_str) == Some(*value))
        .map(|(_, _, category)| *category)
        .unwrap_or(Category::Landmark)
}

/// Non-empty tag value, trimmed.
fn tag<'a>(tags: &'a TagBag, key: &str) -> Option<&'a str> {
    tags.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Explicit description, else a canned sentence for the category.
pub fn describe(tags: &TagBag) -> String {
    if let Some(description) = tag(tags, "description") {
        return description.to_string();
    }
    match classify(tags) {
        Category::TouristAttraction => "Popular tourist destination.".to_string(),
        Category::Monument => "Historical monument of cultural significance.".to_string(),
        _ => GENERIC_DESCRIPTION.to_string(),
    }
}

/// Page title from the `wikipedia` tag with any language prefix removed.
pub fn encyclopedia_title(tags: &TagBag) -> Option<String> {
    let raw = tag(tags, "wikipedia")?;
    let title = LANGUAGE_PREFIX.replace(raw, "");
    let title = title.trim();
    (!title.is_empty()).then(|| title.to_string())
}

/// Link to the landmark's encyclopedia article, if it has one.
pub fn reference_url(tags: &TagBag) -> Option<String> {
    encyclopedia_title(tags)
        .map(|title| format!("{}{}", ENCYCLOPEDIA_BASE, urlencoding::encode(&title)))
}

/// Best image we can find in the tags: `image`, then `photo`, then a Flickr
/// photo page linked from `website`.
pub fn extract_image(tags: &TagBag) -> Option<String> {
    if let Some(image) = tag(tags, "image") {
        return Some(image.to_string());
    }
    if let Some(photo) = tag(tags, "photo") {
        return Some(photo.to_string());
    }
    let website = tag(tags, "website")?;
    FLICKR_PHOTO
        .captures(website)
        .map(|caps| format!("https://live.staticflickr.com/{}/size_m.jpg", &caps[1]))
}
