//! Built-in demonstration dataset, used when the primary feature source cannot be
//! loaded so the map still has something to show.

use crate::data::geojson::{Feature, FeatureCollection, Geometry};
use serde_json::{json, Map};

/// (id, name, yield, crop, [min_lng, min_lat, max_lng, max_lat])
const DEMO_REGIONS: &[(&str, &str, f64, &str, [f64; 4])] = &[
    ("demo-1", "Northern Plain", 6120.0, "wheat", [113.0, 34.5, 118.0, 38.5]),
    ("demo-2", "Northeast Basin", 7480.0, "maize", [123.0, 43.0, 128.0, 47.5]),
    ("demo-3", "Yangtze Delta", 6890.0, "rice", [118.5, 29.5, 122.0, 32.5]),
    ("demo-4", "Sichuan Basin", 5930.0, "rice", [103.5, 28.5, 107.5, 31.5]),
    ("demo-5", "Loess Terraces", 3870.0, "millet", [106.0, 35.0, 110.5, 38.0]),
];

pub fn fallback_collection() -> FeatureCollection {
    FeatureCollection::new(DEMO_REGIONS.iter().map(demo_feature).collect())
}

fn demo_feature(region: &(&str, &str, f64, &str, [f64; 4])) -> Feature {
    let (id, name, yield_val, crop, [w, s, e, n]) = *region;
    let geometry = Geometry::polygon(json!([[[w, s], [e, s], [e, n], [w, n], [w, s]]]));
    let mut properties = Map::new();
    properties.insert("ID".to_string(), json!(id));
    properties.insert("admin_name".to_string(), json!(name));
    properties.insert("yield_val".to_string(), json!(yield_val));
    properties.insert("crop_type".to_string(), json!(crop));
    Feature::new(Some(geometry), properties)
}
