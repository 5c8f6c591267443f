use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in geographic coordinates (degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Creates bounds from individual coordinates
    pub fn new(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> Self {
        Self {
            min_lng,
            min_lat,
            max_lng,
            max_lat,
        }
    }

    /// Inverted world bounds. Any real coordinate folded into it overrides both
    /// corners; if nothing is folded in the result stays degenerate.
    pub fn empty() -> Self {
        Self::new(180.0, 90.0, -180.0, -90.0)
    }

    /// Creates bounds from two `[lng, lat]` corner points
    pub fn from_corners(a: LatLng, b: LatLng) -> Self {
        Self::new(
            a.lng.min(b.lng),
            a.lat.min(b.lat),
            a.lng.max(b.lng),
            a.lat.max(b.lat),
        )
    }

    /// Gets the width of the bounds
    pub fn width(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// Gets the height of the bounds
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> LatLng {
        LatLng::from_lng_lat(
            (self.min_lng + self.max_lng) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// Checks if the bounds are valid (min <= max on both axes, no NaN)
    pub fn is_valid(&self) -> bool {
        self.min_lng <= self.max_lng && self.min_lat <= self.max_lat
    }

    /// Checks if the bounds contain a point (edges included)
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lng >= self.min_lng
            && point.lng <= self.max_lng
            && point.lat >= self.min_lat
            && point.lat <= self.max_lat
    }

    /// Closed-interval intersection test. Boxes sharing only an edge or a corner
    /// intersect; a degenerate box intersects nothing.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        if !self.is_valid() || !other.is_valid() {
            return false;
        }
        !(other.max_lng < self.min_lng
            || other.min_lng > self.max_lng
            || other.max_lat < self.min_lat
            || other.min_lat > self.max_lat)
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, lng: f64, lat: f64) {
        self.min_lng = self.min_lng.min(lng);
        self.min_lat = self.min_lat.min(lat);
        self.max_lng = self.max_lng.max(lng);
        self.max_lat = self.max_lat.max(lat);
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}
