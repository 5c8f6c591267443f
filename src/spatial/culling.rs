use crate::core::{bounds::BoundingBox, viewport::Viewport};
use crate::data::geojson::FeatureCollection;
use crate::spatial::index::SpatialIndex;

/// Viewport culling for the region layer.
///
/// Views zoomed out below `min_detail_zoom` draw nothing; otherwise every feature
/// whose bounding box touches the visible bounds is kept. Results are feature
/// positions in input order, so the same inputs always give the same output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportFilter {
    pub min_detail_zoom: u8,
}

impl ViewportFilter {
    pub fn new(min_detail_zoom: u8) -> Self {
        Self { min_detail_zoom }
    }

    /// Whether the viewport is zoomed in far enough to draw anything
    pub fn is_detailed(&self, viewport: &Viewport) -> bool {
        viewport.zoom >= self.min_detail_zoom
    }

    /// Returns `true` if the box is at least partially inside the visible bounds.
    pub fn box_visible(viewport: &BoundingBox, target: &BoundingBox) -> bool {
        viewport.intersects(target)
    }

    /// Linear scan over the whole collection
    pub fn filter(&self, collection: &FeatureCollection, viewport: &Viewport) -> Vec<usize> {
        if !self.is_detailed(viewport) {
            return Vec::new();
        }
        collection
            .iter()
            .enumerate()
            .filter_map(|(position, feature)| {
                if Self::box_visible(&viewport.bounds, &feature.bounds()) {
                    Some(position)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Same result as [`filter`](Self::filter), answered from the R-tree
    pub fn filter_indexed(&self, index: &SpatialIndex, viewport: &Viewport) -> Vec<usize> {
        if !self.is_detailed(viewport) {
            return Vec::new();
        }
        index.query(&viewport.bounds)
    }
}
