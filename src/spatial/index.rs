use crate::core::bounds::BoundingBox;
use crate::data::geojson::FeatureCollection;

use rstar::{RTree, RTreeObject, AABB};
use serde_json::Value;

/// Folds every position found anywhere in a GeoJSON coordinate tree into a box.
///
/// Nesting depth is not fixed: polygon → ring → position and
/// multi-polygon → polygon → ring → position are both walked. A position is an
/// array whose first two members are finite numbers; anything else is descended
/// into or ignored. Without a single usable position the inverted seed is returned
/// unchanged, which is degenerate.
pub fn bounds_of_coordinates(coordinates: &Value) -> BoundingBox {
    let mut bounds = BoundingBox::empty();
    fold_positions(coordinates, &mut bounds);
    bounds
}

fn fold_positions(value: &Value, bounds: &mut BoundingBox) {
    let Some(items) = value.as_array() else {
        return;
    };
    if let [lng, lat, ..] = items.as_slice() {
        if let (Some(lng), Some(lat)) = (lng.as_f64(), lat.as_f64()) {
            if lng.is_finite() && lat.is_finite() {
                bounds.extend(lng, lat);
            }
            return;
        }
    }
    for item in items {
        fold_positions(item, bounds);
    }
}

/// Attaches a bounding box to every feature of a collection
pub struct BoundingBoxIndexer;

impl BoundingBoxIndexer {
    /// Computes the box of each feature that does not have one yet and returns how
    /// many were computed. Already indexed features are left untouched, so running
    /// this twice is a no-op the second time.
    pub fn index(collection: &FeatureCollection) -> usize {
        let mut indexed = 0;
        let mut degenerate = 0;
        for (position, feature) in collection.iter().enumerate() {
            if feature.is_indexed() {
                continue;
            }
            let bounds = feature.bounds();
            indexed += 1;
            if !bounds.is_valid() {
                degenerate += 1;
                log::warn!(
                    "malformed geometry: feature #{} ({}) has no usable coordinates and will not be drawn",
                    position,
                    feature.attributes().name
                );
            }
        }
        if indexed > 0 {
            log::debug!(
                "indexed {} features ({} degenerate)",
                indexed,
                degenerate
            );
        }
        indexed
    }
}

/// A feature box stored in the R-tree, keyed by the feature's position
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedEnvelope {
    pub position: usize,
    pub bounds: BoundingBox,
}

// --- rstar integration -------------------------------------------------------------------------

impl RTreeObject for IndexedEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.bounds.min_lng, self.bounds.min_lat],
            [self.bounds.max_lng, self.bounds.max_lat],
        )
    }
}

/// R-tree over the valid feature boxes of a collection, for viewport queries that
/// do not scan every feature. Degenerate boxes are left out.
#[derive(Default)]
pub struct SpatialIndex {
    rtree: RTree<IndexedEnvelope>,
}

impl SpatialIndex {
    /// Indexes the collection (if needed) and bulk-loads the tree
    pub fn build(collection: &FeatureCollection) -> Self {
        BoundingBoxIndexer::index(collection);
        let envelopes = collection
            .iter()
            .enumerate()
            .map(|(position, feature)| IndexedEnvelope {
                position,
                bounds: feature.bounds(),
            })
            .filter(|envelope| envelope.bounds.is_valid())
            .collect();
        Self {
            rtree: RTree::bulk_load(envelopes),
        }
    }

    /// Positions of features whose box intersects `bounds` (edges included), in
    /// ascending order
    pub fn query(&self, bounds: &BoundingBox) -> Vec<usize> {
        if !bounds.is_valid() {
            return Vec::new();
        }
        let envelope = AABB::from_corners(
            [bounds.min_lng, bounds.min_lat],
            [bounds.max_lng, bounds.max_lat],
        );
        let mut positions: Vec<usize> = self
            .rtree
            .locate_in_envelope_intersecting(&envelope)
            .map(|item| item.position)
            .collect();
        positions.sort_unstable();
        positions
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }
}
