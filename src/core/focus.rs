use crate::core::{constants::NOMINAL_CENTER_LNG_LAT, geo::LatLng};
use crate::data::{centroids::CenterLookup, geojson::Feature};

/// Picks the point the map flies to when a region is selected.
///
/// Precedence: the externally supplied centroid for `key`, then the center of the
/// feature's bounding box, then the nominal dataset center when the box is degenerate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusResolver {
    nominal_center: LatLng,
}

impl FocusResolver {
    pub fn new(nominal_center: LatLng) -> Self {
        Self { nominal_center }
    }

    pub fn nominal_center(&self) -> LatLng {
        self.nominal_center
    }

    pub fn resolve(&self, key: &str, feature: &Feature, lookup: &CenterLookup) -> LatLng {
        if let Some(center) = lookup.get(key) {
            log::debug!("focus for {:?} from centroid lookup", key);
            return center;
        }
        let bounds = feature.bounds();
        if bounds.is_valid() {
            log::debug!("focus for {:?} from bounds center", key);
            bounds.center()
        } else {
            log::debug!("focus for {:?} falls back to the nominal center", key);
            self.nominal_center
        }
    }
}

impl Default for FocusResolver {
    fn default() -> Self {
        let (lng, lat) = NOMINAL_CENTER_LNG_LAT;
        Self::new(LatLng::from_lng_lat(lng, lat))
    }
}
