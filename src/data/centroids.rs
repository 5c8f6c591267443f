use crate::core::geo::LatLng;
use crate::Result;
use fxhash::FxHashMap;
use serde_json::Value;

/// Externally supplied focus coordinates, keyed by region display name.
///
/// Only well-formed `[lng, lat]` pairs are kept; anything else is dropped while
/// loading so lookups for those names fall through to computed centers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CenterLookup {
    centers: FxHashMap<String, LatLng>,
}

impl CenterLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        let Some(entries) = value.as_object() else {
            log::warn!("centroid lookup is not a JSON object; using an empty lookup");
            return Self::default();
        };
        let mut centers = FxHashMap::default();
        for (name, pair) in entries {
            match LatLng::from_json_pair(pair) {
                Some(center) => {
                    centers.insert(name.clone(), center);
                }
                None => log::debug!("dropping malformed centroid for {:?}: {}", name, pair),
            }
        }
        Self { centers }
    }

    pub fn insert(&mut self, name: impl Into<String>, center: LatLng) {
        self.centers.insert(name.into(), center);
    }

    pub fn get(&self, name: &str) -> Option<LatLng> {
        self.centers.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, LatLng)> for CenterLookup {
    fn from_iter<I: IntoIterator<Item = (S, LatLng)>>(iter: I) -> Self {
        Self {
            centers: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_only_well_formed_pairs() {
        let lookup = CenterLookup::from_json_str(
            r#"{
                "RegionA": [10, 20],
                "RegionB": [116.4, 39.9],
                "RegionC": [1],
                "RegionD": "somewhere",
                "RegionE": [null, 3]
            }"#,
        )
        .unwrap();

        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get("RegionA"), Some(LatLng::from_lng_lat(10.0, 20.0)));
        assert_eq!(lookup.get("RegionC"), None);
        assert_eq!(lookup.get("Missing"), None);
    }

    #[test]
    fn test_non_object_is_empty() {
        assert!(CenterLookup::from_json_str("[[10, 20]]").unwrap().is_empty());
        assert!(CenterLookup::from_json_str("{").is_err());
    }
}
