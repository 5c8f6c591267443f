use crate::core::bounds::BoundingBox;
use crate::data::attributes::RegionAttributes;
use crate::spatial::index::bounds_of_coordinates;
use crate::{MapError, Result};
use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Raw GeoJSON geometry. Coordinates stay as parsed JSON so that one malformed
/// feature never fails the whole document; they are interpreted lazily.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
    /// Members of a `GeometryCollection`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub geometries: Vec<Geometry>,
}

impl Geometry {
    pub fn polygon(coordinates: Value) -> Self {
        Self {
            kind: "Polygon".to_string(),
            coordinates,
            geometries: Vec::new(),
        }
    }

    /// Folds every position of the geometry into a bounding box
    pub fn bounds(&self) -> BoundingBox {
        let mut bounds = bounds_of_coordinates(&self.coordinates);
        for member in &self.geometries {
            let inner = member.bounds();
            if inner.is_valid() {
                bounds.extend(inner.min_lng, inner.min_lat);
                bounds.extend(inner.max_lng, inner.max_lat);
            }
        }
        bounds
    }

    /// Interprets the geometry as polygons. Non-areal or malformed input yields `None`.
    pub fn to_multi_polygon(&self) -> Option<MultiPolygon<f64>> {
        let polygons = match self.kind.as_str() {
            "Polygon" => vec![parse_polygon(&self.coordinates)?],
            "MultiPolygon" => self
                .coordinates
                .as_array()?
                .iter()
                .map(parse_polygon)
                .collect::<Option<Vec<_>>>()?,
            "GeometryCollection" => {
                let mut polygons = Vec::new();
                for member in &self.geometries {
                    polygons.extend(member.to_multi_polygon()?.0);
                }
                polygons
            }
            _ => return None,
        };
        if polygons.is_empty() {
            None
        } else {
            Some(MultiPolygon(polygons))
        }
    }
}

fn parse_polygon(value: &Value) -> Option<Polygon<f64>> {
    let mut rings = value.as_array()?.iter().map(parse_ring);
    let exterior = rings.next()??;
    let interiors = rings.collect::<Option<Vec<_>>>()?;
    Some(Polygon::new(exterior, interiors))
}

fn parse_ring(value: &Value) -> Option<LineString<f64>> {
    let coords = value
        .as_array()?
        .iter()
        .map(|position| {
            let position = position.as_array()?;
            let x = position.first()?.as_f64()?;
            let y = position.get(1)?.as_f64()?;
            (x.is_finite() && y.is_finite()).then_some(Coord { x, y })
        })
        .collect::<Option<Vec<_>>>()?;
    (coords.len() >= 3).then(|| LineString::new(coords))
}

/// One region: geometry, raw properties and their normalized form. The bounding
/// box is computed on first use and cached for the feature's lifetime.
#[derive(Debug, Clone)]
pub struct Feature {
    geometry: Option<Geometry>,
    properties: Arc<Map<String, Value>>,
    attributes: RegionAttributes,
    bounds: OnceCell<BoundingBox>,
}

impl Feature {
    pub fn new(geometry: Option<Geometry>, properties: Map<String, Value>) -> Self {
        let attributes = RegionAttributes::from_properties(&properties);
        Self {
            geometry,
            properties: Arc::new(properties),
            attributes,
            bounds: OnceCell::new(),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let geometry = object
            .get("geometry")
            .filter(|g| !g.is_null())
            .and_then(|g| match serde_json::from_value::<Geometry>(g.clone()) {
                Ok(geometry) => Some(geometry),
                Err(e) => {
                    log::debug!("unreadable geometry, feature kept without one: {}", e);
                    None
                }
            });
        let properties = object
            .get("properties")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        Some(Self::new(geometry, properties))
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn properties(&self) -> &Arc<Map<String, Value>> {
        &self.properties
    }

    pub fn attributes(&self) -> &RegionAttributes {
        &self.attributes
    }

    /// The cached bounding box, computing it if this feature was never indexed
    pub fn bounds(&self) -> BoundingBox {
        *self.bounds.get_or_init(|| {
            self.geometry
                .as_ref()
                .map(Geometry::bounds)
                .unwrap_or_else(BoundingBox::empty)
        })
    }

    /// The cached bounding box, if one has been attached yet
    pub fn cached_bounds(&self) -> Option<BoundingBox> {
        self.bounds.get().copied()
    }

    pub fn is_indexed(&self) -> bool {
        self.bounds.get().is_some()
    }

    pub fn to_multi_polygon(&self) -> Option<MultiPolygon<f64>> {
        self.geometry.as_ref()?.to_multi_polygon()
    }
}

/// Ordered collection of features, loaded once per session
#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Parses a GeoJSON `FeatureCollection` document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| MapError::DataLoad("document is not a JSON object".to_string()))?;
        match object.get("type").and_then(Value::as_str) {
            Some("FeatureCollection") => {}
            other => {
                return Err(MapError::DataLoad(format!(
                    "expected a FeatureCollection, found {:?}",
                    other
                )))
            }
        }
        let entries = object
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| MapError::DataLoad("missing `features` array".to_string()))?;

        let mut features = Vec::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            match Feature::from_value(entry) {
                Some(feature) => features.push(feature),
                None => log::warn!("skipping feature #{}: not a JSON object", position),
            }
        }
        Ok(Self { features })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Feature> {
        self.features.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    /// Union of every valid feature box; `None` if no feature has one
    pub fn bounds(&self) -> Option<BoundingBox> {
        let mut total = BoundingBox::empty();
        for bounds in self.features.iter().map(Feature::bounds).filter(BoundingBox::is_valid) {
            total.extend(bounds.min_lng, bounds.min_lat);
            total.extend(bounds.max_lng, bounds.max_lat);
        }
        total.is_valid().then_some(total)
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
