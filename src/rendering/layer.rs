use crate::{
    core::{bounds::BoundingBox, geo::LatLng},
    data::{attributes::RegionAttributes, geojson::FeatureCollection},
    rendering::style::{LayerStyles, PolygonStyle},
};
use fxhash::FxHashMap;
use geo::Contains;
use geo_types::{MultiPolygon, Point};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Identifies a drawn shape by the position of its feature in the collection, so the
/// same region keeps the same id across renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub usize);

impl ShapeId {
    pub fn position(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape#{}", self.0)
    }
}

/// Which pointer interactions a shape reports back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Interaction {
    pub hover: bool,
    pub click: bool,
}

impl Default for Interaction {
    fn default() -> Self {
        Self {
            hover: true,
            click: true,
        }
    }
}

/// One region as handed to the map widget
#[derive(Debug, Clone)]
pub struct DrawnShape {
    pub id: ShapeId,
    pub geometry: MultiPolygon<f64>,
    pub bounds: BoundingBox,
    pub style: PolygonStyle,
    pub attributes: RegionAttributes,
    pub properties: Arc<Map<String, Value>>,
    pub interaction: Interaction,
}

impl DrawnShape {
    pub fn contains(&self, point: &LatLng) -> bool {
        self.bounds.contains(point) && self.geometry.contains(&Point::from(*point))
    }
}

/// The single active layer of region shapes, in draw order
#[derive(Debug, Clone, Default)]
pub struct RenderedLayer {
    shapes: Vec<DrawnShape>,
    lookup: FxHashMap<ShapeId, usize>,
}

impl RenderedLayer {
    fn from_shapes(shapes: Vec<DrawnShape>) -> Self {
        let lookup = shapes
            .iter()
            .enumerate()
            .map(|(slot, shape)| (shape.id, slot))
            .collect();
        Self { shapes, lookup }
    }

    /// Sets the interaction flags of every shape
    pub fn with_interaction(mut self, interaction: Interaction) -> Self {
        for shape in &mut self.shapes {
            shape.interaction = interaction;
        }
        self
    }

    pub fn shapes(&self) -> &[DrawnShape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&DrawnShape> {
        self.lookup.get(&id).map(|&slot| &self.shapes[slot])
    }

    pub fn ids(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.shapes.iter().map(|shape| shape.id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.lookup.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Topmost (last drawn) clickable shape containing `point`
    pub fn hit_test(&self, point: &LatLng) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .filter(|shape| shape.interaction.click)
            .find(|shape| shape.contains(point))
            .map(|shape| shape.id)
    }
}

/// Turns a filtered subset of the collection into drawable shapes
pub struct FeatureLayerRenderer;

impl FeatureLayerRenderer {
    /// `subset` holds collection positions. The `highlighted` shape, if drawn, gets the
    /// selected style; everything else the default one.
    pub fn render(
        collection: &FeatureCollection,
        subset: &[usize],
        styles: &LayerStyles,
        highlighted: Option<ShapeId>,
    ) -> RenderedLayer {
        let mut shapes = Vec::with_capacity(subset.len());
        for &position in subset {
            let Some(feature) = collection.get(position) else {
                log::debug!("position {} is outside the collection", position);
                continue;
            };
            let Some(geometry) = feature.to_multi_polygon() else {
                log::debug!(
                    "skipping {:?}: geometry is not drawable as polygons",
                    feature.attributes().name
                );
                continue;
            };
            let id = ShapeId(position);
            let style = if highlighted == Some(id) {
                styles.selected.clone()
            } else {
                styles.default.clone()
            };
            shapes.push(DrawnShape {
                id,
                geometry,
                bounds: feature.bounds(),
                style,
                attributes: feature.attributes().clone(),
                properties: Arc::clone(feature.properties()),
                interaction: Interaction::default(),
            });
        }
        log::debug!("rendered {} of {} requested shapes", shapes.len(), subset.len());
        RenderedLayer::from_shapes(shapes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::geojson::{Feature, Geometry};
    use serde_json::json;

    fn square(min: f64, max: f64, name: &str) -> Feature {
        let mut properties = Map::new();
        properties.insert("name".to_string(), json!(name));
        Feature::new(
            Some(Geometry::polygon(json!([[
                [min, min],
                [max, min],
                [max, max],
                [min, max],
                [min, min]
            ]]))),
            properties,
        )
    }

    fn collection() -> FeatureCollection {
        FeatureCollection::new(vec![
            square(0.0, 10.0, "Outer"),
            Feature::new(None, Map::new()),
            square(2.0, 4.0, "Inner"),
        ])
    }

    #[test]
    fn test_render_keeps_positions_and_skips_undrawable() {
        let collection = collection();
        let layer =
            FeatureLayerRenderer::render(&collection, &[0, 1, 2], &LayerStyles::default(), None);

        assert_eq!(layer.len(), 2);
        assert_eq!(layer.ids().collect::<Vec<_>>(), vec![ShapeId(0), ShapeId(2)]);
        assert!(!layer.contains(ShapeId(1)));
        assert_eq!(layer.shape(ShapeId(2)).unwrap().attributes.name, "Inner");
        assert!(layer.shapes().iter().all(|s| s.interaction.hover && s.interaction.click));
    }

    #[test]
    fn test_highlighted_shape_is_drawn_selected() {
        let collection = collection();
        let styles = LayerStyles::default();
        let layer = FeatureLayerRenderer::render(&collection, &[0, 2], &styles, Some(ShapeId(2)));

        assert_eq!(layer.shape(ShapeId(0)).unwrap().style, styles.default);
        assert_eq!(layer.shape(ShapeId(2)).unwrap().style, styles.selected);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let collection = collection();
        let layer =
            FeatureLayerRenderer::render(&collection, &[0, 2], &LayerStyles::default(), None);

        assert_eq!(layer.hit_test(&LatLng::from_lng_lat(3.0, 3.0)), Some(ShapeId(2)));
        assert_eq!(layer.hit_test(&LatLng::from_lng_lat(8.0, 8.0)), Some(ShapeId(0)));
        assert_eq!(layer.hit_test(&LatLng::from_lng_lat(20.0, 20.0)), None);
    }

    #[test]
    fn test_hit_test_skips_unclickable_shapes() {
        let collection = collection();
        let layer = FeatureLayerRenderer::render(&collection, &[0, 2], &LayerStyles::default(), None)
            .with_interaction(Interaction {
                hover: true,
                click: false,
            });

        assert!(layer.shapes().iter().all(|s| s.interaction.hover && !s.interaction.click));
        assert_eq!(layer.hit_test(&LatLng::from_lng_lat(3.0, 3.0)), None);
    }
}
