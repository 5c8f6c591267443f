//! In-memory map widget and detail panel.
//!
//! [`HeadlessSurface`] keeps every layer, style change, fly-to and subscription it
//! receives so tests and the command-line demo can observe what a real widget would
//! have been told to do.

use crate::{
    core::{bounds::BoundingBox, geo::LatLng},
    input::events::MapEventKind,
    rendering::{
        layer::{RenderedLayer, ShapeId},
        style::PolygonStyle,
    },
    traits::{DetailPanel, LayerHandle, MapSurface, SubscriptionId},
    ui::selection::SelectionRecord,
    MapError, Result,
};
use fxhash::FxHashMap;

#[derive(Debug, Clone)]
struct MountedLayer {
    handle: LayerHandle,
    shapes: Vec<ShapeId>,
    styles: FxHashMap<ShapeId, PolygonStyle>,
}

#[derive(Debug)]
pub struct HeadlessSurface {
    bounds: BoundingBox,
    zoom: f64,
    ready: bool,
    fail_next_add: bool,
    fail_next_remove: bool,
    fail_restyle_of: Option<ShapeId>,
    fail_next_fly_to: bool,
    next_id: u64,
    layers: Vec<MountedLayer>,
    layers_added: usize,
    layers_removed: usize,
    fly_tos: Vec<(LatLng, f64)>,
    subscriptions: FxHashMap<SubscriptionId, MapEventKind>,
}

impl HeadlessSurface {
    pub fn new(bounds: BoundingBox, zoom: f64) -> Self {
        Self {
            bounds,
            zoom,
            ready: true,
            fail_next_add: false,
            fail_next_remove: false,
            fail_restyle_of: None,
            fail_next_fly_to: false,
            next_id: 1,
            layers: Vec::new(),
            layers_added: 0,
            layers_removed: 0,
            fly_tos: Vec::new(),
            subscriptions: FxHashMap::default(),
        }
    }

    /// Moves the view; the caller delivers the matching move/zoom event
    pub fn set_view(&mut self, bounds: BoundingBox, zoom: f64) {
        self.bounds = bounds;
        self.zoom = zoom;
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// Makes the next `add_layer` call fail
    pub fn fail_next_add(&mut self) {
        self.fail_next_add = true;
    }

    /// Makes the next `remove_layer` call fail, leaving the layer on the map
    pub fn fail_next_remove(&mut self) {
        self.fail_next_remove = true;
    }

    /// Makes the next restyle of `shape` fail without changing its style
    pub fn fail_next_restyle_of(&mut self, shape: ShapeId) {
        self.fail_restyle_of = Some(shape);
    }

    pub fn fail_next_fly_to(&mut self) {
        self.fail_next_fly_to = true;
    }

    /// Shapes of the most recently added layer currently in `style`
    pub fn shapes_styled(&self, style: &PolygonStyle) -> Vec<ShapeId> {
        let Some(layer) = self.layers.last() else {
            return Vec::new();
        };
        layer
            .shapes
            .iter()
            .copied()
            .filter(|shape| layer.styles.get(shape) == Some(style))
            .collect()
    }

    pub fn active_layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Shapes of the most recently added layer still on the map
    pub fn drawn_shapes(&self) -> Vec<ShapeId> {
        self.layers
            .last()
            .map(|layer| layer.shapes.clone())
            .unwrap_or_default()
    }

    /// Current style of `shape` in the most recently added layer
    pub fn style_of(&self, shape: ShapeId) -> Option<&PolygonStyle> {
        self.layers.last()?.styles.get(&shape)
    }

    pub fn layers_added(&self) -> usize {
        self.layers_added
    }

    pub fn layers_removed(&self) -> usize {
        self.layers_removed
    }

    pub fn fly_tos(&self) -> &[(LatLng, f64)] {
        &self.fly_tos
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_subscribed(&self, kind: MapEventKind) -> bool {
        self.subscriptions.values().any(|&k| k == kind)
    }

    fn next_handle(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl MapSurface for HeadlessSurface {
    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn visible_bounds(&self) -> BoundingBox {
        self.bounds
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn add_layer(&mut self, layer: &RenderedLayer) -> Result<LayerHandle> {
        if std::mem::take(&mut self.fail_next_add) {
            return Err(MapError::Layer("surface rejected the layer".to_string()));
        }
        let handle = LayerHandle(self.next_handle());
        self.layers.push(MountedLayer {
            handle,
            shapes: layer.ids().collect(),
            styles: layer
                .shapes()
                .iter()
                .map(|shape| (shape.id, shape.style.clone()))
                .collect(),
        });
        self.layers_added += 1;
        Ok(handle)
    }

    fn remove_layer(&mut self, handle: LayerHandle) -> Result<()> {
        if std::mem::take(&mut self.fail_next_remove) {
            return Err(MapError::Layer("surface refused to remove the layer".to_string()));
        }
        let before = self.layers.len();
        self.layers.retain(|layer| layer.handle != handle);
        if self.layers.len() == before {
            return Err(MapError::Layer(format!("no layer with handle {}", handle.0)));
        }
        self.layers_removed += 1;
        Ok(())
    }

    fn set_shape_style(
        &mut self,
        handle: LayerHandle,
        shape: ShapeId,
        style: &PolygonStyle,
    ) -> Result<()> {
        if self.fail_restyle_of == Some(shape) {
            self.fail_restyle_of = None;
            return Err(MapError::Layer(format!("surface refused to restyle {}", shape)));
        }
        let layer = self
            .layers
            .iter_mut()
            .find(|layer| layer.handle == handle)
            .ok_or_else(|| MapError::Layer(format!("no layer with handle {}", handle.0)))?;
        match layer.styles.get_mut(&shape) {
            Some(current) => {
                *current = style.clone();
                Ok(())
            }
            None => Err(MapError::UnknownShape(shape)),
        }
    }

    fn fly_to(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        if std::mem::take(&mut self.fail_next_fly_to) {
            return Err(MapError::Render("fly-to animation rejected".to_string()));
        }
        self.fly_tos.push((center, zoom));
        Ok(())
    }

    fn subscribe(&mut self, kind: MapEventKind) -> Result<SubscriptionId> {
        let id = SubscriptionId(self.next_handle());
        self.subscriptions.insert(id, kind);
        Ok(id)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> Result<()> {
        self.subscriptions.remove(&id);
        Ok(())
    }
}

/// Detail panel that remembers everything it was asked to show
#[derive(Debug, Default)]
pub struct RecordingPanel {
    history: Vec<Option<SelectionRecord>>,
}

impl RecordingPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[Option<SelectionRecord>] {
        &self.history
    }

    /// What the panel currently displays
    pub fn current(&self) -> Option<&SelectionRecord> {
        self.history.last()?.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.current().is_some()
    }
}

impl DetailPanel for RecordingPanel {
    fn show(&mut self, record: Option<&SelectionRecord>) {
        self.history.push(record.cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_bookkeeping() {
        let mut surface = HeadlessSurface::new(BoundingBox::new(0.0, 0.0, 1.0, 1.0), 5.0);
        let handle = surface.add_layer(&RenderedLayer::default()).unwrap();
        assert_eq!(surface.active_layer_count(), 1);

        surface.remove_layer(handle).unwrap();
        assert_eq!(surface.active_layer_count(), 0);
        assert!(surface.remove_layer(handle).is_err());

        surface.fail_next_add();
        assert!(surface.add_layer(&RenderedLayer::default()).is_err());
        assert!(surface.add_layer(&RenderedLayer::default()).is_ok());
    }

    #[test]
    fn test_subscriptions() {
        let mut surface = HeadlessSurface::new(BoundingBox::new(0.0, 0.0, 1.0, 1.0), 5.0);
        let id = surface.subscribe(MapEventKind::MoveEnd).unwrap();
        assert!(surface.is_subscribed(MapEventKind::MoveEnd));
        assert!(!surface.is_subscribed(MapEventKind::ZoomEnd));

        surface.unsubscribe(id).unwrap();
        assert_eq!(surface.subscription_count(), 0);
    }

    #[test]
    fn test_panel_tracks_current_record() {
        let mut panel = RecordingPanel::new();
        assert!(!panel.is_visible());
        panel.show(None);
        assert!(!panel.is_visible());
        assert_eq!(panel.history().len(), 1);
    }
}
