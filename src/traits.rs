//! Seams to the external collaborators of the rendering core
//!
//! The map widget, the detail panel and the data transport are not part of this
//! crate. The core only depends on the contracts below; [`crate::headless`]
//! provides in-memory implementations.

use crate::{
    core::{bounds::BoundingBox, geo::LatLng},
    input::events::MapEventKind,
    rendering::{
        layer::{RenderedLayer, ShapeId},
        style::PolygonStyle,
    },
    ui::selection::SelectionRecord,
    Result,
};
use async_trait::async_trait;

/// Handle of a layer added to the map widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerHandle(pub u64);

/// Handle of an event subscription on the map widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// What the core needs from an interactive pan/zoom map widget
pub trait MapSurface {
    /// Current zoom level, possibly fractional
    fn zoom(&self) -> f64;

    /// Currently visible rectangle
    fn visible_bounds(&self) -> BoundingBox;

    /// Whether the widget can accept layers yet
    fn is_ready(&self) -> bool {
        true
    }

    /// Draws a layer. Every shape marked interactive must report hover and click
    /// back through [`crate::RenderSession::handle_shape_event`].
    fn add_layer(&mut self, layer: &RenderedLayer) -> Result<LayerHandle>;

    fn remove_layer(&mut self, handle: LayerHandle) -> Result<()>;

    /// Restyles one shape of a drawn layer
    fn set_shape_style(
        &mut self,
        handle: LayerHandle,
        shape: ShapeId,
        style: &PolygonStyle,
    ) -> Result<()>;

    /// Animates the view to `center` at `zoom`
    fn fly_to(&mut self, center: LatLng, zoom: f64) -> Result<()>;

    fn subscribe(&mut self, kind: MapEventKind) -> Result<SubscriptionId>;

    fn unsubscribe(&mut self, id: SubscriptionId) -> Result<()>;
}

/// Side panel showing the selected region
pub trait DetailPanel {
    /// `None` hides the panel
    fn show(&mut self, record: Option<&SelectionRecord>);
}

/// Where a JSON document (features or centroids) comes from
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_text(&self) -> Result<String>;

    /// Human readable origin for diagnostics
    fn describe(&self) -> String;
}
