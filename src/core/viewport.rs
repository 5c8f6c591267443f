use crate::core::bounds::BoundingBox;
use crate::traits::MapSurface;
use serde::{Deserialize, Serialize};

/// Snapshot of what the map widget currently shows: the visible rectangle and the
/// integer zoom level. Read-only input to the filtering pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Visible map area. Assumed not to wrap the antimeridian.
    pub bounds: BoundingBox,
    /// The current zoom level
    pub zoom: u8,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(bounds: BoundingBox, zoom: u8) -> Self {
        Self { bounds, zoom }
    }

    /// Reads the current view from the map widget. Fractional zooms round down, so a
    /// view is only treated as detailed once it fully reaches a level.
    pub fn from_surface<M: MapSurface + ?Sized>(surface: &M) -> Self {
        let zoom = surface.zoom();
        let zoom = if zoom.is_finite() {
            zoom.floor().clamp(0.0, u8::MAX as f64) as u8
        } else {
            0
        };
        Self::new(surface.visible_bounds(), zoom)
    }
}
