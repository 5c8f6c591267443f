use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Map event types the session subscribes to on the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapEventKind {
    /// Pan ended
    MoveEnd,
    /// Zoom ended
    ZoomEnd,
}

/// Events delivered by the map widget, in the order the widget emits them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MapEvent {
    /// Pan ended
    MoveEnd,
    /// Zoom ended
    ZoomEnd,
    /// The widget finished initializing and accepts layers
    Ready,
    /// Click on the map at a geographic position, for widgets that do not report
    /// per-shape clicks
    Click { lat_lng: LatLng },
}

/// Pointer interaction with one drawn shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeEvent {
    HoverIn,
    HoverOut,
    Click,
}
