//! # yieldmap
//!
//! Viewport-adaptive rendering core for large polygon datasets of administrative
//! regions carrying yield attributes.
//!
//! The crate decides, on every pan/zoom event, which subset of a feature collection
//! is worth drawing, rate-limits the redraws, materializes the subset as a single
//! interactive layer and resolves clicked regions to a focus point and a detail
//! record. The map widget and the detail panel are external collaborators reached
//! through the traits in [`traits`].

pub mod core;
pub mod data;
pub mod headless;
pub mod input;
pub mod prelude;
pub mod rendering;
pub mod spatial;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    bounds::BoundingBox,
    config::{RenderOptions, RenderProfile},
    focus::FocusResolver,
    geo::LatLng,
    session::RenderSession,
    viewport::Viewport,
};

pub use data::{
    attributes::RegionAttributes,
    centroids::CenterLookup,
    geojson::{Feature, FeatureCollection},
    loader::{DatasetOrigin, LoadedDataset},
};

pub use rendering::{
    layer::{FeatureLayerRenderer, RenderedLayer, ShapeId},
    scheduler::{InitialRenderGate, RenderDecision, RenderScheduler},
    style::{Color, LayerStyles, PolygonStyle},
};

pub use spatial::{culling::ViewportFilter, index::{BoundingBoxIndexer, SpatialIndex}};

pub use traits::{DataSource, DetailPanel, MapSurface};

pub use ui::selection::{SelectionRecord, SelectionState};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Data load failed: {0}")]
    DataLoad(String),

    #[error("Centroid lookup unavailable: {0}")]
    LookupUnavailable(String),

    #[error("Malformed geometry: {0}")]
    MalformedGeometry(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Unknown shape: {0}")]
    UnknownShape(crate::rendering::layer::ShapeId),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs `env_logger` as the `log` backend, honouring `RUST_LOG`.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
