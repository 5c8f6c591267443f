//! Prelude module for common yieldmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use yieldmap::prelude::*;`

pub use crate::core::{
    bounds::BoundingBox,
    config::{RenderOptions, RenderProfile},
    focus::FocusResolver,
    geo::LatLng,
    session::RenderSession,
    viewport::Viewport,
};

pub use crate::data::{
    attributes::RegionAttributes,
    centroids::CenterLookup,
    geojson::{Feature, FeatureCollection, Geometry},
    loader::{
        load_all, load_center_lookup, load_features, source_for, DatasetOrigin, FileSource,
        HttpSource, LoadedDataset, StaticSource,
    },
};

pub use crate::rendering::{
    layer::{DrawnShape, FeatureLayerRenderer, Interaction, RenderedLayer, ShapeId},
    scheduler::{GateStatus, InitialRenderGate, RenderDecision, RenderScheduler},
    style::{Color, LayerStyles, PolygonStyle},
};

pub use crate::spatial::{
    culling::ViewportFilter,
    index::{BoundingBoxIndexer, SpatialIndex},
};

pub use crate::input::events::{MapEvent, MapEventKind, ShapeEvent};

pub use crate::headless::{HeadlessSurface, RecordingPanel};

pub use crate::traits::{DataSource, DetailPanel, LayerHandle, MapSurface, SubscriptionId};

pub use crate::ui::selection::{SelectionRecord, SelectionState};

pub use crate::{Error as MapError, Result};

pub use std::{sync::Arc, time::Duration};

pub use instant::Instant;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
