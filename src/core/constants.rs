//! Core constants for the rendering pipeline.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Minimum interval between two executed renders, in milliseconds.
pub const DEFAULT_THROTTLE_INTERVAL_MS: u64 = 150;

/// Below this zoom level the region layer is not drawn at all.
pub const DEFAULT_MIN_DETAIL_ZOOM: u8 = 5;

/// Delay between data load completion and the first render attempt.
pub const DEFAULT_INITIAL_RENDER_DELAY_MS: u64 = 500;

/// Interval between widget-readiness checks once the initial delay has elapsed.
pub const DEFAULT_READY_RETRY_INTERVAL_MS: u64 = 100;

/// Readiness checks performed before the initial render gate gives up.
pub const DEFAULT_READY_MAX_ATTEMPTS: u32 = 20;

/// Zoom level the map animates to when a region is selected.
pub const DEFAULT_FOCUS_ZOOM: f64 = 8.0;

/// Upper bound on any single fetch of the feature or centroid source.
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

/// Nominal dataset center (longitude, latitude) used when nothing better is known.
pub const NOMINAL_CENTER_LNG_LAT: (f64, f64) = (105.0, 36.0);

/// Zoom range supported by the map widget.
pub const MIN_ZOOM: u8 = 2;
pub const MAX_ZOOM: u8 = 18;

/// Placeholder id for regions without an identifier attribute.
pub const PLACEHOLDER_ID: &str = "N/A";

/// Placeholder display name for regions without a name attribute.
pub const PLACEHOLDER_NAME: &str = "Administrative Region";
