//! Configuration for viewport filtering, render throttling and selection focus
//!
//! Options are normally resolved from a [`RenderProfile`] preset; individual fields
//! can be overridden from JSON, where every missing field keeps its default.

use crate::core::constants::*;
use crate::core::geo::LatLng;
use crate::rendering::{layer::Interaction, style::LayerStyles};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum RenderProfile {
    Balanced,
    LowPower,
    Detailed,
    Custom(RenderOptions),
}

impl RenderProfile {
    pub fn resolve(&self) -> RenderOptions {
        match self {
            Self::Balanced => RenderOptions::default(),
            Self::LowPower => RenderOptions {
                min_detail_zoom: 6,
                throttle_interval_ms: 300,
                trailing_flush: true,
                initial_render_delay_ms: 800,
                ..RenderOptions::default()
            },
            Self::Detailed => RenderOptions {
                min_detail_zoom: 3,
                throttle_interval_ms: 60,
                trailing_flush: true,
                initial_render_delay_ms: 250,
                ..RenderOptions::default()
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for RenderProfile {
    fn default() -> Self {
        Self::Balanced
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Views zoomed out below this level draw nothing
    pub min_detail_zoom: u8,
    /// Minimum spacing between executed renders
    pub throttle_interval_ms: u64,
    /// Render once more after a burst if the last request was dropped
    pub trailing_flush: bool,
    /// Delay before the first render after data load
    pub initial_render_delay_ms: u64,
    pub ready_retry_interval_ms: u64,
    pub ready_max_attempts: u32,
    /// Zoom the map animates to when a region is selected
    pub focus_zoom: f64,
    /// Bound on each fetch of the feature and centroid sources
    pub fetch_timeout_ms: u64,
    /// Focus point of last resort
    pub nominal_center: LatLng,
    pub styles: LayerStyles,
    /// Pointer interactions the drawn regions report
    pub interaction: Interaction,
}

impl Default for RenderOptions {
    fn default() -> Self {
        let (lng, lat) = NOMINAL_CENTER_LNG_LAT;
        Self {
            min_detail_zoom: DEFAULT_MIN_DETAIL_ZOOM,
            throttle_interval_ms: DEFAULT_THROTTLE_INTERVAL_MS,
            trailing_flush: true,
            initial_render_delay_ms: DEFAULT_INITIAL_RENDER_DELAY_MS,
            ready_retry_interval_ms: DEFAULT_READY_RETRY_INTERVAL_MS,
            ready_max_attempts: DEFAULT_READY_MAX_ATTEMPTS,
            focus_zoom: DEFAULT_FOCUS_ZOOM,
            fetch_timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            nominal_center: LatLng::from_lng_lat(lng, lat),
            styles: LayerStyles::default(),
            interaction: Interaction::default(),
        }
    }
}

impl RenderOptions {
    /// Parses options from JSON and validates them
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.throttle_interval_ms == 0 {
            return Err(MapError::Config(
                "throttle_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.fetch_timeout_ms == 0 {
            return Err(MapError::Config(
                "fetch_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.min_detail_zoom > MAX_ZOOM {
            return Err(MapError::Config(format!(
                "min_detail_zoom {} exceeds the maximum zoom {}",
                self.min_detail_zoom, MAX_ZOOM
            )));
        }
        if !self.focus_zoom.is_finite()
            || self.focus_zoom < MIN_ZOOM as f64
            || self.focus_zoom > MAX_ZOOM as f64
        {
            return Err(MapError::Config(format!(
                "focus_zoom {} is outside {}..={}",
                self.focus_zoom, MIN_ZOOM, MAX_ZOOM
            )));
        }
        if !self.nominal_center.is_valid() {
            return Err(MapError::Config(
                "nominal_center is not a valid coordinate".to_string(),
            ));
        }
        Ok(())
    }

    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_interval_ms)
    }

    pub fn initial_render_delay(&self) -> Duration {
        Duration::from_millis(self.initial_render_delay_ms)
    }

    pub fn ready_retry_interval(&self) -> Duration {
        Duration::from_millis(self.ready_retry_interval_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_presets() {
        let balanced = RenderProfile::Balanced.resolve();
        let low_power = RenderProfile::LowPower.resolve();
        let detailed = RenderProfile::Detailed.resolve();

        assert_eq!(balanced.throttle_interval_ms, 150);
        assert_eq!(balanced.min_detail_zoom, 5);

        // Low power should draw less often and only when zoomed in further
        assert!(low_power.throttle_interval_ms > balanced.throttle_interval_ms);
        assert!(low_power.min_detail_zoom > balanced.min_detail_zoom);

        assert!(detailed.throttle_interval_ms < balanced.throttle_interval_ms);
        assert!(detailed.min_detail_zoom < balanced.min_detail_zoom);

        for options in [balanced, low_power, detailed] {
            assert!(options.validate().is_ok());
        }
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options =
            RenderOptions::from_json_str(r#"{"min_detail_zoom": 7, "trailing_flush": false}"#)
                .unwrap();

        assert_eq!(options.min_detail_zoom, 7);
        assert!(!options.trailing_flush);
        assert_eq!(options.throttle_interval_ms, DEFAULT_THROTTLE_INTERVAL_MS);
        assert_eq!(options.nominal_center, LatLng::from_lng_lat(105.0, 36.0));
        assert!(options.interaction.hover && options.interaction.click);

        let options = RenderOptions::from_json_str(r#"{"interaction": {"hover": false}}"#).unwrap();
        assert!(!options.interaction.hover);
        assert!(options.interaction.click);
    }

    #[test]
    fn test_invalid_options_rejected() {
        assert!(matches!(
            RenderOptions::from_json_str(r#"{"throttle_interval_ms": 0}"#),
            Err(MapError::Config(_))
        ));
        assert!(matches!(
            RenderOptions::from_json_str(r#"{"focus_zoom": 40.0}"#),
            Err(MapError::Config(_))
        ));
        assert!(matches!(
            RenderOptions::from_json_str(r#"{"min_detail_zoom": "six"}"#),
            Err(MapError::Serialization(_))
        ));
    }
}
