//! The rendering session: owns the dataset, the map widget handle and every piece of
//! mutable state, and turns widget events into filter, render and selection work.
//!
//! The session is driven from a single event loop. Time is passed in explicitly
//! (`now`) so the loop decides what clock to use; [`RenderSession::next_deadline`]
//! tells it when [`RenderSession::tick`] next has work to do.

use crate::{
    core::{config::RenderOptions, focus::FocusResolver, viewport::Viewport},
    data::{
        centroids::CenterLookup,
        geojson::FeatureCollection,
        loader::{DatasetOrigin, LoadedDataset},
    },
    input::events::{MapEvent, MapEventKind, ShapeEvent},
    rendering::{
        layer::{FeatureLayerRenderer, RenderedLayer, ShapeId},
        scheduler::{GateStatus, InitialRenderGate, RenderDecision, RenderScheduler},
        style::PolygonStyle,
    },
    spatial::{culling::ViewportFilter, index::SpatialIndex},
    traits::{DetailPanel, LayerHandle, MapSurface, SubscriptionId},
    ui::selection::{SelectionRecord, SelectionState},
    LatLng, MapError, Result,
};
use instant::Instant;

/// The layer currently on the map together with the handle the widget gave it
#[derive(Debug)]
struct ActiveLayer {
    handle: LayerHandle,
    layer: RenderedLayer,
}

pub struct RenderSession<M: MapSurface, P: DetailPanel> {
    surface: M,
    panel: P,
    options: RenderOptions,
    collection: FeatureCollection,
    origin: Option<DatasetOrigin>,
    index: SpatialIndex,
    filter: ViewportFilter,
    scheduler: RenderScheduler,
    gate: InitialRenderGate,
    active: Option<ActiveLayer>,
    visible: Vec<usize>,
    selection: SelectionState,
    lookup: CenterLookup,
    focus: FocusResolver,
    subscriptions: Vec<SubscriptionId>,
    surface_ready: bool,
    torn_down: bool,
}

impl<M: MapSurface, P: DetailPanel> RenderSession<M, P> {
    /// Creates a session and subscribes to the widget's move-end and zoom-end events
    pub fn new(mut surface: M, panel: P, options: RenderOptions) -> Result<Self> {
        options.validate()?;

        let mut subscriptions = Vec::with_capacity(2);
        for kind in [MapEventKind::MoveEnd, MapEventKind::ZoomEnd] {
            subscriptions.push(surface.subscribe(kind)?);
        }

        Ok(Self {
            filter: ViewportFilter::new(options.min_detail_zoom),
            scheduler: RenderScheduler::new(options.throttle_interval(), options.trailing_flush),
            gate: InitialRenderGate::new(
                options.ready_retry_interval(),
                options.ready_max_attempts,
            ),
            focus: FocusResolver::new(options.nominal_center),
            surface,
            panel,
            options,
            collection: FeatureCollection::default(),
            origin: None,
            index: SpatialIndex::default(),
            active: None,
            visible: Vec::new(),
            selection: SelectionState::Empty,
            lookup: CenterLookup::new(),
            subscriptions,
            surface_ready: false,
            torn_down: false,
        })
    }

    /// Takes ownership of a loaded dataset and arms the initial render. Returns
    /// `false` if the session was already torn down.
    pub fn install_dataset(
        &mut self,
        dataset: LoadedDataset,
        lookup: CenterLookup,
        now: Instant,
    ) -> bool {
        if self.torn_down {
            log::debug!(
                "ignoring dataset from {} delivered after teardown",
                dataset.source
            );
            return false;
        }

        if let Some(shape) = self.selection.dismiss() {
            log::debug!("dataset replaced, clearing selection of {}", shape);
            self.panel.show(None);
        }
        self.index = SpatialIndex::build(&dataset.collection);
        self.collection = dataset.collection;
        self.origin = Some(dataset.origin);
        self.lookup = lookup;
        log::info!(
            "installed {} features ({:?}) from {}, {} centroids",
            self.collection.len(),
            dataset.origin,
            dataset.source,
            self.lookup.len()
        );

        if self.surface_ready {
            self.initial_render(now);
        } else {
            self.gate.arm(now, self.options.initial_render_delay());
        }
        true
    }

    /// The widget reported that it accepts layers
    pub fn on_surface_ready(&mut self, now: Instant) {
        if self.torn_down {
            return;
        }
        self.surface_ready = true;
        if self.gate.is_armed() {
            self.gate.disarm();
            self.initial_render(now);
        }
    }

    pub fn handle_map_event(&mut self, event: MapEvent, now: Instant) -> Result<()> {
        match event {
            MapEvent::MoveEnd | MapEvent::ZoomEnd => {
                self.on_viewport_changed(now);
                Ok(())
            }
            MapEvent::Ready => {
                self.on_surface_ready(now);
                Ok(())
            }
            MapEvent::Click { lat_lng } => self.handle_map_click(lat_lng).map(|_| ()),
        }
    }

    /// Requests a render for a changed view, subject to the throttle
    pub fn on_viewport_changed(&mut self, now: Instant) -> RenderDecision {
        if self.torn_down || self.origin.is_none() || self.gate.is_armed() {
            log::debug!("viewport change before the initial render, ignored");
            return RenderDecision::Dropped;
        }
        let decision = self.scheduler.request(now);
        match decision {
            RenderDecision::Execute => {
                self.redraw();
            }
            RenderDecision::Dropped => log::debug!("render request throttled"),
        }
        decision
    }

    /// Runs timed work: the deferred initial render and the trailing flush. Returns
    /// whether a render happened.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.torn_down {
            return false;
        }
        match self.gate.poll(now, self.surface.is_ready()) {
            GateStatus::Fire => {
                self.initial_render(now);
                return true;
            }
            GateStatus::Retry => log::debug!("map surface not ready, retrying initial render"),
            GateStatus::GaveUp => {
                log::warn!("map surface never became ready; initial render abandoned")
            }
            GateStatus::Idle | GateStatus::Waiting => {}
        }
        if self.scheduler.poll_trailing(now) {
            log::debug!("trailing render after a throttled burst");
            return self.redraw();
        }
        false
    }

    /// Earliest instant at which [`Self::tick`] has something to do
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.gate.due(), self.scheduler.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Filters the current view and replaces the active layer. Returns the number of
    /// shapes drawn. On failure the previous layer stays on the map and active.
    pub fn render_now(&mut self) -> Result<usize> {
        if self.torn_down {
            return Err(MapError::Render("session has been torn down".to_string()));
        }
        let viewport = Viewport::from_surface(&self.surface);
        let visible = self.filter.filter_indexed(&self.index, &viewport);
        let layer = FeatureLayerRenderer::render(
            &self.collection,
            &visible,
            &self.options.styles,
            self.selection.highlighted(),
        )
        .with_interaction(self.options.interaction);

        if let Some(previous) = self.active.as_ref() {
            if let Err(e) = self.surface.remove_layer(previous.handle) {
                log::error!("render failure: {}; previous layer left in place", e);
                return Err(MapError::Render(e.to_string()));
            }
        }
        let previous = self.active.take();

        match self.surface.add_layer(&layer) {
            Ok(handle) => {
                let drawn = layer.len();
                log::debug!(
                    "drew {} of {} features at zoom {}",
                    drawn,
                    self.collection.len(),
                    viewport.zoom
                );
                self.active = Some(ActiveLayer { handle, layer });
                self.visible = visible;
                Ok(drawn)
            }
            Err(e) => {
                log::error!("render failure: {}; keeping the previous layer", e);
                if let Some(previous) = previous {
                    match self.surface.add_layer(&previous.layer) {
                        Ok(handle) => {
                            self.active = Some(ActiveLayer {
                                handle,
                                layer: previous.layer,
                            })
                        }
                        Err(e) => log::error!("failed to restore the previous layer: {}", e),
                    }
                }
                Err(MapError::Render(e.to_string()))
            }
        }
    }

    /// Pointer interaction reported by the widget for one drawn shape
    pub fn handle_shape_event(&mut self, shape: ShapeId, event: ShapeEvent) -> Result<()> {
        if self.torn_down {
            return Ok(());
        }
        let handle = self.active_handle_for(shape)?;
        let interaction = self
            .layer()
            .and_then(|layer| layer.shape(shape))
            .map(|drawn| drawn.interaction)
            .unwrap_or_default();
        let enabled = match event {
            ShapeEvent::HoverIn | ShapeEvent::HoverOut => interaction.hover,
            ShapeEvent::Click => interaction.click,
        };
        if !enabled {
            log::debug!("{:?} on {} ignored: interaction disabled", event, shape);
            return Ok(());
        }
        match event {
            ShapeEvent::HoverIn => {
                let style = self.options.styles.hover.clone();
                self.surface.set_shape_style(handle, shape, &style)
            }
            ShapeEvent::HoverOut => {
                let style = self.resting_style(shape).clone();
                self.surface.set_shape_style(handle, shape, &style)
            }
            ShapeEvent::Click => self.select(handle, shape),
        }
    }

    /// Click on the map at `lat_lng`; dispatched to the topmost drawn shape there
    pub fn handle_map_click(&mut self, lat_lng: LatLng) -> Result<Option<ShapeId>> {
        if self.torn_down {
            return Ok(None);
        }
        let hit = self
            .active
            .as_ref()
            .and_then(|active| active.layer.hit_test(&lat_lng));
        match hit {
            Some(shape) => {
                self.handle_shape_event(shape, ShapeEvent::Click)?;
                Ok(Some(shape))
            }
            None => {
                log::debug!("map click at {:?} hit no region", lat_lng);
                Ok(None)
            }
        }
    }

    /// Closes the detail panel and clears the highlight
    pub fn dismiss(&mut self) -> Result<()> {
        let Some(shape) = self.selection.dismiss() else {
            return Ok(());
        };
        self.panel.show(None);
        if self.torn_down {
            return Ok(());
        }
        if let Some(active) = self.active.as_ref().filter(|a| a.layer.contains(shape)) {
            let style = self.options.styles.default.clone();
            self.surface.set_shape_style(active.handle, shape, &style)?;
        }
        Ok(())
    }

    /// Unsubscribes, removes the layer and stops all pending work. Later calls are
    /// ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.gate.disarm();
        self.scheduler.cancel_pending();
        for id in self.subscriptions.drain(..) {
            if let Err(e) = self.surface.unsubscribe(id) {
                log::warn!("failed to unsubscribe: {}", e);
            }
        }
        if let Some(active) = self.active.take() {
            if let Err(e) = self.surface.remove_layer(active.handle) {
                log::warn!("failed to remove layer on teardown: {}", e);
            }
        }
        log::debug!("render session torn down");
    }

    /// Collection positions drawn by the last successful render
    pub fn visible_positions(&self) -> &[usize] {
        &self.visible
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn selected_record(&self) -> Option<&SelectionRecord> {
        self.selection.record()
    }

    pub fn layer(&self) -> Option<&RenderedLayer> {
        self.active.as_ref().map(|active| &active.layer)
    }

    pub fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    pub fn dataset_origin(&self) -> Option<DatasetOrigin> {
        self.origin
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    pub fn surface(&self) -> &M {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut M {
        &mut self.surface
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn initial_render(&mut self, now: Instant) {
        self.scheduler.mark_executed(now);
        self.redraw();
    }

    /// Renders and reports failure through the log only
    fn redraw(&mut self) -> bool {
        match self.render_now() {
            Ok(_) => true,
            Err(e) => {
                log::warn!("render skipped: {}", e);
                false
            }
        }
    }

    fn active_handle_for(&self, shape: ShapeId) -> Result<LayerHandle> {
        self.active
            .as_ref()
            .filter(|active| active.layer.contains(shape))
            .map(|active| active.handle)
            .ok_or(MapError::UnknownShape(shape))
    }

    fn resting_style(&self, shape: ShapeId) -> &PolygonStyle {
        if self.selection.highlighted() == Some(shape) {
            &self.options.styles.selected
        } else {
            &self.options.styles.default
        }
    }

    /// Click dispatch. Widget calls that fail leave both the selection and the drawn
    /// styles as they were; only the fly-to is allowed to fail.
    fn select(&mut self, handle: LayerHandle, shape: ShapeId) -> Result<()> {
        let Some(active) = self.active.as_ref() else {
            return Err(MapError::UnknownShape(shape));
        };
        let record = match active.layer.shape(shape) {
            Some(drawn) => SelectionRecord::from(&drawn.attributes),
            None => return Err(MapError::UnknownShape(shape)),
        };
        let Some(feature) = self.collection.get(shape.position()) else {
            return Err(MapError::UnknownShape(shape));
        };
        let focus = self.focus.resolve(&record.name, feature, &self.lookup);
        let previous = self
            .selection
            .highlighted()
            .filter(|&p| p != shape && active.layer.contains(p));

        let default = self.options.styles.default.clone();
        let selected = self.options.styles.selected.clone();
        if let Some(previous) = previous {
            self.surface.set_shape_style(handle, previous, &default)?;
        }
        if let Err(e) = self.surface.set_shape_style(handle, shape, &selected) {
            if let Some(previous) = previous {
                if let Err(e) = self.surface.set_shape_style(handle, previous, &selected) {
                    log::error!("failed to restore the highlight of {}: {}", previous, e);
                }
            }
            return Err(e);
        }
        if let Err(e) = self.surface.fly_to(focus, self.options.focus_zoom) {
            log::warn!("could not focus {}: {}", record.name, e);
        }

        log::info!("selected {} ({})", record.name, shape);
        self.selection.select(record, shape);
        self.panel.show(self.selection.record());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bounds::BoundingBox;
    use crate::data::geojson::{Feature, Geometry};
    use crate::headless::{HeadlessSurface, RecordingPanel};
    use crate::rendering::layer::Interaction;
    use serde_json::{json, Map};
    use std::time::Duration;

    fn rectangle(name: &str, min: (f64, f64), max: (f64, f64)) -> Feature {
        let mut properties = Map::new();
        properties.insert("admin_name".to_string(), json!(name));
        properties.insert("yield_val".to_string(), json!(6.5));
        Feature::new(
            Some(Geometry::polygon(json!([[
                [min.0, min.1],
                [max.0, min.1],
                [max.0, max.1],
                [min.0, max.1],
                [min.0, min.1]
            ]]))),
            properties,
        )
    }

    fn dataset() -> LoadedDataset {
        LoadedDataset {
            collection: FeatureCollection::new(vec![
                rectangle("North", (95.0, 30.0), (115.0, 42.0)),
                rectangle("Coast", (-10.0, -5.0), (0.0, 5.0)),
                rectangle("Inner", (100.0, 32.0), (104.0, 36.0)),
            ]),
            origin: DatasetOrigin::Primary,
            source: "test".to_string(),
        }
    }

    fn session() -> RenderSession<HeadlessSurface, RecordingPanel> {
        session_with(RenderOptions::default())
    }

    fn session_with(options: RenderOptions) -> RenderSession<HeadlessSurface, RecordingPanel> {
        let surface = HeadlessSurface::new(BoundingBox::new(90.0, 25.0, 120.0, 45.0), 6.0);
        RenderSession::new(surface, RecordingPanel::new(), options).unwrap()
    }

    /// Ready session showing all three regions
    fn wide_session(now: Instant) -> RenderSession<HeadlessSurface, RecordingPanel> {
        let mut session = ready_session(now);
        session
            .surface_mut()
            .set_view(BoundingBox::new(-20.0, -10.0, 120.0, 45.0), 6.0);
        session.render_now().unwrap();
        assert_eq!(session.visible_positions(), &[0, 1, 2]);
        session
    }

    fn ready_session(now: Instant) -> RenderSession<HeadlessSurface, RecordingPanel> {
        let mut session = session();
        session.on_surface_ready(now);
        assert!(session.install_dataset(dataset(), CenterLookup::new(), now));
        session
    }

    #[test]
    fn test_subscribes_on_creation() {
        let session = session();
        assert!(session.surface().is_subscribed(MapEventKind::MoveEnd));
        assert!(session.surface().is_subscribed(MapEventKind::ZoomEnd));
    }

    #[test]
    fn test_initial_render_waits_for_delay() {
        let t0 = Instant::now();
        let mut session = session();
        session.install_dataset(dataset(), CenterLookup::new(), t0);

        assert_eq!(session.next_deadline(), Some(t0 + Duration::from_millis(500)));
        assert!(!session.tick(t0 + Duration::from_millis(100)));
        assert_eq!(session.surface().active_layer_count(), 0);

        assert!(session.tick(t0 + Duration::from_millis(500)));
        assert_eq!(session.visible_positions(), &[0, 2]);
    }

    #[test]
    fn test_explicit_readiness_renders_immediately() {
        let t0 = Instant::now();
        let session = ready_session(t0);
        assert_eq!(session.surface().active_layer_count(), 1);
        assert_eq!(session.surface().drawn_shapes(), vec![ShapeId(0), ShapeId(2)]);
    }

    #[test]
    fn test_only_one_layer_is_ever_active() {
        let t0 = Instant::now();
        let mut session = ready_session(t0);
        for step in 1..10u64 {
            session.on_viewport_changed(t0 + Duration::from_millis(step * 200));
            assert_eq!(session.surface().active_layer_count(), 1);
        }
    }

    #[test]
    fn test_failed_add_restores_previous_layer() {
        let t0 = Instant::now();
        let mut session = ready_session(t0);
        session.surface_mut().set_view(BoundingBox::new(-20.0, -10.0, 10.0, 10.0), 6.0);
        session.surface_mut().fail_next_add();

        assert!(session.render_now().is_err());
        assert_eq!(session.surface().active_layer_count(), 1);
        assert_eq!(session.surface().drawn_shapes(), vec![ShapeId(0), ShapeId(2)]);
        assert_eq!(session.visible_positions(), &[0, 2]);
    }

    #[test]
    fn test_hover_restores_resting_style() {
        let t0 = Instant::now();
        let mut session = ready_session(t0);
        let styles = session.options().styles.clone();

        session.handle_shape_event(ShapeId(0), ShapeEvent::HoverIn).unwrap();
        assert_eq!(session.surface().style_of(ShapeId(0)), Some(&styles.hover));
        session.handle_shape_event(ShapeId(0), ShapeEvent::HoverOut).unwrap();
        assert_eq!(session.surface().style_of(ShapeId(0)), Some(&styles.default));

        session.handle_shape_event(ShapeId(0), ShapeEvent::Click).unwrap();
        session.handle_shape_event(ShapeId(0), ShapeEvent::HoverIn).unwrap();
        session.handle_shape_event(ShapeId(0), ShapeEvent::HoverOut).unwrap();
        assert_eq!(session.surface().style_of(ShapeId(0)), Some(&styles.selected));
        assert!(session.panel().is_visible());
    }

    #[test]
    fn test_click_flies_to_focus() {
        let t0 = Instant::now();
        let mut session = session_with(RenderOptions {
            nominal_center: LatLng::from_lng_lat(1.0, 1.0),
            ..RenderOptions::default()
        });
        session.on_surface_ready(t0);
        let lookup: CenterLookup = [("Inner", LatLng::from_lng_lat(102.5, 34.5))].into_iter().collect();
        session.install_dataset(dataset(), lookup, t0);

        session.handle_shape_event(ShapeId(2), ShapeEvent::Click).unwrap();
        session.handle_shape_event(ShapeId(0), ShapeEvent::Click).unwrap();

        let fly_tos = session.surface().fly_tos();
        assert_eq!(fly_tos[0], (LatLng::from_lng_lat(102.5, 34.5), 8.0));
        assert_eq!(fly_tos[1], (LatLng::from_lng_lat(105.0, 36.0), 8.0));
    }

    #[test]
    fn test_unknown_shape_leaves_state_unchanged() {
        let t0 = Instant::now();
        let mut session = ready_session(t0);
        session.handle_shape_event(ShapeId(0), ShapeEvent::Click).unwrap();

        let result = session.handle_shape_event(ShapeId(1), ShapeEvent::Click);
        assert!(matches!(result, Err(MapError::UnknownShape(ShapeId(1)))));
        assert_eq!(session.selection().highlighted(), Some(ShapeId(0)));
        assert_eq!(session.panel().history().len(), 1);
    }

    #[test]
    fn test_map_click_hits_topmost() {
        let t0 = Instant::now();
        let mut session = ready_session(t0);

        let hit = session.handle_map_click(LatLng::from_lng_lat(102.0, 34.0)).unwrap();
        assert_eq!(hit, Some(ShapeId(2)));
        assert_eq!(session.selected_record().map(|r| r.name.as_str()), Some("Inner"));

        let miss = session.handle_map_click(LatLng::from_lng_lat(0.0, 0.0)).unwrap();
        assert_eq!(miss, None);
        assert_eq!(session.selection().highlighted(), Some(ShapeId(2)));
    }

    #[test]
    fn test_selection_survives_rerender() {
        let t0 = Instant::now();
        let mut session = ready_session(t0);
        session.handle_shape_event(ShapeId(2), ShapeEvent::Click).unwrap();
        session.render_now().unwrap();

        let selected = session.options().styles.selected.clone();
        assert_eq!(session.surface().style_of(ShapeId(2)), Some(&selected));
    }

    #[test]
    fn test_teardown_ignores_late_work() {
        let t0 = Instant::now();
        let mut session = session();
        session.teardown();

        assert_eq!(session.surface().subscription_count(), 0);
        assert!(!session.install_dataset(dataset(), CenterLookup::new(), t0));
        assert!(!session.tick(t0 + Duration::from_secs(5)));
        assert_eq!(session.surface().layers_added(), 0);
    }

    #[test]
    fn test_failed_fly_to_still_selects() {
        let t0 = Instant::now();
        let mut session = wide_session(t0);
        let selected = session.options().styles.selected.clone();

        session.handle_shape_event(ShapeId(0), ShapeEvent::Click).unwrap();
        session.surface_mut().fail_next_fly_to();
        session.handle_shape_event(ShapeId(1), ShapeEvent::Click).unwrap();

        assert_eq!(session.selection().highlighted(), Some(ShapeId(1)));
        assert_eq!(session.surface().shapes_styled(&selected), vec![ShapeId(1)]);
        assert_eq!(session.surface().fly_tos().len(), 1);

        session.handle_shape_event(ShapeId(2), ShapeEvent::Click).unwrap();
        assert_eq!(session.surface().shapes_styled(&selected), vec![ShapeId(2)]);
    }

    #[test]
    fn test_failed_restyle_keeps_prior_selection() {
        let t0 = Instant::now();
        let mut session = wide_session(t0);
        let selected = session.options().styles.selected.clone();

        session.handle_shape_event(ShapeId(0), ShapeEvent::Click).unwrap();
        session.surface_mut().fail_next_restyle_of(ShapeId(1));
        assert!(session.handle_shape_event(ShapeId(1), ShapeEvent::Click).is_err());

        assert_eq!(session.selection().highlighted(), Some(ShapeId(0)));
        assert_eq!(session.surface().shapes_styled(&selected), vec![ShapeId(0)]);
        assert_eq!(session.panel().history().len(), 1);

        session.handle_shape_event(ShapeId(2), ShapeEvent::Click).unwrap();
        assert_eq!(session.surface().shapes_styled(&selected), vec![ShapeId(2)]);
    }

    #[test]
    fn test_failed_remove_keeps_single_layer() {
        let t0 = Instant::now();
        let mut session = ready_session(t0);
        session.surface_mut().set_view(BoundingBox::new(-20.0, -10.0, 10.0, 10.0), 6.0);
        session.surface_mut().fail_next_remove();

        assert!(session.render_now().is_err());
        assert_eq!(session.surface().active_layer_count(), 1);
        assert_eq!(session.visible_positions(), &[0, 2]);

        session.render_now().unwrap();
        assert_eq!(session.surface().active_layer_count(), 1);
        assert_eq!(session.surface().drawn_shapes(), vec![ShapeId(1)]);

        session.teardown();
        assert_eq!(session.surface().active_layer_count(), 0);
    }

    #[test]
    fn test_disabled_interactions_are_ignored() {
        let t0 = Instant::now();
        let mut session = session_with(RenderOptions {
            interaction: Interaction {
                hover: false,
                click: false,
            },
            ..RenderOptions::default()
        });
        session.on_surface_ready(t0);
        session.install_dataset(dataset(), CenterLookup::new(), t0);
        let default = session.options().styles.default.clone();

        session.handle_shape_event(ShapeId(0), ShapeEvent::HoverIn).unwrap();
        session.handle_shape_event(ShapeId(0), ShapeEvent::Click).unwrap();
        assert_eq!(session.surface().style_of(ShapeId(0)), Some(&default));
        assert!(session.selection().is_empty());
        assert_eq!(session.handle_map_click(LatLng::from_lng_lat(102.0, 34.0)).unwrap(), None);
    }

    #[test]
    fn test_map_events_are_dispatched() {
        let t0 = Instant::now();
        let mut session = session();
        session.install_dataset(dataset(), CenterLookup::new(), t0);

        session.handle_map_event(MapEvent::Ready, t0).unwrap();
        assert_eq!(session.surface().layers_added(), 1);

        session.surface_mut().set_view(BoundingBox::new(-20.0, -10.0, 10.0, 10.0), 6.0);
        session
            .handle_map_event(MapEvent::MoveEnd, t0 + Duration::from_millis(150))
            .unwrap();
        assert_eq!(session.visible_positions(), &[1]);

        session
            .handle_map_event(MapEvent::Click { lat_lng: LatLng::from_lng_lat(-5.0, 0.0) }, t0)
            .unwrap();
        assert_eq!(session.selection().highlighted(), Some(ShapeId(1)));
    }
}
