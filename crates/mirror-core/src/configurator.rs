//! The single owner of configurator state.
//!
//! Every mutation goes through [`Configurator`] and bumps its revision; all
//! derived values (price, slider fill, manual-entry text, scene graph) are read
//! back from it rather than stored alongside.

use crate::assets::{AssetId, AssetRegistry, AssetState, LoadTicket};
use crate::camera::{Camera, OrbitController, OrbitLimits, OrbitPose, ViewPreset};
use crate::compose::compose;
use crate::dimension::{Axis, Dimensions, EntryOutcome, InputMode, ManualEntry};
use crate::error::ConfigError;
use crate::features::{Feature, FeatureSet, Placement};
use crate::picking::{pick, Ray};
use crate::pricing::{format_price, PriceTable};
use crate::scene::{HitTarget, SceneGraph};
use crate::selector::SelectorState;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Configurator {
    dims: Dimensions,
    entries: [ManualEntry; 2],
    features: FeatureSet,
    view_request: Option<ViewPreset>,
    camera: OrbitController,
    assets: AssetRegistry,
    pricing: PriceTable,
    revision: u64,
    scene: Option<(u64, SceneGraph)>,
    load_queue: Vec<LoadTicket>,
}

impl Default for Configurator {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn axis_index(axis: Axis) -> usize {
    match axis {
        Axis::Width => 0,
        Axis::Height => 1,
    }
}

impl Configurator {
    pub fn new() -> Self {
        Self::with_settings(PriceTable::default(), OrbitLimits::default())
    }

    pub fn with_settings(pricing: PriceTable, limits: OrbitLimits) -> Self {
        let dims = Dimensions::default();
        let mut assets = AssetRegistry::new();
        let load_queue = assets.request(AssetId::EnvironmentMap).into_iter().collect();
        Self {
            entries: [
                ManualEntry::new(dims.width_mm()),
                ManualEntry::new(dims.height_mm()),
            ],
            dims,
            features: FeatureSet::default(),
            view_request: None,
            camera: OrbitController::new(limits),
            assets,
            pricing,
            revision: 0,
            scene: None,
            load_queue,
        }
    }

    /// Counter bumped by every state change that affects the scene or the derived text.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    // --- dimensions -------------------------------------------------------

    pub fn dimensions(&self) -> &Dimensions {
        &self.dims
    }

    /// Slider path: clamp and commit immediately. Non-finite input is ignored and returns `false`.
    pub fn set_dimension(&mut self, axis: Axis, mm: f64) -> bool {
        if !mm.is_finite() {
            log::warn!("[config] ignoring non-finite {axis:?} value");
            return false;
        }
        let before = self.dims.get(axis);
        self.dims.set(axis, mm);
        let after = self.dims.get(axis);
        if self.entries[axis_index(axis)].mode() == InputMode::Slider {
            self.entries[axis_index(axis)].sync(after);
        }
        if after != before {
            self.touch();
        }
        true
    }

    pub fn set_width(&mut self, mm: f64) -> bool {
        self.set_dimension(Axis::Width, mm)
    }

    pub fn set_height(&mut self, mm: f64) -> bool {
        self.set_dimension(Axis::Height, mm)
    }

    pub fn input_mode(&self, axis: Axis) -> InputMode {
        self.entries[axis_index(axis)].mode()
    }

    pub fn set_input_mode(&mut self, axis: Axis, mode: InputMode) {
        let committed = self.dims.get(axis);
        self.entries[axis_index(axis)].set_mode(mode, committed);
        self.touch();
    }

    pub fn entry_text(&self, axis: Axis) -> &str {
        self.entries[axis_index(axis)].text()
    }

    pub fn edit_entry(&mut self, axis: Axis, text: &str) {
        self.entries[axis_index(axis)].edit(text);
    }

    /// Blur/confirm of a manual entry.
    pub fn commit_entry(&mut self, axis: Axis) -> EntryOutcome {
        let before = self.dims.get(axis);
        let outcome = self.entries[axis_index(axis)].commit(&mut self.dims, axis);
        match &outcome {
            EntryOutcome::Reverted { restored, reason } => {
                log::info!("[config] {axis:?} entry reverted to {restored}: {reason}");
            }
            EntryOutcome::ClampedHigh(v) => log::debug!("[config] {axis:?} entry clamped to {v}"),
            EntryOutcome::Committed(v) => log::debug!("[config] {axis:?} = {v}"),
        }
        if self.dims.get(axis) != before {
            self.touch();
        }
        outcome
    }

    // --- features ---------------------------------------------------------

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn selector_state(&self, feature: Feature) -> Option<SelectorState> {
        self.features.selector_state(feature)
    }

    pub fn toggle(&mut self, feature: Feature, enabled: bool) -> bool {
        if !self.features.toggle(feature, enabled) {
            return false;
        }
        log::debug!("[config] {} -> {}", feature.id(), enabled);
        if feature == Feature::Clock {
            if enabled {
                self.load_queue.extend(self.assets.request(AssetId::ClockModel));
            } else {
                self.assets.cancel(AssetId::ClockModel);
                self.load_queue.retain(|t| t.asset != AssetId::ClockModel);
            }
        }
        self.touch();
        true
    }

    /// Refused transitions are logged and leave the state untouched.
    pub fn set_placement(&mut self, feature: Feature, placement: Placement) -> bool {
        match self.features.set_placement(feature, placement) {
            Ok(()) => {
                log::debug!("[config] {} placed at {}", feature.id(), placement);
                self.touch();
                true
            }
            Err(e) => {
                log::warn!("[config] {e}");
                false
            }
        }
    }

    /// Commit a clicked marker. Only targets currently on screen are accepted.
    pub fn click_hit_target(&mut self, target: HitTarget) -> bool {
        if self.features.active_selection() != Some(target.feature) {
            log::info!("[config] stale hit target for {}", target.feature.id());
            return false;
        }
        self.set_placement(target.feature, target.placement)
    }

    pub fn set_shelf_width_percent(&mut self, percent: u32) -> Option<u32> {
        match self.features.set_shelf_width_percent(percent) {
            Ok(v) => {
                self.touch();
                Some(v)
            }
            Err(e) => {
                log::warn!("[config] {e}");
                None
            }
        }
    }

    // --- camera -----------------------------------------------------------

    pub fn view_request(&self) -> Option<ViewPreset> {
        self.view_request
    }

    /// Snap to a preset; overrides any in-progress orbit.
    pub fn request_view(&mut self, preset: ViewPreset) {
        log::debug!("[config] view {}", preset.id());
        self.view_request = Some(preset);
        self.camera.apply_view(preset);
    }

    pub fn request_view_animated(&mut self, preset: ViewPreset, duration: Duration) {
        log::debug!("[config] view {} over {:?}", preset.id(), duration);
        self.view_request = Some(preset);
        self.camera.animate_view(preset, duration);
    }

    pub fn orbit(&mut self, dx_px: f32, dy_px: f32, viewport_h: f32) {
        self.view_request = None;
        self.camera.rotate(dx_px, dy_px, viewport_h);
    }

    pub fn pan(&mut self, dx_px: f32, dy_px: f32, viewport_h: f32) {
        self.view_request = None;
        self.camera.pan(dx_px, dy_px, viewport_h);
    }

    pub fn zoom(&mut self, steps: f32) {
        self.view_request = None;
        self.camera.zoom(steps);
    }

    /// Advance time-based state. Returns `true` while the camera is still moving.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.camera.tick(dt)
    }

    pub fn camera_pose(&self) -> OrbitPose {
        self.camera.pose()
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        self.camera.camera(aspect)
    }

    // --- assets -----------------------------------------------------------

    pub fn asset_state(&self, asset: AssetId) -> AssetState {
        self.assets.state(asset)
    }

    /// Loads the host should start. Each ticket is handed out once.
    pub fn take_load_requests(&mut self) -> Vec<LoadTicket> {
        std::mem::take(&mut self.load_queue)
    }

    pub fn resolve_asset(&mut self, ticket: LoadTicket, result: Result<(), ConfigError>) {
        if self.assets.resolve(ticket, result) {
            self.touch();
        }
    }

    // --- derived ----------------------------------------------------------

    pub fn price(&self) -> f64 {
        self.pricing.total(&self.dims, &self.features)
    }

    pub fn price_label(&self) -> String {
        format_price(self.price())
    }

    /// Slider fill in percent, `0.0..=100.0`.
    pub fn slider_fill_percent(&self, axis: Axis) -> f32 {
        self.dims.progress(axis) * 100.0
    }

    pub fn dimension_badge(&self) -> String {
        format!("{} × {} mm", self.dims.width_mm(), self.dims.height_mm())
    }

    /// Scene for the current revision, rebuilt in full when stale.
    pub fn scene(&mut self) -> &SceneGraph {
        let revision = self.revision;
        if !matches!(&self.scene, Some((r, _)) if *r == revision) {
            self.scene = None;
        }
        let (dims, features, assets) = (&self.dims, &self.features, &self.assets);
        let (_, graph) = self.scene.get_or_insert_with(|| {
            let graph = compose(dims, features, assets);
            log::debug!("[config] scene rebuilt ({} nodes, rev {revision})", graph.len());
            (revision, graph)
        });
        graph
    }

    pub fn pick(&mut self, ray: Ray) -> Option<HitTarget> {
        pick(self.scene(), ray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Geometry, NodeKind};

    #[test]
    fn environment_map_is_requested_on_start() {
        let mut c = Configurator::new();
        let reqs = c.take_load_requests();
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].asset, AssetId::EnvironmentMap);
        assert!(c.take_load_requests().is_empty());
    }

    #[test]
    fn late_clock_load_after_disable_is_ignored() {
        let mut c = Configurator::new();
        c.take_load_requests();
        c.toggle(Feature::Clock, true);
        let ticket = c.take_load_requests()[0];
        c.toggle(Feature::Clock, false);
        let rev = c.revision();
        c.resolve_asset(ticket, Ok(()));
        assert_eq!(c.revision(), rev);
        assert_ne!(c.asset_state(AssetId::ClockModel), AssetState::Ready);
    }

    #[test]
    fn scene_is_cached_per_revision() {
        let mut c = Configurator::new();
        let n = c.scene().len();
        let rev = c.revision();
        assert_eq!(c.scene().len(), n);
        c.toggle(Feature::Light, true);
        assert!(c.revision() > rev);
        assert!(c.scene().len() > n);
    }

    #[test]
    fn cached_scene_is_rebuilt_after_a_width_change() {
        let mut c = Configurator::new();
        let surface_width = |c: &mut Configurator| {
            let scene = c.scene();
            let id = scene.find("mirror-surface").expect("mirror surface");
            match scene.node(id).kind {
                NodeKind::Mesh {
                    geometry: Geometry::Plane { size },
                    ..
                } => size.x,
                other => panic!("unexpected surface node {other:?}"),
            }
        };
        assert!((surface_width(&mut c) - 0.9).abs() < 1e-6);
        assert!(c.set_width(1500.0));
        assert!((surface_width(&mut c) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn slider_keeps_entry_in_sync() {
        let mut c = Configurator::new();
        c.set_width(1234.4);
        assert_eq!(c.entry_text(Axis::Width), "1234");
        assert!(!c.set_height(f64::NAN));
        assert_eq!(c.dimensions().height_mm(), 1600);
    }

    #[test]
    fn marker_for_hidden_selector_is_rejected() {
        let mut c = Configurator::new();
        c.toggle(Feature::Clock, true);
        c.toggle(Feature::Socket, true);
        let clock_target = HitTarget {
            feature: Feature::Clock,
            placement: Placement::TopLeft,
        };
        assert!(!c.click_hit_target(clock_target));
        assert_eq!(c.selector_state(Feature::Clock), Some(SelectorState::Pending));
    }

    #[test]
    fn badge_and_fill_are_derived() {
        let mut c = Configurator::new();
        assert_eq!(c.dimension_badge(), "900 × 1600 mm");
        c.set_width(400.0);
        assert_eq!(c.slider_fill_percent(Axis::Width), 0.0);
    }
}
