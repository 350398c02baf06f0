// End-to-end behavior of the configurator through its public API.

use mirror_core::compose::{attachment_inset, attachment_offset};
use mirror_core::constants::{CLOCK_Z, MAX_MM};
use mirror_core::scene::NodeKind;
use mirror_core::*;

#[test]
fn default_configuration_costs_216() {
    let c = Configurator::new();
    assert!((c.price() - 216.0).abs() < 1e-9);
    assert_eq!(c.price_label(), "216.00 €");
}

#[test]
fn clock_adds_its_fee() {
    let mut c = Configurator::new();
    c.toggle(Feature::Clock, true);
    assert!((c.price() - 261.0).abs() < 1e-9);
    assert_eq!(c.price_label(), "261.00 €");
    c.toggle(Feature::Clock, false);
    assert_eq!(c.price_label(), "216.00 €");
}

#[test]
fn manual_entry_above_maximum_is_clamped() {
    let mut c = Configurator::new();
    c.set_input_mode(Axis::Width, InputMode::Manual);
    c.edit_entry(Axis::Width, "5000");
    assert_eq!(c.commit_entry(Axis::Width), EntryOutcome::ClampedHigh(MAX_MM));
    assert_eq!(c.dimensions().width_mm(), 2800);
    assert_eq!(c.entry_text(Axis::Width), "2800");
}

#[test]
fn manual_entry_too_long_for_a_float_is_clamped() {
    let mut c = Configurator::new();
    c.set_input_mode(Axis::Width, InputMode::Manual);
    let huge = format!("9{}", "0".repeat(400));
    c.edit_entry(Axis::Width, &huge);
    assert_eq!(c.commit_entry(Axis::Width), EntryOutcome::ClampedHigh(MAX_MM));
    assert_eq!(c.dimensions().width_mm(), 2800);
    assert_eq!(c.entry_text(Axis::Width), "2800");
}

#[test]
fn manual_entry_garbage_reverts() {
    let mut c = Configurator::new();
    c.set_input_mode(Axis::Width, InputMode::Manual);
    c.edit_entry(Axis::Width, "abc");
    let outcome = c.commit_entry(Axis::Width);
    assert!(matches!(
        outcome,
        EntryOutcome::Reverted {
            restored: 900,
            reason: ConfigError::NotANumber { .. }
        }
    ));
    assert_eq!(c.dimensions().width_mm(), 900);
    assert_eq!(c.entry_text(Axis::Width), "900");
}

#[test]
fn manual_entry_below_minimum_reverts() {
    let mut c = Configurator::new();
    c.set_input_mode(Axis::Height, InputMode::Manual);
    c.edit_entry(Axis::Height, "120");
    assert!(matches!(
        c.commit_entry(Axis::Height),
        EntryOutcome::Reverted {
            restored: 1600,
            reason: ConfigError::BelowMinimum { .. }
        }
    ));
    assert_eq!(c.entry_text(Axis::Height), "1600");
}

#[test]
fn mode_switch_resyncs_the_buffer() {
    let mut c = Configurator::new();
    c.set_input_mode(Axis::Width, InputMode::Manual);
    c.edit_entry(Axis::Width, "12");
    c.set_input_mode(Axis::Width, InputMode::Slider);
    assert_eq!(c.entry_text(Axis::Width), "900");
}

#[test]
fn clicking_top_right_marker_commits_the_clock() {
    let mut c = Configurator::new();
    c.toggle(Feature::Clock, true);
    assert_eq!(c.selector_state(Feature::Clock), Some(SelectorState::Pending));
    assert_eq!(c.scene().hit_markers().len(), 8);

    let committed = c.click_hit_target(HitTarget {
        feature: Feature::Clock,
        placement: Placement::TopRight,
    });
    assert!(committed);
    assert_eq!(
        c.features().placement(Feature::Clock),
        Some(Placement::TopRight)
    );

    let expected = attachment_offset(
        Some(Placement::TopRight),
        0.9,
        1.6,
        attachment_inset(Feature::Clock),
    );
    let scene = c.scene();
    assert!(scene.hit_markers().is_empty());
    assert!(scene.find("selector").is_none());
    let clock = scene
        .find("clock-placeholder")
        .expect("clock drawn while its model loads");
    let local = scene.node(clock).transform.translation;
    assert!((local.x - expected.x).abs() < 1e-6);
    assert!((local.y - expected.y).abs() < 1e-6);
    assert!((local.z - CLOCK_Z).abs() < 1e-6);
    assert!((expected.x - (0.45 - 0.2)).abs() < 1e-6);
    assert!((expected.y - (0.8 - 0.2)).abs() < 1e-6);
}

#[test]
fn picking_through_the_camera_hits_a_marker() {
    let mut c = Configurator::new();
    c.toggle(Feature::Clock, true);
    let (w, h) = (1200.0_f32, 800.0_f32);
    let camera = c.camera(w / h);
    let marker = c
        .scene()
        .hit_markers()
        .into_iter()
        .find(|m| m.target.placement == Placement::TopCenter)
        .expect("top-center marker");

    let clip = camera.view_proj() * marker.center.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    let sx = (ndc.x + 1.0) * 0.5 * w;
    let sy = (1.0 - ndc.y) * 0.5 * h;
    let ray = screen_ray(&camera, sx, sy, w, h);
    assert_eq!(c.pick(ray), Some(marker.target));
}

#[test]
fn disabling_clears_the_placement() {
    let mut c = Configurator::new();
    c.toggle(Feature::Socket, true);
    assert!(c.set_placement(Feature::Socket, Placement::BottomLeft));
    c.toggle(Feature::Socket, false);
    assert_eq!(c.features().placement(Feature::Socket), None);
    c.toggle(Feature::Socket, true);
    assert_eq!(c.selector_state(Feature::Socket), Some(SelectorState::Pending));
}

#[test]
fn placement_while_disabled_is_a_no_op() {
    let mut c = Configurator::new();
    let rev = c.revision();
    assert!(!c.set_placement(Feature::Clock, Placement::TopLeft));
    assert_eq!(c.features().placement(Feature::Clock), None);
    assert_eq!(c.revision(), rev);
}

#[test]
fn committed_placement_can_be_moved_through_the_control() {
    let mut c = Configurator::new();
    c.toggle(Feature::HygieneMirror, true);
    assert!(c.set_placement(Feature::HygieneMirror, Placement::BottomLeft));
    assert!(c.set_placement(Feature::HygieneMirror, Placement::BottomRight));
    assert!(!c.set_placement(Feature::HygieneMirror, Placement::TopLeft));
    assert_eq!(
        c.selector_state(Feature::HygieneMirror),
        Some(SelectorState::Committed(Placement::BottomRight))
    );
}

#[test]
fn top_view_mid_orbit_then_drag_resumes_from_it() {
    let mut c = Configurator::new();
    c.orbit(120.0, 30.0, 800.0);
    c.request_view(ViewPreset::Top);
    let (az, polar) = ViewPreset::Top.angles();
    let pose = c.camera_pose();
    assert!((pose.azimuth - az).abs() < 1e-5);
    assert!((pose.polar - polar).abs() < 1e-5);
    assert_eq!(c.view_request(), Some(ViewPreset::Top));

    c.orbit(10.0, 0.0, 800.0);
    let after = c.camera_pose();
    assert_eq!(c.view_request(), None);
    assert!((after.polar - polar).abs() < 1e-5);
    assert!(after.azimuth < az);
    assert!((after.azimuth - az).abs() < 0.1);
}

#[test]
fn view_request_keeps_distance_and_target() {
    let mut c = Configurator::new();
    c.zoom(5.0);
    c.pan(40.0, -10.0, 800.0);
    let before = c.camera_pose();
    c.request_view(ViewPreset::Left);
    let after = c.camera_pose();
    assert_eq!(before.distance, after.distance);
    assert_eq!(before.target, after.target);
}

#[test]
fn clock_model_replaces_the_placeholder_once_loaded() {
    let mut c = Configurator::new();
    for ticket in c.take_load_requests() {
        c.resolve_asset(ticket, Ok(()));
    }
    c.toggle(Feature::Clock, true);
    let ticket = c.take_load_requests()[0];
    assert_eq!(ticket.asset, AssetId::ClockModel);
    c.resolve_asset(ticket, Ok(()));

    let scene = c.scene();
    assert!(scene.environment.is_some());
    let clock = scene.find("clock").expect("clock model node");
    assert!(matches!(
        scene.node(clock).kind,
        NodeKind::Mesh {
            geometry: Geometry::Model {
                asset: AssetId::ClockModel
            },
            ..
        }
    ));
}

#[test]
fn shelf_percent_is_refused_while_off() {
    let mut c = Configurator::new();
    assert_eq!(c.set_shelf_width_percent(50), None);
    c.toggle(Feature::Shelf, true);
    assert_eq!(c.set_shelf_width_percent(5), Some(10));
    assert!(c.scene().find("shelf").is_some());
}
