// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;
use mirror_core::ViewPreset;

#[test]
fn small_wiggle_stays_a_click() {
    let mut drag = DragState::default();
    drag.begin(DragMode::Orbit, Vec2::new(100.0, 100.0));
    drag.step(Vec2::new(102.0, 101.0), 4.0);
    drag.step(Vec2::new(100.0, 99.0), 4.0);
    assert!(!drag.moved);
    assert!(drag.end());
    assert_eq!(drag.mode, None);
}

#[test]
fn crossing_the_threshold_makes_a_drag() {
    let mut drag = DragState::default();
    drag.begin(DragMode::Orbit, Vec2::ZERO);
    let d = drag.step(Vec2::new(3.0, 0.0), 4.0);
    assert_eq!(d, Vec2::new(3.0, 0.0));
    let d = drag.step(Vec2::new(6.0, 0.0), 4.0);
    assert_eq!(d, Vec2::new(3.0, 0.0));
    assert!(drag.moved);
    // Coming back to the start does not turn it into a click again.
    drag.step(Vec2::ZERO, 4.0);
    assert!(!drag.end());
}

#[test]
fn end_without_begin_is_not_a_click() {
    let mut drag = DragState::default();
    assert!(!drag.end());
}

#[test]
fn threshold_is_exclusive() {
    assert!(!exceeds_click_threshold(Vec2::new(4.0, 0.0), 4.0));
    assert!(exceeds_click_threshold(Vec2::new(4.0, 0.1), 4.0));
}

#[test]
fn buttons_map_to_drag_modes() {
    assert_eq!(drag_mode_for(0, false), Some(DragMode::Orbit));
    assert_eq!(drag_mode_for(0, true), Some(DragMode::Pan));
    assert_eq!(drag_mode_for(1, false), Some(DragMode::Pan));
    assert_eq!(drag_mode_for(2, false), Some(DragMode::Pan));
    assert_eq!(drag_mode_for(3, false), None);
}

#[test]
fn wheel_down_zooms_out() {
    assert_eq!(wheel_zoom_steps(100.0, 0, 16.0, 100.0), -1.0);
    assert_eq!(wheel_zoom_steps(-200.0, 0, 16.0, 100.0), 2.0);
}

#[test]
fn wheel_line_and_page_modes_scale() {
    let line = wheel_zoom_steps(3.0, 1, 16.0, 100.0);
    assert!((line + 0.48).abs() < 1e-6);
    assert_eq!(wheel_zoom_steps(1.0, 2, 16.0, 100.0), -3.0);
}

#[test]
fn view_keys_are_case_insensitive() {
    assert_eq!(view_for_key("t"), Some(ViewPreset::Top));
    assert_eq!(view_for_key("L"), Some(ViewPreset::Left));
    assert_eq!(view_for_key("r"), Some(ViewPreset::Right));
    assert_eq!(view_for_key("F"), Some(ViewPreset::Front));
    assert_eq!(view_for_key("x"), None);
    assert_eq!(view_for_key("Enter"), None);
}
