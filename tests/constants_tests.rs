// Host-side tests for page constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use mirror_core::{Feature, ViewPreset};

#[test]
#[allow(clippy::assertions_on_constants)]
fn pointer_tuning_is_positive() {
    assert!(CLICK_DRAG_THRESHOLD_PX > 0.0);
    assert!(WHEEL_PIXELS_PER_STEP > 0.0);
    assert!(WHEEL_LINE_PIXELS > 0.0);
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC < 1.0);
    assert!(VIEW_TRANSITION_SEC > 0.0);
}

#[test]
fn element_ids_are_distinct() {
    let mut ids = vec![
        CANVAS_ID,
        WIDTH_SLIDER_ID,
        WIDTH_INPUT_ID,
        WIDTH_MODE_ID,
        HEIGHT_SLIDER_ID,
        HEIGHT_INPUT_ID,
        HEIGHT_MODE_ID,
        PRICE_ID,
        BADGE_ID,
        SHELF_PERCENT_ID,
        SHELF_PERCENT_LABEL_ID,
        SHELF_ROW_ID,
    ];
    let n = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), n);
}

#[test]
fn generated_ids_do_not_collide() {
    let mut ids: Vec<String> = Feature::ALL
        .iter()
        .flat_map(|f| {
            [
                format!("{FEATURE_PREFIX}{}", f.id()),
                format!("{PLACEMENT_PREFIX}{}", f.id()),
            ]
        })
        .chain(ViewPreset::ALL.iter().map(|v| format!("{VIEW_PREFIX}{}", v.id())))
        .collect();
    let n = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), n);
}

#[test]
fn background_is_white() {
    assert_eq!(CLEAR_RGB, [1.0, 1.0, 1.0]);
}
