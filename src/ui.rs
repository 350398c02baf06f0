//! Form controls around the canvas: dimension sliders and manual entries,
//! feature toggles, placement pickers, shelf width and view buttons.
//!
//! Handlers only mutate the [`Configurator`]; [`sync`] writes its derived
//! values back into the page every frame.

use crate::constants::*;
use crate::dom;
use mirror_core::{Axis, Configurator, Feature, InputMode, Placement, ViewPreset};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsCast;
use web_sys as web;

struct AxisIds {
    slider: &'static str,
    input: &'static str,
    mode: &'static str,
}

fn axis_ids(axis: Axis) -> AxisIds {
    match axis {
        Axis::Width => AxisIds {
            slider: WIDTH_SLIDER_ID,
            input: WIDTH_INPUT_ID,
            mode: WIDTH_MODE_ID,
        },
        Axis::Height => AxisIds {
            slider: HEIGHT_SLIDER_ID,
            input: HEIGHT_INPUT_ID,
            mode: HEIGHT_MODE_ID,
        },
    }
}

fn event_checked(ev: &web::Event) -> Option<bool> {
    ev.target()
        .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
        .map(|input| input.checked())
}

pub fn wire_controls(document: &web::Document, state: &Rc<RefCell<Configurator>>) {
    for axis in Axis::ALL {
        wire_axis(document, state, axis);
    }
    for feature in Feature::ALL {
        wire_feature(document, state, feature);
    }
    wire_shelf_percent(document, state);
    for preset in ViewPreset::ALL {
        let state = state.clone();
        dom::add_click_listener(document, &format!("{VIEW_PREFIX}{}", preset.id()), move || {
            state
                .borrow_mut()
                .request_view_animated(preset, Duration::from_secs_f32(VIEW_TRANSITION_SEC));
        });
    }
}

fn wire_axis(document: &web::Document, state: &Rc<RefCell<Configurator>>, axis: Axis) {
    let ids = axis_ids(axis);

    let s = state.clone();
    dom::add_listener(document, ids.slider, "input", move |ev| {
        if let Some(mm) = dom::event_input_value(&ev).and_then(|v| v.parse::<f64>().ok()) {
            s.borrow_mut().set_dimension(axis, mm);
        }
    });

    let s = state.clone();
    dom::add_listener(document, ids.input, "input", move |ev| {
        if let Some(text) = dom::event_input_value(&ev) {
            s.borrow_mut().edit_entry(axis, &text);
        }
    });

    // `change` fires on blur and on Enter.
    let s = state.clone();
    dom::add_listener(document, ids.input, "change", move |ev| {
        let mut state = s.borrow_mut();
        state.commit_entry(axis);
        if let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
        {
            input.set_value(state.entry_text(axis));
        }
    });

    dom::add_listener(document, ids.input, "keydown", move |ev| {
        let enter = ev
            .dyn_ref::<web::KeyboardEvent>()
            .map(|k| k.key() == "Enter")
            .unwrap_or(false);
        if enter {
            if let Some(input) = ev
                .target()
                .and_then(|t| t.dyn_into::<web::HtmlElement>().ok())
            {
                _ = input.blur();
            }
        }
    });

    let s = state.clone();
    dom::add_listener(document, ids.mode, "change", move |ev| {
        if let Some(manual) = event_checked(&ev) {
            let mode = if manual {
                InputMode::Manual
            } else {
                InputMode::Slider
            };
            s.borrow_mut().set_input_mode(axis, mode);
        }
    });
}

fn wire_feature(document: &web::Document, state: &Rc<RefCell<Configurator>>, feature: Feature) {
    let s = state.clone();
    dom::add_listener(
        document,
        &format!("{FEATURE_PREFIX}{}", feature.id()),
        "change",
        move |ev| {
            if let Some(on) = event_checked(&ev) {
                s.borrow_mut().toggle(feature, on);
            }
        },
    );
    if !feature.is_placeable() {
        return;
    }
    let s = state.clone();
    dom::add_listener(
        document,
        &format!("{PLACEMENT_PREFIX}{}", feature.id()),
        "change",
        move |ev| {
            let value = ev
                .target()
                .and_then(|t| t.dyn_into::<web::HtmlSelectElement>().ok())
                .map(|sel| sel.value());
            match value.as_deref().map(str::parse::<Placement>) {
                Some(Ok(placement)) => {
                    s.borrow_mut().set_placement(feature, placement);
                }
                Some(Err(())) => log::warn!("[ui] unknown placement for {}", feature.id()),
                None => {}
            }
        },
    );
}

fn wire_shelf_percent(document: &web::Document, state: &Rc<RefCell<Configurator>>) {
    let s = state.clone();
    dom::add_listener(document, SHELF_PERCENT_ID, "input", move |ev| {
        if let Some(percent) = dom::event_input_value(&ev).and_then(|v| v.parse::<u32>().ok()) {
            s.borrow_mut().set_shelf_width_percent(percent);
        }
    });
}

/// Write derived state into the page. Fields with keyboard focus are left alone.
pub fn sync(document: &web::Document, state: &Configurator) {
    dom::set_text(document, PRICE_ID, &state.price_label());
    dom::set_text(document, BADGE_ID, &state.dimension_badge());

    for axis in Axis::ALL {
        let ids = axis_ids(axis);
        let mm = state.dimensions().get(axis).to_string();
        let manual = state.input_mode(axis) == InputMode::Manual;
        if let Some(slider) = dom::input_element(document, ids.slider) {
            if !dom::is_focused(document, &slider) && slider.value() != mm {
                slider.set_value(&mm);
            }
        }
        dom::set_style_property(
            document,
            ids.slider,
            FILL_PROPERTY,
            &format!("{:.1}%", state.slider_fill_percent(axis)),
        );
        if let Some(input) = dom::input_element(document, ids.input) {
            if !dom::is_focused(document, &input) && input.value() != state.entry_text(axis) {
                input.set_value(state.entry_text(axis));
            }
        }
        if let Some(mode) = dom::input_element(document, ids.mode) {
            mode.set_checked(manual);
        }
        dom::set_hidden(document, ids.slider, manual);
        dom::set_hidden(document, ids.input, !manual);
    }

    let features = state.features();
    for feature in Feature::ALL {
        let on = features.is_enabled(feature);
        if let Some(checkbox) = dom::input_element(document, &format!("{FEATURE_PREFIX}{}", feature.id())) {
            checkbox.set_checked(on);
        }
        if !feature.is_placeable() {
            continue;
        }
        if let Some(select) =
            dom::select_element(document, &format!("{PLACEMENT_PREFIX}{}", feature.id()))
        {
            select.set_disabled(!on);
            let value = features.placement(feature).map(|p| p.id()).unwrap_or("");
            if select.value() != value {
                select.set_value(value);
            }
        }
    }

    let shelf = features.shelf_width_percent();
    dom::set_hidden(document, SHELF_ROW_ID, shelf.is_none());
    if let Some(percent) = shelf {
        let text = percent.to_string();
        if let Some(range) = dom::input_element(document, SHELF_PERCENT_ID) {
            if range.value() != text {
                range.set_value(&text);
            }
        }
        dom::set_text(document, SHELF_PERCENT_LABEL_ID, &format!("{percent}%"));
    }
}
