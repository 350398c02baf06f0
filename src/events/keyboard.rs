use crate::constants::VIEW_TRANSITION_SEC;
use crate::input;
use mirror_core::Configurator;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Typing into a form control must not move the camera.
fn targets_form_control(ev: &web::KeyboardEvent) -> bool {
    ev.target()
        .and_then(|t| t.dyn_into::<web::Element>().ok())
        .map(|el| matches!(el.tag_name().as_str(), "INPUT" | "SELECT" | "TEXTAREA"))
        .unwrap_or(false)
}

pub fn wire_global_keydown(state: Rc<RefCell<Configurator>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        if ev.ctrl_key() || ev.meta_key() || ev.alt_key() || targets_form_control(&ev) {
            return;
        }
        if let Some(preset) = input::view_for_key(&ev.key()) {
            state
                .borrow_mut()
                .request_view_animated(preset, Duration::from_secs_f32(VIEW_TRANSITION_SEC));
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
