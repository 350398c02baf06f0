use crate::camera::screen_to_world_ray;
use crate::constants::{CLICK_DRAG_THRESHOLD_PX, WHEEL_LINE_PIXELS, WHEEL_PIXELS_PER_STEP};
use crate::dom;
use crate::input::{self, DragMode};
use mirror_core::Configurator;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub state: Rc<RefCell<Configurator>>,
    pub drag_state: Rc<RefCell<input::DragState>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
    wire_contextmenu(&w);
}

fn add_pointer_listener(
    canvas: &web::HtmlCanvasElement,
    event: &str,
    handler: impl FnMut(web::PointerEvent) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::PointerEvent)>);
    _ = canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    add_pointer_listener(&canvas, "pointermove", move |ev| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        let mode = w.drag_state.borrow().mode;
        if let Some(mode) = mode {
            let delta = w.drag_state.borrow_mut().step(pos, CLICK_DRAG_THRESHOLD_PX);
            if !w.drag_state.borrow().moved {
                return;
            }
            let viewport_h = w.canvas.height() as f32;
            let mut state = w.state.borrow_mut();
            match mode {
                DragMode::Orbit => state.orbit(delta.x, delta.y, viewport_h),
                DragMode::Pan => state.pan(delta.x, delta.y, viewport_h),
            }
            return;
        }

        let mut state = w.state.borrow_mut();
        let ray = screen_to_world_ray(&w.canvas, &state, pos.x, pos.y);
        let over_marker = state.pick(ray).is_some();
        dom::set_canvas_cursor(&w.canvas, over_marker);
    });
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    add_pointer_listener(&canvas, "pointerdown", move |ev| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        let Some(mode) = input::drag_mode_for(ev.button(), ev.shift_key()) else {
            return;
        };
        w.drag_state.borrow_mut().begin(mode, pos);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    });
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    add_pointer_listener(&canvas, "pointerup", move |ev| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
        let (mode, was_click) = {
            let mut drag = w.drag_state.borrow_mut();
            let mode = drag.mode;
            (mode, drag.end())
        };
        if !was_click || mode != Some(DragMode::Orbit) {
            return;
        }
        let mut state = w.state.borrow_mut();
        let ray = screen_to_world_ray(&w.canvas, &state, pos.x, pos.y);
        if let Some(target) = state.pick(ray) {
            log::info!(
                "[pick] {} -> {}",
                target.feature.id(),
                target.placement
            );
            state.click_hit_target(target);
            dom::set_canvas_cursor(&w.canvas, false);
        }
    });
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        ev.prevent_default();
        let steps = input::wheel_zoom_steps(
            ev.delta_y(),
            ev.delta_mode(),
            WHEEL_LINE_PIXELS,
            WHEEL_PIXELS_PER_STEP,
        );
        if steps != 0.0 {
            w.state.borrow_mut().zoom(steps);
        }
    }) as Box<dyn FnMut(web::WheelEvent)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}

// Right-drag pans; keep the browser menu out of the way.
fn wire_contextmenu(w: &InputWiring) {
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        ev.prevent_default();
    }) as Box<dyn FnMut(web::Event)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
    closure.forget();
}
