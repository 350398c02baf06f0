#![cfg(target_arch = "wasm32")]
use instant::Instant;
use mirror_core::Configurator;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod camera;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod render;
mod ui;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("mirror-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let state = Rc::new(RefCell::new(Configurator::new()));
    {
        let s = state.borrow();
        log::info!(
            "[config] {} at {}",
            s.dimension_badge(),
            s.price_label()
        );
    }

    ui::wire_controls(&document, &state);
    ui::sync(&document, &state.borrow());
    events::wire_global_keydown(state.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        state: state.clone(),
        drag_state: Rc::new(RefCell::new(input::DragState::default())),
    });

    let gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        log::warn!("WebGPU unavailable; controls stay live without a 3D view");
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        state,
        canvas,
        document,
        gpu,
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
