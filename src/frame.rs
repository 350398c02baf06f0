use crate::camera::canvas_aspect;
use crate::constants::MAX_FRAME_DT_SEC;
use crate::{loader, render, ui};
use instant::Instant;
use mirror_core::Configurator;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub state: Rc<RefCell<Configurator>>,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub gpu: Option<render::GpuState<'a>>,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).min(Duration::from_secs_f32(MAX_FRAME_DT_SEC));
        self.last_instant = now;

        let loads = {
            let mut state = self.state.borrow_mut();
            state.tick(dt);
            state.take_load_requests()
        };
        for ticket in loads {
            loader::start_load(self.state.clone(), ticket);
        }

        let mut state = self.state.borrow_mut();
        ui::sync(&self.document, &state);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            let camera = state.camera(canvas_aspect(&self.canvas));
            let scene = state.scene();
            match g.render(scene, &camera) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("[render] surface lost, reconfiguring");
                    g.reconfigure();
                }
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
