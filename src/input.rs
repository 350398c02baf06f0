use glam::Vec2;
use mirror_core::ViewPreset;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Orbit,
    Pan,
}

#[derive(Default, Clone, Copy)]
pub struct DragState {
    pub mode: Option<DragMode>,
    pub start: Vec2,
    pub last: Vec2,
    /// Set once the pointer has travelled past the click threshold.
    pub moved: bool,
}

impl DragState {
    pub fn begin(&mut self, mode: DragMode, at: Vec2) {
        *self = DragState {
            mode: Some(mode),
            start: at,
            last: at,
            moved: false,
        };
    }

    /// Advance to `at` and return the delta since the last update.
    pub fn step(&mut self, at: Vec2, threshold_px: f32) -> Vec2 {
        let delta = at - self.last;
        self.last = at;
        if exceeds_click_threshold(at - self.start, threshold_px) {
            self.moved = true;
        }
        delta
    }

    /// Finish the gesture. Returns `true` when it was a click rather than a drag.
    pub fn end(&mut self) -> bool {
        let was_click = self.mode.is_some() && !self.moved;
        self.mode = None;
        was_click
    }
}

#[inline]
pub fn exceeds_click_threshold(delta: Vec2, threshold_px: f32) -> bool {
    delta.length_squared() > threshold_px * threshold_px
}

/// Left drag orbits; right/middle drag or shift+left pans.
#[inline]
pub fn drag_mode_for(button: i16, shift: bool) -> Option<DragMode> {
    match (button, shift) {
        (0, false) => Some(DragMode::Orbit),
        (0, true) | (1, _) | (2, _) => Some(DragMode::Pan),
        _ => None,
    }
}

/// Convert a wheel delta to zoom steps; positive zooms in.
#[inline]
pub fn wheel_zoom_steps(delta_y: f64, delta_mode: u32, line_px: f32, px_per_step: f32) -> f32 {
    let px = match delta_mode {
        1 => delta_y as f32 * line_px,
        2 => delta_y as f32 * px_per_step * 3.0,
        _ => delta_y as f32,
    };
    -px / px_per_step.max(1.0)
}

#[inline]
pub fn view_for_key(key: &str) -> Option<ViewPreset> {
    match key {
        "t" | "T" => Some(ViewPreset::Top),
        "l" | "L" => Some(ViewPreset::Left),
        "r" | "R" => Some(ViewPreset::Right),
        "f" | "F" => Some(ViewPreset::Front),
        _ => None,
    }
}

// ---------------- Pointer helpers ----------------
#[inline]
pub fn canvas_px(client_x: f32, client_y: f32, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = client_x - rect.left() as f32;
    let y_css = client_y - rect.top() as f32;
    let w = (rect.width() as f32).max(1.0);
    let h = (rect.height() as f32).max(1.0);
    let sx = (x_css / w) * canvas.width() as f32;
    let sy = (y_css / h) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    canvas_px(ev.client_x() as f32, ev.client_y() as f32, canvas)
}
