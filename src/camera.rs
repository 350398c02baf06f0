use mirror_core::{screen_ray, Configurator, Ray};
use web_sys as web;

#[inline]
pub fn canvas_aspect(canvas: &web::HtmlCanvasElement) -> f32 {
    canvas.width() as f32 / (canvas.height() as f32).max(1.0)
}

/// World-space ray under a canvas pixel, using the configurator's current camera.
///
/// `sx`, `sy` are in the canvas' backing store space.
#[inline]
pub fn screen_to_world_ray(
    canvas: &web::HtmlCanvasElement,
    state: &Configurator,
    sx: f32,
    sy: f32,
) -> Ray {
    let camera = state.camera(canvas_aspect(canvas));
    screen_ray(
        &camera,
        sx,
        sy,
        canvas.width() as f32,
        canvas.height() as f32,
    )
}
