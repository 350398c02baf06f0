use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Attach `handler` to `event` on the element with `element_id`, if present.
pub fn add_listener(
    document: &web::Document,
    element_id: &str,
    event: &str,
    mut handler: impl FnMut(web::Event) + 'static,
) {
    let Some(el) = document.get_element_by_id(element_id) else {
        log::warn!("[dom] missing #{element_id}");
        return;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::Event| handler(ev)) as Box<dyn FnMut(_)>);
    _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    add_listener(document, element_id, "click", move |_| handler());
}

pub fn input_element(document: &web::Document, id: &str) -> Option<web::HtmlInputElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlInputElement>().ok())
}

pub fn select_element(document: &web::Document, id: &str) -> Option<web::HtmlSelectElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlSelectElement>().ok())
}

/// Value of the input that fired `ev`.
pub fn event_input_value(ev: &web::Event) -> Option<String> {
    ev.target()
        .and_then(|t| t.dyn_into::<web::HtmlInputElement>().ok())
        .map(|input| input.value())
}

pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        if el.text_content().as_deref() != Some(text) {
            el.set_text_content(Some(text));
        }
    }
}

pub fn set_style_property(document: &web::Document, id: &str, name: &str, value: &str) {
    if let Some(el) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        _ = el.style().set_property(name, value);
    }
}

pub fn set_hidden(document: &web::Document, id: &str, hidden: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().toggle_with_force("hidden", hidden);
    }
}

/// True while `el` has keyboard focus; used to leave in-progress typing alone.
pub fn is_focused(document: &web::Document, el: &web::Element) -> bool {
    document
        .active_element()
        .map(|active| &active == el)
        .unwrap_or(false)
}

pub fn set_canvas_cursor(canvas: &web::HtmlCanvasElement, pointer: bool) {
    _ = canvas
        .style()
        .set_property("cursor", if pointer { "pointer" } else { "auto" });
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}
