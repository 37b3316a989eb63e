use crate::dom;
use crate::frame::FrameContext;
use crate::routes::{action_for_key, KeyAction, Route};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, app: &Rc<RefCell<FrameContext<'static>>>) {
    match action_for_key(&ev.key()) {
        Some(KeyAction::Home) => dom::go_to(Route::Landing),
        Some(KeyAction::Reset) => app.borrow_mut().reset_scene(),
        None => {}
    }
}

pub fn wire_global_keydown(app: Rc<RefCell<FrameContext<'static>>>) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &app);
            }) as Box<dyn FnMut(_)>);
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Back/forward and menu clicks all arrive here as hash changes.
pub fn wire_hashchange(app: Rc<RefCell<FrameContext<'static>>>) {
    if let Some(window) = web::window() {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            app.borrow_mut().navigate(dom::current_route());
        }) as Box<dyn FnMut()>);
        let _ = window
            .add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

pub fn wire_menu(document: &web::Document) {
    for route in Route::ALL {
        dom::add_click_listener(document, route.button_id(), move || dom::go_to(route));
    }
}

pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    if let Some(window) = web::window() {
        let canvas = canvas.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            dom::sync_canvas_backing_size(&canvas);
        }) as Box<dyn FnMut()>);
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
