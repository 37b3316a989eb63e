use crate::routes::Route;
use web_sys as web;

const HIDDEN: &str = "hidden";

#[inline]
fn set_hidden(document: &web::Document, id: &str, hidden: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let _ = el.class_list().toggle_with_force(HIDDEN, hidden);
    }
}

/// Landing menu on `#/`, canvas and scene chrome everywhere else.
pub fn show_route(document: &web::Document, route: Route) {
    let in_scene = route.scene().is_some();
    set_hidden(document, "landing", in_scene);
    set_hidden(document, "scene-view", !in_scene);
    if let Some(el) = document.get_element_by_id("scene-title") {
        el.set_text_content(Some(route.title()));
    }
    set_loading(document, false);
    set_status(document, "");
    set_hud(document, "");
}

#[inline]
pub fn set_loading(document: &web::Document, loading: bool) {
    set_hidden(document, "loading", !loading);
}

#[inline]
pub fn set_status(document: &web::Document, text: &str) {
    if let Some(el) = document.get_element_by_id("status") {
        el.set_text_content(Some(text));
    }
}

/// Per-frame scene readout (focus, gesture, scale).
#[inline]
pub fn set_hud(document: &web::Document, text: &str) {
    if let Some(el) = document.get_element_by_id("hud") {
        el.set_text_content(Some(text));
    }
}
