#![cfg(target_arch = "wasm32")]
//! Browser front end: hash routing, webcam hand tracking and WebGPU rendering
//! of the touchless-core scenes.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod landmarker;
mod overlay;
mod render;
mod routes;
mod session;
mod webcam;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("touchless starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("scene-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #scene-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let video: web::HtmlVideoElement = document
        .get_element_by_id("webcam")
        .ok_or_else(|| anyhow::anyhow!("missing #webcam"))?
        .dyn_into::<web::HtmlVideoElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);
    events::wire_canvas_resize(&canvas);

    let gpu = frame::init_gpu(&canvas).await;
    let app = Rc::new(RefCell::new(frame::FrameContext::new(
        gpu,
        canvas,
        video,
        document.clone(),
    )));
    events::wire_menu(&document);
    events::wire_global_keydown(app.clone());
    events::wire_hashchange(app.clone());

    app.borrow_mut().mount(dom::current_route());
    frame::start_loop(app);
    Ok(())
}
