//! One tracking session per mounted scene: webcam, model and detection loop.
//!
//! The detection loop runs on its own `requestAnimationFrame` chain,
//! independent of the render loop, and only runs the model when the video has
//! produced a new frame. Results go into the shared [`TrackingCell`]; the
//! render loop picks up whatever is latest. Dropping the session stops the
//! loop and the camera and clears the cell.

use crate::landmarker::HandLandmarker;
use crate::overlay;
use crate::webcam::Webcam;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use touchless_core::{HandTracker, TrackingCell};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

// HAVE_CURRENT_DATA
const READY_STATE_CURRENT_DATA: u16 = 2;

#[derive(Default)]
struct Shared {
    alive: Cell<bool>,
    raf_id: Cell<Option<i32>>,
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
    webcam: RefCell<Option<Webcam>>,
}

impl Shared {
    fn request_tick(&self) {
        let Some(window) = web::window() else { return };
        if let Some(cb) = self.tick.borrow().as_ref() {
            if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                self.raf_id.set(Some(id));
            }
        }
    }
}

pub struct Session {
    shared: Rc<Shared>,
    cell: TrackingCell,
}

impl Session {
    /// Start camera and model in the background. Failures are logged and leave
    /// the scene running without hand input.
    pub fn start(
        video: web::HtmlVideoElement,
        cell: TrackingCell,
        document: web::Document,
    ) -> Self {
        let shared = Rc::new(Shared::default());
        shared.alive.set(true);
        cell.clear();
        spawn_local(run(shared.clone(), video, cell.clone(), document));
        Self { shared, cell }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shared.alive.set(false);
        if let (Some(window), Some(id)) = (web::window(), self.shared.raf_id.take()) {
            let _ = window.cancel_animation_frame(id);
        }
        // frees the detection closure
        self.shared.tick.borrow_mut().take();
        self.shared.webcam.borrow_mut().take();
        self.cell.clear();
        log::info!("[tracking] session closed");
    }
}

async fn run(
    shared: Rc<Shared>,
    video: web::HtmlVideoElement,
    cell: TrackingCell,
    document: web::Document,
) {
    overlay::set_loading(&document, true);
    let webcam = match Webcam::start(&video).await {
        Ok(cam) => cam,
        Err(e) => {
            log::error!("[webcam] {e:#}");
            if shared.alive.get() {
                overlay::set_loading(&document, false);
                overlay::set_status(&document, "Camera unavailable: hand tracking is off");
            }
            return;
        }
    };
    if !shared.alive.get() {
        return;
    }
    *shared.webcam.borrow_mut() = Some(webcam);

    let landmarker = match HandLandmarker::load().await {
        Ok(l) => l,
        Err(e) => {
            log::error!("[landmarker] {e:#}");
            if shared.alive.get() {
                overlay::set_loading(&document, false);
                overlay::set_status(&document, "Hand model failed to load: hand tracking is off");
            }
            return;
        }
    };
    if !shared.alive.get() {
        return;
    }
    overlay::set_loading(&document, false);

    let mut tracker = HandTracker::default();
    let mut last_video_time = -1.0_f64;
    let weak = Rc::downgrade(&shared);
    let tick = Closure::wrap(Box::new(move || {
        let Some(shared) = weak.upgrade() else { return };
        if !shared.alive.get() {
            return;
        }
        let t = video.current_time();
        if video.ready_state() >= READY_STATE_CURRENT_DATA && t != last_video_time {
            last_video_time = t;
            match landmarker.detect(&video, js_sys::Date::now()) {
                Ok(hands) => tracker.update_into(hands, &cell),
                Err(e) => log::warn!("[landmarker] {e:#}"),
            }
        }
        shared.request_tick();
    }) as Box<dyn FnMut()>);
    *shared.tick.borrow_mut() = Some(tick);
    shared.request_tick();
    log::info!("[tracking] detection loop started");
}
