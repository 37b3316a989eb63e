use crate::overlay;
use crate::render;
use crate::routes::Route;
use crate::session::Session;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use touchless_core::{SceneController, TrackingCell};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

// a backgrounded tab can deliver one huge step; cap it
const MAX_FRAME_DT: f32 = 0.1;
const NO_WEBGPU: &str = "WebGPU is not available in this browser";

pub struct FrameContext<'a> {
    pub cell: TrackingCell,
    pub scene: Option<Box<dyn SceneController>>,
    pub session: Option<Session>,
    pub route: Route,

    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: web::HtmlCanvasElement,
    pub video: web::HtmlVideoElement,
    pub document: web::Document,

    pub last_instant: Instant,
    pub last_status: String,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        gpu: Option<render::GpuState<'a>>,
        canvas: web::HtmlCanvasElement,
        video: web::HtmlVideoElement,
        document: web::Document,
    ) -> Self {
        Self {
            cell: TrackingCell::new(),
            scene: None,
            session: None,
            route: Route::Landing,
            gpu,
            canvas,
            video,
            document,
            last_instant: Instant::now(),
            last_status: String::new(),
        }
    }

    pub fn navigate(&mut self, route: Route) {
        if route != self.route {
            self.mount(route);
        }
    }

    /// Unmount the current scene and its tracking session, then mount `route`.
    pub fn mount(&mut self, route: Route) {
        self.session = None;
        self.scene = None;
        self.last_status.clear();
        self.route = route;
        overlay::show_route(&self.document, route);
        // the canvas had no layout size while its section was hidden
        crate::dom::sync_canvas_backing_size(&self.canvas);
        if self.gpu.is_none() {
            overlay::set_status(&self.document, NO_WEBGPU);
        }

        if let Some(kind) = route.scene() {
            self.scene = Some(kind.create());
            self.session = Some(Session::start(
                self.video.clone(),
                self.cell.clone(),
                self.document.clone(),
            ));
            log::info!("[scene] mounted {}", kind);
        } else {
            log::info!("[scene] landing");
        }
        self.last_instant = Instant::now();
    }

    pub fn reset_scene(&mut self) {
        if let Some(scene) = self.scene.as_mut() {
            scene.reset();
            log::info!("[scene] reset {}", scene.kind());
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT);
        self.last_instant = now;

        let Some(scene) = self.scene.as_mut() else { return };
        let tracking = self.cell.latest();
        scene.update(&tracking, dt);
        let snapshot = scene.snapshot();

        if snapshot.status != self.last_status {
            overlay::set_hud(&self.document, &snapshot.status);
            self.last_status.clone_from(&snapshot.status);
        }

        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
            match gpu.render(&snapshot) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
                Err(wgpu::SurfaceError::Timeout) => log::warn!("[render] surface timeout"),
                Err(e) => log::error!("[render] {:?}", e),
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
            log::error!("[render] WebGPU init error: {:?}", e);
            None
        }
    }
}

fn request_frame(tick: &RefCell<Option<Closure<dyn FnMut()>>>) {
    let Some(w) = web::window() else { return };
    if let Some(cb) = tick.borrow().as_ref() {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
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
