use crate::constants::MAX_FRAME_DT_SEC;
use crate::dom;
use crate::render;
use folio_core::{
    update_frame, PointerPosition, SceneGraph, SceneLayout, ScrollCamera, ScrollProgress,
    UpdateContext,
};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub layout: SceneLayout,
    pub graph: SceneGraph,
    pub camera: ScrollCamera,

    pub progress: Rc<Cell<ScrollProgress>>,
    pub pointer: Rc<Cell<PointerPosition>>,

    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,

    pub started: Instant,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        layout: SceneLayout,
        canvas: web::HtmlCanvasElement,
        gpu: Option<render::GpuState<'a>>,
        progress: Rc<Cell<ScrollProgress>>,
        pointer: Rc<Cell<PointerPosition>>,
    ) -> Self {
        let graph = layout.new_graph();
        let camera = ScrollCamera::new(layout.config.smoothing, layout.config.pointer_parallax);
        let now = Instant::now();
        Self {
            layout,
            graph,
            camera,
            progress,
            pointer,
            canvas,
            gpu,
            started: now,
            last_instant: now,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        let mut ctx = UpdateContext {
            elapsed_sec: (now - self.started).as_secs_f32(),
            dt_sec,
            progress: self.progress.get(),
            pointer: self.pointer.get(),
            camera: &mut self.camera,
        };
        update_frame(&self.layout, &mut self.graph, &mut ctx);

        let Some(g) = &mut self.gpu else {
            return;
        };
        g.resize_if_needed(self.canvas.width(), self.canvas.height());
        let camera = self
            .camera
            .to_camera(g.aspect(), self.layout.config.fov_y_degrees.to_radians());
        let result = g.render(
            &camera,
            self.graph.mesh_instances(&self.layout),
            self.graph.point_instances(&self.layout),
        );
        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost, reconfiguring");
                g.reconfigure();
            }
            Err(e) => log::error!("render error: {:?}", e),
        }
    }
}

thread_local! {
    static SURFACE_CANVAS: RefCell<Option<&'static web::HtmlCanvasElement>> =
        const { RefCell::new(None) };
}

/// `'static` handle for the surface. Leaks one clone per canvas element, so
/// restarting on the same canvas reuses it.
fn static_canvas(canvas: &web::HtmlCanvasElement) -> &'static web::HtmlCanvasElement {
    SURFACE_CANVAS.with(|slot| {
        let mut slot = slot.borrow_mut();
        match *slot {
            Some(leaked) if leaked == canvas => leaked,
            _ => {
                let leaked: &'static web::HtmlCanvasElement = Box::leak(Box::new(canvas.clone()));
                *slot = Some(leaked);
                leaked
            }
        }
    })
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    layout: &SceneLayout,
) -> Option<render::GpuState<'static>> {
    dom::sync_canvas_backing_size(canvas);
    match render::GpuState::new(static_canvas(canvas), layout).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to a running `requestAnimationFrame` loop. Dropping it stops the
/// loop before the next frame.
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
    tick: Tick,
    handle: Rc<Cell<Option<i32>>>,
}

fn request_frame(tick: &Tick, handle: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        handle.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> FrameLoop {
    let running = Rc::new(Cell::new(true));
    let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick: Tick = Rc::new(RefCell::new(None));

    let tick_clone = tick.clone();
    let running_tick = running.clone();
    let handle_tick = handle.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !running_tick.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone, &handle_tick);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &handle);
    log::info!("[frame] loop started");

    FrameLoop {
        running,
        tick,
        handle,
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.running.set(false);
        if let (Some(w), Some(id)) = (web::window(), self.handle.take()) {
            _ = w.cancel_animation_frame(id);
        }
        // Break the closure's self-reference so the frame context is freed.
        self.tick.borrow_mut().take();
        log::info!("[frame] loop stopped");
    }
}
