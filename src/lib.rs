#![cfg(target_arch = "wasm32")]
use folio_core::{SceneConfig, SceneLayout};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod lifecycle;
mod render;

static LIFECYCLE: lifecycle::Lifecycle = lifecycle::Lifecycle::new();

/// Everything that keeps the backdrop alive. Dropping it detaches listeners
/// and stops the frame loop.
struct App {
    _scroll: events::ScrollTracker,
    _pointer: events::PointerTracker,
    _resize: events::Listener,
    _loop: frame::FrameLoop,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    let Some(ticket) = LIFECYCLE.begin() else {
        return Ok(());
    };
    spawn_local(async move {
        if let Err(e) = init(ticket).await {
            log::error!("init error: {:?}", e);
            LIFECYCLE.abandon(ticket);
        }
    });
    Ok(())
}

/// Tear down listeners and the frame loop. `start` may be called again.
#[wasm_bindgen]
pub fn stop() {
    let app = APP.with(|a| a.borrow_mut().take());
    if app.is_some() {
        drop(app);
        log::info!("folio-web stopped");
    }
    LIFECYCLE.end();
}

async fn init(ticket: u32) -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::ensure_canvas(&document)?;

    let layout = SceneLayout::portfolio(SceneConfig::default())?;

    // Trackers first so the page reacts even if WebGPU is unavailable.
    let scroll = events::ScrollTracker::subscribe(&window)?;
    let pointer = events::PointerTracker::subscribe(&window)?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);
    let resize = {
        let canvas = canvas.clone();
        events::Listener::passive(window.as_ref(), "resize", move |_| {
            dom::sync_canvas_backing_size(&canvas);
        })?
    };

    let gpu = frame::init_gpu(&canvas, &layout).await;
    if gpu.is_none() {
        log::warn!("[gpu] unavailable, frames will not render");
    }

    // stop(), or stop() then start(), may have run while the GPU was initialising
    if !LIFECYCLE.is_current(ticket) {
        log::info!("[frame] start {} superseded, discarding", ticket);
        return Ok(());
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        layout,
        canvas,
        gpu,
        scroll.reader(),
        pointer.reader(),
    )));
    let frame_loop = frame::start_loop(frame_ctx);

    APP.with(|a| {
        *a.borrow_mut() = Some(App {
            _scroll: scroll,
            _pointer: pointer,
            _resize: resize,
            _loop: frame_loop,
        });
    });
    Ok(())
}
