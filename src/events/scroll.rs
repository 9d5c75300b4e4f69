use super::Listener;
use crate::dom;
use folio_core::ScrollProgress;
use std::cell::Cell;
use std::rc::Rc;
use web_sys as web;

/// Publishes the page's scroll progress.
///
/// Recomputed on every scroll and resize event and once at construction.
/// Readers hold a shared cell; the value is never smoothed here.
pub struct ScrollTracker {
    progress: Rc<Cell<ScrollProgress>>,
    _listeners: [Listener; 2],
}

impl ScrollTracker {
    pub fn subscribe(window: &web::Window) -> anyhow::Result<Self> {
        let progress = Rc::new(Cell::new(ScrollProgress::START));
        let recompute = {
            let progress = progress.clone();
            let window = window.clone();
            move |_: web::Event| {
                progress.set(ScrollProgress::from_metrics(&dom::scroll_metrics(&window)));
            }
        };
        let target: &web::EventTarget = window.as_ref();
        let scroll = Listener::passive(target, "scroll", recompute.clone())?;
        let resize = Listener::passive(target, "resize", recompute)?;

        progress.set(ScrollProgress::from_metrics(&dom::scroll_metrics(window)));
        log::info!("[scroll] tracking, initial progress={:.3}", progress.get().get());
        Ok(Self {
            progress,
            _listeners: [scroll, resize],
        })
    }

    /// Shared handle for readers that outlive a borrow of the tracker.
    pub fn reader(&self) -> Rc<Cell<ScrollProgress>> {
        self.progress.clone()
    }
}
