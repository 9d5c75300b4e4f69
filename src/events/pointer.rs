use super::Listener;
use crate::dom;
use folio_core::PointerPosition;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Normalized pointer position over the viewport, (0, 0) until the first move.
pub struct PointerTracker {
    position: Rc<Cell<PointerPosition>>,
    _listener: Listener,
}

impl PointerTracker {
    pub fn subscribe(window: &web::Window) -> anyhow::Result<Self> {
        let position = Rc::new(Cell::new(PointerPosition::default()));
        let handler = {
            let position = position.clone();
            let window = window.clone();
            move |ev: web::Event| {
                let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
                    return;
                };
                let (w, h) = dom::viewport_size(&window);
                position.set(PointerPosition::from_client(
                    ev.client_x() as f64,
                    ev.client_y() as f64,
                    w,
                    h,
                ));
            }
        };
        let listener = Listener::passive(window.as_ref(), "mousemove", handler)?;
        Ok(Self {
            position,
            _listener: listener,
        })
    }

    pub fn reader(&self) -> Rc<Cell<PointerPosition>> {
        self.position.clone()
    }
}
