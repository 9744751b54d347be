use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

type FrameCallback = Closure<dyn FnMut(f64)>;

struct LoopState {
    callback: RefCell<Option<FrameCallback>>,
    pending: Cell<Option<i32>>,
}

impl LoopState {
    fn arm(&self) {
        if self.pending.get().is_some() {
            return;
        }
        let Some(window) = web::window() else {
            return;
        };
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => self.pending.set(Some(id)),
            Err(e) => log::warn!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }

    fn cancel(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(window) = web::window() {
                _ = window.cancel_animation_frame(id);
            }
        }
    }
}

/// One persistent `requestAnimationFrame` callback, re-armed after every
/// frame for as long as `on_frame` returns `true`.
///
/// Must not be dropped from inside its own callback.
pub struct FrameLoop {
    state: Rc<LoopState>,
}

impl FrameLoop {
    pub fn new(mut on_frame: impl FnMut(f64) -> bool + 'static) -> Self {
        let state = Rc::new(LoopState {
            callback: RefCell::new(None),
            pending: Cell::new(None),
        });
        let weak: Weak<LoopState> = Rc::downgrade(&state);
        let callback = Closure::wrap(Box::new(move |timestamp: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            state.pending.set(None);
            if on_frame(timestamp) {
                state.arm();
            }
        }) as Box<dyn FnMut(f64)>);
        *state.callback.borrow_mut() = Some(callback);
        Self { state }
    }

    /// Schedule the next frame unless one is already pending.
    pub fn arm(&self) {
        self.state.arm();
    }

    pub fn cancel(&self) {
        self.state.cancel();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.state.cancel();
        self.state.callback.borrow_mut().take();
    }
}
