//! requestAnimationFrame loop with a single cancellation token

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use super::js_error;
use crate::core::{CancelToken, GridError};

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Calls `tick` once per display refresh until cancelled.
///
/// The closure only holds a weak reference to itself; the loop owns the
/// strong one, so dropping the loop frees the closure.
pub struct FrameLoop {
    window: Window,
    token: CancelToken,
    pending: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl FrameLoop {
    pub fn start<F>(window: &Window, mut tick: F) -> Result<Self, GridError>
    where
        F: FnMut(f64) + 'static,
    {
        let token = CancelToken::new();
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let closure = {
            let window = window.clone();
            let token = token.clone();
            let pending = pending.clone();
            let holder = Rc::downgrade(&callback);
            Closure::wrap(Box::new(move |timestamp: f64| {
                pending.set(None);
                if token.is_cancelled() {
                    return;
                }
                tick(timestamp);

                // Schedule the next frame
                let Some(holder) = holder.upgrade() else {
                    return;
                };
                let holder = holder.borrow();
                let Some(next) = holder.as_ref() else {
                    return;
                };
                match window.request_animation_frame(next.as_ref().unchecked_ref()) {
                    Ok(id) => pending.set(Some(id)),
                    Err(e) => warn!(?e, "requestAnimationFrame failed, loop stopped"),
                }
            }) as Box<dyn FnMut(f64)>)
        };

        let id = window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .map_err(js_error)?;
        pending.set(Some(id));
        *callback.borrow_mut() = Some(closure);
        debug!("Frame loop started");

        Ok(Self {
            window: window.clone(),
            token,
            pending,
            callback,
        })
    }

    /// Withdraw the pending frame and release the closure. Safe to repeat.
    pub fn cancel(&mut self) {
        if self.token.is_cancelled() {
            return;
        }
        self.token.cancel();
        if let Some(id) = self.pending.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                warn!(?e, "cancelAnimationFrame failed");
            }
        }
        self.callback.borrow_mut().take();
        debug!("Frame loop cancelled");
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
