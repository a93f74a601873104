//! Window event listeners that detach themselves

use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, Window};

use super::js_error;
use crate::core::GridError;

/// A listener registered on the window; removed on `detach()` or drop
pub struct WindowListener {
    window: Window,
    event: &'static str,
    callback: Option<Closure<dyn FnMut(Event)>>,
}

impl WindowListener {
    pub fn attach<F>(window: &Window, event: &'static str, handler: F) -> Result<Self, GridError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        window
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(js_error)?;
        debug!(event, "Window listener attached");

        Ok(Self {
            window: window.clone(),
            event,
            callback: Some(callback),
        })
    }

    pub fn detach(&mut self) {
        let Some(callback) = self.callback.take() else {
            return;
        };
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback(self.event, callback.as_ref().unchecked_ref())
        {
            warn!(event = self.event, ?e, "Failed to remove window listener");
        }
        debug!(event = self.event, "Window listener detached");
    }
}

impl Drop for WindowListener {
    fn drop(&mut self) {
        self.detach();
    }
}
