//! Browser attachment of the grid effect
//!
//! JavaScript API (the host is the only way to build an effect):
//! - `new GridHost()`, `replace(options)`: owner handle keeping one live effect
//! - `destroy()`, `setInteractive(bool)`, `isLive()`, `isInteractive()`,
//!   `activatedCount()`, `pointCount()`
//! - `mountDefault()`: host mounted with the page defaults

mod dom;
mod frame_loop;
mod listeners;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent};

use crate::core::{EffectSlot, GridConfig, GridEngine, GridError, Rollback, Teardown};
use crate::time::now_millis;
use dom::CanvasSurface;
use frame_loop::FrameLoop;
use listeners::WindowListener;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();
}

impl From<GridError> for JsValue {
    fn from(e: GridError) -> Self {
        js_sys::Error::new(&e.to_string()).into()
    }
}

pub(crate) fn js_error(e: JsValue) -> GridError {
    GridError::Js(format!("{e:?}"))
}

/// Split the options object into the config and the optional canvas
fn parse_options(options: &JsValue) -> Result<(GridConfig, Option<HtmlCanvasElement>), GridError> {
    if options.is_undefined() || options.is_null() {
        return Ok((GridConfig::default(), None));
    }

    let canvas = js_sys::Reflect::get(options, &JsValue::from_str("canvas"))
        .ok()
        .and_then(|v| v.dyn_into::<HtmlCanvasElement>().ok());

    let json: String = js_sys::JSON::stringify(options)
        .map_err(|e| GridError::InvalidConfig(format!("{e:?}")))?
        .into();
    let config = GridConfig::from_json(&json)?;

    Ok((config, canvas))
}

/// Everything a mounted effect holds; dropped as a unit on teardown
struct Mounted {
    engine: Rc<RefCell<GridEngine>>,
    canvas: HtmlCanvasElement,
    frame_loop: FrameLoop,
    on_resize: WindowListener,
    on_pointer: WindowListener,
}

/// The grid effect bound to a canvas behind the page content.
///
/// Only built through `GridHost`, so a new one never starts while an old
/// loop or listener is still attached.
struct GridEffect {
    mounted: Option<Mounted>,
}

impl GridEffect {
    fn set_interactive(&mut self, interactive: bool) {
        if let Some(mounted) = &self.mounted {
            mounted.engine.borrow_mut().set_interactive(interactive);
        }
    }

    fn engine(&self) -> Option<std::cell::Ref<'_, GridEngine>> {
        self.mounted.as_ref().map(|m| m.engine.borrow())
    }

    fn mount(config: GridConfig, canvas: Option<HtmlCanvasElement>) -> Result<Self, GridError> {
        let window = web_sys::window().ok_or(GridError::NoWindow)?;
        let document = window.document().ok_or(GridError::NoDocument)?;

        // Taken off the page again if any later step fails
        let mut attached = Rollback::new(dom::attach(&document, canvas)?, |c: &HtmlCanvasElement| {
            c.remove()
        });
        let canvas = attached.get().clone();
        let ctx = dom::context_2d(&canvas)?;

        let viewport = dom::fit_to_window(&window, &canvas);
        let margin = dom::header_height(&document, &config.top_margin_selector);
        let engine = Rc::new(RefCell::new(GridEngine::new(config, viewport, margin, now_millis())));

        // Resize - re-measure header, resize canvas, rebuild the lattice
        let on_resize = {
            let engine = engine.clone();
            let window_cb = window.clone();
            let canvas = canvas.clone();
            let document = document.clone();
            WindowListener::attach(&window, "resize", move |_| {
                let viewport = dom::fit_to_window(&window_cb, &canvas);
                let margin =
                    dom::header_height(&document, &engine.borrow().config().top_margin_selector);
                engine.borrow_mut().resize(viewport, margin);
            })?
        };

        // Pointer movement - activate points under the brush
        let on_pointer = {
            let engine = engine.clone();
            WindowListener::attach(&window, "mousemove", move |event| {
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    engine
                        .borrow_mut()
                        .pointer_moved(event.client_x() as f64, event.client_y() as f64);
                }
            })?
        };

        let frame_loop = {
            let engine = engine.clone();
            let mut surface = CanvasSurface::new(ctx);
            FrameLoop::start(&window, move |now| {
                engine.borrow_mut().render(&mut surface, now);
            })?
        };

        attached.commit();
        info!(
            width = viewport.width,
            height = viewport.height,
            margin,
            "Grid effect mounted"
        );

        Ok(Self {
            mounted: Some(Mounted {
                engine,
                canvas,
                frame_loop,
                on_resize,
                on_pointer,
            }),
        })
    }
}

impl Teardown for GridEffect {
    fn teardown(&mut self) {
        let Some(mut mounted) = self.mounted.take() else {
            return;
        };
        mounted.frame_loop.cancel();
        mounted.on_resize.detach();
        mounted.on_pointer.detach();
        mounted.canvas.remove();
        mounted.engine.borrow_mut().release();
        info!("Grid effect destroyed");
    }

    fn is_released(&self) -> bool {
        self.mounted.is_none()
    }
}

impl Drop for GridEffect {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Owner handle: at most one live effect, replaced as a whole
#[wasm_bindgen]
#[derive(Default)]
pub struct GridHost {
    slot: EffectSlot<GridEffect>,
}

#[wasm_bindgen]
impl GridHost {
    #[wasm_bindgen(constructor)]
    pub fn new() -> GridHost {
        Self::default()
    }

    /// Tear down the live effect, then mount a new one with `options`
    pub fn replace(&mut self, options: JsValue) -> Result<(), JsValue> {
        let (config, canvas) = parse_options(&options)?;
        self.slot.replace(|| GridEffect::mount(config, canvas))?;
        Ok(())
    }

    pub fn destroy(&mut self) {
        self.slot.clear();
    }

    #[wasm_bindgen(js_name = setInteractive)]
    pub fn set_interactive(&mut self, interactive: bool) {
        match self.slot.current_mut() {
            Some(effect) => effect.set_interactive(interactive),
            None => warn!("setInteractive called with no live grid effect"),
        }
    }

    #[wasm_bindgen(js_name = isLive)]
    pub fn is_live(&self) -> bool {
        self.slot.is_live()
    }

    #[wasm_bindgen(js_name = isInteractive)]
    pub fn is_interactive(&self) -> bool {
        self.slot
            .current()
            .and_then(|effect| effect.engine())
            .is_some_and(|engine| engine.is_interactive())
    }

    #[wasm_bindgen(js_name = activatedCount)]
    pub fn activated_count(&self) -> usize {
        self.slot
            .current()
            .and_then(|effect| effect.engine())
            .map_or(0, |engine| engine.activated().len())
    }

    #[wasm_bindgen(js_name = pointCount)]
    pub fn point_count(&self) -> usize {
        self.slot
            .current()
            .and_then(|effect| effect.engine())
            .map_or(0, |engine| engine.field().len())
    }
}

/// Mount the effect with the page defaults (15px spacing)
#[wasm_bindgen(js_name = mountDefault)]
pub fn mount_default() -> Result<GridHost, JsValue> {
    let mut host = GridHost::new();
    host.slot
        .replace(|| GridEffect::mount(GridConfig::page_default(), None))?;
    Ok(host)
}
