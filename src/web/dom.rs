//! DOM side of the effect: canvas attachment, sizing, header lookup, 2D surface

use std::f64::consts::TAU;

use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, Window};

use super::js_error;
use crate::core::{GridError, Surface, Viewport};

/// Id given to the effect canvas
pub const CANVAS_ID: &str = "grid-canvas";

/// Canvases left behind by earlier mounts
const STALE_CANVASES: &str = r#"canvas[id^="grid-"]"#;

/// Fixed, full-viewport, behind everything, never hit by the pointer
const CANVAS_STYLE: [(&str, &str); 7] = [
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("pointer-events", "none"),
    ("z-index", "-1"),
];

/// Use `provided` or create a canvas, strip stale ones, style it and insert it
/// as the first child of `<body>`.
pub fn attach(
    document: &Document,
    provided: Option<HtmlCanvasElement>,
) -> Result<HtmlCanvasElement, GridError> {
    let body = document.body().ok_or(GridError::NoBody)?;

    remove_stale(document, provided.as_ref())?;

    let canvas = match provided {
        Some(canvas) => canvas,
        None => document
            .create_element("canvas")
            .map_err(js_error)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| GridError::Js("created element is not a canvas".into()))?,
    };

    canvas.set_id(CANVAS_ID);
    let style = canvas.style();
    for (property, value) in CANVAS_STYLE {
        style.set_property(property, value).map_err(js_error)?;
    }

    body.insert_before(&canvas, body.first_child().as_ref())
        .map_err(js_error)?;

    Ok(canvas)
}

fn remove_stale(document: &Document, keep: Option<&HtmlCanvasElement>) -> Result<(), GridError> {
    let stale = document
        .query_selector_all(STALE_CANVASES)
        .map_err(js_error)?;

    let mut removed = 0;
    for i in 0..stale.length() {
        let Some(node) = stale.get(i) else {
            continue;
        };
        if keep.is_some_and(|k| k.is_same_node(Some(&node))) {
            continue;
        }
        if let Ok(element) = node.dyn_into::<Element>() {
            element.remove();
            removed += 1;
        }
    }
    if removed > 0 {
        debug!(removed, "Removed stale grid canvases");
    }
    Ok(())
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, GridError> {
    canvas
        .get_context("2d")
        .map_err(js_error)?
        .ok_or(GridError::ContextUnavailable)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| GridError::ContextUnavailable)
}

/// Size the canvas backing store to the window in whole pixels
pub fn fit_to_window(window: &Window, canvas: &HtmlCanvasElement) -> Viewport {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let viewport = Viewport::from_fractional(width, height);

    canvas.set_width(viewport.width);
    canvas.set_height(viewport.height);
    viewport
}

/// Rendered height of the header element, 0 when there is none
pub fn header_height(document: &Document, selector: &str) -> u32 {
    if selector.is_empty() {
        return 0;
    }
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|el| el.offset_height().max(0) as u32)
        .unwrap_or(0)
}

/// [`Surface`] over a 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    /// Fill style last set on the context; resizing the canvas resets it
    fill: String,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            fill: String::new(),
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: u32, height: u32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
        self.fill.clear();
    }

    fn set_smoothing(&mut self, enabled: bool) {
        self.ctx.set_image_smoothing_enabled(enabled);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(x, y, radius, 0.0, TAU) {
            warn!(?e, radius, "arc rejected");
            return;
        }
        if self.fill != color {
            self.ctx.set_fill_style_str(color);
            self.fill.clear();
            self.fill.push_str(color);
        }
        self.ctx.fill();
    }
}
