//! Drawing surface abstraction
//!
//! The engine only needs four primitives. The browser implements them on
//! `CanvasRenderingContext2d`; the headless driver and the tests record them.

/// What the draw step issues each frame
pub trait Surface {
    /// Clear the whole drawing area
    fn clear(&mut self, width: u32, height: u32);

    /// Toggle image smoothing (anti-aliasing of scaled content)
    fn set_smoothing(&mut self, enabled: bool);

    /// Filled circle centred on `(x, y)`
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str);
}

/// A single recorded fill
#[derive(Clone, Debug, PartialEq)]
pub struct Dot {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: String,
}

/// In-memory surface keeping the last frame's dots
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub dots: Vec<Dot>,
    pub clears: u64,
    pub smoothing: Option<bool>,
    pub size: (u32, u32),
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dots of the last frame filled with `color`
    pub fn count_color(&self, color: &str) -> usize {
        self.dots.iter().filter(|d| d.color == color).count()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: u32, height: u32) {
        self.dots.clear();
        self.clears += 1;
        self.size = (width, height);
    }

    fn set_smoothing(&mut self, enabled: bool) {
        self.smoothing = Some(enabled);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
        self.dots.push(Dot {
            x,
            y,
            radius,
            color: color.to_string(),
        });
    }
}
