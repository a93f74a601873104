//! Grid point-field engine
//!
//! Owns the lattice, the activated set, the pointer and the accent cycle.
//! Platform-agnostic: time comes in as `now` (milliseconds) and pixels go out
//! through a [`Surface`].

use tracing::{debug, info};

use super::activation::{activate_brush, ActivatedSet, PointerState};
use super::config::GridConfig;
use super::lattice::{PointField, Viewport};
use super::palette::{ColorCycle, ResetTimer};
use super::surface::Surface;

/// Offset that centres 1px-scale dots on pixel centres
const PIXEL_CENTER: f64 = 0.5;

/// Result of one render pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub drawn: usize,
    pub highlighted: usize,
    pub color_index: usize,
}

pub struct GridEngine {
    config: GridConfig,
    viewport: Viewport,
    margin: u32,
    field: PointField,
    activated: ActivatedSet,
    pointer: PointerState,
    cycle: ColorCycle,
    reset: ResetTimer,
    interactive: bool,
}

impl GridEngine {
    /// Build the initial field. Interactivity starts enabled.
    pub fn new(config: GridConfig, viewport: Viewport, margin: u32, now: f64) -> Self {
        let field = PointField::generate(viewport, config.spacing_px(), margin);
        let cycle = ColorCycle::neon(config.color_change_interval, now);
        let reset = ResetTimer::new(config.reset_interval, now);

        info!(
            width = viewport.width,
            height = viewport.height,
            margin,
            spacing = config.spacing_px(),
            points = field.len(),
            reset_enabled = reset.is_enabled(),
            "Grid engine created"
        );

        Self {
            config,
            viewport,
            margin,
            field,
            activated: ActivatedSet::new(),
            pointer: PointerState::default(),
            cycle,
            reset,
            interactive: true,
        }
    }

    /// Regenerate the field for a new viewport and header height.
    /// Activated ids from the previous field are dropped.
    pub fn resize(&mut self, viewport: Viewport, margin: u32) {
        self.viewport = viewport;
        self.margin = margin;
        self.field = PointField::generate(viewport, self.config.spacing_px(), margin);
        self.activated.clear();
        debug!(
            width = viewport.width,
            height = viewport.height,
            margin,
            points = self.field.len(),
            "Grid resized"
        );
    }

    /// Record the pointer and, when interactive, activate points under the brush.
    /// Returns the number of newly activated points.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> usize {
        self.pointer.update(x, y);
        if !self.interactive {
            return 0;
        }
        activate_brush(
            &self.field,
            &mut self.activated,
            x,
            y,
            self.config.brush_radius,
            self.margin,
        )
    }

    /// Turning interactivity off clears every highlight
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
        if !interactive {
            self.activated.clear();
        }
        debug!(interactive, "Interactivity changed");
    }

    /// Draw one frame
    pub fn render<S: Surface>(&mut self, surface: &mut S, now: f64) -> FrameStats {
        surface.clear(self.viewport.width, self.viewport.height);

        if self.interactive && self.reset.poll(now) {
            debug!(cleared = self.activated.len(), "Periodic reset");
            self.activated.clear();
        }

        let accent = self.cycle.current(now);
        surface.set_smoothing(false);

        let radius = self.config.point_size;
        let mut highlighted = 0;
        for point in &self.field {
            let color = if self.activated.contains(&point.id) {
                highlighted += 1;
                accent
            } else {
                self.config.point_color.as_str()
            };
            surface.fill_circle(
                point.x as f64 + PIXEL_CENTER,
                point.y as f64 + PIXEL_CENTER,
                radius,
                color,
            );
        }

        FrameStats {
            drawn: self.field.len(),
            highlighted,
            color_index: self.cycle.index(),
        }
    }

    /// Drop the point field and every highlight
    pub fn release(&mut self) {
        self.field.clear();
        self.activated.clear();
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn field(&self) -> &PointField {
        &self.field
    }

    pub fn activated(&self) -> &ActivatedSet {
        &self.activated
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lattice::PointId;
    use crate::core::surface::RecordingSurface;
    use crate::theme::{colors, NEON_PALETTE};

    fn config(spacing: f64) -> GridConfig {
        GridConfig {
            spacing,
            ..GridConfig::default()
        }
    }

    fn engine() -> GridEngine {
        GridEngine::new(config(25.0), Viewport::new(100, 100), 0, 0.0)
    }

    #[test]
    fn new_engine_builds_field() {
        let engine = engine();
        assert_eq!(engine.field().len(), 16);
        assert!(engine.activated().is_empty());
        assert!(engine.is_interactive());
    }

    #[test]
    fn render_draws_every_point_at_pixel_centres() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();

        let stats = engine.render(&mut surface, 0.0);
        assert_eq!(stats.drawn, 16);
        assert_eq!(stats.highlighted, 0);
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.size, (100, 100));
        assert_eq!(surface.smoothing, Some(false));
        assert_eq!(surface.dots.len(), 16);
        assert_eq!(surface.count_color(colors::POINT_BASE), 16);

        let first = &surface.dots[0];
        assert_eq!((first.x, first.y, first.radius), (0.5, 0.5, 1.0));
        let last = &surface.dots[15];
        assert_eq!((last.x, last.y), (75.5, 75.5));
    }

    #[test]
    fn activated_points_use_accent() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();

        assert_eq!(engine.pointer_moved(25.0, 25.0), 5);
        let stats = engine.render(&mut surface, 0.0);
        assert_eq!(stats.highlighted, 5);
        assert_eq!(surface.count_color(NEON_PALETTE[0]), 5);
        assert_eq!(surface.count_color(colors::POINT_BASE), 11);
    }

    #[test]
    fn accent_follows_wall_clock() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();
        engine.pointer_moved(0.0, 0.0);

        let stats = engine.render(&mut surface, 45_000.0);
        assert_eq!(stats.color_index, 2);
        assert_eq!(surface.count_color(NEON_PALETTE[2]), stats.highlighted);
    }

    #[test]
    fn resize_regenerates_and_clears() {
        let mut engine = engine();
        engine.pointer_moved(50.0, 50.0);
        assert!(!engine.activated().is_empty());

        engine.resize(Viewport::new(50, 100), 30);
        assert!(engine.activated().is_empty());
        assert_eq!(engine.field().len(), 4);
        assert!(engine.field().iter().all(|p| p.y >= 30 && p.x < 50));
        assert_eq!(engine.margin(), 30);
    }

    #[test]
    fn margin_blocks_activation() {
        let mut engine = GridEngine::new(config(25.0), Viewport::new(100, 100), 30, 0.0);
        assert_eq!(engine.pointer_moved(50.0, 29.0), 0);
        assert!(engine.activated().is_empty());
        // Pointer still tracked
        assert_eq!(engine.pointer().y, 29.0);
    }

    #[test]
    fn disabling_interactivity_clears_and_blocks() {
        let mut engine = engine();
        engine.pointer_moved(0.0, 0.0);
        assert!(!engine.activated().is_empty());

        engine.set_interactive(false);
        assert!(engine.activated().is_empty());
        assert_eq!(engine.pointer_moved(0.0, 0.0), 0);
        assert!(engine.activated().is_empty());
        assert_eq!(engine.pointer().x, 0.0);

        engine.set_interactive(true);
        assert!(engine.pointer_moved(0.0, 0.0) > 0);
    }

    #[test]
    fn activation_survives_pointer_leaving() {
        let mut engine = engine();
        engine.pointer_moved(0.0, 0.0);
        engine.pointer_moved(75.0, 75.0);
        assert!(engine.activated().contains(&PointId::new(0, 0)));
        assert!(engine.activated().contains(&PointId::new(75, 75)));
    }

    #[test]
    fn periodic_reset_clears_on_schedule() {
        let mut cfg = config(25.0);
        cfg.reset_interval = 1_000.0;
        let mut engine = GridEngine::new(cfg, Viewport::new(100, 100), 0, 0.0);
        let mut surface = RecordingSurface::new();

        engine.pointer_moved(0.0, 0.0);
        assert!(engine.render(&mut surface, 500.0).highlighted > 0);
        assert_eq!(engine.render(&mut surface, 1_000.0).highlighted, 0);
        assert!(engine.activated().is_empty());
    }

    #[test]
    fn reset_disabled_by_default() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();
        engine.pointer_moved(0.0, 0.0);
        assert!(engine.render(&mut surface, 1e9).highlighted > 0);
    }

    #[test]
    fn release_empties_everything() {
        let mut engine = engine();
        engine.pointer_moved(0.0, 0.0);
        engine.release();
        engine.release();
        assert!(engine.field().is_empty());
        assert!(engine.activated().is_empty());

        // Still safe to drive after release
        let mut surface = RecordingSurface::new();
        assert_eq!(engine.pointer_moved(10.0, 10.0), 0);
        assert_eq!(engine.render(&mut surface, 0.0).drawn, 0);
    }
}
