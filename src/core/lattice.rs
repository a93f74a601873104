//! Point lattice covering the viewport below the reserved header
//!
//! - Point / PointId: one lattice sample, identified by its coordinates
//! - Viewport: integer size of the drawing surface
//! - PointField: the whole lattice, rebuilt wholesale on every resize

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

/// Identifier of a lattice point, derived from its coordinates.
/// Displays as `"{x}-{y}"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId {
    x: u32,
    y: u32,
}

impl PointId {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

/// A single lattice point
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: u32,
    pub y: u32,
    pub id: PointId,
}

impl Point {
    fn at(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            id: PointId::new(x, y),
        }
    }

    /// Euclidean distance to a position in viewport space
    #[inline]
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        let dx = self.x as f64 - x;
        let dy = self.y as f64 - y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Viewport size in whole device pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Floor a fractional platform size (e.g. `innerWidth`) to whole pixels
    pub fn from_fractional(width: f64, height: f64) -> Self {
        Self {
            width: floor_px(width),
            height: floor_px(height),
        }
    }
}

fn floor_px(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.floor().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Regular lattice of points, row-major, top-to-bottom, left-to-right
#[derive(Clone, Debug, Default)]
pub struct PointField {
    points: Vec<Point>,
}

impl PointField {
    /// Generate the lattice for a viewport.
    ///
    /// Candidates sit at `(j * spacing, i * spacing)` for
    /// `i < ceil(height / spacing)` and `j < ceil(width / spacing)`; rows whose
    /// `y` is above `margin` are skipped.
    pub fn generate(viewport: Viewport, spacing: u32, margin: u32) -> Self {
        let spacing = spacing.max(1);
        let rows = viewport.height.div_ceil(spacing);
        let cols = viewport.width.div_ceil(spacing);

        let mut seen = HashSet::with_capacity((rows as usize) * (cols as usize));
        let mut points = Vec::with_capacity((rows as usize) * (cols as usize));

        for i in 0..rows {
            let y = i * spacing;
            if y < margin {
                continue;
            }
            for j in 0..cols {
                let point = Point::at(j * spacing, y);
                if seen.insert(point.id) {
                    points.push(point);
                }
            }
        }

        debug!(
            width = viewport.width,
            height = viewport.height,
            spacing,
            margin,
            points = points.len(),
            "Point field generated"
        );

        Self { points }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drop every point
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl<'a> IntoIterator for &'a PointField {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
