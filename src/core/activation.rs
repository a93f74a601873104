//! Pointer tracking and brush activation

use std::collections::HashSet;

use tracing::trace;

use super::lattice::{PointField, PointId};

/// Current and previous pointer position in viewport space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub prev_x: f64,
    pub prev_y: f64,
}

impl PointerState {
    /// Record a new position, keeping one step of history
    pub fn update(&mut self, x: f64, y: f64) {
        self.prev_x = self.x;
        self.prev_y = self.y;
        self.x = x;
        self.y = y;
    }
}

/// Ids of the points currently highlighted
#[derive(Clone, Debug, Default)]
pub struct ActivatedSet {
    ids: HashSet<PointId>,
}

impl ActivatedSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn contains(&self, id: &PointId) -> bool {
        self.ids.contains(id)
    }

    /// Returns true if the id was not present before
    #[inline]
    pub fn insert(&mut self, id: PointId) -> bool {
        self.ids.insert(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointId> {
        self.ids.iter()
    }
}

/// Activate every point strictly within `radius` of `(x, y)`.
///
/// Positions above `margin` hit the reserved header and activate nothing.
/// Returns the number of newly activated points.
pub fn activate_brush(
    field: &PointField,
    activated: &mut ActivatedSet,
    x: f64,
    y: f64,
    radius: f64,
    margin: u32,
) -> usize {
    if y < margin as f64 {
        return 0;
    }

    let mut added = 0;
    for point in field {
        if point.distance_to(x, y) < radius && activated.insert(point.id) {
            added += 1;
        }
    }

    if added > 0 {
        trace!(x, y, added, total = activated.len(), "Brush activated points");
    }
    added
}
