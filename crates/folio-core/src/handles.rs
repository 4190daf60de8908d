//! Resize handles and anchor-preserving resize math.

use crate::element::{Element, Geometry, MIN_ELEMENT_SIZE};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Handle size in screen pixels.
pub const HANDLE_SIZE: f64 = 10.0;
/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 8.0;

/// The eight resize directions, named by compass point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleKind {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl HandleKind {
    /// All handles, clockwise from the top edge.
    pub fn all() -> &'static [HandleKind] {
        &[
            HandleKind::N,
            HandleKind::NE,
            HandleKind::E,
            HandleKind::SE,
            HandleKind::S,
            HandleKind::SW,
            HandleKind::W,
            HandleKind::NW,
        ]
    }

    /// Whether dragging moves the top edge.
    pub fn moves_top(&self) -> bool {
        matches!(self, HandleKind::N | HandleKind::NE | HandleKind::NW)
    }

    /// Whether dragging moves the bottom edge.
    pub fn moves_bottom(&self) -> bool {
        matches!(self, HandleKind::S | HandleKind::SE | HandleKind::SW)
    }

    /// Whether dragging moves the left edge.
    pub fn moves_left(&self) -> bool {
        matches!(self, HandleKind::W | HandleKind::NW | HandleKind::SW)
    }

    /// Whether dragging moves the right edge.
    pub fn moves_right(&self) -> bool {
        matches!(self, HandleKind::E | HandleKind::NE | HandleKind::SE)
    }

    /// Unit position on the element box: (0,0) = top-left, (1,1) = bottom-right.
    fn anchor(&self) -> (f64, f64) {
        match self {
            HandleKind::N => (0.5, 0.0),
            HandleKind::NE => (1.0, 0.0),
            HandleKind::E => (1.0, 0.5),
            HandleKind::SE => (1.0, 1.0),
            HandleKind::S => (0.5, 1.0),
            HandleKind::SW => (0.0, 1.0),
            HandleKind::W => (0.0, 0.5),
            HandleKind::NW => (0.0, 0.0),
        }
    }

    /// CSS cursor name for hosts that show one.
    pub fn cursor(&self) -> &'static str {
        match self {
            HandleKind::N | HandleKind::S => "ns-resize",
            HandleKind::E | HandleKind::W => "ew-resize",
            HandleKind::NE | HandleKind::SW => "nesw-resize",
            HandleKind::NW | HandleKind::SE => "nwse-resize",
        }
    }
}

/// A resize handle with its position in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a canvas-space point hits this handle.
    /// `tolerance` should already be divided by the zoom.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point.x - self.position.x).abs() <= tolerance
            && (point.y - self.position.y).abs() <= tolerance
    }
}

/// Get the eight resize handles for an element, following its rotation.
pub fn get_handles(element: &Element) -> Vec<Handle> {
    let g = element.geometry();
    let center = g.center();
    let (sin, cos) = element.style.rotation.to_radians().sin_cos();

    HandleKind::all()
        .iter()
        .map(|&kind| {
            let (u, v) = kind.anchor();
            let dx = g.x + u * g.width - center.x;
            let dy = g.y + v * g.height - center.y;
            let position = Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos);
            Handle::new(position, kind)
        })
        .collect()
}

/// Find which handle (if any) is hit at the given canvas point.
///
/// The tolerance is capped at a quarter of the element's shorter side so the
/// middle of a small element, or of any element when zoomed out, stays a drag
/// target.
pub fn hit_test_handles(element: &Element, point: Point, tolerance: f64) -> Option<HandleKind> {
    let g = element.geometry();
    let tolerance = tolerance.min(g.width.min(g.height) / 4.0);
    get_handles(element)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

/// Resize `start` by a canvas-space delta dragged on `handle`.
///
/// The edges the handle does not move stay where they were: dragging a
/// top/left handle recomputes `y`/`x` from the floored dimension, so the
/// bottom/right edge never drifts. Sizes floor at [`MIN_ELEMENT_SIZE`] and
/// positions at zero.
pub fn apply_resize(start: Geometry, handle: HandleKind, delta: Vec2) -> Geometry {
    let (x, width) = resize_axis(
        start.x,
        start.width,
        delta.x,
        handle.moves_left(),
        handle.moves_right(),
    );
    let (y, height) = resize_axis(
        start.y,
        start.height,
        delta.y,
        handle.moves_top(),
        handle.moves_bottom(),
    );
    Geometry::new(x, y, width, height)
}

/// One axis of the resize: returns the new (position, size).
fn resize_axis(pos: f64, size: f64, delta: f64, moves_start: bool, moves_end: bool) -> (f64, f64) {
    if moves_start {
        let far_edge = pos + size;
        let mut new_size = (size - delta).max(MIN_ELEMENT_SIZE);
        let mut new_pos = far_edge - new_size;
        if new_pos < 0.0 {
            // Pinned at the zero floor: shrink instead of pushing the far edge.
            new_pos = 0.0;
            new_size = far_edge.max(MIN_ELEMENT_SIZE);
        }
        (new_pos, new_size)
    } else if moves_end {
        (pos.max(0.0), (size + delta).max(MIN_ELEMENT_SIZE))
    } else {
        (pos.max(0.0), size.max(MIN_ELEMENT_SIZE))
    }
}
