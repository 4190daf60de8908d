//! Zoom and pan mapping between screen space and canvas space.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Default lower zoom bound.
pub const MIN_ZOOM: f64 = 0.25;
/// Default upper zoom bound.
pub const MAX_ZOOM: f64 = 3.0;
/// Increment used by zoom in / zoom out.
pub const ZOOM_STEP: f64 = 0.1;

/// CanvasTransform manages the view transform for the canvas.
///
/// Screen coordinates are what the input device reports; canvas coordinates
/// are what elements store. `screen = origin + canvas * zoom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasTransform {
    /// Screen position of the canvas origin (pan).
    pub origin: Vec2,
    /// Current zoom level (1.0 = 100%).
    zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
    /// Zoom in / zoom out increment.
    pub zoom_step: f64,
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
        }
    }
}

impl CanvasTransform {
    /// Create a transform at 100% with no pan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `min_zoom..=max_zoom` is a usable zoom range.
    pub fn valid_bounds(min_zoom: f64, max_zoom: f64) -> bool {
        min_zoom.is_finite() && max_zoom.is_finite() && min_zoom > 0.0 && min_zoom <= max_zoom
    }

    /// Create a transform with custom zoom bounds. Unusable bounds (zero,
    /// negative, non-finite or inverted) fall back to the defaults.
    pub fn with_bounds(min_zoom: f64, max_zoom: f64) -> Self {
        if !Self::valid_bounds(min_zoom, max_zoom) {
            log::warn!("Ignoring zoom bounds {}..{}", min_zoom, max_zoom);
            return Self::default();
        }
        Self {
            min_zoom,
            max_zoom,
            zoom: 1.0_f64.clamp(min_zoom, max_zoom),
            ..Self::default()
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the zoom level, clamped to the bounds. Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        }
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + self.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - self.zoom_step);
    }

    /// Get the affine transform for rendering (canvas -> screen).
    pub fn transform(&self) -> Affine {
        Affine::translate(self.origin) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform for input handling (screen -> canvas).
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.origin)
    }

    /// Map a pointer delta from screen space to canvas space.
    ///
    /// Every drag and resize delta goes through here before touching geometry.
    pub fn screen_delta_to_canvas_delta(&self, delta: Vec2) -> Vec2 {
        Vec2::new(delta.x / self.zoom, delta.y / self.zoom)
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        self.transform() * canvas_point
    }

    /// Convert a canvas rect to a screen rect.
    pub fn canvas_rect_to_screen(&self, rect: Rect) -> Rect {
        let p0 = self.canvas_to_screen(Point::new(rect.x0, rect.y0));
        let p1 = self.canvas_to_screen(Point::new(rect.x1, rect.y1));
        Rect::from_points(p0, p1)
    }

    /// Pan by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.origin += delta;
    }

    /// Zoom by `factor`, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if !new_zoom.is_finite() || (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let canvas_point = self.screen_to_canvas(screen_point);
        self.zoom = new_zoom;

        // Shift the origin so canvas_point lands back on screen_point
        let new_screen = self.canvas_to_screen(canvas_point);
        self.origin += Vec2::new(screen_point.x - new_screen.x, screen_point.y - new_screen.y);
    }

    /// Reset to 100% with no pan.
    pub fn reset(&mut self) {
        self.origin = Vec2::ZERO;
        self.zoom = 1.0_f64.clamp(self.min_zoom, self.max_zoom);
    }

    /// Fit the given canvas bounds into a viewport.
    pub fn fit_to_bounds(&mut self, bounds: Rect, viewport: Size, padding: f64) {
        if bounds.is_zero_area() {
            self.reset();
            return;
        }

        let padded = Size::new(
            (viewport.width - padding * 2.0).max(1.0),
            (viewport.height - padding * 2.0).max(1.0),
        );
        let scale_x = padded.width / bounds.width();
        let scale_y = padded.height / bounds.height();
        self.zoom = scale_x.min(scale_y).clamp(self.min_zoom, self.max_zoom);

        let bounds_center = bounds.center();
        self.origin = Vec2::new(
            viewport.width / 2.0 - bounds_center.x * self.zoom,
            viewport.height / 2.0 - bounds_center.y * self.zoom,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_transform() {
        let t = CanvasTransform::new();
        assert_eq!(t.origin, Vec2::ZERO);
        assert!((t.zoom() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_delta_compensation_at_zoom_two() {
        let mut t = CanvasTransform::new();
        t.set_zoom(2.0);
        let d = t.screen_delta_to_canvas_delta(Vec2::new(40.0, 20.0));
        assert!((d.x - 20.0).abs() < f64::EPSILON);
        assert!((d.y - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_delta_ignores_pan() {
        let mut t = CanvasTransform::new();
        t.pan(Vec2::new(300.0, -50.0));
        t.set_zoom(0.5);
        let d = t.screen_delta_to_canvas_delta(Vec2::new(10.0, 10.0));
        assert!((d.x - 20.0).abs() < f64::EPSILON);
        assert!((d.y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_canvas_with_origin_and_zoom() {
        let mut t = CanvasTransform::new();
        t.origin = Vec2::new(50.0, 100.0);
        t.set_zoom(2.0);
        let p = t.screen_to_canvas(Point::new(150.0, 300.0));
        assert!((p.x - 50.0).abs() < f64::EPSILON);
        assert!((p.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut t = CanvasTransform::new();
        t.origin = Vec2::new(30.0, -20.0);
        t.set_zoom(1.5);

        let original = Point::new(123.0, 456.0);
        let back = t.canvas_to_screen(t.screen_to_canvas(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut t = CanvasTransform::new();
        t.set_zoom(0.01);
        assert!((t.zoom() - MIN_ZOOM).abs() < f64::EPSILON);
        t.set_zoom(40.0);
        assert!((t.zoom() - MAX_ZOOM).abs() < f64::EPSILON);
        t.set_zoom(f64::NAN);
        assert!((t.zoom() - MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_at_keeps_point_fixed() {
        let mut t = CanvasTransform::new();
        let anchor = Point::new(200.0, 100.0);
        let before = t.screen_to_canvas(anchor);
        t.zoom_at(anchor, 2.0);
        let after = t.screen_to_canvas(anchor);
        assert!((before.x - after.x).abs() < 1e-10);
        assert!((before.y - after.y).abs() < 1e-10);
        assert!((t.zoom() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_steps() {
        let mut t = CanvasTransform::new();
        t.zoom_in();
        assert!((t.zoom() - 1.1).abs() < 1e-10);
        t.zoom_out();
        t.zoom_out();
        assert!((t.zoom() - 0.9).abs() < 1e-10);
    }
}
