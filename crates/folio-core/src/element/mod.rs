//! Element definitions for the canvas.

mod color;
mod patch;
mod style;

pub use color::SerializableColor;
pub use patch::{ElementPatch, StylePatch};
pub use style::{DEFAULT_FONT_FAMILY, ElementStyle, FontStyle, FontWeight, TextDecoration};

use crate::error::EditorError;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Smallest width/height an element may have, in canvas units.
pub const MIN_ELEMENT_SIZE: f64 = 20.0;

/// Position of newly created elements.
pub const DEFAULT_POSITION: Point = Point::new(100.0, 100.0);

/// Thickness of the visible bar drawn for dividers.
pub const DIVIDER_THICKNESS: f64 = 2.0;

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ElementId {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| EditorError::InvalidValue(format!("element id '{s}'")))
    }
}

/// The closed set of element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Text,
    Shape,
    Image,
    Button,
    Divider,
    Icon,
    Video,
}

impl ElementKind {
    pub fn all() -> &'static [ElementKind] {
        &[
            ElementKind::Text,
            ElementKind::Shape,
            ElementKind::Image,
            ElementKind::Button,
            ElementKind::Divider,
            ElementKind::Icon,
            ElementKind::Video,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Shape => "shape",
            ElementKind::Image => "image",
            ElementKind::Button => "button",
            ElementKind::Divider => "divider",
            ElementKind::Icon => "icon",
            ElementKind::Video => "video",
        }
    }

    /// Whether double-clicking enters in-place text editing.
    pub fn is_text_editable(&self) -> bool {
        matches!(self, ElementKind::Text | ElementKind::Button)
    }

    /// Whether the full typography control set applies.
    pub fn has_typography(&self) -> bool {
        matches!(self, ElementKind::Text)
    }

    /// Whether `content` carries user-visible data.
    pub fn has_content(&self) -> bool {
        !matches!(self, ElementKind::Shape | ElementKind::Divider)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementKind {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::all()
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| EditorError::UnknownElementType(s.to_string()))
    }
}

/// Top-left anchored box in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Apply the size and position floors.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.max(0.0),
            y: self.y.max(0.0),
            width: self.width.max(MIN_ELEMENT_SIZE),
            height: self.height.max(MIN_ELEMENT_SIZE),
        }
    }

    /// Whether the floors already hold.
    pub fn is_valid(&self) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.width >= MIN_ELEMENT_SIZE
            && self.height >= MIN_ELEMENT_SIZE
    }

    /// Move by a canvas-space delta, clamped to the zero floor.
    pub fn translated(self, delta: Vec2) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..self
        }
        .clamped()
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }
}

/// A visual element placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    id: ElementId,
    #[serde(rename = "type")]
    kind: ElementKind,
    #[serde(default)]
    pub content: String,
    geometry: Geometry,
    #[serde(default)]
    pub style: ElementStyle,
}

impl Element {
    /// Create an element of the given type with its default content, size and style.
    pub fn create(kind: ElementKind) -> Self {
        let mut style = ElementStyle::default();
        let (width, height, content) = match kind {
            ElementKind::Text => (200.0, 40.0, "New Text"),
            ElementKind::Shape => {
                style.background_color = Some(SerializableColor::rgb(0x3b, 0x82, 0xf6));
                (100.0, 100.0, "")
            }
            ElementKind::Image => (200.0, 150.0, ""),
            ElementKind::Button => {
                style.background_color = Some(SerializableColor::rgb(0x3b, 0x82, 0xf6));
                style.color = SerializableColor::white();
                style.border_radius = 8.0;
                style.font_weight = FontWeight::Medium;
                (120.0, 40.0, "Click Me")
            }
            ElementKind::Divider => {
                style.background_color = Some(SerializableColor::rgb(0xd1, 0xd5, 0xdb));
                // Hit box respects the size floor; the drawn bar is DIVIDER_THICKNESS.
                (200.0, MIN_ELEMENT_SIZE, "")
            }
            ElementKind::Icon => {
                style.font_size = 32.0;
                (48.0, 48.0, "\u{2605}")
            }
            ElementKind::Video => {
                style.background_color = Some(SerializableColor::black());
                (300.0, 200.0, "")
            }
        };

        Self {
            id: ElementId::new(),
            kind,
            content: content.to_string(),
            geometry: Geometry::new(DEFAULT_POSITION.x, DEFAULT_POSITION.y, width, height),
            style,
        }
    }

    /// Create an element from a type name; unknown names are rejected.
    pub fn create_named(kind: &str) -> Result<Self, EditorError> {
        Ok(Self::create(kind.parse()?))
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry.clamped();
        self
    }

    pub fn with_style(mut self, style: ElementStyle) -> Self {
        self.style = style;
        self.style.sanitize();
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Replace the geometry, applying the floors.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry.clamped();
    }

    /// Bounding box in canvas coordinates (unrotated).
    pub fn bounds(&self) -> Rect {
        self.geometry.rect()
    }

    /// Check if a canvas-space point hits this element, honouring rotation.
    pub fn hit_test(&self, point: Point) -> bool {
        let center = self.geometry.center();
        let angle = -self.style.rotation.to_radians();
        let (sin, cos) = angle.sin_cos();
        let dx = point.x - center.x;
        let dy = point.y - center.y;
        let local = Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos);
        let rect = self.bounds();
        local.x >= rect.x0 && local.x <= rect.x1 && local.y >= rect.y0 && local.y <= rect.y1
    }

    /// Clone with a fresh id and the geometry shifted by `offset`.
    pub fn duplicated(&self, offset: Vec2) -> Self {
        let mut copy = self.clone();
        copy.id = ElementId::new();
        copy.geometry = self.geometry.translated(offset);
        copy
    }

    /// Merge the present fields of `patch` into this element.
    /// Returns true if anything changed.
    pub fn apply(&mut self, patch: &ElementPatch) -> bool {
        let before = self.clone();
        if let Some(content) = &patch.content {
            self.content.clone_from(content);
        }
        let mut geometry = self.geometry;
        let finite = |v: Option<f64>| v.filter(|v| v.is_finite());
        if let Some(x) = finite(patch.x) {
            geometry.x = x;
        }
        if let Some(y) = finite(patch.y) {
            geometry.y = y;
        }
        if let Some(width) = finite(patch.width) {
            geometry.width = width;
        }
        if let Some(height) = finite(patch.height) {
            geometry.height = height;
        }
        self.geometry = geometry.clamped();
        patch.style.apply_to(&mut self.style);
        self.style.sanitize();
        *self != before
    }

    /// Restore the data invariants (used on ingest of external data).
    pub fn sanitize(&mut self) {
        self.geometry = self.geometry.clamped();
        self.style.sanitize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_defaults() {
        let el = Element::create(ElementKind::Text);
        let g = el.geometry();
        assert!((g.x - 100.0).abs() < f64::EPSILON);
        assert!((g.y - 100.0).abs() < f64::EPSILON);
        assert!((g.width - 200.0).abs() < f64::EPSILON);
        assert!((g.height - 40.0).abs() < f64::EPSILON);
        assert_eq!(el.content, "New Text");
    }

    #[test]
    fn test_button_defaults() {
        let el = Element::create(ElementKind::Button);
        assert_eq!(el.style.color, SerializableColor::white());
        assert!(el.style.border_radius > 0.0);
        assert!(el.style.background_color.is_some());
    }

    #[test]
    fn test_all_defaults_respect_floors() {
        for &kind in ElementKind::all() {
            let el = Element::create(kind);
            assert!(el.geometry().is_valid(), "{kind} violates floors");
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = Element::create_named("carousel").unwrap_err();
        assert!(matches!(err, EditorError::UnknownElementType(name) if name == "carousel"));
        assert_eq!(Element::create_named("icon").unwrap().kind(), ElementKind::Icon);
    }

    #[test]
    fn test_geometry_clamp() {
        let g = Geometry::new(-5.0, 3.0, 15.0, 400.0).clamped();
        assert!(g.x.abs() < f64::EPSILON);
        assert!((g.y - 3.0).abs() < f64::EPSILON);
        assert!((g.width - MIN_ELEMENT_SIZE).abs() < f64::EPSILON);
        assert!((g.height - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_unrotated() {
        let el = Element::create(ElementKind::Shape);
        assert!(el.hit_test(Point::new(150.0, 150.0)));
        assert!(!el.hit_test(Point::new(250.0, 150.0)));
    }

    #[test]
    fn test_hit_test_rotated() {
        // 200x40 bar rotated 90deg becomes a 40x200 bar around the same center.
        let mut el = Element::create(ElementKind::Text);
        el.style.rotation = 90.0;
        let center = el.geometry().center();
        assert!(el.hit_test(Point::new(center.x, center.y + 80.0)));
        assert!(!el.hit_test(Point::new(center.x + 80.0, center.y)));
    }

    #[test]
    fn test_duplicated_offsets_and_changes_id() {
        let el = Element::create(ElementKind::Button)
            .with_geometry(Geometry::new(80.0, 350.0, 120.0, 40.0));
        let copy = el.duplicated(Vec2::new(20.0, 20.0));
        assert_ne!(copy.id(), el.id());
        assert_eq!(copy.content, el.content);
        assert_eq!(copy.style, el.style);
        assert!((copy.geometry().x - 100.0).abs() < f64::EPSILON);
        assert!((copy.geometry().y - 370.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_ignores_non_finite() {
        let mut el = Element::create(ElementKind::Shape);
        let changed = el.apply(&ElementPatch::new().x(f64::NAN).width(f64::INFINITY));
        assert!(!changed);
        assert!((el.geometry().x - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serialized_shape() {
        let el = Element::create(ElementKind::Text);
        let value = serde_json::to_value(&el).unwrap();
        assert_eq!(value["type"], "text");
        assert_eq!(value["geometry"]["width"], 200.0);
        assert_eq!(value["style"]["fontSize"], 16.0);
        assert_eq!(value["id"], el.id().to_string());
    }
}
