//! Compositor: turns the ordered element list and the view transform into a
//! backend-neutral display list in screen space.
//!
//! Rotation, opacity, shadow and border are visual attributes of the display
//! items only. Nothing here writes back to the store.

use crate::renderer::{RenderContext, RenderResult};
use folio_core::element::{DIVIDER_THICKNESS, FontStyle, FontWeight, TextDecoration};
use folio_core::handles::get_handles;
use folio_core::{Element, ElementId, ElementKind, HandleKind};
use kurbo::{Point, Rect, Size, Vec2};
use peniko::Color;

/// Drop shadow of an element, in screen units.
#[derive(Debug, Clone, Copy)]
pub struct Shadow {
    pub offset: Vec2,
    pub blur: f64,
    pub color: Color,
}

/// Border stroke, in screen units.
#[derive(Debug, Clone, Copy)]
pub struct Border {
    pub width: f64,
    pub color: Color,
}

/// Text run drawn inside an element box.
#[derive(Debug, Clone)]
pub struct TextRun {
    pub text: String,
    /// Font size in screen pixels.
    pub font_size: f64,
    pub font_family: String,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub decoration: TextDecoration,
    pub color: Color,
    pub line_height: f64,
    /// Letter spacing in screen pixels.
    pub letter_spacing: f64,
    /// Center the run in the box (buttons and icons).
    pub centered: bool,
}

/// What fills an element box besides its background.
#[derive(Debug, Clone)]
pub enum Body {
    Empty,
    Text(TextRun),
    /// Image source (data URI or URL); empty means placeholder.
    Image(String),
    /// Video source; empty means placeholder.
    Video(String),
}

/// One element, ready to draw.
#[derive(Debug, Clone)]
pub struct ElementVisual {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Unrotated box in screen space.
    pub rect: Rect,
    /// Rotation in degrees around the box center.
    pub rotation: f64,
    pub opacity: f64,
    pub fill: Option<Color>,
    pub corner_radius: f64,
    pub border: Option<Border>,
    pub shadow: Option<Shadow>,
    pub body: Body,
}

impl ElementVisual {
    pub fn center(&self) -> Point {
        self.rect.center()
    }
}

/// A drawing command.
#[derive(Debug, Clone)]
pub enum DisplayItem {
    Element(ElementVisual),
    /// Outline around the selected element.
    SelectionOutline {
        rect: Rect,
        rotation: f64,
        color: Color,
    },
    /// A square resize handle centered on `center`.
    Handle {
        center: Point,
        size: f64,
        kind: HandleKind,
        color: Color,
    },
}

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone)]
pub struct DisplayList {
    pub viewport: Size,
    pub background: String,
    pub items: Vec<DisplayItem>,
}

impl DisplayList {
    /// Element items only, in stacking order.
    pub fn elements(&self) -> impl Iterator<Item = &ElementVisual> {
        self.items.iter().filter_map(|item| match item {
            DisplayItem::Element(visual) => Some(visual),
            _ => None,
        })
    }

    pub fn handle_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| matches!(item, DisplayItem::Handle { .. }))
            .count()
    }
}

/// Builds display lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compositor;

impl Compositor {
    pub fn new() -> Self {
        Self
    }

    /// Compose one frame. Elements keep the store's order; the selection
    /// chrome is drawn last so it stays on top.
    pub fn compose(&self, ctx: &RenderContext) -> RenderResult<DisplayList> {
        ctx.validate()?;

        let mut items: Vec<DisplayItem> = ctx
            .store
            .iter()
            .map(|element| DisplayItem::Element(self.element_visual(element, ctx)))
            .collect();

        if ctx.show_selection {
            if let Some(selected) = ctx.store.selected() {
                self.push_selection(selected, ctx, &mut items);
            }
        }

        log::trace!("Composed {} display items", items.len());
        Ok(DisplayList {
            viewport: ctx.viewport_size,
            background: ctx.background.clone(),
            items,
        })
    }

    fn element_visual(&self, element: &Element, ctx: &RenderContext) -> ElementVisual {
        let zoom = ctx.transform.zoom();
        let style = &element.style;
        let mut rect = ctx.transform.canvas_rect_to_screen(element.bounds());

        if element.kind() == ElementKind::Divider {
            // The hit box keeps the size floor; the visible bar is thin.
            let thickness = DIVIDER_THICKNESS * zoom;
            let mid = rect.center().y;
            rect = Rect::new(rect.x0, mid - thickness / 2.0, rect.x1, mid + thickness / 2.0);
        }

        let border = style.has_border().then(|| Border {
            width: style.border_width * zoom,
            color: style.border_color.map(Color::from).unwrap_or(Color::BLACK),
        });
        let shadow = style.has_shadow().then(|| Shadow {
            offset: Vec2::new(style.shadow_x * zoom, style.shadow_y * zoom),
            blur: style.shadow_blur * zoom,
            color: style.shadow_color.map(Color::from).unwrap_or(Color::BLACK),
        });

        let editing = ctx.editing == Some(element.id());
        let body = match element.kind() {
            ElementKind::Text | ElementKind::Button | ElementKind::Icon if !editing => {
                Body::Text(TextRun {
                    text: element.content.clone(),
                    font_size: style.font_size * zoom,
                    font_family: style.font_family.clone(),
                    font_weight: style.font_weight,
                    font_style: style.font_style,
                    decoration: style.text_decoration,
                    color: Color::from(style.color),
                    line_height: style.line_height,
                    letter_spacing: style.letter_spacing * zoom,
                    centered: element.kind() != ElementKind::Text,
                })
            }
            ElementKind::Image => Body::Image(element.content.clone()),
            ElementKind::Video => Body::Video(element.content.clone()),
            // The host draws the live edit buffer in place of the text.
            _ => Body::Empty,
        };

        ElementVisual {
            id: element.id(),
            kind: element.kind(),
            rect,
            rotation: style.rotation,
            opacity: style.opacity,
            fill: style.background_color.map(Color::from),
            corner_radius: style.border_radius * zoom,
            border,
            shadow,
            body,
        }
    }

    fn push_selection(&self, element: &Element, ctx: &RenderContext, items: &mut Vec<DisplayItem>) {
        items.push(DisplayItem::SelectionOutline {
            rect: ctx.transform.canvas_rect_to_screen(element.bounds()),
            rotation: element.style.rotation,
            color: ctx.selection_color,
        });
        for handle in get_handles(element) {
            items.push(DisplayItem::Handle {
                center: ctx.transform.canvas_to_screen(handle.position),
                size: ctx.handle_size,
                kind: handle.kind,
                color: ctx.selection_color,
            });
        }
    }
}
