//! SVG backend: serialises a display list into a standalone SVG document.

use crate::compositor::{Body, Compositor, DisplayItem, ElementVisual, TextRun};
use crate::renderer::{RenderContext, RenderResult, Renderer};
use folio_core::element::{FontStyle, TextDecoration};
use folio_core::{CanvasConfig, CanvasTransform, ElementStore};
use kurbo::{Rect, Size};
use peniko::Color;
use std::fmt::Write;

/// Margin around exported content, in canvas units.
const EXPORT_MARGIN: f64 = 40.0;

/// Renders frames as SVG markup.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    compositor: Compositor,
    document: String,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The SVG produced by the last `build_scene`.
    pub fn svg(&self) -> &str {
        &self.document
    }

    pub fn into_svg(self) -> String {
        self.document
    }

    /// Export a whole design at 100% with no selection chrome.
    pub fn export(store: &ElementStore, config: &CanvasConfig) -> RenderResult<String> {
        let transform = CanvasTransform::new();
        let extent = store.bounds().unwrap_or(Rect::ZERO);
        let size = Size::new(
            (extent.x1 + EXPORT_MARGIN).max(1.0),
            (extent.y1 + EXPORT_MARGIN).max(config.min_height).max(1.0),
        );
        let ctx = RenderContext::new(store, &transform, size)
            .with_background(&config.background)
            .with_selection(false);

        let mut renderer = Self::new();
        renderer.build_scene(&ctx)?;
        log::info!("Exported {} elements to SVG", store.len());
        Ok(renderer.into_svg())
    }
}

impl Renderer for SvgRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        let list = self.compositor.compose(ctx)?;
        let Size { width, height } = list.viewport;

        let mut out = String::new();
        let background = ctx.background_color();
        let root_style = match background {
            Some(_) => String::new(),
            // Gradient expressions only work as CSS
            None => format!(" style=\"background: {}\"", escape(&list.background)),
        };
        let _ = writeln!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\"{}>",
            num(width),
            num(height),
            num(width),
            num(height),
            root_style
        );
        if let Some(color) = background {
            let _ = writeln!(
                out,
                "  <rect width=\"100%\" height=\"100%\" {}/>",
                paint("fill", color)
            );
        }

        for (index, item) in list.items.iter().enumerate() {
            match item {
                DisplayItem::Element(visual) => write_element(&mut out, visual, index),
                DisplayItem::SelectionOutline {
                    rect,
                    rotation,
                    color,
                } => {
                    let _ = writeln!(
                        out,
                        "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"none\" {} stroke-width=\"2\"{}/>",
                        num(rect.x0),
                        num(rect.y0),
                        num(rect.width()),
                        num(rect.height()),
                        paint("stroke", *color),
                        rotate_attr(*rotation, *rect)
                    );
                }
                DisplayItem::Handle {
                    center,
                    size,
                    kind,
                    color,
                } => {
                    let _ = writeln!(
                        out,
                        "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#ffffff\" {} stroke-width=\"1\" cursor=\"{}\"/>",
                        num(center.x - size / 2.0),
                        num(center.y - size / 2.0),
                        num(*size),
                        num(*size),
                        paint("stroke", *color),
                        kind.cursor()
                    );
                }
            }
        }

        out.push_str("</svg>\n");
        self.document = out;
        Ok(())
    }
}

fn write_element(out: &mut String, visual: &ElementVisual, index: usize) {
    let rect = visual.rect;
    let _ = writeln!(
        out,
        "  <g data-id=\"{}\" data-type=\"{}\" opacity=\"{}\"{}>",
        visual.id,
        visual.kind,
        num(visual.opacity),
        rotate_attr(visual.rotation, rect)
    );

    let radius = if visual.corner_radius > 0.0 {
        format!(" rx=\"{}\"", num(visual.corner_radius))
    } else {
        String::new()
    };

    if let Some(shadow) = visual.shadow {
        let filter_id = format!("shadow-{index}");
        let _ = writeln!(
            out,
            "    <filter id=\"{}\"><feGaussianBlur stdDeviation=\"{}\"/></filter>",
            filter_id,
            num(shadow.blur / 2.0)
        );
        let _ = writeln!(
            out,
            "    <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{} {} filter=\"url(#{})\"/>",
            num(rect.x0 + shadow.offset.x),
            num(rect.y0 + shadow.offset.y),
            num(rect.width()),
            num(rect.height()),
            radius,
            paint("fill", shadow.color),
            filter_id
        );
    }

    let stroke = visual
        .border
        .map(|b| format!(" {} stroke-width=\"{}\"", paint("stroke", b.color), num(b.width)))
        .unwrap_or_default();
    if visual.fill.is_some() || !stroke.is_empty() {
        let fill = visual
            .fill
            .map(|c| paint("fill", c))
            .unwrap_or_else(|| "fill=\"none\"".to_string());
        let _ = writeln!(
            out,
            "    <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{} {}{}/>",
            num(rect.x0),
            num(rect.y0),
            num(rect.width()),
            num(rect.height()),
            radius,
            fill,
            stroke
        );
    }

    match &visual.body {
        Body::Empty => {}
        Body::Text(run) => write_text(out, run, rect),
        Body::Image(src) if !src.is_empty() => {
            let _ = writeln!(
                out,
                "    <image href=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"xMidYMid slice\"/>",
                escape(src),
                num(rect.x0),
                num(rect.y0),
                num(rect.width()),
                num(rect.height())
            );
        }
        Body::Image(_) => write_placeholder(out, rect),
        Body::Video(_) => {
            // Play triangle over the poster box
            let c = rect.center();
            let s = rect.width().min(rect.height()) / 6.0;
            let _ = writeln!(
                out,
                "    <path d=\"M{} {} L{} {} L{} {} Z\" fill=\"#ffffff\"/>",
                num(c.x - s * 0.6),
                num(c.y - s),
                num(c.x + s),
                num(c.y),
                num(c.x - s * 0.6),
                num(c.y + s)
            );
        }
    }

    out.push_str("  </g>\n");
}

fn write_placeholder(out: &mut String, rect: Rect) {
    let _ = writeln!(
        out,
        "    <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#c8c8c8\" stroke=\"#646464\"/>",
        num(rect.x0),
        num(rect.y0),
        num(rect.width()),
        num(rect.height())
    );
    let _ = writeln!(
        out,
        "    <path d=\"M{} {} L{} {} M{} {} L{} {}\" stroke=\"#969696\"/>",
        num(rect.x0),
        num(rect.y0),
        num(rect.x1),
        num(rect.y1),
        num(rect.x1),
        num(rect.y0),
        num(rect.x0),
        num(rect.y1)
    );
}

fn write_text(out: &mut String, run: &TextRun, rect: Rect) {
    let (x, anchor) = if run.centered {
        (rect.center().x, "middle")
    } else {
        (rect.x0, "start")
    };
    let line_step = run.font_size * run.line_height;
    let lines: Vec<&str> = run.text.split('\n').collect();
    let first_y = if run.centered {
        rect.center().y - line_step * (lines.len() as f64 - 1.0) / 2.0
    } else {
        rect.y0 + run.font_size
    };
    let baseline = if run.centered {
        " dominant-baseline=\"middle\""
    } else {
        ""
    };
    let decoration = match run.decoration {
        TextDecoration::None => "",
        TextDecoration::Underline => " text-decoration=\"underline\"",
        TextDecoration::LineThrough => " text-decoration=\"line-through\"",
    };
    let italic = if run.font_style == FontStyle::Italic {
        " font-style=\"italic\""
    } else {
        ""
    };
    let spacing = if run.letter_spacing != 0.0 {
        format!(" letter-spacing=\"{}\"", num(run.letter_spacing))
    } else {
        String::new()
    };

    let _ = write!(
        out,
        "    <text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\" text-anchor=\"{}\" {}{}{}{}{}>",
        num(x),
        num(first_y),
        escape(&run.font_family),
        num(run.font_size),
        run.font_weight.numeric(),
        anchor,
        paint("fill", run.color),
        baseline,
        italic,
        decoration,
        spacing
    );
    for (i, line) in lines.iter().enumerate() {
        let dy = if i == 0 { 0.0 } else { line_step };
        let _ = write!(
            out,
            "<tspan x=\"{}\" dy=\"{}\">{}</tspan>",
            num(x),
            num(dy),
            escape(line)
        );
    }
    out.push_str("</text>\n");
}

fn rotate_attr(rotation: f64, rect: Rect) -> String {
    if rotation == 0.0 {
        return String::new();
    }
    let c = rect.center();
    format!(
        " transform=\"rotate({} {} {})\"",
        num(rotation),
        num(c.x),
        num(c.y)
    )
}

/// `fill="#rrggbb"` plus an opacity attribute when translucent.
fn paint(attr: &str, color: Color) -> String {
    let rgba = color.to_rgba8();
    let mut s = format!("{}=\"#{:02x}{:02x}{:02x}\"", attr, rgba.r, rgba.g, rgba.b);
    if rgba.a < 255 {
        let _ = write!(s, " {}-opacity=\"{}\"", attr, num(f64::from(rgba.a) / 255.0));
    }
    s
}

/// Compact number formatting for attributes.
fn num(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    rounded.to_string()
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{Element, ElementKind, ElementPatch, StylePatch};

    fn render(store: &ElementStore) -> String {
        let transform = CanvasTransform::new();
        let ctx = RenderContext::new(store, &transform, Size::new(800.0, 600.0));
        let mut renderer = SvgRenderer::new();
        renderer.build_scene(&ctx).unwrap();
        renderer.into_svg()
    }

    #[test]
    fn test_svg_document_shape() {
        let mut store = ElementStore::new();
        store.add(Element::create(ElementKind::Shape));
        let svg = render(&store);
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("fill=\"#3b82f6\""));
        assert!(svg.contains("data-type=\"shape\""));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut store = ElementStore::new();
        store.add(Element::create(ElementKind::Text).with_content("Tom & <Jerry>"));
        let svg = render(&store);
        assert!(svg.contains("Tom &amp; &lt;Jerry&gt;"));
    }

    #[test]
    fn test_rotation_and_opacity() {
        let mut store = ElementStore::new();
        let id = store.add(Element::create(ElementKind::Shape));
        store.update(
            id,
            &ElementPatch::new().style(StylePatch::new().rotation(30.0).opacity(0.25)),
        );
        let svg = render(&store);
        assert!(svg.contains("rotate(30 150 150)"));
        assert!(svg.contains("opacity=\"0.25\""));
    }

    #[test]
    fn test_selection_chrome_only_when_selected() {
        let mut store = ElementStore::new();
        let id = store.add(Element::create(ElementKind::Shape));
        let plain = render(&store);
        store.select(id);
        let selected = render(&store);
        assert!(selected.matches("fill=\"#ffffff\"").count() >= 8);
        assert!(!plain.contains("fill=\"none\""));
        assert_eq!(selected.matches("cursor=\"nwse-resize\"").count(), 2);
        assert_eq!(selected.matches("cursor=\"ew-resize\"").count(), 2);
        assert!(!plain.contains("cursor="));
    }

    #[test]
    fn test_export_hides_selection() {
        let mut store = ElementStore::new();
        let id = store.add(Element::create(ElementKind::Image));
        store.select(id);
        let config = CanvasConfig {
            background: "linear-gradient(#fff, #000)".to_string(),
            ..CanvasConfig::default()
        };
        let svg = SvgRenderer::export(&store, &config).unwrap();
        assert!(svg.contains("background: linear-gradient"));
        assert!(svg.contains("#c8c8c8"));
        assert!(!svg.contains("fill=\"none\""));
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(100.0), "100");
        assert_eq!(num(0.333333), "0.33");
        assert_eq!(num(-0.0001), "0");
    }
}
