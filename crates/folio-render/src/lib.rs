//! Folio Render Library
//!
//! Compositor and renderer backends for the Folio canvas editor. The
//! compositor produces a backend-neutral display list; the SVG backend turns
//! it into a document for export and previews.

pub mod compositor;
mod renderer;
pub mod svg;

pub use compositor::{Body, Compositor, DisplayItem, DisplayList, ElementVisual};
pub use renderer::{RenderContext, RenderError, RenderResult, Renderer};
pub use svg::SvgRenderer;
