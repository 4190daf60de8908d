//! Renderer trait abstraction.

use folio_core::{CanvasConfig, CanvasTransform, Editor, ElementId, ElementStore, SerializableColor};
use kurbo::Size;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid viewport: {0}x{1}")]
    InvalidViewport(f64, f64),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// Elements to draw, back to front, plus the selection.
    pub store: &'a ElementStore,
    /// View transform (canvas -> screen).
    pub transform: &'a CanvasTransform,
    /// Viewport size in screen pixels.
    pub viewport_size: Size,
    /// Page background: a color or a gradient expression.
    pub background: String,
    /// Selection outline and handle color.
    pub selection_color: Color,
    /// Draw the selection outline and resize handles.
    pub show_selection: bool,
    /// Resize handle size in screen pixels.
    pub handle_size: f64,
    /// Element whose text is being edited in place.
    pub editing: Option<ElementId>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(store: &'a ElementStore, transform: &'a CanvasTransform, viewport_size: Size) -> Self {
        Self {
            store,
            transform,
            viewport_size,
            background: CanvasConfig::default().background,
            selection_color: Color::from_rgba8(59, 130, 246, 255),
            show_selection: true,
            handle_size: folio_core::handles::HANDLE_SIZE,
            editing: None,
        }
    }

    /// Context for the editor's current view.
    pub fn from_editor(editor: &'a Editor) -> Self {
        Self::new(&editor.store, &editor.transform, editor.viewport_size)
            .with_background(&editor.config.background)
            .with_handle_size(editor.settings().handle_size)
            .with_editing(editor.interaction().editing_element())
    }

    /// Set the page background.
    pub fn with_background(mut self, background: &str) -> Self {
        self.background = background.to_string();
        self
    }

    /// Hide or show selection chrome (exports hide it).
    pub fn with_selection(mut self, show: bool) -> Self {
        self.show_selection = show;
        self
    }

    pub fn with_handle_size(mut self, size: f64) -> Self {
        self.handle_size = size;
        self
    }

    pub fn with_editing(mut self, editing: Option<ElementId>) -> Self {
        self.editing = editing;
        self
    }

    /// Solid background color, if the background is not a gradient.
    pub fn background_color(&self) -> Option<Color> {
        self.background
            .parse::<SerializableColor>()
            .ok()
            .map(Color::from)
    }

    pub(crate) fn validate(&self) -> RenderResult<()> {
        let Size { width, height } = self.viewport_size;
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(RenderError::InvalidViewport(width, height));
        }
        Ok(())
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Build the output for one frame.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color().unwrap_or(Color::WHITE)
    }
}
