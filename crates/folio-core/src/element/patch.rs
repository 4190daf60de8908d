//! Partial updates merged into elements by the store.

use super::color::SerializableColor;
use super::style::{ElementStyle, FontStyle, FontWeight, TextDecoration};
use serde::{Deserialize, Serialize};

/// A partial update: every `Some` field replaces the element's value, every
/// `None` field leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementPatch {
    pub content: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub style: StylePatch,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    pub fn y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    pub fn position(self, x: f64, y: f64) -> Self {
        self.x(x).y(y)
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn size(self, width: f64, height: f64) -> Self {
        self.width(width).height(height)
    }

    pub fn style(mut self, style: StylePatch) -> Self {
        self.style = style;
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Partial style update.
///
/// Nullable colors use a nested option: `Some(None)` clears the color.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StylePatch {
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub text_decoration: Option<TextDecoration>,
    pub color: Option<SerializableColor>,
    pub background_color: Option<Option<SerializableColor>>,
    pub border_color: Option<Option<SerializableColor>>,
    pub border_width: Option<f64>,
    pub border_radius: Option<f64>,
    pub line_height: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub opacity: Option<f64>,
    pub rotation: Option<f64>,
    pub shadow_x: Option<f64>,
    pub shadow_y: Option<f64>,
    pub shadow_blur: Option<f64>,
    pub shadow_color: Option<Option<SerializableColor>>,
}

impl StylePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn background_color(mut self, color: Option<SerializableColor>) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    /// Merge into a style. Non-finite numbers are skipped.
    pub(crate) fn apply_to(&self, style: &mut ElementStyle) {
        fn set_num(target: &mut f64, value: Option<f64>) {
            if let Some(v) = value.filter(|v| v.is_finite()) {
                *target = v;
            }
        }
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }

        set_num(&mut style.font_size, self.font_size);
        set(&mut style.font_family, &self.font_family);
        set(&mut style.font_weight, &self.font_weight);
        set(&mut style.font_style, &self.font_style);
        set(&mut style.text_decoration, &self.text_decoration);
        set(&mut style.color, &self.color);
        set(&mut style.background_color, &self.background_color);
        set(&mut style.border_color, &self.border_color);
        set_num(&mut style.border_width, self.border_width);
        set_num(&mut style.border_radius, self.border_radius);
        set_num(&mut style.line_height, self.line_height);
        set_num(&mut style.letter_spacing, self.letter_spacing);
        set_num(&mut style.opacity, self.opacity);
        set_num(&mut style.rotation, self.rotation);
        set_num(&mut style.shadow_x, self.shadow_x);
        set_num(&mut style.shadow_y, self.shadow_y);
        set_num(&mut style.shadow_blur, self.shadow_blur);
        set(&mut style.shadow_color, &self.shadow_color);
    }
}
