//! Visual style attributes for elements.

use super::color::SerializableColor;
use crate::error::EditorError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Font weight options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Light,
    #[default]
    Normal,
    Medium,
    Semibold,
    Bold,
}

impl FontWeight {
    /// CSS numeric weight.
    pub fn numeric(&self) -> u16 {
        match self {
            FontWeight::Light => 300,
            FontWeight::Normal => 400,
            FontWeight::Medium => 500,
            FontWeight::Semibold => 600,
            FontWeight::Bold => 700,
        }
    }

    /// Get all available font weights.
    pub fn all() -> &'static [FontWeight] {
        &[
            FontWeight::Light,
            FontWeight::Normal,
            FontWeight::Medium,
            FontWeight::Semibold,
            FontWeight::Bold,
        ]
    }
}

impl FromStr for FontWeight {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" | "300" => Ok(FontWeight::Light),
            "normal" | "regular" | "400" => Ok(FontWeight::Normal),
            "medium" | "500" => Ok(FontWeight::Medium),
            "semibold" | "600" => Ok(FontWeight::Semibold),
            "bold" | "700" => Ok(FontWeight::Bold),
            other => Err(EditorError::InvalidValue(format!("font weight '{other}'"))),
        }
    }
}

/// Font slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FromStr for FontStyle {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(FontStyle::Normal),
            "italic" => Ok(FontStyle::Italic),
            other => Err(EditorError::InvalidValue(format!("font style '{other}'"))),
        }
    }
}

/// Text decoration line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    LineThrough,
}

impl FromStr for TextDecoration {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(TextDecoration::None),
            "underline" => Ok(TextDecoration::Underline),
            "line-through" | "strikethrough" => Ok(TextDecoration::LineThrough),
            other => Err(EditorError::InvalidValue(format!("text decoration '{other}'"))),
        }
    }
}

/// Default font family for new elements.
pub const DEFAULT_FONT_FAMILY: &str = "Inter";

/// Style properties for elements.
///
/// Every attribute is optional in the data form; missing attributes take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ElementStyle {
    pub font_size: f64,
    pub font_family: String,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
    pub text_decoration: TextDecoration,
    /// Text color.
    pub color: SerializableColor,
    /// Fill (None = transparent).
    pub background_color: Option<SerializableColor>,
    pub border_color: Option<SerializableColor>,
    pub border_width: f64,
    pub border_radius: f64,
    /// Line height as a multiple of the font size.
    pub line_height: f64,
    pub letter_spacing: f64,
    /// 0.0 = fully transparent, 1.0 = fully opaque.
    pub opacity: f64,
    /// Rotation in degrees around the element center.
    pub rotation: f64,
    pub shadow_x: f64,
    pub shadow_y: f64,
    pub shadow_blur: f64,
    pub shadow_color: Option<SerializableColor>,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_weight: FontWeight::default(),
            font_style: FontStyle::default(),
            text_decoration: TextDecoration::default(),
            color: SerializableColor::rgb(0x1f, 0x29, 0x37),
            background_color: None,
            border_color: None,
            border_width: 0.0,
            border_radius: 0.0,
            line_height: 1.5,
            letter_spacing: 0.0,
            opacity: 1.0,
            rotation: 0.0,
            shadow_x: 0.0,
            shadow_y: 0.0,
            shadow_blur: 0.0,
            shadow_color: None,
        }
    }
}

impl ElementStyle {
    /// Clamp every bounded attribute into its valid range.
    ///
    /// Non-finite values fall back to the default for that attribute.
    pub fn sanitize(&mut self) {
        let defaults = ElementStyle::default();
        let finite_or = |v: f64, d: f64| if v.is_finite() { v } else { d };

        self.font_size = finite_or(self.font_size, defaults.font_size).max(1.0);
        self.line_height = finite_or(self.line_height, defaults.line_height).max(0.0);
        self.letter_spacing = finite_or(self.letter_spacing, defaults.letter_spacing);
        self.border_width = finite_or(self.border_width, 0.0).max(0.0);
        self.border_radius = finite_or(self.border_radius, 0.0).max(0.0);
        self.opacity = finite_or(self.opacity, 1.0).clamp(0.0, 1.0);
        self.rotation = finite_or(self.rotation, 0.0);
        self.shadow_x = finite_or(self.shadow_x, 0.0);
        self.shadow_y = finite_or(self.shadow_y, 0.0);
        self.shadow_blur = finite_or(self.shadow_blur, 0.0).max(0.0);
    }

    /// Whether a drop shadow should be drawn.
    pub fn has_shadow(&self) -> bool {
        self.shadow_color.is_some_and(|c| c.a > 0)
            && (self.shadow_x != 0.0 || self.shadow_y != 0.0 || self.shadow_blur > 0.0)
    }

    /// Whether a border should be drawn.
    pub fn has_border(&self) -> bool {
        self.border_width > 0.0 && self.border_color.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_clamps_ranges() {
        let mut style = ElementStyle {
            opacity: 1.7,
            border_width: -3.0,
            border_radius: -1.0,
            shadow_blur: -4.0,
            rotation: 725.0,
            ..Default::default()
        };
        style.sanitize();
        assert!((style.opacity - 1.0).abs() < f64::EPSILON);
        assert!(style.border_width.abs() < f64::EPSILON);
        assert!(style.border_radius.abs() < f64::EPSILON);
        assert!(style.shadow_blur.abs() < f64::EPSILON);
        // Rotation is unbounded
        assert!((style.rotation - 725.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sanitize_replaces_nan() {
        let mut style = ElementStyle {
            opacity: f64::NAN,
            ..Default::default()
        };
        style.sanitize();
        assert!((style.opacity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let style: ElementStyle = serde_json::from_str(r##"{"color":"#ffffff"}"##).unwrap();
        assert_eq!(style.color, SerializableColor::white());
        assert!((style.font_size - 16.0).abs() < f64::EPSILON);
        assert!((style.opacity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_font_weight_parse() {
        assert_eq!("bold".parse::<FontWeight>().unwrap(), FontWeight::Bold);
        assert_eq!("600".parse::<FontWeight>().unwrap(), FontWeight::Semibold);
        assert!("heavy-ish".parse::<FontWeight>().is_err());
    }
}
