//! Property panel binding: which fields an element type exposes, how they
//! read, and how raw edits are routed back into the store.

use crate::element::{
    Element, ElementId, ElementKind, ElementPatch, FontStyle, FontWeight, SerializableColor,
    StylePatch, TextDecoration,
};
use crate::store::ElementStore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Panel groups, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelSection {
    Content,
    Geometry,
    Typography,
    Appearance,
}

impl PanelSection {
    pub fn title(&self) -> &'static str {
        match self {
            PanelSection::Content => "Content",
            PanelSection::Geometry => "Position & Size",
            PanelSection::Typography => "Typography",
            PanelSection::Appearance => "Appearance",
        }
    }
}

/// An editable property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyField {
    Content,
    X,
    Y,
    Width,
    Height,
    FontSize,
    FontFamily,
    FontWeight,
    FontStyle,
    TextDecoration,
    TextColor,
    LineHeight,
    LetterSpacing,
    BackgroundColor,
    BorderColor,
    BorderWidth,
    BorderRadius,
    Opacity,
    Rotation,
    ShadowX,
    ShadowY,
    ShadowBlur,
    ShadowColor,
}

const GEOMETRY_FIELDS: &[PropertyField] = &[
    PropertyField::X,
    PropertyField::Y,
    PropertyField::Width,
    PropertyField::Height,
];

const TYPOGRAPHY_FIELDS: &[PropertyField] = &[
    PropertyField::FontSize,
    PropertyField::FontFamily,
    PropertyField::FontWeight,
    PropertyField::FontStyle,
    PropertyField::TextDecoration,
    PropertyField::TextColor,
    PropertyField::LineHeight,
    PropertyField::LetterSpacing,
];

const APPEARANCE_FIELDS: &[PropertyField] = &[
    PropertyField::BackgroundColor,
    PropertyField::BorderColor,
    PropertyField::BorderWidth,
    PropertyField::BorderRadius,
    PropertyField::Opacity,
    PropertyField::Rotation,
    PropertyField::ShadowX,
    PropertyField::ShadowY,
    PropertyField::ShadowBlur,
    PropertyField::ShadowColor,
];

impl PropertyField {
    pub fn section(&self) -> PanelSection {
        match self {
            Self::Content => PanelSection::Content,
            Self::X | Self::Y | Self::Width | Self::Height => PanelSection::Geometry,
            Self::FontSize
            | Self::FontFamily
            | Self::FontWeight
            | Self::FontStyle
            | Self::TextDecoration
            | Self::TextColor
            | Self::LineHeight
            | Self::LetterSpacing => PanelSection::Typography,
            Self::BackgroundColor
            | Self::BorderColor
            | Self::BorderWidth
            | Self::BorderRadius
            | Self::Opacity
            | Self::Rotation
            | Self::ShadowX
            | Self::ShadowY
            | Self::ShadowBlur
            | Self::ShadowColor => PanelSection::Appearance,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Content => "Content",
            Self::X => "X",
            Self::Y => "Y",
            Self::Width => "Width",
            Self::Height => "Height",
            Self::FontSize => "Font Size",
            Self::FontFamily => "Font Family",
            Self::FontWeight => "Font Weight",
            Self::FontStyle => "Font Style",
            Self::TextDecoration => "Decoration",
            Self::TextColor => "Text Color",
            Self::LineHeight => "Line Height",
            Self::LetterSpacing => "Letter Spacing",
            Self::BackgroundColor => "Background",
            Self::BorderColor => "Border Color",
            Self::BorderWidth => "Border Width",
            Self::BorderRadius => "Border Radius",
            Self::Opacity => "Opacity",
            Self::Rotation => "Rotation",
            Self::ShadowX => "Shadow X",
            Self::ShadowY => "Shadow Y",
            Self::ShadowBlur => "Shadow Blur",
            Self::ShadowColor => "Shadow Color",
        }
    }

    /// Colors that may be cleared with an empty value.
    fn is_nullable_color(&self) -> bool {
        matches!(
            self,
            PropertyField::BackgroundColor | PropertyField::BorderColor | PropertyField::ShadowColor
        )
    }
}

impl fmt::Display for PropertyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The fields shown for an element type, in display order.
pub fn fields_for(kind: ElementKind) -> Vec<PropertyField> {
    let mut fields = Vec::new();
    if kind.has_content() {
        fields.push(PropertyField::Content);
    }
    fields.extend_from_slice(GEOMETRY_FIELDS);
    if kind.has_typography() {
        fields.extend_from_slice(TYPOGRAPHY_FIELDS);
    } else if kind == ElementKind::Button {
        fields.push(PropertyField::TextColor);
    }
    fields.extend_from_slice(APPEARANCE_FIELDS);
    fields
}

/// Current value of a field, formatted for an input box.
pub fn read(element: &Element, field: PropertyField) -> String {
    let g = element.geometry();
    let s = &element.style;
    let color = |c: Option<SerializableColor>| c.map(|c| c.to_hex()).unwrap_or_default();
    match field {
        PropertyField::Content => element.content.clone(),
        PropertyField::X => format_number(g.x),
        PropertyField::Y => format_number(g.y),
        PropertyField::Width => format_number(g.width),
        PropertyField::Height => format_number(g.height),
        PropertyField::FontSize => format_number(s.font_size),
        PropertyField::FontFamily => s.font_family.clone(),
        PropertyField::FontWeight => format!("{:?}", s.font_weight).to_lowercase(),
        PropertyField::FontStyle => format!("{:?}", s.font_style).to_lowercase(),
        PropertyField::TextDecoration => match s.text_decoration {
            TextDecoration::None => "none".to_string(),
            TextDecoration::Underline => "underline".to_string(),
            TextDecoration::LineThrough => "line-through".to_string(),
        },
        PropertyField::TextColor => s.color.to_hex(),
        PropertyField::LineHeight => format_number(s.line_height),
        PropertyField::LetterSpacing => format_number(s.letter_spacing),
        PropertyField::BackgroundColor => color(s.background_color),
        PropertyField::BorderColor => color(s.border_color),
        PropertyField::BorderWidth => format_number(s.border_width),
        PropertyField::BorderRadius => format_number(s.border_radius),
        PropertyField::Opacity => format_number(s.opacity),
        PropertyField::Rotation => format_number(s.rotation),
        PropertyField::ShadowX => format_number(s.shadow_x),
        PropertyField::ShadowY => format_number(s.shadow_y),
        PropertyField::ShadowBlur => format_number(s.shadow_blur),
        PropertyField::ShadowColor => color(s.shadow_color),
    }
}

fn format_number(v: f64) -> String {
    v.to_string()
}

/// One row of the panel for the current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub section: PanelSection,
    pub field: PropertyField,
    pub value: String,
}

/// Every row the panel shows for `element`.
pub fn rows(element: &Element) -> Vec<PanelRow> {
    fields_for(element.kind())
        .into_iter()
        .map(|field| PanelRow {
            section: field.section(),
            field,
            value: read(element, field),
        })
        .collect()
}

/// Outcome of a panel edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEdit {
    /// The value was committed and the element changed.
    Applied,
    /// Valid input, but nothing changed (same value or unknown element).
    Unchanged,
    /// Input was not acceptable for the field; nothing was committed.
    Rejected,
}

/// Parse `raw` for `field` and commit it through [`ElementStore::update`].
pub fn edit(store: &mut ElementStore, id: ElementId, field: PropertyField, raw: &str) -> FieldEdit {
    let Some(element) = store.get(id) else {
        return FieldEdit::Unchanged;
    };
    if !fields_for(element.kind()).contains(&field) {
        log::warn!("{} is not editable on {} elements", field, element.kind());
        return FieldEdit::Rejected;
    }

    let Some(patch) = parse_patch(field, raw) else {
        log::warn!("Rejected {:?} for {}", raw, field);
        return FieldEdit::Rejected;
    };

    if store.update(id, &patch) {
        FieldEdit::Applied
    } else {
        FieldEdit::Unchanged
    }
}


fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_color(raw: &str) -> Option<SerializableColor> {
    raw.trim().parse().ok()
}

fn parse_patch(field: PropertyField, raw: &str) -> Option<ElementPatch> {
    if field == PropertyField::Content {
        return Some(ElementPatch::new().content(raw));
    }

    let mut patch = ElementPatch::new();
    let mut style = StylePatch::new();

    if field.is_nullable_color() {
        let value = if raw.trim().is_empty() || raw.trim().eq_ignore_ascii_case("none") {
            None
        } else {
            Some(parse_color(raw)?)
        };
        match field {
            PropertyField::BackgroundColor => style.background_color = Some(value),
            PropertyField::BorderColor => style.border_color = Some(value),
            _ => style.shadow_color = Some(value),
        }
        return Some(patch.style(style));
    }

    match field {
        PropertyField::FontFamily => {
            let family = raw.trim();
            if family.is_empty() {
                return None;
            }
            style.font_family = Some(family.to_string());
        }
        PropertyField::FontWeight => style.font_weight = Some(raw.trim().parse::<FontWeight>().ok()?),
        PropertyField::FontStyle => style.font_style = Some(raw.trim().parse::<FontStyle>().ok()?),
        PropertyField::TextDecoration => {
            style.text_decoration = Some(raw.trim().parse::<TextDecoration>().ok()?)
        }
        PropertyField::TextColor => style.color = Some(parse_color(raw)?),
        numeric => {
            let v = parse_number(raw)?;
            match numeric {
                PropertyField::X => patch.x = Some(v),
                PropertyField::Y => patch.y = Some(v),
                PropertyField::Width => patch.width = Some(v),
                PropertyField::Height => patch.height = Some(v),
                PropertyField::FontSize => style.font_size = Some(v),
                PropertyField::LineHeight => style.line_height = Some(v),
                PropertyField::LetterSpacing => style.letter_spacing = Some(v),
                PropertyField::BorderWidth => style.border_width = Some(v),
                PropertyField::BorderRadius => style.border_radius = Some(v),
                PropertyField::Opacity => style.opacity = Some(v),
                PropertyField::Rotation => style.rotation = Some(v),
                PropertyField::ShadowX => style.shadow_x = Some(v),
                PropertyField::ShadowY => style.shadow_y = Some(v),
                PropertyField::ShadowBlur => style.shadow_blur = Some(v),
                _ => return None,
            }
        }
    }
    Some(patch.style(style))
}
