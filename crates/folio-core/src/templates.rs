//! Starting designs supplied by a template catalog.

use crate::config::CanvasConfig;
use crate::document::DesignSnapshot;
use crate::element::{Element, ElementKind, FontWeight, Geometry, SerializableColor};
use crate::error::{EditorError, EditorResult};

/// Source of starting designs, keyed by category.
pub trait TemplateSource {
    fn load(&self, category: &str) -> EditorResult<(Vec<Element>, CanvasConfig)>;

    /// Categories this source can load.
    fn categories(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Templates compiled into the editor.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    pub const BLANK: &'static str = "blank";
    pub const PORTFOLIO: &'static str = "portfolio";

    fn portfolio() -> (Vec<Element>, CanvasConfig) {
        let mut heading = Element::create(ElementKind::Text)
            .with_content("Jane Doe")
            .with_geometry(Geometry::new(80.0, 60.0, 480.0, 64.0));
        heading.style.font_size = 48.0;
        heading.style.font_weight = FontWeight::Bold;

        let tagline = Element::create(ElementKind::Text)
            .with_content("Designer & developer")
            .with_geometry(Geometry::new(80.0, 132.0, 480.0, 32.0));

        let divider = Element::create(ElementKind::Divider)
            .with_geometry(Geometry::new(80.0, 180.0, 640.0, 20.0));

        let hero = Element::create(ElementKind::Image)
            .with_geometry(Geometry::new(80.0, 220.0, 640.0, 360.0));

        let contact = Element::create(ElementKind::Button)
            .with_content("Get in touch")
            .with_geometry(Geometry::new(80.0, 610.0, 160.0, 48.0));

        let mut config = CanvasConfig {
            theme: "minimal".to_string(),
            footer_text: "Built with Folio".to_string(),
            ..CanvasConfig::default()
        };
        config.background = SerializableColor::rgb(0xf9, 0xfa, 0xfb).to_hex();

        (vec![heading, tagline, divider, hero, contact], config)
    }
}

impl TemplateSource for BuiltinTemplates {
    fn load(&self, category: &str) -> EditorResult<(Vec<Element>, CanvasConfig)> {
        match category {
            Self::BLANK => Ok((Vec::new(), CanvasConfig::default())),
            Self::PORTFOLIO => Ok(Self::portfolio()),
            other => Err(EditorError::TemplateNotFound(other.to_string())),
        }
    }

    fn categories(&self) -> Vec<String> {
        vec![Self::BLANK.to_string(), Self::PORTFOLIO.to_string()]
    }
}

/// Load a template as a snapshot ready for [`crate::Editor::load`].
pub fn load_template(source: &dyn TemplateSource, category: &str) -> EditorResult<DesignSnapshot> {
    let (elements, config) = source.load(category)?;
    log::info!("Loaded template '{}' ({} elements)", category, elements.len());
    Ok(DesignSnapshot::new(elements, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_template() {
        let snapshot = load_template(&BuiltinTemplates, "blank").unwrap();
        assert!(snapshot.elements.is_empty());
    }

    #[test]
    fn test_portfolio_template() {
        let snapshot = load_template(&BuiltinTemplates, "portfolio").unwrap();
        assert_eq!(snapshot.elements.len(), 5);
        assert_eq!(snapshot.elements[0].content, "Jane Doe");
        assert_eq!(snapshot.config.background, "#f9fafb");
    }

    #[test]
    fn test_unknown_template() {
        assert!(matches!(
            BuiltinTemplates.load("resume"),
            Err(EditorError::TemplateNotFound(name)) if name == "resume"
        ));
        assert_eq!(BuiltinTemplates.categories().len(), 2);
    }
}
