//! Serializable design snapshot: elements plus canvas configuration.

use crate::config::CanvasConfig;
use crate::element::Element;
use crate::error::EditorResult;
use serde::{Deserialize, Serialize};

/// Everything an external save API needs to persist a design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DesignSnapshot {
    /// Elements back to front.
    pub elements: Vec<Element>,
    pub config: CanvasConfig,
}

impl DesignSnapshot {
    pub fn new(elements: Vec<Element>, config: CanvasConfig) -> Self {
        Self { elements, config }
    }

    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot. Element data is sanitised when loaded into an editor.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    #[test]
    fn test_snapshot_round_trip() {
        let snapshot = DesignSnapshot::new(
            ElementKind::all().iter().map(|k| Element::create(*k)).collect(),
            CanvasConfig {
                theme: "dark".to_string(),
                ..CanvasConfig::default()
            },
        );
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"elements\""));
        assert_eq!(DesignSnapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_empty_object_is_blank_design() {
        let snapshot = DesignSnapshot::from_json("{}").unwrap();
        assert!(snapshot.elements.is_empty());
        assert_eq!(snapshot.config, CanvasConfig::default());
    }
}
