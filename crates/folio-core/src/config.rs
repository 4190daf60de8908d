//! Per-design canvas configuration and per-session editor settings.

use crate::error::{EditorError, EditorResult};
use crate::handles::{HANDLE_HIT_TOLERANCE, HANDLE_SIZE};
use crate::store::DUPLICATE_OFFSET;
use crate::transform::{CanvasTransform, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Page-level presentation settings stored alongside the elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    pub theme: String,
    /// Solid color or gradient expression.
    pub background: String,
    /// Minimum content height in canvas units.
    pub min_height: f64,
    pub footer_text: String,
    /// Injected style override.
    pub custom_css: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            background: "#ffffff".to_string(),
            min_height: 800.0,
            footer_text: String::new(),
            custom_css: String::new(),
        }
    }
}

/// Tunables for an editing session, loaded from JSON. Missing fields fall
/// back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorSettings {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
    /// Arrow key nudge in canvas units.
    pub nudge_step: f64,
    /// Shift+Arrow nudge in canvas units.
    pub nudge_step_large: f64,
    /// Offset applied to pasted and duplicated elements.
    pub paste_offset: f64,
    /// Resize handle size in screen pixels.
    pub handle_size: f64,
    /// Resize handle hit tolerance in screen pixels.
    pub handle_tolerance: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            zoom_step: ZOOM_STEP,
            nudge_step: 1.0,
            nudge_step_large: 10.0,
            paste_offset: DUPLICATE_OFFSET.x,
            handle_size: HANDLE_SIZE,
            handle_tolerance: HANDLE_HIT_TOLERANCE,
        }
    }
}

impl EditorSettings {
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the editor cannot work with.
    pub fn validate(&self) -> EditorResult<()> {
        if !CanvasTransform::valid_bounds(self.min_zoom, self.max_zoom) {
            return Err(EditorError::InvalidValue(format!(
                "zoom bounds {}..{} (need 0 < minZoom <= maxZoom)",
                self.min_zoom, self.max_zoom
            )));
        }
        let non_negative = [
            ("zoomStep", self.zoom_step),
            ("nudgeStep", self.nudge_step),
            ("nudgeStepLarge", self.nudge_step_large),
            ("pasteOffset", self.paste_offset),
            ("handleSize", self.handle_size),
            ("handleTolerance", self.handle_tolerance),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(EditorError::InvalidValue(format!("{name} = {value}")));
            }
        }
        Ok(())
    }

    /// Read settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> EditorResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded editor settings from {}", path.as_ref().display());
        Ok(settings)
    }

    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A transform honouring the configured zoom bounds and step.
    pub fn transform(&self) -> CanvasTransform {
        let mut transform = CanvasTransform::with_bounds(self.min_zoom, self.max_zoom);
        if self.zoom_step.is_finite() && self.zoom_step > 0.0 {
            transform.zoom_step = self.zoom_step;
        }
        transform
    }
}
