//! Recorded input scripts.
//!
//! A script is a JSON array of steps, each tagged with `step`:
//!
//! ```json
//! [
//!   { "step": "add", "kind": "text" },
//!   { "step": "pointer", "event": { "type": "down", "position": { "x": 120, "y": 110 } } },
//!   { "step": "key", "key": "d", "modifiers": { "ctrl": true } }
//! ]
//! ```

use crate::{AppError, AppResult};
use folio_core::{
    Editor, Element, ElementKind, FieldEdit, Key, KeyEvent, MenuAction, Modifiers, PointerEvent,
    PropertyField, ingest_image,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One recorded input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "camelCase")]
pub enum Step {
    /// Toolbar: add an element with type defaults.
    Add { kind: ElementKind },
    /// Add an image element from a file on disk.
    Image { path: PathBuf },
    Pointer { event: PointerEvent },
    /// A key press, by DOM key name.
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Replace the in-place edit buffer.
    Text { text: String },
    /// The in-place editor lost focus.
    Blur,
    Menu { action: MenuAction },
    /// Property panel edit on the selected element.
    Edit { field: PropertyField, value: String },
    /// Property panel delete button.
    Delete,
    ZoomIn,
    ZoomOut,
    FitToContent,
    /// Remove every element.
    Clear,
}

/// A parsed script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Summary of a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub steps: usize,
    /// Steps the editor reacted to.
    pub handled: usize,
}

/// Feed every step to the editor in order.
///
/// Steps the editor ignores are counted but are not errors. A key name that
/// cannot be parsed or an unreadable image file stops the replay.
pub fn replay(editor: &mut Editor, script: &Script) -> AppResult<ReplayReport> {
    let mut report = ReplayReport::default();
    for (index, step) in script.steps.iter().enumerate() {
        let handled = apply(editor, index, step)?;
        log::debug!("Step {}: {:?} -> {}", index, step, handled);
        report.steps += 1;
        if handled {
            report.handled += 1;
        }
    }
    Ok(report)
}

fn apply(editor: &mut Editor, index: usize, step: &Step) -> AppResult<bool> {
    let handled = match step {
        Step::Add { kind } => {
            editor.add_element(*kind);
            true
        }
        Step::Image { path } => {
            let bytes = fs::read(path)?;
            let uri = ingest_image(&bytes)?;
            editor.insert_element(Element::create(ElementKind::Image).with_content(uri));
            true
        }
        Step::Pointer { event } => editor.handle_pointer(event),
        Step::Key { key, modifiers } => {
            let key = Key::from_name(key).ok_or_else(|| AppError::UnknownKey {
                step: index,
                key: key.clone(),
            })?;
            editor.handle_key(&KeyEvent::new(key, *modifiers))
        }
        Step::Text { text } => editor.set_edit_text(text),
        Step::Blur => editor.blur(),
        Step::Menu { action } => editor.choose_menu_action(*action),
        Step::Edit { field, value } => match editor.edit_selected(*field, value) {
            FieldEdit::Applied => true,
            FieldEdit::Rejected => {
                log::warn!("Step {}: {:?} rejected '{}'", index, field, value);
                false
            }
            FieldEdit::Unchanged => false,
        },
        Step::Delete => editor.delete_selected(),
        Step::ZoomIn => {
            editor.zoom_in();
            true
        }
        Step::ZoomOut => {
            editor.zoom_out();
            true
        }
        Step::FitToContent => {
            editor.fit_to_content();
            true
        }
        Step::Clear => {
            let had_elements = editor.element_count() > 0;
            editor.clear();
            had_elements
        }
    };
    Ok(handled)
}
