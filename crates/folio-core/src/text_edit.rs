//! In-place text editing buffer for text and button elements.

use crate::element::ElementId;
use crate::input::{Key, KeyEvent};

/// Result of handling a key while editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEditResult {
    /// Event was handled, text may have changed.
    Handled,
    /// User wants to leave editing; the buffer should be committed.
    Commit,
    /// Event was not handled (pass to other handlers).
    NotHandled,
}

/// Editing state for the element whose content is being typed into.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditState {
    element: ElementId,
    text: String,
    /// Cursor position as a char index.
    cursor: usize,
}

impl TextEditState {
    /// Start editing with the element's current content, cursor at the end.
    pub fn new(element: ElementId, text: &str) -> Self {
        Self {
            element,
            text: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the whole buffer (e.g. from a host IME), cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.chars().count();
    }

    pub fn into_text(self) -> String {
        self.text
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// Insert a string at the cursor.
    pub fn insert(&mut self, s: &str) {
        let at = self.byte_offset(self.cursor);
        self.text.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    /// Handle a key press.
    ///
    /// Enter without Shift and Escape commit; Shift+Enter inserts a newline.
    pub fn handle_key(&mut self, event: &KeyEvent) -> TextEditResult {
        match &event.key {
            Key::Escape => TextEditResult::Commit,
            Key::Enter if !event.modifiers.shift => TextEditResult::Commit,
            Key::Enter => {
                self.insert("\n");
                TextEditResult::Handled
            }
            Key::Character(_) if event.modifiers.action() => TextEditResult::NotHandled,
            Key::Character(c) => {
                self.insert(c.encode_utf8(&mut [0; 4]));
                TextEditResult::Handled
            }
            Key::Backspace => {
                if self.cursor > 0 {
                    let at = self.byte_offset(self.cursor - 1);
                    self.text.remove(at);
                    self.cursor -= 1;
                }
                TextEditResult::Handled
            }
            Key::Delete => {
                if self.cursor < self.text.chars().count() {
                    let at = self.byte_offset(self.cursor);
                    self.text.remove(at);
                }
                TextEditResult::Handled
            }
            Key::ArrowLeft => {
                self.cursor = self.cursor.saturating_sub(1);
                TextEditResult::Handled
            }
            Key::ArrowRight => {
                self.cursor = (self.cursor + 1).min(self.text.chars().count());
                TextEditResult::Handled
            }
            Key::Home => {
                self.cursor = 0;
                TextEditResult::Handled
            }
            Key::End => {
                self.cursor = self.text.chars().count();
                TextEditResult::Handled
            }
            Key::ArrowUp | Key::ArrowDown => TextEditResult::Handled,
        }
    }
}
