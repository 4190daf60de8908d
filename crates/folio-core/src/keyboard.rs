//! Selection-scoped keyboard commands and the shortcut registry.

use crate::clipboard::Clipboard;
use crate::config::EditorSettings;
use crate::element::ElementPatch;
use crate::input::{Key, KeyEvent};
use crate::store::ElementStore;
use kurbo::Vec2;

/// A command bound to a key chord.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyCommand {
    /// Move the selection by a canvas-space offset.
    Nudge(Vec2),
    DeleteSelected,
    ClearSelection,
    Copy,
    Paste,
    Duplicate,
}

impl KeyCommand {
    /// Map a key event to a command, if it is bound.
    pub fn resolve(event: &KeyEvent, settings: &EditorSettings) -> Option<KeyCommand> {
        let step = if event.modifiers.shift {
            settings.nudge_step_large
        } else {
            settings.nudge_step
        };

        let command = match &event.key {
            Key::ArrowUp => KeyCommand::Nudge(Vec2::new(0.0, -step)),
            Key::ArrowDown => KeyCommand::Nudge(Vec2::new(0.0, step)),
            Key::ArrowLeft => KeyCommand::Nudge(Vec2::new(-step, 0.0)),
            Key::ArrowRight => KeyCommand::Nudge(Vec2::new(step, 0.0)),
            Key::Delete | Key::Backspace => KeyCommand::DeleteSelected,
            Key::Escape => KeyCommand::ClearSelection,
            key if event.modifiers.action() && key.is_char('c') => KeyCommand::Copy,
            key if event.modifiers.action() && key.is_char('v') => KeyCommand::Paste,
            key if event.modifiers.action() && key.is_char('d') => KeyCommand::Duplicate,
            _ => return None,
        };
        Some(command)
    }

    /// Whether the command does anything without a selection.
    pub fn requires_selection(&self) -> bool {
        !matches!(self, KeyCommand::Paste)
    }

    /// Run the command against the store. Returns true if anything changed.
    pub fn execute(
        &self,
        store: &mut ElementStore,
        clipboard: &mut Clipboard,
        paste_offset: Vec2,
    ) -> bool {
        if *self == KeyCommand::Paste {
            return paste(store, clipboard, paste_offset);
        }

        let Some(selected) = store.selected() else {
            return false;
        };
        if *self == KeyCommand::Copy {
            clipboard.copy(selected);
            // The clipboard is not part of the document
            return false;
        }
        let id = selected.id();
        let geometry = selected.geometry();

        match self {
            KeyCommand::Nudge(delta) => {
                let patch = ElementPatch::new().position(geometry.x + delta.x, geometry.y + delta.y);
                store.update(id, &patch)
            }
            KeyCommand::DeleteSelected => store.remove(id).is_some(),
            KeyCommand::ClearSelection => {
                store.clear_selection();
                true
            }
            KeyCommand::Duplicate => match store.duplicate_with_offset(id, paste_offset) {
                Some(copy) => {
                    store.select(copy);
                    true
                }
                None => false,
            },
            KeyCommand::Copy | KeyCommand::Paste => false,
        }
    }
}

/// Add a fresh copy of the clipboard snapshot and select it.
pub fn paste(store: &mut ElementStore, clipboard: &Clipboard, offset: Vec2) -> bool {
    let Some(snapshot) = clipboard.peek() else {
        return false;
    };
    let id = store.add(snapshot.duplicated(offset));
    store.select(id);
    true
}

/// A key chord and what it does, for help screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub chord: &'static str,
    pub action: &'static str,
}

const fn binding(chord: &'static str, action: &'static str) -> KeyBinding {
    KeyBinding { chord, action }
}

/// Chords understood by [`KeyCommand::resolve`] and by the in-place text editor.
pub const KEY_BINDINGS: &[KeyBinding] = &[
    binding("Arrows", "Nudge selection (small step)"),
    binding("Shift+Arrows", "Nudge selection (large step)"),
    binding("Delete, Backspace", "Delete selected element"),
    binding("Escape", "Clear selection, close menu"),
    binding("Ctrl+C", "Copy element"),
    binding("Ctrl+V", "Paste element"),
    binding("Ctrl+D", "Duplicate element"),
    binding("Enter", "Finish text editing"),
    binding("Shift+Enter", "New line while editing"),
];

/// Help table with the chords padded to a common width.
pub fn key_help() -> String {
    let width = KEY_BINDINGS.iter().map(|b| b.chord.len()).max().unwrap_or(0);
    KEY_BINDINGS
        .iter()
        .map(|b| format!("  {:width$}  {}", b.chord, b.action))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, ElementKind, Geometry};
    use crate::input::Modifiers;

    fn setup() -> (ElementStore, Clipboard, crate::element::ElementId) {
        let mut store = ElementStore::new();
        let id = store.add(Element::create(ElementKind::Shape).with_geometry(Geometry::new(
            5.0, 50.0, 40.0, 40.0,
        )));
        store.select(id);
        (store, Clipboard::new(), id)
    }

    fn run(event: KeyEvent, store: &mut ElementStore, clipboard: &mut Clipboard) -> bool {
        let settings = EditorSettings::default();
        KeyCommand::resolve(&event, &settings)
            .is_some_and(|cmd| cmd.execute(store, clipboard, Vec2::new(20.0, 20.0)))
    }

    #[test]
    fn test_resolve_bindings() {
        let s = EditorSettings::default();
        assert_eq!(
            KeyCommand::resolve(&KeyEvent::new(Key::ArrowRight, Modifiers::SHIFT), &s),
            Some(KeyCommand::Nudge(Vec2::new(10.0, 0.0)))
        );
        assert_eq!(
            KeyCommand::resolve(&KeyEvent::new(Key::Character('V'), Modifiers::META), &s),
            Some(KeyCommand::Paste)
        );
        assert_eq!(KeyCommand::resolve(&KeyEvent::plain(Key::Character('d')), &s), None);
    }

    #[test]
    fn test_nudge_clamps_at_zero() {
        let (mut store, mut clipboard, id) = setup();
        run(KeyEvent::new(Key::ArrowLeft, Modifiers::SHIFT), &mut store, &mut clipboard);
        let g = store.get(id).unwrap().geometry();
        assert!(g.x.abs() < f64::EPSILON);
        run(KeyEvent::plain(Key::ArrowDown), &mut store, &mut clipboard);
        assert!((store.get(id).unwrap().geometry().y - 51.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_delete_clears_selection() {
        let (mut store, mut clipboard, id) = setup();
        assert!(run(KeyEvent::plain(Key::Backspace), &mut store, &mut clipboard));
        assert!(!store.contains(id));
        assert!(store.selected_id().is_none());
    }

    #[test]
    fn test_copy_then_paste_twice() {
        let (mut store, mut clipboard, id) = setup();
        run(KeyEvent::new(Key::Character('c'), Modifiers::CTRL), &mut store, &mut clipboard);
        run(KeyEvent::new(Key::Character('v'), Modifiers::CTRL), &mut store, &mut clipboard);
        run(KeyEvent::new(Key::Character('v'), Modifiers::CTRL), &mut store, &mut clipboard);
        assert_eq!(store.len(), 3);
        let pasted = store.selected().unwrap();
        assert_ne!(pasted.id(), id);
        assert_eq!(pasted.geometry(), Geometry::new(25.0, 70.0, 40.0, 40.0));
    }

    #[test]
    fn test_paste_empty_is_noop() {
        let (mut store, mut clipboard, _) = setup();
        assert!(!run(KeyEvent::new(Key::Character('v'), Modifiers::CTRL), &mut store, &mut clipboard));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicate_leaves_clipboard_alone() {
        let (mut store, mut clipboard, id) = setup();
        assert!(run(KeyEvent::new(Key::Character('d'), Modifiers::CTRL), &mut store, &mut clipboard));
        assert!(clipboard.is_empty());
        assert_eq!(store.len(), 2);
        assert_ne!(store.selected_id(), Some(id));
    }

    #[test]
    fn test_commands_need_selection() {
        let (mut store, mut clipboard, id) = setup();
        store.clear_selection();
        assert!(!run(KeyEvent::plain(Key::Delete), &mut store, &mut clipboard));
        assert!(store.contains(id));
    }

    #[test]
    fn test_key_help_lists_every_binding() {
        let help = key_help();
        assert_eq!(help.lines().count(), KEY_BINDINGS.len());
        assert!(help.contains("Ctrl+D"));
        assert!(help.contains("Duplicate element"));
        // Descriptions start in one column
        let column = help.lines().next().unwrap().find(KEY_BINDINGS[0].action);
        for (line, b) in help.lines().zip(KEY_BINDINGS) {
            assert_eq!(line.find(b.action), column);
        }
    }
}
