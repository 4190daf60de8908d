//! Right-click menu bound to a single target element.

use crate::clipboard::Clipboard;
use crate::element::ElementId;
use crate::store::ElementStore;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Actions offered by the element context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuAction {
    Copy,
    Duplicate,
    Delete,
}

impl MenuAction {
    pub fn all() -> &'static [MenuAction] {
        &[MenuAction::Copy, MenuAction::Duplicate, MenuAction::Delete]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::Copy => "Copy",
            MenuAction::Duplicate => "Duplicate",
            MenuAction::Delete => "Delete",
        }
    }

    pub fn shortcut(&self) -> &'static str {
        match self {
            MenuAction::Copy => "Ctrl+C",
            MenuAction::Duplicate => "Ctrl+D",
            MenuAction::Delete => "Del",
        }
    }
}

/// An open menu: its target and the screen position it was opened at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenMenu {
    pub target: ElementId,
    pub anchor: Point,
}

/// Holds at most one open menu.
#[derive(Debug, Clone, Default)]
pub struct ContextMenu {
    open: Option<OpenMenu>,
}

impl ContextMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a menu for `target`, replacing any menu already open.
    pub fn open(&mut self, target: ElementId, anchor: Point) {
        log::debug!("Context menu opened for {}", target);
        self.open = Some(OpenMenu { target, anchor });
    }

    /// Close without side effects.
    pub fn dismiss(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current(&self) -> Option<&OpenMenu> {
        self.open.as_ref()
    }

    pub fn target(&self) -> Option<ElementId> {
        self.open.map(|m| m.target)
    }

    /// Run `action` on the menu's target and close the menu.
    ///
    /// Returns false (and still closes) if no menu was open or its target
    /// no longer exists.
    pub fn choose(
        &mut self,
        action: MenuAction,
        store: &mut ElementStore,
        clipboard: &mut Clipboard,
        duplicate_offset: Vec2,
    ) -> bool {
        let Some(menu) = self.open.take() else {
            return false;
        };
        let Some(element) = store.get(menu.target) else {
            log::debug!("Context menu target {} is gone", menu.target);
            return false;
        };

        match action {
            MenuAction::Copy => {
                clipboard.copy(element);
                true
            }
            MenuAction::Duplicate => match store.duplicate_with_offset(menu.target, duplicate_offset) {
                Some(copy) => {
                    store.select(copy);
                    true
                }
                None => false,
            },
            MenuAction::Delete => store.remove(menu.target).is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, ElementKind};

    const OFFSET: Vec2 = Vec2::new(20.0, 20.0);

    #[test]
    fn test_open_replaces() {
        let mut menu = ContextMenu::new();
        let a = ElementId::new();
        let b = ElementId::new();
        menu.open(a, Point::new(1.0, 1.0));
        menu.open(b, Point::new(2.0, 2.0));
        assert_eq!(menu.target(), Some(b));
        assert_eq!(menu.current().map(|m| m.anchor), Some(Point::new(2.0, 2.0)));
    }

    #[test]
    fn test_dismiss_has_no_side_effects() {
        let mut store = ElementStore::new();
        let id = store.add(Element::create(ElementKind::Shape));
        let mut menu = ContextMenu::new();
        menu.open(id, Point::ZERO);
        menu.dismiss();
        assert!(!menu.is_open());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_choose_duplicate_then_closes() {
        let mut store = ElementStore::new();
        let mut clipboard = Clipboard::new();
        let id = store.add(Element::create(ElementKind::Shape));
        let mut menu = ContextMenu::new();
        menu.open(id, Point::ZERO);

        assert!(menu.choose(MenuAction::Duplicate, &mut store, &mut clipboard, OFFSET));
        assert_eq!(store.len(), 2);
        assert!(!menu.is_open());
        assert!(clipboard.is_empty());
    }

    #[test]
    fn test_choose_copy_and_delete() {
        let mut store = ElementStore::new();
        let mut clipboard = Clipboard::new();
        let id = store.add(Element::create(ElementKind::Icon));
        store.select(id);
        let mut menu = ContextMenu::new();

        menu.open(id, Point::ZERO);
        assert!(menu.choose(MenuAction::Copy, &mut store, &mut clipboard, OFFSET));
        assert_eq!(clipboard.peek().map(Element::id), Some(id));

        menu.open(id, Point::ZERO);
        assert!(menu.choose(MenuAction::Delete, &mut store, &mut clipboard, OFFSET));
        assert!(store.is_empty());
        assert!(store.selected_id().is_none());
    }

    #[test]
    fn test_stale_target() {
        let mut store = ElementStore::new();
        let mut clipboard = Clipboard::new();
        let id = store.add(Element::create(ElementKind::Shape));
        let mut menu = ContextMenu::new();
        menu.open(id, Point::ZERO);
        store.remove(id);
        assert!(!menu.choose(MenuAction::Copy, &mut store, &mut clipboard, OFFSET));
        assert!(!menu.is_open());
        assert!(clipboard.is_empty());
    }
}
