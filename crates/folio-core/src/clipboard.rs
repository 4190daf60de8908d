//! Session-owned single-slot clipboard for elements.

use crate::element::Element;

/// Holds at most one element snapshot.
///
/// Copy overwrites the slot; paste reads it without consuming, so the same
/// snapshot can be pasted repeatedly.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    slot: Option<Element>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a snapshot of `element`, replacing any previous one.
    pub fn copy(&mut self, element: &Element) {
        log::debug!("Copied {} element {} to clipboard", element.kind(), element.id());
        self.slot = Some(element.clone());
    }

    /// The stored snapshot, if any.
    pub fn peek(&self) -> Option<&Element> {
        self.slot.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}
