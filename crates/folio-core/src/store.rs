//! Ordered element collection and the single selection.

use crate::element::{Element, ElementId, ElementPatch};
use crate::error::EditorResult;
use kurbo::{Point, Rect, Vec2};

/// Offset applied to duplicated and pasted elements.
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);

/// The elements of a design, back to front, plus the current selection.
///
/// Every element that enters the store is sanitised, so the size and
/// position floors hold for the whole sequence at all times.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    /// Elements in stacking order (back to front).
    elements: Vec<Element>,
    /// Weak reference to the selected element.
    selected: Option<ElementId>,
}

impl ElementStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an ordered element list.
    pub fn from_elements(elements: Vec<Element>) -> Self {
        let mut store = Self::new();
        for element in elements {
            store.add(element);
        }
        store
    }

    /// Append an element on top of the stack.
    pub fn add(&mut self, mut element: Element) -> ElementId {
        element.sanitize();
        let id = element.id();
        log::debug!("Adding {} element {}", element.kind(), id);
        self.elements.push(element);
        id
    }

    /// Merge `patch` into the element with `id`.
    /// Returns true if the element existed and changed.
    pub fn update(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        match self.get_mut(id) {
            Some(element) => element.apply(patch),
            None => {
                log::debug!("Ignoring update for missing element {}", id);
                false
            }
        }
    }

    /// Remove an element. Clears the selection if it pointed at it.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let index = self.index_of(id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        log::debug!("Removing element {}", id);
        Some(self.elements.remove(index))
    }

    /// Duplicate an element with the standard offset. Returns the new id.
    pub fn duplicate(&mut self, id: ElementId) -> Option<ElementId> {
        self.duplicate_with_offset(id, DUPLICATE_OFFSET)
    }

    /// Duplicate an element, shifting the copy by `offset`.
    pub fn duplicate_with_offset(&mut self, id: ElementId, offset: Vec2) -> Option<ElementId> {
        let copy = self.get(id)?.duplicated(offset);
        Some(self.add(copy))
    }

    /// Remove all elements and clear the selection.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.selected = None;
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Mutable access for in-crate mutation paths that re-sanitise.
    pub(crate) fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// Stacking index (0 = bottom).
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    /// Elements back to front.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Bring an element to the front (top of the stack).
    pub fn bring_to_front(&mut self, id: ElementId) -> bool {
        self.move_to(id, self.elements.len().saturating_sub(1))
    }

    /// Send an element to the back (bottom of the stack).
    pub fn send_to_back(&mut self, id: ElementId) -> bool {
        self.move_to(id, 0)
    }

    /// Move an element one step up.
    pub fn bring_forward(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(i) if i + 1 < self.elements.len() => {
                self.elements.swap(i, i + 1);
                true
            }
            _ => false,
        }
    }

    /// Move an element one step down.
    pub fn send_backward(&mut self, id: ElementId) -> bool {
        match self.index_of(id) {
            Some(i) if i > 0 => {
                self.elements.swap(i, i - 1);
                true
            }
            _ => false,
        }
    }

    fn move_to(&mut self, id: ElementId, target: usize) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if index == target {
            return false;
        }
        let element = self.elements.remove(index);
        self.elements.insert(target, element);
        true
    }

    /// Topmost element under a canvas-space point.
    pub fn element_at(&self, point: Point) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.hit_test(point))
            .map(Element::id)
    }

    /// Union of all element bounds, if any.
    pub fn bounds(&self) -> Option<Rect> {
        self.elements
            .iter()
            .map(Element::bounds)
            .reduce(|acc, r| acc.union(r))
    }

    /// Select an element. Unknown ids clear the selection.
    pub fn select(&mut self, id: ElementId) {
        self.selected = self.contains(id).then_some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The selected id, re-validated against the sequence.
    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected.filter(|&id| self.contains(id))
    }

    /// The selected element, re-validated against the sequence.
    pub fn selected(&self) -> Option<&Element> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected_id() == Some(id)
    }

    /// Serialize the element sequence to JSON.
    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(&self.elements)?)
    }

    /// Rebuild a store from its JSON data form.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let elements: Vec<Element> = serde_json::from_str(json)?;
        Ok(Self::from_elements(elements))
    }
}
