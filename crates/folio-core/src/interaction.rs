//! Pointer-driven interaction state machine: drag, resize and text edit.
//!
//! The controller is driven through a small gesture port
//! (`gesture_start_*` / `gesture_move` / `gesture_end`) so it does not depend
//! on any UI framework. Global pointer listeners are modelled by the
//! [`PointerCapture`] trait and are held for exactly the gesture duration.

use crate::element::{ElementId, ElementPatch, Geometry};
use crate::handles::{HandleKind, apply_resize};
use crate::input::KeyEvent;
use crate::store::ElementStore;
use crate::text_edit::{TextEditResult, TextEditState};
use crate::transform::CanvasTransform;
use kurbo::{Point, Vec2};
use std::fmt;

/// Host hook for the global pointer-move / pointer-up listener pair.
///
/// `acquire` is called when a drag or resize starts and `release` exactly
/// once when it ends, however it ends.
pub trait PointerCapture {
    fn acquire(&mut self);
    fn release(&mut self);
}

/// Capture for hosts that deliver all pointer events anyway.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCapture;

impl PointerCapture for NoopCapture {
    fn acquire(&mut self) {}
    fn release(&mut self) {}
}

/// An in-flight drag of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub element: ElementId,
    /// Pointer position at gesture start (screen space).
    pub start_pointer: Point,
    /// Element geometry at gesture start.
    pub start_geometry: Geometry,
}

/// An in-flight resize of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeState {
    pub element: ElementId,
    pub handle: HandleKind,
    /// Pointer position at gesture start (screen space).
    pub start_pointer: Point,
    /// Element geometry at gesture start.
    pub start_geometry: Geometry,
}

/// States of the interaction controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging(DragState),
    Resizing(ResizeState),
    EditingText(TextEditState),
}

impl InteractionState {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Dragging(_) => "dragging",
            InteractionState::Resizing(_) => "resizing",
            InteractionState::EditingText(_) => "editing-text",
        }
    }
}

/// Drives element geometry and text from pointer gestures.
pub struct InteractionController {
    state: InteractionState,
    capture: Box<dyn PointerCapture>,
    /// Whether the listener pair is currently held.
    captured: bool,
}

impl fmt::Debug for InteractionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionController")
            .field("state", &self.state)
            .field("captured", &self.captured)
            .finish_non_exhaustive()
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self::with_capture(Box::new(NoopCapture))
    }

    pub fn with_capture(capture: Box<dyn PointerCapture>) -> Self {
        Self {
            state: InteractionState::Idle,
            capture,
            captured: false,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, InteractionState::Idle)
    }

    /// Whether a drag or resize is in flight.
    pub fn is_gesture_active(&self) -> bool {
        matches!(
            self.state,
            InteractionState::Dragging(_) | InteractionState::Resizing(_)
        )
    }

    pub fn is_editing_text(&self) -> bool {
        matches!(self.state, InteractionState::EditingText(_))
    }

    /// The element being typed into, if any.
    pub fn editing_element(&self) -> Option<ElementId> {
        match &self.state {
            InteractionState::EditingText(edit) => Some(edit.element()),
            _ => None,
        }
    }

    /// The live edit buffer, if any.
    pub fn text_edit(&self) -> Option<&TextEditState> {
        match &self.state {
            InteractionState::EditingText(edit) => Some(edit),
            _ => None,
        }
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    fn acquire(&mut self) {
        if !self.captured {
            self.capture.acquire();
            self.captured = true;
        }
    }

    fn release(&mut self) {
        if self.captured {
            self.capture.release();
            self.captured = false;
        }
    }

    /// Leave whatever state we are in so a new one can start.
    fn settle(&mut self, store: &mut ElementStore) {
        match self.state {
            InteractionState::EditingText(_) => {
                self.commit_text_edit(store);
            }
            InteractionState::Dragging(_) | InteractionState::Resizing(_) => {
                self.gesture_end();
            }
            InteractionState::Idle => {}
        }
    }

    /// Pointer down on an element body: start dragging it.
    pub fn gesture_start_drag(
        &mut self,
        store: &mut ElementStore,
        id: ElementId,
        pointer: Point,
    ) -> bool {
        self.settle(store);
        let Some(element) = store.get(id) else {
            return false;
        };
        self.state = InteractionState::Dragging(DragState {
            element: id,
            start_pointer: pointer,
            start_geometry: element.geometry(),
        });
        self.acquire();
        log::debug!("Drag started on {}", id);
        true
    }

    /// Pointer down on a resize handle: start resizing.
    pub fn gesture_start_resize(
        &mut self,
        store: &mut ElementStore,
        id: ElementId,
        handle: HandleKind,
        pointer: Point,
    ) -> bool {
        self.settle(store);
        let Some(element) = store.get(id) else {
            return false;
        };
        self.state = InteractionState::Resizing(ResizeState {
            element: id,
            handle,
            start_pointer: pointer,
            start_geometry: element.geometry(),
        });
        self.acquire();
        log::debug!("Resize {:?} started on {}", handle, id);
        true
    }

    /// Pointer moved during a gesture. Applies the new geometry live.
    /// Returns true if an element changed.
    pub fn gesture_move(
        &mut self,
        store: &mut ElementStore,
        transform: &CanvasTransform,
        pointer: Point,
    ) -> bool {
        let (id, geometry) = match &self.state {
            InteractionState::Dragging(drag) => {
                let delta = screen_delta(drag.start_pointer, pointer, transform);
                (drag.element, drag.start_geometry.translated(delta))
            }
            InteractionState::Resizing(resize) => {
                let delta = screen_delta(resize.start_pointer, pointer, transform);
                (
                    resize.element,
                    apply_resize(resize.start_geometry, resize.handle, delta),
                )
            }
            _ => return false,
        };

        match store.get_mut(id) {
            Some(element) => {
                let before = element.geometry();
                element.set_geometry(geometry);
                element.geometry() != before
            }
            None => {
                // Deleted mid-gesture
                self.gesture_end();
                false
            }
        }
    }

    /// Pointer up (or leave, or cancel): finish the gesture.
    /// Geometry already applied stays applied.
    pub fn gesture_end(&mut self) {
        if self.is_gesture_active() {
            log::debug!("Gesture ended ({})", self.state.name());
            self.state = InteractionState::Idle;
        }
        self.release();
    }

    /// Double-click on a text-editable element: start editing its content.
    pub fn begin_text_edit(&mut self, store: &mut ElementStore, id: ElementId) -> bool {
        if self.editing_element() == Some(id) {
            return true;
        }
        self.settle(store);
        match store.get(id) {
            Some(element) if element.kind().is_text_editable() => {
                self.state =
                    InteractionState::EditingText(TextEditState::new(id, &element.content));
                log::debug!("Text editing started on {}", id);
                true
            }
            _ => false,
        }
    }

    /// Feed a key to the edit buffer, committing on Enter/Escape.
    pub fn text_edit_key(&mut self, store: &mut ElementStore, event: &KeyEvent) -> TextEditResult {
        let InteractionState::EditingText(edit) = &mut self.state else {
            return TextEditResult::NotHandled;
        };
        let result = edit.handle_key(event);
        if result == TextEditResult::Commit {
            self.commit_text_edit(store);
        }
        result
    }

    /// Replace the edit buffer wholesale (host-side text input).
    pub fn set_edit_text(&mut self, text: &str) -> bool {
        match &mut self.state {
            InteractionState::EditingText(edit) => {
                edit.set_text(text);
                true
            }
            _ => false,
        }
    }

    /// Leave text editing, writing the buffer back to the element's content.
    /// Used for blur, Enter and Escape. Returns the committed element id.
    pub fn commit_text_edit(&mut self, store: &mut ElementStore) -> Option<ElementId> {
        if !self.is_editing_text() {
            return None;
        }
        let InteractionState::EditingText(edit) = std::mem::take(&mut self.state) else {
            return None;
        };
        let id = edit.element();
        store.update(id, &ElementPatch::new().content(edit.into_text()));
        log::debug!("Text editing committed on {}", id);
        Some(id)
    }

    /// Drop a state whose element has left the store. Nothing is committed
    /// and the capture is released.
    pub fn drop_stale(&mut self, store: &ElementStore) -> bool {
        let target = match &self.state {
            InteractionState::Dragging(drag) => drag.element,
            InteractionState::Resizing(resize) => resize.element,
            InteractionState::EditingText(edit) => edit.element(),
            InteractionState::Idle => return false,
        };
        if store.contains(target) {
            return false;
        }
        log::debug!("Dropping {} on removed element {}", self.state.name(), target);
        self.state = InteractionState::Idle;
        self.release();
        true
    }

    /// Click on empty canvas: back to idle, selection cleared.
    pub fn click_empty(&mut self, store: &mut ElementStore) {
        self.settle(store);
        store.clear_selection();
    }

    /// Abandon the current state without reverting applied geometry.
    pub fn cancel(&mut self, store: &mut ElementStore) {
        self.settle(store);
    }
}

fn screen_delta(start: Point, current: Point, transform: &CanvasTransform) -> Vec2 {
    transform.screen_delta_to_canvas_delta(current - start)
}
