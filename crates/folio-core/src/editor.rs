//! Editor session: owns the document and routes input to the controllers.

use crate::clipboard::Clipboard;
use crate::config::{CanvasConfig, EditorSettings};
use crate::context_menu::{ContextMenu, MenuAction};
use crate::document::DesignSnapshot;
use crate::element::{Element, ElementId, ElementKind};
use crate::handles::{HandleKind, hit_test_handles};
use crate::input::{Key, KeyEvent, MouseButton, PointerEvent};
use crate::interaction::{InteractionController, InteractionState, PointerCapture};
use crate::keyboard::KeyCommand;
use crate::panel::{self, FieldEdit, PanelRow, PropertyField};
use crate::store::ElementStore;
use crate::text_edit::TextEditResult;
use crate::transform::CanvasTransform;
use kurbo::{Point, Size, Vec2};

/// Short summary of the session for status bars and logs.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorStatus {
    pub element_count: usize,
    pub selected: Option<ElementId>,
    pub zoom: f64,
    pub state: &'static str,
    pub menu_open: bool,
    pub clipboard_full: bool,
}

/// One editing session over one design.
pub struct Editor {
    /// The elements being edited, plus the selection.
    pub store: ElementStore,
    /// View transform for screen/canvas conversion.
    pub transform: CanvasTransform,
    /// Page-level configuration of the design.
    pub config: CanvasConfig,
    pub clipboard: Clipboard,
    pub context_menu: ContextMenu,
    /// Viewport size in screen pixels.
    pub viewport_size: Size,
    interaction: InteractionController,
    settings: EditorSettings,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an editor with an empty design and default settings.
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        Self {
            store: ElementStore::new(),
            transform: settings.transform(),
            config: CanvasConfig::default(),
            clipboard: Clipboard::new(),
            context_menu: ContextMenu::new(),
            viewport_size: Size::new(1280.0, 800.0),
            interaction: InteractionController::new(),
            settings,
        }
    }

    /// Use a host-provided pointer capture for drag and resize gestures.
    pub fn with_capture(mut self, capture: Box<dyn PointerCapture>) -> Self {
        self.interaction = InteractionController::with_capture(capture);
        self
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn interaction_state(&self) -> &InteractionState {
        self.interaction.state()
    }

    fn paste_offset(&self) -> Vec2 {
        Vec2::new(self.settings.paste_offset, self.settings.paste_offset)
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width, height);
    }

    // --- Document ---

    /// Create an element with its defaults, add it on top and select it.
    pub fn add_element(&mut self, kind: ElementKind) -> ElementId {
        self.insert_element(Element::create(kind))
    }

    /// Add a prepared element on top and select it.
    pub fn insert_element(&mut self, element: Element) -> ElementId {
        self.interaction.cancel(&mut self.store);
        let id = self.store.add(element);
        self.store.select(id);
        id
    }

    /// Remove an element. Selection and any open menu on it are cleared.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        if self.interaction.editing_element() == Some(id) {
            self.interaction.commit_text_edit(&mut self.store);
        }
        if self.context_menu.target() == Some(id) {
            self.context_menu.dismiss();
        }
        self.store.remove(id)
    }

    /// Duplicate an element and select the copy.
    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        let copy = self.store.duplicate_with_offset(id, self.paste_offset())?;
        self.store.select(copy);
        Some(copy)
    }

    pub fn select(&mut self, id: ElementId) {
        self.store.select(id);
    }

    /// Remove everything from the canvas.
    pub fn clear(&mut self) {
        self.interaction.cancel(&mut self.store);
        self.context_menu.dismiss();
        self.store.clear();
        log::info!("Canvas cleared");
    }

    /// Capture the design for an external save.
    pub fn snapshot(&self) -> DesignSnapshot {
        DesignSnapshot::new(self.store.elements().to_vec(), self.config.clone())
    }

    /// Replace the design with a snapshot. Selection and menus are reset.
    pub fn load(&mut self, snapshot: DesignSnapshot) {
        self.interaction.cancel(&mut self.store);
        self.context_menu.dismiss();
        self.store = ElementStore::from_elements(snapshot.elements);
        self.config = snapshot.config;
        log::info!("Loaded design with {} elements", self.store.len());
    }

    pub fn element_count(&self) -> usize {
        self.store.len()
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.store.selected_id()
    }

    pub fn status(&self) -> EditorStatus {
        EditorStatus {
            element_count: self.store.len(),
            selected: self.store.selected_id(),
            zoom: self.transform.zoom(),
            state: self.interaction.state().name(),
            menu_open: self.context_menu.is_open(),
            clipboard_full: !self.clipboard.is_empty(),
        }
    }

    // --- Hit testing ---

    /// Resize handle of the selected element under a screen point.
    pub fn handle_at(&self, screen: Point) -> Option<(ElementId, HandleKind)> {
        let selected = self.store.selected()?;
        let canvas = self.transform.screen_to_canvas(screen);
        let tolerance = self.settings.handle_tolerance / self.transform.zoom();
        hit_test_handles(selected, canvas, tolerance).map(|kind| (selected.id(), kind))
    }

    /// Topmost element under a screen point.
    pub fn element_at(&self, screen: Point) -> Option<ElementId> {
        self.store.element_at(self.transform.screen_to_canvas(screen))
    }

    // --- Pointer input ---

    /// Route a pointer event. Returns true if the view needs a redraw.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        self.interaction.drop_stale(&self.store);
        match *event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
                ..
            } => self.primary_down(position),
            PointerEvent::Down {
                position,
                button: MouseButton::Right,
                ..
            } => self.secondary_down(position),
            PointerEvent::Down { .. } => false,
            PointerEvent::Move { position } => {
                self.interaction
                    .gesture_move(&mut self.store, &self.transform, position)
            }
            PointerEvent::Up { .. } | PointerEvent::Leave => {
                let active = self.interaction.is_gesture_active();
                self.interaction.gesture_end();
                active
            }
            PointerEvent::DoubleClick { position } => self.double_click(position),
            PointerEvent::Zoom { position, factor } => {
                let before = self.transform.zoom();
                self.transform.zoom_at(position, factor);
                (self.transform.zoom() - before).abs() > f64::EPSILON
            }
        }
    }

    fn primary_down(&mut self, position: Point) -> bool {
        // Any click outside the menu closes it.
        let menu_was_open = self.context_menu.is_open();
        self.context_menu.dismiss();

        if let Some((id, handle)) = self.handle_at(position) {
            return self
                .interaction
                .gesture_start_resize(&mut self.store, id, handle, position);
        }

        match self.element_at(position) {
            Some(id) if self.interaction.editing_element() == Some(id) => menu_was_open,
            Some(id) => {
                self.store.select(id);
                self.interaction
                    .gesture_start_drag(&mut self.store, id, position);
                true
            }
            None => {
                self.interaction.click_empty(&mut self.store);
                true
            }
        }
    }

    fn secondary_down(&mut self, position: Point) -> bool {
        match self.element_at(position) {
            Some(id) => {
                self.interaction.cancel(&mut self.store);
                self.store.select(id);
                self.context_menu.open(id, position);
                true
            }
            None => {
                let was_open = self.context_menu.is_open();
                self.context_menu.dismiss();
                was_open
            }
        }
    }

    fn double_click(&mut self, position: Point) -> bool {
        let menu_was_open = self.context_menu.is_open();
        self.context_menu.dismiss();
        let Some(id) = self.element_at(position) else {
            return menu_was_open;
        };
        self.store.select(id);
        self.interaction.begin_text_edit(&mut self.store, id);
        true
    }

    /// The host's editable region lost focus: commit any text edit.
    pub fn blur(&mut self) -> bool {
        self.interaction.commit_text_edit(&mut self.store).is_some()
    }

    /// Replace the text being edited (host-side text input).
    pub fn set_edit_text(&mut self, text: &str) -> bool {
        self.interaction.set_edit_text(text)
    }

    // --- Keyboard input ---

    /// Route a key press. Returns true if anything changed.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        self.interaction.drop_stale(&self.store);
        if self.interaction.is_editing_text() {
            let result = self.interaction.text_edit_key(&mut self.store, event);
            if result == TextEditResult::NotHandled {
                // Shortcuts are suspended while editing
                return false;
            }
            if event.key == Key::Escape {
                self.store.clear_selection();
                self.context_menu.dismiss();
            }
            return true;
        }

        if event.key == Key::Escape && self.context_menu.is_open() {
            self.context_menu.dismiss();
            self.store.clear_selection();
            return true;
        }

        let Some(command) = KeyCommand::resolve(event, &self.settings) else {
            return false;
        };
        if command.requires_selection() && self.store.selected_id().is_none() {
            return false;
        }
        if command == KeyCommand::DeleteSelected {
            // Keep the menu from pointing at a deleted element
            self.context_menu.dismiss();
        }
        let offset = self.paste_offset();
        command.execute(&mut self.store, &mut self.clipboard, offset)
    }

    // --- Context menu ---

    /// Run a context menu item on the menu's target.
    pub fn choose_menu_action(&mut self, action: MenuAction) -> bool {
        // The target's pending text is written back before it is copied or removed
        if let Some(target) = self.context_menu.target() {
            if self.interaction.editing_element() == Some(target) {
                self.interaction.commit_text_edit(&mut self.store);
            }
        }
        let offset = self.paste_offset();
        self.context_menu
            .choose(action, &mut self.store, &mut self.clipboard, offset)
    }

    // --- Property panel ---

    /// Edit a field of the selected element. A content edit on the element
    /// being edited in place also replaces the edit buffer, so the later
    /// commit keeps it.
    pub fn edit_selected(&mut self, field: PropertyField, raw: &str) -> FieldEdit {
        let Some(id) = self.store.selected_id() else {
            return FieldEdit::Unchanged;
        };
        let result = panel::edit(&mut self.store, id, field, raw);
        if field == PropertyField::Content
            && result != FieldEdit::Rejected
            && self.interaction.editing_element() == Some(id)
        {
            self.interaction.set_edit_text(raw);
        }
        result
    }

    /// Property panel rows for the selected element.
    pub fn panel_rows(&self) -> Vec<PanelRow> {
        self.store.selected().map(panel::rows).unwrap_or_default()
    }

    /// Delete button in the property panel.
    pub fn delete_selected(&mut self) -> bool {
        match self.store.selected_id() {
            Some(id) => self.remove_element(id).is_some(),
            None => false,
        }
    }

    // --- View ---

    pub fn zoom_in(&mut self) {
        self.transform.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.transform.zoom_out();
    }

    /// Fit the view to all elements.
    pub fn fit_to_content(&mut self) {
        if let Some(bounds) = self.store.bounds() {
            self.transform.fit_to_bounds(bounds, self.viewport_size, 50.0);
        }
    }
}
