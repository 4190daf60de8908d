//! Folio Core Library
//!
//! Platform-agnostic data structures and interaction logic for the Folio
//! free-form canvas editor.

pub mod clipboard;
pub mod config;
pub mod context_menu;
pub mod document;
pub mod editor;
pub mod element;
pub mod error;
pub mod handles;
pub mod image;
pub mod input;
pub mod interaction;
pub mod keyboard;
pub mod panel;
pub mod store;
pub mod templates;
pub mod text_edit;
pub mod transform;

pub use clipboard::Clipboard;
pub use config::{CanvasConfig, EditorSettings};
pub use context_menu::{ContextMenu, MenuAction};
pub use document::DesignSnapshot;
pub use editor::{Editor, EditorStatus};
pub use element::{
    Element, ElementId, ElementKind, ElementPatch, ElementStyle, Geometry, MIN_ELEMENT_SIZE,
    SerializableColor, StylePatch,
};
pub use error::{EditorError, EditorResult};
pub use handles::{Handle, HandleKind, apply_resize, get_handles};
pub use image::{ImageFormat, ingest_image};
pub use input::{Key, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use interaction::{InteractionController, InteractionState, NoopCapture, PointerCapture};
pub use keyboard::{KEY_BINDINGS, KeyBinding, KeyCommand, key_help};
pub use panel::{FieldEdit, PropertyField};
pub use store::ElementStore;
pub use templates::{BuiltinTemplates, TemplateSource, load_template};
pub use transform::CanvasTransform;
