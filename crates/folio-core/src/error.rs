//! Error types for editor operations.

use thiserror::Error;

/// Result type for fallible editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors surfaced at the editor's boundaries.
///
/// Interactive operations (drag, resize, panel edits, store mutations on
/// unknown ids) never fail; they clamp or become no-ops. Errors only come
/// from parsing and from collaborator ports.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Unknown element type: {0}")]
    UnknownElementType(String),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Template not found: {0}")]
    TemplateNotFound(String),
    #[error("Unsupported image format")]
    UnsupportedImage,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
