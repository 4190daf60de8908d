//! Image ingestion: raw bytes to a data URI usable as image content.

use crate::error::{EditorError, EditorResult};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
    Gif,
}

impl ImageFormat {
    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Gif => "image/gif",
        }
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0x89, b'P', b'N', b'G']) {
            return Some(ImageFormat::Png);
        }
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }
        // RIFF....WEBP
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(ImageFormat::Gif);
        }
        None
    }
}

/// Encode an uploaded image as a `data:<mime>;base64,...` URI.
pub fn ingest_image(data: &[u8]) -> EditorResult<String> {
    let format = ImageFormat::from_magic_bytes(data).ok_or(EditorError::UnsupportedImage)?;
    log::debug!("Ingesting {} byte {:?} image", data.len(), format);
    Ok(format!(
        "data:{};base64,{}",
        format.mime_type(),
        STANDARD.encode(data)
    ))
}

/// Decode a data URI produced by [`ingest_image`] back into bytes.
pub fn decode_data_uri(uri: &str) -> Option<(ImageFormat, Vec<u8>)> {
    let rest = uri.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    let bytes = STANDARD.decode(payload).ok()?;
    let format = ImageFormat::from_magic_bytes(&bytes)?;
    (format.mime_type() == mime).then_some((format, bytes))
}
