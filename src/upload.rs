use crate::constants::ACCEPTED_MIME_TYPES;
use crate::error::{RenderError, Result};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMime {
    Png,
    Jpeg,
    WebP,
}

impl ImageMime {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMime::Png => "image/png",
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::WebP => "image/webp",
        }
    }

    pub fn parse(mime: &str) -> Result<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Ok(ImageMime::Png),
            "image/jpeg" => Ok(ImageMime::Jpeg),
            "image/webp" => Ok(ImageMime::WebP),
            other => Err(RenderError::Validation(format!(
                "unsupported file type \"{}\". Please upload a PNG, JPG, or WEBP image ({})",
                other,
                ACCEPTED_MIME_TYPES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for ImageMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guesses a MIME type from a file extension the way a browser file picker does.
pub fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// A user-supplied product photo that passed the MIME allow-list.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    mime: ImageMime,
    data: Vec<u8>,
}

impl ImagePayload {
    pub fn new(data: Vec<u8>, mime_type: &str) -> Result<Self> {
        let mime = ImageMime::parse(mime_type)?;
        if data.is_empty() {
            return Err(RenderError::Validation("uploaded image is empty".into()));
        }
        Ok(Self { mime, data })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        // Type check first so unsupported files are never read.
        let mime = ImageMime::parse(mime_from_extension(path))?;
        let data = fs::read(path).map_err(|e| {
            RenderError::Validation(format!("failed to open image file {}: {}", path.display(), e))
        })?;
        Self::new(data, mime.as_str())
    }

    pub fn mime(&self) -> ImageMime {
        self.mime
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime.as_str()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn to_base64(&self) -> String {
        base64::encode(&self.data)
    }
}
