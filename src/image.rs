use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use thiserror::Error;

/// Largest image accepted from the page.
pub const MAX_IMAGE_BYTES: usize = 16 * 1024 * 1024;

/// Body size a post form may reach once it carries a base64 image of
/// [`MAX_IMAGE_BYTES`] plus the text fields.
pub const MAX_INLINE_POST_BYTES: usize = MAX_IMAGE_BYTES.div_ceil(3) * 4 + 64 * 1024;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ImageError {
    #[error("Image is {0} bytes, the limit is {}", MAX_IMAGE_BYTES)]
    TooLarge(usize),

    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("Image is empty")]
    Empty,
}

/// Reference to a displayable image: a remote URL or an inline `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Inlines a locally selected file as a base64 `data:` reference.
    /// The bytes never leave the process.
    pub fn from_bytes(content_type: &str, bytes: &[u8]) -> Result<Self, ImageError> {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if !mime.starts_with("image/") {
            return Err(ImageError::UnsupportedMedia(content_type.to_string()));
        }
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ImageError::TooLarge(bytes.len()));
        }

        Ok(Self(format!("data:{mime};base64,{}", STANDARD.encode(bytes))))
    }

    /// Wraps a reference the page already holds. Blank input means no image.
    pub fn parse(url: &str) -> Option<Self> {
        let url = url.trim();
        (!url.is_empty()).then(|| Self(url.to_string()))
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
