//! Picture naming rules and the fetch seam.
//!
//! Stored pictures are named `{type_id}_{pet_name}{ext}` where `ext` is
//! chosen from the declared content type: `.jpg` for `image/jpeg`, `.png`
//! for `image/png`. No other formats are accepted and content is never
//! sniffed.

use async_trait::async_trait;

/// Accepted content type for JPEG pictures.
pub const CONTENT_TYPE_JPEG: &str = "image/jpeg";

/// Accepted content type for PNG pictures.
pub const CONTENT_TYPE_PNG: &str = "image/png";

/// Image formats the picture store accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureFormat {
    Jpeg,
    Png,
}

impl PictureFormat {
    /// Map a declared `Content-Type` to a format. Exact match only.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            CONTENT_TYPE_JPEG => Some(Self::Jpeg),
            CONTENT_TYPE_PNG => Some(Self::Png),
            _ => None,
        }
    }

    /// Resolve a stored filename to its format by extension
    /// (`.jpg`, `.jpeg`, `.png`, any case).
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// File extension written for this format, including the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => ".jpg",
            Self::Png => ".png",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Jpeg => CONTENT_TYPE_JPEG,
            Self::Png => CONTENT_TYPE_PNG,
        }
    }
}

/// Deterministic filename for a pet's picture.
///
/// ```
/// use menagerie_core::picture::{picture_filename, PictureFormat};
///
/// assert_eq!(picture_filename("3", "Rex", PictureFormat::Png), "3_Rex.png");
/// assert_eq!(picture_filename("3", "Rex", PictureFormat::Jpeg), "3_Rex.jpg");
/// ```
pub fn picture_filename(type_id: &str, pet_name: &str, format: PictureFormat) -> String {
    format!("{type_id}_{pet_name}{}", format.extension())
}

/// Whether `filename` is a single plain path component that cannot escape
/// the storage directory.
pub fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\', '\0'])
}

// ---------------------------------------------------------------------------
// Fetch seam
// ---------------------------------------------------------------------------

/// A fetched HTTP body together with its declared content type.
#[derive(Debug, Clone)]
pub struct FetchedPicture {
    /// The raw `Content-Type` header value, if the response had one.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("picture request failed: {0}")]
    Transport(String),

    #[error("picture source returned HTTP {0}")]
    HttpStatus(u16),
}

/// Retrieves picture bytes from a URL with a bounded timeout.
#[async_trait]
pub trait PictureFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPicture, FetchError>;
}
