//! Local media attachment helpers: MIME-class filtering and data-URL encoding.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::state::MediaKind;

/// MIME type recorded for uploads that arrive without one.
pub const FALLBACK_MIME: &str = "application/octet-stream";

impl MediaKind {
    /// MIME-type class this kind accepts, e.g. `image/`.
    #[must_use]
    pub fn mime_class(self) -> &'static str {
        match self {
            Self::Image => "image/",
            Self::Video => "video/",
            Self::Audio => "audio/",
        }
    }

    /// Whether a declared content type falls inside this kind's class.
    #[must_use]
    pub fn accepts(self, content_type: &str) -> bool {
        content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with(self.mime_class())
    }
}

/// Strip parameters (`; charset=...`) from a content type. Blank becomes `None`.
#[must_use]
pub fn essence(content_type: Option<&str>) -> Option<String> {
    content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .filter(|ct| !ct.is_empty())
}

/// Encode `bytes` as a `data:` URL with the given MIME type.
#[must_use]
pub fn encode_data_url(mime: Option<&str>, bytes: &[u8]) -> String {
    let mime = mime.filter(|m| !m.is_empty()).unwrap_or(FALLBACK_MIME);
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

#[cfg(test)]
#[path = "media_test.rs"]
mod tests;
