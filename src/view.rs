//! Presentation models for the dashboard cards, the edit form and the live preview.
//!
//! Pure projections of `Layout` and `AiPhase`; nothing here holds state.

use serde::Serialize;

use crate::state::{AiPhase, Layout, MediaItem, MediaKind};

const UNTITLED: &str = "Untitled Project";
const DRAFTING: &str = "Drafting phase...";
const PREVIEW_HEADING: &str = "Your Vision, Realized";
const PREVIEW_SUBHEADING: &str = "Describe your idea and let AI generate the perfect content for you.";
const PREVIEW_HEADING_COLOR: &str = "#1e293b";
const FOOTER: &str = "Generated via LuminaLayout AI";
const THUMBNAIL_LIMIT: usize = 4;

// =============================================================================
// DASHBOARD
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub theme_color: String,
    /// First image in the layout, if any.
    pub cover_url: Option<String>,
    pub thumbnails: Vec<Thumbnail>,
    /// Media beyond the thumbnail strip.
    pub overflow: usize,
    /// Short creation date, e.g. `Oct 7`.
    pub modified: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thumbnail {
    pub id: String,
    pub kind: MediaKind,
    /// Set for images only; other kinds show `label`.
    pub image_url: Option<String>,
    pub label: String,
}

impl LayoutCard {
    #[must_use]
    pub fn from_layout(layout: &Layout) -> Self {
        Self {
            id: layout.id.clone(),
            title: or_fallback(&layout.title, UNTITLED),
            description: or_fallback(&layout.description, DRAFTING),
            theme_color: layout.theme_color.clone(),
            cover_url: first_image(layout).map(|m| m.url.clone()),
            thumbnails: layout
                .media
                .iter()
                .take(THUMBNAIL_LIMIT)
                .map(Thumbnail::from_media)
                .collect(),
            overflow: layout.media.len().saturating_sub(THUMBNAIL_LIMIT),
            modified: short_date(layout.created_at),
        }
    }
}

impl Thumbnail {
    fn from_media(item: &MediaItem) -> Self {
        let image_url = (item.kind == MediaKind::Image).then(|| item.url.clone());
        let label = item.kind.as_str()[..1].to_ascii_uppercase();
        Self { id: item.id.clone(), kind: item.kind, image_url, label }
    }
}

/// Cards for every saved layout, in collection order.
#[must_use]
pub fn dashboard(layouts: &[Layout]) -> Vec<LayoutCard> {
    layouts.iter().map(LayoutCard::from_layout).collect()
}

/// Format epoch milliseconds as `Mon D` (UTC). Out-of-range stamps render empty.
#[must_use]
pub fn short_date(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%b %-d").to_string())
        .unwrap_or_default()
}

// =============================================================================
// PREVIEW
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    pub heading: String,
    pub heading_color: String,
    pub subheading: String,
    pub theme_color: String,
    /// Theme color at low alpha, for the hero backdrop.
    pub hero_tint: String,
    pub hero_image: Option<String>,
    pub sections: Vec<PreviewSection>,
    /// Images after the hero.
    pub gallery: Vec<MediaItem>,
    pub videos: Vec<MediaItem>,
    pub audio: Vec<MediaItem>,
    pub footer: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewSection {
    /// Two-digit ordinal, `01`, `02`, ...
    pub number: String,
    pub heading: String,
    pub body: String,
}

impl Preview {
    #[must_use]
    pub fn from_layout(layout: &Layout) -> Self {
        let of_kind = |kind: MediaKind| -> Vec<MediaItem> {
            layout
                .media
                .iter()
                .filter(|m| m.kind == kind)
                .cloned()
                .collect()
        };
        let mut images = of_kind(MediaKind::Image).into_iter();
        let hero_image = images.next().map(|m| m.url);

        Self {
            heading: or_fallback(&layout.title, PREVIEW_HEADING),
            heading_color: or_fallback(&layout.theme_color, PREVIEW_HEADING_COLOR),
            subheading: or_fallback(&layout.description, PREVIEW_SUBHEADING),
            theme_color: layout.theme_color.clone(),
            hero_tint: format!("{}10", layout.theme_color),
            hero_image,
            sections: layout
                .sections
                .iter()
                .enumerate()
                .map(|(idx, s)| PreviewSection {
                    number: format!("{:02}", idx + 1),
                    heading: s.heading.clone(),
                    body: s.body.clone(),
                })
                .collect(),
            gallery: images.collect(),
            videos: of_kind(MediaKind::Video),
            audio: of_kind(MediaKind::Audio),
            footer: FOOTER,
        }
    }
}

// =============================================================================
// EDIT FORM
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorView {
    pub layout: Layout,
    pub phase: AiPhase,
    pub busy: bool,
    /// Progress line while busy.
    pub status: Option<&'static str>,
    pub can_improve: bool,
    pub can_generate_image: bool,
    pub preview: Preview,
}

impl EditorView {
    #[must_use]
    pub fn new(layout: &Layout, phase: AiPhase) -> Self {
        let busy = phase.is_busy();
        Self {
            layout: layout.clone(),
            phase,
            busy,
            status: busy.then(|| phase.status_text()),
            can_improve: !busy && layout.has_brief(),
            can_generate_image: !busy && !layout.description.is_empty(),
            preview: Preview::from_layout(layout),
        }
    }
}

fn first_image(layout: &Layout) -> Option<&MediaItem> {
    layout.media.iter().find(|m| m.kind == MediaKind::Image)
}

fn or_fallback(value: &str, fallback: &str) -> String {
    if value.is_empty() { fallback.to_string() } else { value.to_string() }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
