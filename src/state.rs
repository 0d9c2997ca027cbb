//! Layout data model and shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It owns the single `Studio`: the saved layout collection, the detached
//! working copy being edited, and the AI phase that gates the generative
//! workflows. Nothing here is persisted; a restart starts empty.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::llm::LlmGenerate;

/// Id prefix reserved for the single AI hero image of a layout.
pub const AI_HERO_PREFIX: &str = "ai-hero-";

/// Fresh unique id for layouts, sections and media.
#[must_use]
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current time as milliseconds since Unix epoch.
#[must_use]
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// =============================================================================
// MEDIA
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

impl MediaKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }
}

/// An image, video or audio asset owned by exactly one layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    /// Data URL or remote URL.
    pub url: String,
    pub name: String,
}

impl MediaItem {
    #[must_use]
    pub fn is_ai_hero(&self) -> bool {
        self.id.starts_with(AI_HERO_PREFIX)
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSection {
    pub id: String,
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub id: String,
    pub title: String,
    pub description: String,
    pub sections: Vec<ContentSection>,
    pub media: Vec<MediaItem>,
    pub theme_color: String,
    /// Milliseconds since Unix epoch.
    pub created_at: i64,
}

impl Layout {
    /// Empty layout with a fresh id, stamped now.
    #[must_use]
    pub fn blank(theme_color: &str) -> Self {
        Self {
            id: new_id(),
            title: String::new(),
            description: String::new(),
            sections: Vec::new(),
            media: Vec::new(),
            theme_color: theme_color.to_string(),
            created_at: now_ms(),
        }
    }

    #[must_use]
    pub fn has_brief(&self) -> bool {
        !self.title.is_empty() || !self.description.is_empty()
    }
}

// =============================================================================
// AI PHASE
// =============================================================================

/// Where the generative workflow currently is. Anything but `Idle` is busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiPhase {
    #[default]
    Idle,
    Refining,
    Illustrating,
    GeneratingImage,
}

impl AiPhase {
    #[must_use]
    pub fn is_busy(self) -> bool {
        self != Self::Idle
    }

    /// Status line shown while the phase is active.
    #[must_use]
    pub fn status_text(self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Refining => "Refining narrative...",
            Self::Illustrating => "Painting visual assets...",
            Self::GeneratingImage => "Generating custom visual...",
        }
    }
}

// =============================================================================
// STUDIO
// =============================================================================

/// All mutable application state.
#[derive(Debug, Clone)]
pub struct Studio {
    /// Saved layouts, newest first.
    pub layouts: Vec<Layout>,
    /// Detached working copy, not reflected in `layouts` until saved.
    pub active: Option<Layout>,
    pub phase: AiPhase,
    /// Theme for new drafts and for AI replies that omit one.
    pub default_theme: String,
}

impl Studio {
    #[must_use]
    pub fn new(default_theme: impl Into<String>) -> Self {
        Self { layouts: Vec::new(), active: None, phase: AiPhase::Idle, default_theme: default_theme.into() }
    }

    /// The active layout, but only if it is still the one with `id`.
    pub fn active_if(&mut self, id: &str) -> Option<&mut Layout> {
        self.active.as_mut().filter(|l| l.id == id)
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub studio: Arc<RwLock<Studio>>,
    /// Optional LLM client. `None` if LLM env vars are not configured.
    pub llm: Option<Arc<dyn LlmGenerate>>,
}

impl AppState {
    #[must_use]
    pub fn new(default_theme: impl Into<String>, llm: Option<Arc<dyn LlmGenerate>>) -> Self {
        Self { studio: Arc::new(RwLock::new(Studio::new(default_theme))), llm }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
