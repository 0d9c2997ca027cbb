//! Editor workflow: field edits, AI improve, ad hoc AI images and uploads.
//!
//! DESIGN
//! ======
//! AI improve runs Idle → Refining → Illustrating → Idle. The phase lives in
//! the `Studio` and doubles as the single-flight guard: entry checks and sets
//! it under the write lock, and a second AI operation while it is not `Idle`
//! fails with [`EditorError::Busy`]. The lock is released across every AI
//! call so field edits, saves and discards stay responsive.
//!
//! Each operation remembers the id of the layout it started on and only
//! writes results back if that layout is still the active one. A result for
//! a layout that was saved, discarded or replaced in the meantime is dropped.
//! A workflow that panics or is cancelled still returns the phase to `Idle`.
//!
//! ERROR HANDLING
//! ==============
//! A failed refine leaves the layout untouched and is reported as
//! [`ImproveOutcome::RefineFailed`], not as an `Err`: the workflow itself
//! always completes. Image failures are invisible here; the AI service has
//! already turned them into "no image".

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::ai::{self, AiSuggestion};
use super::media;
use super::store::{self, StoreError};
use crate::error::ErrorCode;
use crate::state::{AI_HERO_PREFIX, AiPhase, AppState, ContentSection, Layout, MediaItem, MediaKind, new_id};

const AI_MEDIA_NAME: &str = "AI Generated Media";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("AI operation already in progress: {}", .0.status_text())]
    Busy(AiPhase),
    #[error("active layout changed during {0}")]
    ActiveLayoutChanged(&'static str),
    #[error("{content_type} is not an accepted {kind} type")]
    MediaTypeMismatch { kind: &'static str, content_type: String },
    #[error("media encoding failed: {0}")]
    Encode(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ErrorCode for EditorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Busy(_) => "E_EDITOR_BUSY",
            Self::ActiveLayoutChanged(_) => "E_ACTIVE_LAYOUT_CHANGED",
            Self::MediaTypeMismatch { .. } => "E_MEDIA_TYPE_MISMATCH",
            Self::Encode(_) => "E_MEDIA_ENCODE",
            Self::Store(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Busy(_))
    }
}

/// Partial update of the active layout's editable fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Blank values are ignored; a layout always has a theme.
    pub theme_color: Option<String>,
}

/// How an AI improve run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ImproveOutcome {
    /// Title and description were both empty; nothing was called.
    Skipped,
    /// The refine call failed; the layout is unchanged.
    RefineFailed { error: String },
    /// Copy and sections were replaced; `hero_image` tells whether an
    /// illustration was attached as well.
    Refined { hero_image: bool },
    /// The layout stopped being active before the refined copy arrived;
    /// nothing was applied.
    Superseded,
    /// The refined copy was applied, but the layout stopped being active
    /// before the illustration arrived, so the image was dropped.
    HeroDropped,
}

/// How an ad hoc AI image request ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ImageOutcome {
    /// The description was empty; nothing was called.
    Skipped,
    /// The call failed or returned no image.
    NoImage,
    Added { media: MediaItem },
    Superseded,
}

/// A user-supplied file, already read into memory.
#[derive(Debug, Clone)]
pub struct MediaUpload {
    pub kind: MediaKind,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Snapshot of the brief an AI operation started from.
struct Ticket {
    layout_id: String,
    title: String,
    description: String,
}

// =============================================================================
// FIELD EDITS
// =============================================================================

/// Apply a field patch to the active layout. Allowed while AI is busy.
///
/// # Errors
///
/// Returns [`StoreError::NoActiveLayout`] when nothing is being edited.
pub async fn edit_active(state: &AppState, patch: LayoutPatch) -> Result<Layout, EditorError> {
    let mut studio = state.studio.write().await;
    let layout = store::active_mut(&mut studio)?;
    if let Some(title) = patch.title {
        layout.title = title;
    }
    if let Some(description) = patch.description {
        layout.description = description;
    }
    if let Some(theme) = patch.theme_color.filter(|t| !t.trim().is_empty()) {
        layout.theme_color = theme.trim().to_string();
    }
    Ok(layout.clone())
}

// =============================================================================
// AI IMPROVE
// =============================================================================

/// Refine the active layout's copy, then illustrate it with a hero image.
///
/// # Errors
///
/// Returns [`EditorError::Busy`] if another AI operation is running and
/// [`StoreError::NoActiveLayout`] when nothing is being edited. AI failures
/// are reported through the returned [`ImproveOutcome`].
pub async fn ai_improve(state: &AppState) -> Result<ImproveOutcome, EditorError> {
    let Some(ticket) = begin(state, AiPhase::Refining, Layout::has_brief).await? else {
        info!("editor: improve skipped, empty brief");
        return Ok(ImproveOutcome::Skipped);
    };
    info!(layout_id = %ticket.layout_id, "editor: improve started");

    let reset = PhaseReset::new(state);
    let outcome = run_improve(state, &ticket).await;
    reset.finish().await;

    info!(layout_id = %ticket.layout_id, ?outcome, "editor: improve finished");
    Ok(outcome)
}

async fn run_improve(state: &AppState, ticket: &Ticket) -> ImproveOutcome {
    let suggestion = match ai::refine_content(state.llm.as_ref(), &ticket.title, &ticket.description).await {
        Ok(suggestion) => suggestion,
        Err(e) => {
            warn!(layout_id = %ticket.layout_id, error = %e, "editor: refine failed");
            return ImproveOutcome::RefineFailed { error: e.to_string() };
        }
    };

    {
        let mut studio = state.studio.write().await;
        let default_theme = studio.default_theme.clone();
        let Some(layout) = studio.active_if(&ticket.layout_id) else {
            warn!(layout_id = %ticket.layout_id, "editor: layout no longer active, refine dropped");
            return ImproveOutcome::Superseded;
        };
        apply_suggestion(layout, &suggestion, &default_theme);
        studio.phase = AiPhase::Illustrating;
    }

    let Some(url) =
        ai::generate_image(state.llm.as_ref(), &suggestion.refined_description, Some(&suggestion.refined_title)).await
    else {
        return ImproveOutcome::Refined { hero_image: false };
    };

    let mut studio = state.studio.write().await;
    let Some(layout) = studio.active_if(&ticket.layout_id) else {
        warn!(layout_id = %ticket.layout_id, "editor: layout no longer active, hero image dropped");
        return ImproveOutcome::HeroDropped;
    };
    set_hero_image(layout, url, &suggestion.refined_title);
    ImproveOutcome::Refined { hero_image: true }
}

/// Overwrite copy, theme and sections wholesale. Sections get fresh ids.
fn apply_suggestion(layout: &mut Layout, suggestion: &AiSuggestion, default_theme: &str) {
    layout.title.clone_from(&suggestion.refined_title);
    layout.description.clone_from(&suggestion.refined_description);
    layout.theme_color = match suggestion.suggested_theme.trim() {
        "" => default_theme.to_string(),
        theme => theme.to_string(),
    };
    layout.sections = suggestion
        .sections
        .iter()
        .map(|s| ContentSection { id: new_id(), heading: s.heading.clone(), body: s.body.clone() })
        .collect();
}

/// Prepend a new hero image, replacing any previous one.
fn set_hero_image(layout: &mut Layout, url: String, title: &str) {
    layout.media.retain(|m| !m.is_ai_hero());
    let hero = MediaItem {
        id: format!("{AI_HERO_PREFIX}{}", new_id()),
        kind: MediaKind::Image,
        url,
        name: format!("AI Hero: {title}"),
    };
    layout.media.insert(0, hero);
}

// =============================================================================
// AD HOC AI IMAGE
// =============================================================================

/// Generate an image from the current description and append it to media.
///
/// # Errors
///
/// Returns [`EditorError::Busy`] if another AI operation is running and
/// [`StoreError::NoActiveLayout`] when nothing is being edited.
pub async fn add_ai_image(state: &AppState) -> Result<ImageOutcome, EditorError> {
    let Some(ticket) = begin(state, AiPhase::GeneratingImage, |l| !l.description.is_empty()).await? else {
        info!("editor: ai image skipped, empty description");
        return Ok(ImageOutcome::Skipped);
    };
    info!(layout_id = %ticket.layout_id, "editor: ai image started");

    let reset = PhaseReset::new(state);
    let outcome = run_add_image(state, &ticket).await;
    reset.finish().await;

    info!(layout_id = %ticket.layout_id, ?outcome, "editor: ai image finished");
    Ok(outcome)
}

async fn run_add_image(state: &AppState, ticket: &Ticket) -> ImageOutcome {
    let Some(url) = ai::generate_image(state.llm.as_ref(), &ticket.description, Some(&ticket.title)).await else {
        return ImageOutcome::NoImage;
    };

    let mut studio = state.studio.write().await;
    let Some(layout) = studio.active_if(&ticket.layout_id) else {
        warn!(layout_id = %ticket.layout_id, "editor: layout no longer active, ai image dropped");
        return ImageOutcome::Superseded;
    };
    let item = MediaItem { id: new_id(), kind: MediaKind::Image, url, name: AI_MEDIA_NAME.to_string() };
    layout.media.push(item.clone());
    ImageOutcome::Added { media: item }
}

// =============================================================================
// LOCAL MEDIA
// =============================================================================

/// Encode an uploaded file as a data URL and append it to the active layout.
///
/// # Errors
///
/// Returns [`EditorError::MediaTypeMismatch`] if the declared content type is
/// outside the kind's MIME class, [`StoreError::NoActiveLayout`] when nothing
/// is being edited, and [`EditorError::ActiveLayoutChanged`] if a different
/// layout became active while the file was being encoded.
pub async fn attach_media(state: &AppState, upload: MediaUpload) -> Result<MediaItem, EditorError> {
    let MediaUpload { kind, file_name, content_type, bytes } = upload;
    let mime = media::essence(content_type.as_deref());
    if let Some(mime) = &mime {
        if !kind.accepts(mime) {
            return Err(EditorError::MediaTypeMismatch { kind: kind.as_str(), content_type: mime.clone() });
        }
    }

    let layout_id = {
        let studio = state.studio.read().await;
        studio
            .active
            .as_ref()
            .map(|l| l.id.clone())
            .ok_or(StoreError::NoActiveLayout)?
    };

    let size = bytes.len();
    let url = tokio::task::spawn_blocking(move || media::encode_data_url(mime.as_deref(), &bytes))
        .await
        .map_err(|e| EditorError::Encode(e.to_string()))?;

    let mut studio = state.studio.write().await;
    let layout = studio
        .active_if(&layout_id)
        .ok_or(EditorError::ActiveLayoutChanged("media upload"))?;
    let item = MediaItem { id: new_id(), kind, url, name: file_name };
    layout.media.push(item.clone());

    info!(%layout_id, media_id = %item.id, kind = kind.as_str(), size, "editor: media attached");
    Ok(item)
}

// =============================================================================
// SINGLE-FLIGHT GUARD
// =============================================================================

/// Enter `phase` if idle and `ready` holds for the active layout.
/// `Ok(None)` means the precondition declined and nothing changed.
async fn begin(
    state: &AppState,
    phase: AiPhase,
    ready: impl Fn(&Layout) -> bool,
) -> Result<Option<Ticket>, EditorError> {
    let mut studio = state.studio.write().await;
    if studio.phase.is_busy() {
        return Err(EditorError::Busy(studio.phase));
    }
    let ticket = {
        let layout = store::active_mut(&mut studio)?;
        if !ready(layout) {
            return Ok(None);
        }
        Ticket { layout_id: layout.id.clone(), title: layout.title.clone(), description: layout.description.clone() }
    };
    studio.phase = phase;
    Ok(Some(ticket))
}

/// Returns the phase to `Idle` when the workflow ends. Dropping it without
/// calling `finish` (a panic or a cancelled future) still resets the phase.
struct PhaseReset {
    state: Option<AppState>,
}

impl PhaseReset {
    fn new(state: &AppState) -> Self {
        Self { state: Some(state.clone()) }
    }

    async fn finish(mut self) {
        if let Some(state) = &self.state {
            state.studio.write().await.phase = AiPhase::Idle;
        }
        self.state = None;
    }
}

impl Drop for PhaseReset {
    fn drop(&mut self) {
        let Some(state) = self.state.take() else {
            return;
        };
        warn!("editor: workflow ended abnormally, resetting AI phase");
        if let Ok(mut studio) = state.studio.try_write() {
            studio.phase = AiPhase::Idle;
            return;
        }
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                state.studio.write().await.phase = AiPhase::Idle;
            });
        }
    }
}

#[cfg(test)]
#[path = "editor_test.rs"]
mod tests;
