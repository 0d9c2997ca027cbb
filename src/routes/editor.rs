//! Active layout editing routes.
//!
//! AI improve and AI image run on a spawned task that the handler awaits.
//! A client that disconnects mid-request does not cancel the workflow, so
//! the phase always returns to idle.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ApiError, ErrorCode};
use crate::services::editor::{self, ImageOutcome, ImproveOutcome, LayoutPatch, MediaUpload};
use crate::services::store::{self, StoreError};
use crate::state::{AppState, Layout, MediaItem, MediaKind};
use crate::view::{EditorView, Preview};

/// A workflow task panicked or was aborted.
#[derive(Debug, thiserror::Error)]
#[error("workflow task failed: {0}")]
pub struct TaskFailed(String);

impl ErrorCode for TaskFailed {
    fn error_code(&self) -> &'static str {
        "E_TASK_FAILED"
    }
}

#[derive(Debug, Serialize)]
pub struct ImproveResponse {
    #[serde(flatten)]
    pub outcome: ImproveOutcome,
    /// Edit form after the run; `None` if nothing is active any more.
    pub editor: Option<EditorView>,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    #[serde(flatten)]
    pub outcome: ImageOutcome,
    pub editor: Option<EditorView>,
}

#[derive(Debug, Serialize)]
pub struct DiscardResponse {
    pub discarded: bool,
}

#[derive(Debug, Deserialize)]
pub struct MediaQuery {
    pub kind: MediaKind,
    pub name: Option<String>,
}

/// Current edit form, if a layout is active.
async fn current_view(state: &AppState) -> Option<EditorView> {
    let studio = state.studio.read().await;
    studio.active.as_ref().map(|layout| EditorView::new(layout, studio.phase))
}

async fn require_view(state: &AppState) -> Result<EditorView, ApiError> {
    current_view(state).await.ok_or_else(|| StoreError::NoActiveLayout.into())
}

fn task_failed(err: &tokio::task::JoinError) -> ApiError {
    warn!(error = %err, "editor: workflow task failed");
    ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, &TaskFailed(err.to_string()))
}

// =============================================================================
// SESSION
// =============================================================================

/// `POST /api/editor`: start a blank draft.
pub async fn create_draft(State(state): State<AppState>) -> (StatusCode, Json<EditorView>) {
    let mut studio = state.studio.write().await;
    let draft = store::create_draft(&mut studio);
    (StatusCode::CREATED, Json(EditorView::new(&draft, studio.phase)))
}

/// `GET /api/editor`: the edit form for the active layout.
pub async fn get_editor(State(state): State<AppState>) -> Result<Json<EditorView>, ApiError> {
    Ok(Json(require_view(&state).await?))
}

/// `PATCH /api/editor`: edit title, description or theme.
pub async fn patch_editor(
    State(state): State<AppState>,
    Json(patch): Json<LayoutPatch>,
) -> Result<Json<EditorView>, ApiError> {
    editor::edit_active(&state, patch).await?;
    Ok(Json(require_view(&state).await?))
}

/// `DELETE /api/editor`: drop the working copy unsaved.
pub async fn discard_editor(State(state): State<AppState>) -> Json<DiscardResponse> {
    let mut studio = state.studio.write().await;
    Json(DiscardResponse { discarded: store::discard(&mut studio) })
}

/// `POST /api/editor/save`: commit the working copy to the collection.
pub async fn save_editor(State(state): State<AppState>) -> Result<Json<Layout>, ApiError> {
    let mut studio = state.studio.write().await;
    Ok(Json(store::save_active(&mut studio)?))
}

/// `GET /api/editor/preview`
pub async fn preview(State(state): State<AppState>) -> Result<Json<Preview>, ApiError> {
    Ok(Json(require_view(&state).await?.preview))
}

// =============================================================================
// AI
// =============================================================================

/// `POST /api/editor/improve`: refine copy and illustrate.
pub async fn improve(State(state): State<AppState>) -> Result<Json<ImproveResponse>, ApiError> {
    let task_state = state.clone();
    let outcome = tokio::spawn(async move { editor::ai_improve(&task_state).await })
        .await
        .map_err(|e| task_failed(&e))??;
    Ok(Json(ImproveResponse { outcome, editor: current_view(&state).await }))
}

/// `POST /api/editor/image`: append an AI image built from the description.
pub async fn generate_image(State(state): State<AppState>) -> Result<Json<ImageResponse>, ApiError> {
    let task_state = state.clone();
    let outcome = tokio::spawn(async move { editor::add_ai_image(&task_state).await })
        .await
        .map_err(|e| task_failed(&e))??;
    Ok(Json(ImageResponse { outcome, editor: current_view(&state).await }))
}

// =============================================================================
// MEDIA AND SECTIONS
// =============================================================================

/// `POST /api/editor/media?kind=&name=`: raw file body.
pub async fn upload_media(
    State(state): State<AppState>,
    Query(query): Query<MediaQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<MediaItem>), ApiError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let file_name = query
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format!("{} upload", query.kind.as_str()));
    let upload = MediaUpload { kind: query.kind, file_name, content_type, bytes: body.to_vec() };
    let item = editor::attach_media(&state, upload).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// `DELETE /api/editor/media/:id`
pub async fn delete_media(
    State(state): State<AppState>,
    Path(media_id): Path<String>,
) -> Result<Json<EditorView>, ApiError> {
    store::remove_media(&mut *state.studio.write().await, &media_id)?;
    Ok(Json(require_view(&state).await?))
}

/// `DELETE /api/editor/sections/:id`
pub async fn delete_section(
    State(state): State<AppState>,
    Path(section_id): Path<String>,
) -> Result<Json<EditorView>, ApiError> {
    store::remove_section(&mut *state.studio.write().await, &section_id)?;
    Ok(Json(require_view(&state).await?))
}

#[cfg(test)]
#[path = "editor_test.rs"]
mod tests;
