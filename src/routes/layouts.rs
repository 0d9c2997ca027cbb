//! Saved layout collection routes.

use axum::extract::{Path, State};
use axum::response::Json;
use serde::Serialize;

use crate::error::ApiError;
use crate::services::store;
use crate::state::{AppState, Layout};
use crate::view::{self, EditorView, LayoutCard};

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    /// The working copy had this id and is gone.
    pub edit_session_ended: bool,
}

/// `GET /api/layouts`: dashboard cards, newest first.
pub async fn list_layouts(State(state): State<AppState>) -> Json<Vec<LayoutCard>> {
    let studio = state.studio.read().await;
    Json(view::dashboard(&studio.layouts))
}

/// `GET /api/layouts/:id`: fetch one saved layout.
pub async fn get_layout(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Layout>, ApiError> {
    let studio = state.studio.read().await;
    Ok(Json(store::get(&studio, &id)?))
}

/// `DELETE /api/layouts/:id`: remove a saved layout, ending the edit session
/// if it is the active one. Unknown ids are a no-op.
pub async fn delete_layout(State(state): State<AppState>, Path(id): Path<String>) -> Json<DeleteResponse> {
    let mut studio = state.studio.write().await;
    let deletion = store::delete(&mut studio, &id);
    Json(DeleteResponse { deleted: deletion.removed, edit_session_ended: deletion.session_ended })
}

/// `POST /api/layouts/:id/edit`: open a saved layout as the active working copy.
pub async fn open_layout(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EditorView>, ApiError> {
    let mut studio = state.studio.write().await;
    let layout = store::open(&mut studio, &id)?;
    Ok(Json(EditorView::new(&layout, studio.phase)))
}

#[cfg(test)]
#[path = "layouts_test.rs"]
mod tests;
