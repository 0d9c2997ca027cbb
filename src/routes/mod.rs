//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON HTTP surface that drives the layout studio:
//! `/api/layouts` for the saved collection and `/api/editor` for the single
//! active working copy. Every handler is a thin translation onto the
//! `services` layer; errors render as `{code, message, retryable}` bodies.

pub mod editor;
pub mod layouts;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::services::editor::EditorError;
use crate::services::store::StoreError;
use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/layouts", get(layouts::list_layouts))
        .route("/api/layouts/{id}", get(layouts::get_layout).delete(layouts::delete_layout))
        .route("/api/layouts/{id}/edit", post(layouts::open_layout))
        .route(
            "/api/editor",
            get(editor::get_editor)
                .post(editor::create_draft)
                .patch(editor::patch_editor)
                .delete(editor::discard_editor),
        )
        .route("/api/editor/save", post(editor::save_editor))
        .route("/api/editor/preview", get(editor::preview))
        .route("/api/editor/improve", post(editor::improve))
        .route("/api/editor/image", post(editor::generate_image))
        .route("/api/editor/media", post(editor::upload_media).layer(DefaultBodyLimit::disable()))
        .route("/api/editor/media/{id}", delete(editor::delete_media))
        .route("/api/editor/sections/{id}", delete(editor::delete_section))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// ERROR MAPPING
// =============================================================================

pub(crate) fn store_error_to_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::NotFound(_) | StoreError::NoActiveLayout => StatusCode::NOT_FOUND,
    }
}

pub(crate) fn editor_error_to_status(err: &EditorError) -> StatusCode {
    match err {
        EditorError::Busy(_) | EditorError::ActiveLayoutChanged(_) => StatusCode::CONFLICT,
        EditorError::MediaTypeMismatch { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        EditorError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EditorError::Store(e) => store_error_to_status(e),
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::new(store_error_to_status(&err), &err)
    }
}

impl From<EditorError> for ApiError {
    fn from(err: EditorError) -> Self {
        Self::new(editor_error_to_status(&err), &err)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
