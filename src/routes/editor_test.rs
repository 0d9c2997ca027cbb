use std::sync::Arc;

use super::*;
use crate::state::test_helpers::{
    MockLlm, TEST_THEME, layout_with_brief, png, section, seed_active, suggestion_json, test_app_state,
    test_app_state_with_llm,
};

fn upload_headers(content_type: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, content_type.parse().unwrap());
    headers
}

// =========================================================================
// session
// =========================================================================

#[tokio::test]
async fn create_draft_returns_blank_view() {
    let state = test_app_state();
    let (status, Json(view)) = create_draft(State(state.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(view.layout.theme_color, TEST_THEME);
    assert!(!view.can_improve);
    assert_eq!(state.studio.read().await.active.as_ref().unwrap().id, view.layout.id);
}

#[tokio::test]
async fn get_editor_without_active_is_not_found() {
    let err = get_editor(State(test_app_state())).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.body.code, "E_NO_ACTIVE_LAYOUT");
}

#[tokio::test]
async fn patch_editor_updates_fields() {
    let state = test_app_state();
    create_draft(State(state.clone())).await;
    let patch = LayoutPatch { title: Some("Brief".into()), description: None, theme_color: Some("#ff0000".into()) };

    let Json(view) = patch_editor(State(state), Json(patch)).await.unwrap();
    assert_eq!(view.layout.title, "Brief");
    assert_eq!(view.layout.theme_color, "#ff0000");
    assert_eq!(view.preview.heading, "Brief");
    assert!(view.can_improve);
}

#[tokio::test]
async fn save_editor_moves_draft_into_collection() {
    let state = test_app_state();
    seed_active(&state, layout_with_brief("Keep", "")).await;

    let Json(saved) = save_editor(State(state.clone())).await.unwrap();
    let studio = state.studio.read().await;
    assert!(studio.active.is_none());
    assert_eq!(studio.layouts[0].id, saved.id);
}

#[tokio::test]
async fn save_editor_without_active_is_not_found() {
    let err = save_editor(State(test_app_state())).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn discard_editor_reports_whether_discarded() {
    let state = test_app_state();
    seed_active(&state, layout_with_brief("Drop", "")).await;
    let Json(first) = discard_editor(State(state.clone())).await;
    let Json(second) = discard_editor(State(state.clone())).await;
    assert!(first.discarded);
    assert!(!second.discarded);
    assert!(state.studio.read().await.layouts.is_empty());
}

#[tokio::test]
async fn preview_reflects_active_layout() {
    let state = test_app_state();
    let mut layout = layout_with_brief("", "");
    layout.sections = vec![section("s1")];
    seed_active(&state, layout).await;

    let Json(preview) = preview(State(state)).await.unwrap();
    assert_eq!(preview.heading, "Your Vision, Realized");
    assert_eq!(preview.sections[0].number, "01");
}

// =========================================================================
// AI
// =========================================================================

#[tokio::test]
async fn improve_reports_refined_outcome_with_view() {
    let llm = Arc::new(
        MockLlm::new()
            .with_json(Ok(suggestion_json("Better", "#10b981", &["A", "B", "C"])))
            .with_image(Ok(Some(png("AAAA")))),
    );
    let state = test_app_state_with_llm(llm);
    seed_active(&state, layout_with_brief("Rough", "idea")).await;

    let Json(resp) = improve(State(state)).await.unwrap();
    assert_eq!(resp.outcome, ImproveOutcome::Refined { hero_image: true });
    let view = resp.editor.unwrap();
    assert!(!view.busy);
    assert_eq!(view.layout.title, "Better");
    assert_eq!(view.preview.hero_image.as_deref(), Some("data:image/png;base64,AAAA"));

    let json = serde_json::to_value(ImproveResponse { outcome: resp.outcome, editor: None }).unwrap();
    assert_eq!(json["outcome"], "refined");
    assert_eq!(json["hero_image"], true);
}

#[tokio::test]
async fn improve_without_llm_reports_refine_failure() {
    let state = test_app_state();
    let original = layout_with_brief("Rough", "idea");
    seed_active(&state, original.clone()).await;

    let Json(resp) = improve(State(state)).await.unwrap();
    assert!(matches!(resp.outcome, ImproveOutcome::RefineFailed { .. }));
    assert_eq!(resp.editor.unwrap().layout, original);
}

#[tokio::test]
async fn improve_without_active_is_not_found() {
    let err = improve(State(test_app_state())).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

struct PanicLlm;

#[async_trait::async_trait]
impl crate::llm::LlmGenerate for PanicLlm {
    async fn generate_json(
        &self,
        _prompt: &str,
        _schema: &crate::llm::types::ResponseSchema,
    ) -> Result<String, crate::llm::types::LlmError> {
        panic!("text model exploded");
    }

    async fn generate_image(
        &self,
        _prompt: &str,
        _aspect_ratio: &str,
    ) -> Result<Option<crate::llm::types::InlineImage>, crate::llm::types::LlmError> {
        Ok(None)
    }
}

#[tokio::test]
async fn improve_panic_is_task_failure_and_editor_recovers() {
    let state = test_app_state_with_llm(Arc::new(PanicLlm));
    seed_active(&state, layout_with_brief("Rough", "idea")).await;

    let err = improve(State(state.clone())).await.unwrap_err();
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.body.code, "E_TASK_FAILED");

    let Json(view) = get_editor(State(state.clone())).await.unwrap();
    assert!(!view.busy);
    assert!(view.can_improve);

    let Json(resp) = generate_image(State(state)).await.unwrap();
    assert_eq!(resp.outcome, ImageOutcome::NoImage);
}

#[test]
fn hero_dropped_outcome_serializes_snake_case() {
    let json = serde_json::to_value(ImproveResponse { outcome: ImproveOutcome::HeroDropped, editor: None }).unwrap();
    assert_eq!(json["outcome"], "hero_dropped");
}

#[tokio::test]
async fn generate_image_appends_media() {
    let llm = Arc::new(MockLlm::new().with_image(Ok(Some(png("QkJC")))));
    let state = test_app_state_with_llm(llm);
    seed_active(&state, layout_with_brief("T", "A mountain lake")).await;

    let Json(resp) = generate_image(State(state)).await.unwrap();
    let ImageOutcome::Added { media } = resp.outcome else {
        panic!("expected added outcome");
    };
    assert_eq!(media.name, "AI Generated Media");
    assert_eq!(resp.editor.unwrap().layout.media, vec![media]);
}

#[tokio::test]
async fn generate_image_with_empty_description_is_skipped() {
    let state = test_app_state();
    seed_active(&state, layout_with_brief("Title only", "")).await;
    let Json(resp) = generate_image(State(state)).await.unwrap();
    assert_eq!(resp.outcome, ImageOutcome::Skipped);
}

// =========================================================================
// media and sections
// =========================================================================

#[tokio::test]
async fn upload_media_encodes_body_as_data_url() {
    let state = test_app_state();
    seed_active(&state, layout_with_brief("T", "")).await;
    let query = MediaQuery { kind: MediaKind::Image, name: Some("cat.png".into()) };

    let (status, Json(item)) = upload_media(
        State(state.clone()),
        Query(query),
        upload_headers("image/png"),
        Bytes::from_static(b"ABC"),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item.url, "data:image/png;base64,QUJD");
    assert_eq!(item.name, "cat.png");
    assert_eq!(state.studio.read().await.active.as_ref().unwrap().media.len(), 1);
}

#[tokio::test]
async fn upload_media_defaults_name_and_accepts_missing_content_type() {
    let state = test_app_state();
    seed_active(&state, layout_with_brief("T", "")).await;
    let query = MediaQuery { kind: MediaKind::Audio, name: None };

    let (_, Json(item)) = upload_media(State(state), Query(query), HeaderMap::new(), Bytes::from_static(b"hi"))
        .await
        .unwrap();
    assert_eq!(item.name, "audio upload");
    assert_eq!(item.url, "data:application/octet-stream;base64,aGk=");
}

#[tokio::test]
async fn upload_media_rejects_wrong_class() {
    let state = test_app_state();
    seed_active(&state, layout_with_brief("T", "")).await;
    let query = MediaQuery { kind: MediaKind::Video, name: None };

    let err = upload_media(State(state), Query(query), upload_headers("image/png"), Bytes::new())
        .await
        .unwrap_err();
    assert_eq!(err.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(err.body.code, "E_MEDIA_TYPE_MISMATCH");
}

#[tokio::test]
async fn delete_section_and_media_return_updated_view() {
    let state = test_app_state();
    let mut layout = layout_with_brief("T", "");
    layout.sections = vec![section("s1"), section("s2")];
    layout.media = vec![crate::state::test_helpers::media("m1", MediaKind::Video)];
    seed_active(&state, layout).await;

    let Json(view) = delete_section(State(state.clone()), Path("s1".into())).await.unwrap();
    let ids: Vec<&str> = view.layout.sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["s2"]);

    let Json(view) = delete_media(State(state.clone()), Path("m1".into())).await.unwrap();
    assert!(view.layout.media.is_empty());

    let Json(view) = delete_media(State(state), Path("absent".into())).await.unwrap();
    assert_eq!(view.layout.sections.len(), 1);
}

#[tokio::test]
async fn delete_section_without_active_is_not_found() {
    let err = delete_section(State(test_app_state()), Path("s1".into())).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}
