use super::*;
use crate::state::test_helpers::{layout_with_brief, media, section};

// =========================================================================
// LayoutCard
// =========================================================================

#[test]
fn card_uses_fallbacks_for_empty_copy() {
    let layout = layout_with_brief("", "");
    let card = LayoutCard::from_layout(&layout);
    assert_eq!(card.title, "Untitled Project");
    assert_eq!(card.description, "Drafting phase...");
    assert!(card.cover_url.is_none());
    assert!(card.thumbnails.is_empty());
    assert_eq!(card.overflow, 0);
}

#[test]
fn card_cover_is_first_image_even_after_other_media() {
    let mut layout = layout_with_brief("Campus", "Tour");
    layout.media = vec![media("a1", MediaKind::Audio), media("i1", MediaKind::Image), media("i2", MediaKind::Image)];
    let card = LayoutCard::from_layout(&layout);
    assert_eq!(card.title, "Campus");
    assert_eq!(card.cover_url.as_deref(), Some("https://cdn.example/i1"));
}

#[test]
fn card_limits_thumbnails_and_counts_overflow() {
    let mut layout = layout_with_brief("t", "d");
    layout.media = (0..6)
        .map(|i| media(&format!("m{i}"), if i % 2 == 0 { MediaKind::Image } else { MediaKind::Video }))
        .collect();
    let card = LayoutCard::from_layout(&layout);
    assert_eq!(card.thumbnails.len(), 4);
    assert_eq!(card.overflow, 2);
    assert_eq!(card.thumbnails[0].image_url.as_deref(), Some("https://cdn.example/m0"));
    assert!(card.thumbnails[1].image_url.is_none());
    assert_eq!(card.thumbnails[1].label, "V");
}

#[test]
fn card_formats_creation_date() {
    let mut layout = layout_with_brief("t", "d");
    // 2024-03-05T12:00:00Z
    layout.created_at = 1_709_640_000_000;
    assert_eq!(LayoutCard::from_layout(&layout).modified, "Mar 5");
}

#[test]
fn dashboard_keeps_collection_order() {
    let a = layout_with_brief("a", "");
    let b = layout_with_brief("b", "");
    let cards = dashboard(&[b.clone(), a.clone()]);
    let ids: Vec<&str> = cards.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, [b.id.as_str(), a.id.as_str()]);
}

#[test]
fn card_serializes_camel_case() {
    let json = serde_json::to_value(LayoutCard::from_layout(&layout_with_brief("t", "d"))).unwrap();
    assert!(json.get("themeColor").is_some());
    assert!(json.get("coverUrl").is_some());
}

// =========================================================================
// Preview
// =========================================================================

#[test]
fn preview_splits_media_by_kind() {
    let mut layout = layout_with_brief("t", "d");
    layout.media = vec![
        media("v1", MediaKind::Video),
        media("hero", MediaKind::Image),
        media("a1", MediaKind::Audio),
        media("g1", MediaKind::Image),
        media("g2", MediaKind::Image),
    ];
    let preview = Preview::from_layout(&layout);
    assert_eq!(preview.hero_image.as_deref(), Some("https://cdn.example/hero"));
    let gallery: Vec<&str> = preview.gallery.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(gallery, ["g1", "g2"]);
    assert_eq!(preview.videos.len(), 1);
    assert_eq!(preview.audio.len(), 1);
}

#[test]
fn preview_numbers_sections() {
    let mut layout = layout_with_brief("t", "d");
    layout.sections = vec![section("s1"), section("s2")];
    let preview = Preview::from_layout(&layout);
    assert_eq!(preview.sections[0].number, "01");
    assert_eq!(preview.sections[1].number, "02");
    assert_eq!(preview.sections[1].heading, "s2 heading");
}

#[test]
fn preview_fallback_copy_and_tint() {
    let mut layout = layout_with_brief("", "");
    layout.theme_color = "#6366f1".into();
    let preview = Preview::from_layout(&layout);
    assert_eq!(preview.heading, "Your Vision, Realized");
    assert_eq!(preview.subheading, "Describe your idea and let AI generate the perfect content for you.");
    assert_eq!(preview.hero_tint, "#6366f110");
    assert_eq!(preview.heading_color, "#6366f1");
    assert_eq!(preview.footer, "Generated via LuminaLayout AI");
}

// =========================================================================
// EditorView
// =========================================================================

#[test]
fn editor_view_idle_with_brief_enables_actions() {
    let view = EditorView::new(&layout_with_brief("t", "d"), AiPhase::Idle);
    assert!(!view.busy);
    assert!(view.status.is_none());
    assert!(view.can_improve);
    assert!(view.can_generate_image);
}

#[test]
fn editor_view_title_only_cannot_generate_image() {
    let view = EditorView::new(&layout_with_brief("t", ""), AiPhase::Idle);
    assert!(view.can_improve);
    assert!(!view.can_generate_image);
}

#[test]
fn editor_view_empty_brief_disables_improve() {
    let view = EditorView::new(&layout_with_brief("", ""), AiPhase::Idle);
    assert!(!view.can_improve);
}

#[test]
fn editor_view_busy_disables_everything_and_shows_status() {
    let view = EditorView::new(&layout_with_brief("t", "d"), AiPhase::Illustrating);
    assert!(view.busy);
    assert_eq!(view.status, Some("Painting visual assets..."));
    assert!(!view.can_improve);
    assert!(!view.can_generate_image);
}
