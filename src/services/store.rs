//! Layout store: saved collection plus the single active working copy.
//!
//! DESIGN
//! ======
//! All operations are synchronous mutations of a `Studio` borrowed from the
//! caller's write guard, so they never hold a lock across an await. The
//! saved collection is newest-first: saving an unknown id inserts at the
//! front, saving a known id replaces it in place.
//!
//! Deleting the layout that is currently being edited also ends the edit
//! session; there is nothing left to save it over.

use tracing::info;

use crate::error::ErrorCode;
use crate::state::{ContentSection, Layout, MediaItem, Studio};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("layout not found: {0}")]
    NotFound(String),
    #[error("no active layout")]
    NoActiveLayout,
}

impl ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "E_LAYOUT_NOT_FOUND",
            Self::NoActiveLayout => "E_NO_ACTIVE_LAYOUT",
        }
    }
}

/// Anything removable from an owned list by id.
pub trait HasId {
    fn id(&self) -> &str;
}

impl HasId for ContentSection {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for MediaItem {
    fn id(&self) -> &str {
        &self.id
    }
}

impl HasId for Layout {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Remove the entry with `id`, preserving the order of the rest.
/// Returns whether anything was removed.
pub fn remove_by_id<T: HasId>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

// =============================================================================
// SAVED COLLECTION
// =============================================================================

/// Start a new draft and make it the active layout. Any previous working
/// copy is dropped unsaved.
pub fn create_draft(studio: &mut Studio) -> Layout {
    let draft = Layout::blank(&studio.default_theme);
    info!(layout_id = %draft.id, "store: draft created");
    studio.active = Some(draft.clone());
    draft
}

/// Insert-or-replace `layout` by id, then clear the active layout.
pub fn save(studio: &mut Studio, layout: Layout) {
    if let Some(existing) = studio.layouts.iter_mut().find(|l| l.id == layout.id) {
        info!(layout_id = %layout.id, "store: layout replaced");
        *existing = layout;
    } else {
        info!(layout_id = %layout.id, "store: layout inserted");
        studio.layouts.insert(0, layout);
    }
    studio.active = None;
}

/// Save the active layout.
///
/// # Errors
///
/// Returns [`StoreError::NoActiveLayout`] when nothing is being edited.
pub fn save_active(studio: &mut Studio) -> Result<Layout, StoreError> {
    let layout = studio.active.take().ok_or(StoreError::NoActiveLayout)?;
    save(studio, layout.clone());
    Ok(layout)
}

/// Drop the active layout without saving. Returns whether one existed.
pub fn discard(studio: &mut Studio) -> bool {
    let discarded = studio.active.take();
    if let Some(layout) = &discarded {
        info!(layout_id = %layout.id, "store: draft discarded");
    }
    discarded.is_some()
}

/// What a [`delete`] call changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deletion {
    /// A saved layout with the id was removed.
    pub removed: bool,
    /// The active layout had the id and was dropped with it.
    pub session_ended: bool,
}

/// Remove a saved layout. Ends the edit session if it is the active one,
/// which also covers an unsaved draft with that id.
pub fn delete(studio: &mut Studio, id: &str) -> Deletion {
    let removed = remove_by_id(&mut studio.layouts, id);
    let session_ended = studio.active.as_ref().is_some_and(|l| l.id == id);
    if session_ended {
        info!(layout_id = %id, "store: deleted layout was active, edit session ended");
        studio.active = None;
    }
    if removed {
        info!(layout_id = %id, "store: layout deleted");
    }
    Deletion { removed, session_ended }
}

/// Fetch a saved layout by id.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] for an unknown id.
pub fn get(studio: &Studio, id: &str) -> Result<Layout, StoreError> {
    studio
        .layouts
        .iter()
        .find(|l| l.id == id)
        .cloned()
        .ok_or_else(|| StoreError::NotFound(id.to_string()))
}

/// Open a saved layout for editing as a detached working copy.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] for an unknown id.
pub fn open(studio: &mut Studio, id: &str) -> Result<Layout, StoreError> {
    let layout = get(studio, id)?;
    info!(layout_id = %id, "store: layout opened for editing");
    studio.active = Some(layout.clone());
    Ok(layout)
}

// =============================================================================
// ACTIVE LAYOUT PARTS
// =============================================================================

/// Borrow the active layout mutably.
///
/// # Errors
///
/// Returns [`StoreError::NoActiveLayout`] when nothing is being edited.
pub fn active_mut(studio: &mut Studio) -> Result<&mut Layout, StoreError> {
    studio.active.as_mut().ok_or(StoreError::NoActiveLayout)
}

/// Remove one section from the active layout. Absent ids are a no-op.
///
/// # Errors
///
/// Returns [`StoreError::NoActiveLayout`] when nothing is being edited.
pub fn remove_section(studio: &mut Studio, section_id: &str) -> Result<bool, StoreError> {
    Ok(remove_by_id(&mut active_mut(studio)?.sections, section_id))
}

/// Remove one media item from the active layout. Absent ids are a no-op.
///
/// # Errors
///
/// Returns [`StoreError::NoActiveLayout`] when nothing is being edited.
pub fn remove_media(studio: &mut Studio, media_id: &str) -> Result<bool, StoreError> {
    Ok(remove_by_id(&mut active_mut(studio)?.media, media_id))
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
