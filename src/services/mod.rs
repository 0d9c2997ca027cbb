//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the layout workflows so route handlers can stay
//! focused on protocol translation. `store` mutates the collection,
//! `editor` drives the active layout and the AI phase, `ai` talks to the
//! model and `media` turns uploads into data URLs.

pub mod ai;
pub mod editor;
pub mod media;
pub mod store;
