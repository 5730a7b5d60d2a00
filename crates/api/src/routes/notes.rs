//! Route definitions for the note pages.
//!
//! Mounted at the root by `page_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// Note routes.
///
/// ```text
/// GET    /                     -> root (redirect to /notes)
/// GET    /notes                -> list_notes
/// POST   /notes                -> create_note
/// GET    /notes/{id}           -> show_note
/// POST   /notes/{id}           -> update_note
/// POST   /notes/{id}/delete    -> delete_note (?confirm=yes in the form body)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notes::root))
        .route("/notes", get(notes::list_notes).post(notes::create_note))
        .route("/notes/{id}", get(notes::show_note).post(notes::update_note))
        .route("/notes/{id}/delete", post(notes::delete_note))
}
