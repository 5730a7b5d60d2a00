pub mod folders;
pub mod health;
pub mod notes;

use axum::Router;

use crate::state::AppState;

/// Build the page route tree.
///
/// ```text
/// /                        redirect to the note list
/// /notes                   list, create
/// /notes/{id}              detail, update
/// /notes/{id}/delete       confirm and delete
/// /folders                 create from the sidebar
/// ```
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .merge(notes::router())
        .merge(folders::router())
}
