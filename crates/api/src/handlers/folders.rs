//! Handler for inline folder creation from the sidebar.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use jotter_core::route::Route;
use serde::Deserialize;

use crate::handlers::layout;
use crate::sidebar::{FolderCreation, Sidebar};
use crate::state::AppState;
use crate::views::notes::render_folder_error;

/// Fields posted by the sidebar's new-folder form.
#[derive(Debug, Deserialize)]
pub struct FolderForm {
    #[serde(default)]
    pub name: String,
    /// Path of the page the form was submitted from.
    pub return_to: Option<String>,
}

// ---------------------------------------------------------------------------
// POST /folders
// ---------------------------------------------------------------------------

/// Create a folder and return to the page it was created from.
///
/// A blank name goes straight back without touching the store. An
/// unrecognised `return_to` falls back to the note list. A failed insert
/// re-renders the page with the error in the sidebar.
pub async fn create_folder(State(state): State<AppState>, Form(form): Form<FolderForm>) -> Response {
    let route = form
        .return_to
        .as_deref()
        .and_then(Route::from_path)
        .unwrap_or(Route::NoteList);

    let mut sidebar = Sidebar::default();
    sidebar.set_new_folder_name(form.name.as_str());

    match sidebar.create_folder(state.client.as_ref()).await {
        FolderCreation::Created(_) | FolderCreation::Rejected => {
            Redirect::to(&route.path()).into_response()
        }
        FolderCreation::Failed(message) => {
            let mut sidebar = Sidebar::load(state.client.as_ref()).await;
            sidebar.set_error(message.as_str());
            let main = render_folder_error(&message);
            (
                StatusCode::BAD_GATEWAY,
                layout(&sidebar, &route, "Folder not created", &main),
            )
                .into_response()
        }
    }
}
