//! Handlers for the note pages.
//!
//! Each handler embeds an [`Editor`](crate::editor::Editor) and turns its
//! [`EditorOutcome`] into a redirect or a re-rendered page. Remote failures
//! are shown as the editor's status line with the form left as typed. A
//! form resubmitted while its first submission is still running gets 409.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use jotter_core::error::CoreError;
use jotter_core::route::{Route, NOTES_PATH};
use jotter_core::text::display_title;
use jotter_core::types::RecordId;
use jotter_db::models::note::Note;
use serde::Deserialize;

use crate::editor::{Draft, EditorOutcome, InFlightEditors};
use crate::error::{AppError, AppResult};
use crate::handlers::layout;
use crate::sidebar::Sidebar;
use crate::state::AppState;
use crate::views::editor::{render_editor, EditorView};
use crate::views::notes::{
    render_confirm_delete, render_detail_main, render_list_error, render_list_main,
    render_note_list,
};

/// Fields posted by the editor form.
#[derive(Debug, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Empty for "No folder".
    #[serde(default)]
    pub folder_id: String,
    /// Token of the rendered editor that submitted the form.
    #[serde(default)]
    pub editor_token: String,
}

impl NoteForm {
    fn folder(&self) -> Option<RecordId> {
        if self.folder_id.is_empty() {
            None
        } else {
            Some(RecordId::from(self.folder_id.as_str()))
        }
    }
}

/// Fields posted by the delete button and its confirmation page.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    pub confirm: Option<String>,
    #[serde(default)]
    pub editor_token: String,
}

/// HTTP status for an outcome that did not complete the request.
fn failure_status(outcome: &EditorOutcome) -> StatusCode {
    match outcome {
        EditorOutcome::Failed { .. } => StatusCode::BAD_GATEWAY,
        EditorOutcome::Busy => StatusCode::CONFLICT,
        _ => StatusCode::BAD_REQUEST,
    }
}

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub async fn root() -> Redirect {
    Redirect::to(NOTES_PATH)
}

// ---------------------------------------------------------------------------
// GET /notes
// ---------------------------------------------------------------------------

/// List every note, with an editor for a new one.
pub async fn list_notes(State(state): State<AppState>) -> Response {
    render_list(&state, &Draft::default(), "", StatusCode::OK).await
}

async fn render_list(state: &AppState, draft: &Draft, status: &str, code: StatusCode) -> Response {
    let sidebar = Sidebar::load(state.client.as_ref()).await;
    let token = InFlightEditors::issue_token();
    let editor = render_editor(&EditorView {
        draft,
        folders: sidebar.folders(),
        status,
        token: &token,
    });

    let (code, list) = match state.cache.note_list(state.client.as_ref()).await {
        Ok(notes) => (code, render_note_list(&notes)),
        Err(err) => {
            tracing::error!(error = %err, "Failed to load notes");
            (StatusCode::BAD_GATEWAY, render_list_error())
        }
    };

    let main = render_list_main(&editor, &list);
    (code, layout(&sidebar, &Route::NoteList, "Notes", &main)).into_response()
}

// ---------------------------------------------------------------------------
// POST /notes
// ---------------------------------------------------------------------------

/// Create a note and open it.
pub async fn create_note(State(state): State<AppState>, Form(form): Form<NoteForm>) -> Response {
    let editor = state.editor(Draft::default(), &form.editor_token);
    editor.set_folder(form.folder());
    editor.edit(form.title, form.content);

    match editor.save().await {
        EditorOutcome::Saved { note, .. } => Redirect::to(&Route::note(note.id).path()).into_response(),
        outcome => {
            render_list(&state, &editor.draft(), editor.status(), failure_status(&outcome)).await
        }
    }
}

// ---------------------------------------------------------------------------
// GET /notes/{id}
// ---------------------------------------------------------------------------

/// Open one note in the editor.
pub async fn show_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let note = fetch_note(&state, &RecordId::from(id)).await?;
    Ok(render_detail(&state, &Draft::from_note(&note), "", StatusCode::OK).await)
}

/// Load a note for a detail route. A missing note and a failed fetch both
/// end in not-found.
async fn fetch_note(state: &AppState, id: &RecordId) -> AppResult<Arc<Note>> {
    match state.cache.note(state.client.as_ref(), id).await {
        Ok(Some(note)) => Ok(note),
        Ok(None) => {
            tracing::info!(note_id = %id, "Note not found");
            Err(not_found(id))
        }
        Err(err) => {
            tracing::error!(error = %err, note_id = %id, "Failed to fetch note");
            Err(not_found(id))
        }
    }
}

fn not_found(id: &RecordId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Note",
        id: id.clone(),
    })
}

async fn render_detail(state: &AppState, draft: &Draft, status: &str, code: StatusCode) -> Response {
    let sidebar = Sidebar::load(state.client.as_ref()).await;
    let token = InFlightEditors::issue_token();
    let editor = render_editor(&EditorView {
        draft,
        folders: sidebar.folders(),
        status,
        token: &token,
    });
    let route = match &draft.id {
        Some(id) => Route::note(id.clone()),
        None => Route::NoteList,
    };

    let main = render_detail_main(&editor, &draft.content);
    let title = display_title(Some(draft.title.as_str()));
    (code, layout(&sidebar, &route, title, &main)).into_response()
}

// ---------------------------------------------------------------------------
// POST /notes/{id}
// ---------------------------------------------------------------------------

/// Save an existing note and go back to the list.
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<NoteForm>,
) -> Response {
    let editor = state.editor(
        Draft {
            id: Some(RecordId::from(id)),
            folder_id: form.folder(),
            title: form.title,
            content: form.content,
        },
        &form.editor_token,
    );

    match editor.save().await {
        EditorOutcome::Saved { .. } => Redirect::to(NOTES_PATH).into_response(),
        outcome => {
            render_detail(&state, &editor.draft(), editor.status(), failure_status(&outcome)).await
        }
    }
}

// ---------------------------------------------------------------------------
// POST /notes/{id}/delete
// ---------------------------------------------------------------------------

/// Ask for confirmation, or delete when the form carries `confirm=yes`.
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DeleteForm>,
) -> AppResult<Response> {
    let id = RecordId::from(id);
    let note = fetch_note(&state, &id).await?;
    let editor = state.editor(Draft::from_note(&note), &form.editor_token);
    let confirmed = form.confirm.as_deref() == Some("yes");

    let response = match editor.delete(confirmed).await {
        EditorOutcome::Deleted { .. } => Redirect::to(NOTES_PATH).into_response(),
        EditorOutcome::NeedsConfirmation => {
            let sidebar = Sidebar::load(state.client.as_ref()).await;
            let main = render_confirm_delete(&note, &form.editor_token);
            layout(&sidebar, &Route::note(id), "Delete note", &main).into_response()
        }
        outcome => {
            render_detail(&state, &editor.draft(), editor.status(), failure_status(&outcome)).await
        }
    };
    Ok(response)
}
