//! Server actions for notes.
//!
//! The editor never talks to the data client directly; it goes through
//! these actions, which perform the single round trip and then bring the
//! view cache in line with the result.

use std::sync::Arc;

use jotter_core::route::Route;
use jotter_core::types::RecordId;
use jotter_db::models::note::{NewNote, Note, NoteChanges};
use jotter_db::{ClientResult, DataClient};

use crate::cache::ViewCache;

/// Everything the editor submits on save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveNoteParams {
    /// `Some` for an existing note (update), `None` for a draft (insert).
    pub id: Option<RecordId>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<RecordId>,
}

#[derive(Clone)]
pub struct NoteActions {
    client: Arc<dyn DataClient>,
    cache: Arc<ViewCache>,
}

impl NoteActions {
    pub fn new(client: Arc<dyn DataClient>, cache: Arc<ViewCache>) -> Self {
        Self { client, cache }
    }

    /// Update the note when `params.id` is set, insert it otherwise.
    ///
    /// On success the list view is revalidated and the detail view is
    /// seeded with the stored record, so the redirect that follows renders
    /// without reading the note back.
    pub async fn save_note(&self, params: SaveNoteParams) -> ClientResult<Note> {
        let note = match params.id {
            Some(id) => {
                let note = self
                    .client
                    .notes()
                    .update(
                        &id,
                        NoteChanges {
                            title: params.title,
                            content: params.content,
                            folder_id: params.folder_id,
                        },
                    )
                    .await?;
                tracing::info!(note_id = %note.id, "Note updated");
                note
            }
            None => {
                let note = self
                    .client
                    .notes()
                    .insert(NewNote {
                        title: params.title,
                        content: params.content,
                        folder_id: params.folder_id,
                    })
                    .await?;
                tracing::info!(note_id = %note.id, "Note created");
                note
            }
        };

        self.cache.revalidate(&Route::NoteList).await;
        self.cache.prime(&note).await;
        Ok(note)
    }

    /// Delete the note and revalidate the list and its detail view.
    pub async fn delete_note(&self, id: &RecordId) -> ClientResult<()> {
        self.client.notes().delete(id).await?;
        tracing::info!(note_id = %id, "Note deleted");

        self.cache.revalidate(&Route::NoteList).await;
        self.cache.revalidate(&Route::note(id.clone())).await;
        Ok(())
    }
}
