//! The note editor component.
//!
//! An [`Editor`] owns the uncommitted title/content of one note and a busy
//! flag. Save and delete go through [`NoteActions`] and report back with an
//! [`EditorOutcome`] value; the page that embeds the editor decides where
//! to navigate next. Only one save or delete runs at a time per editor, and
//! a request made while one is in flight is ignored.
//!
//! Over HTTP every submission builds a new `Editor`, so the rendered form
//! carries an editor token. Editors bound to the same token through
//! [`Editor::with_token`] share one busy state in [`InFlightEditors`].

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use jotter_core::text::blank_to_none;
use jotter_core::types::RecordId;
use jotter_db::models::note::Note;

use crate::actions::{NoteActions, SaveNoteParams};

pub const STATUS_SAVING: &str = "Saving...";
pub const STATUS_SAVED: &str = "Saved!";
pub const STATUS_SAVE_FAILED: &str = "Failed to save.";
pub const STATUS_DELETING: &str = "Deleting...";
pub const STATUS_DELETED: &str = "Note deleted.";
pub const STATUS_DELETE_FAILED: &str = "Failed to delete.";

/// Form contents of the editor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    /// Bound once the note exists in the store.
    pub id: Option<RecordId>,
    pub title: String,
    pub content: String,
    pub folder_id: Option<RecordId>,
}

impl Draft {
    pub fn from_note(note: &Note) -> Self {
        Self {
            id: Some(note.id.clone()),
            title: note.title.clone().unwrap_or_default(),
            content: note.content.clone().unwrap_or_default(),
            folder_id: note.folder_id.clone(),
        }
    }
}

/// What a save or delete request ended in.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorOutcome {
    /// The note was stored. `created` is true when it was a new note.
    Saved { note: Note, created: bool },
    Deleted { id: RecordId },
    /// Delete was requested without the user confirming it.
    NeedsConfirmation,
    /// Delete was requested for a note that was never saved.
    NothingToDelete,
    /// The remote operation failed; the form is left as typed.
    Failed {
        status: &'static str,
        message: String,
    },
    /// Another save or delete is still in flight.
    Busy,
}

/// Editor tokens whose save or delete is still running.
#[derive(Debug, Default)]
pub struct InFlightEditors {
    tokens: Mutex<HashSet<String>>,
}

impl InFlightEditors {
    /// Token for a freshly rendered editor form.
    pub fn issue_token() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    pub fn is_in_flight(&self, token: &str) -> bool {
        lock(&self.tokens).contains(token)
    }

    fn claim(self: &Arc<Self>, token: &str) -> Option<TokenClaim> {
        if !lock(&self.tokens).insert(token.to_string()) {
            return None;
        }
        Some(TokenClaim {
            registry: Arc::clone(self),
            token: token.to_string(),
        })
    }
}

struct TokenClaim {
    registry: Arc<InFlightEditors>,
    token: String,
}

impl Drop for TokenClaim {
    fn drop(&mut self) {
        lock(&self.registry.tokens).remove(&self.token);
    }
}

pub struct Editor {
    actions: NoteActions,
    draft: Mutex<Draft>,
    status: Mutex<&'static str>,
    busy: AtomicBool,
    session: Option<(Arc<InFlightEditors>, String)>,
}

struct BusyGuard<'a> {
    busy: &'a AtomicBool,
    _claim: Option<TokenClaim>,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Editor {
    pub fn new(actions: NoteActions, draft: Draft) -> Self {
        Self {
            actions,
            draft: Mutex::new(draft),
            status: Mutex::new(""),
            busy: AtomicBool::new(false),
            session: None,
        }
    }

    /// Share the busy state with every editor bound to `token`. An empty
    /// token leaves the editor on its own.
    pub fn with_token(mut self, registry: Arc<InFlightEditors>, token: &str) -> Self {
        self.session = (!token.is_empty()).then(|| (registry, token.to_string()));
        self
    }

    /// Editor for a note that does not exist yet.
    pub fn blank(actions: NoteActions) -> Self {
        Self::new(actions, Draft::default())
    }

    pub fn draft(&self) -> Draft {
        lock(&self.draft).clone()
    }

    /// Replace the typed title and content.
    pub fn edit(&self, title: impl Into<String>, content: impl Into<String>) {
        let mut draft = lock(&self.draft);
        draft.title = title.into();
        draft.content = content.into();
    }

    pub fn set_folder(&self, folder_id: Option<RecordId>) {
        lock(&self.draft).folder_id = folder_id;
    }

    /// Transient status line shown next to the buttons.
    pub fn status(&self) -> &'static str {
        *lock(&self.status)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn try_begin(&self) -> Option<BusyGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        let mut guard = BusyGuard {
            busy: &self.busy,
            _claim: None,
        };
        if let Some((registry, token)) = &self.session {
            guard._claim = Some(registry.claim(token)?);
        }
        Some(guard)
    }

    fn set_status(&self, status: &'static str) {
        *lock(&self.status) = status;
    }

    /// Insert the draft if it has no id yet, update it otherwise.
    ///
    /// A successful insert binds the new id to the draft, so saving again
    /// updates the same note.
    pub async fn save(&self) -> EditorOutcome {
        let Some(_guard) = self.try_begin() else {
            tracing::debug!("Save ignored, editor busy");
            return EditorOutcome::Busy;
        };
        self.set_status(STATUS_SAVING);

        let draft = self.draft();
        let created = draft.id.is_none();
        let params = SaveNoteParams {
            id: draft.id.clone(),
            title: blank_to_none(&draft.title),
            content: blank_to_none(&draft.content),
            folder_id: draft.folder_id,
        };

        match self.actions.save_note(params).await {
            Ok(note) => {
                if created {
                    lock(&self.draft).id = Some(note.id.clone());
                }
                self.set_status(STATUS_SAVED);
                EditorOutcome::Saved { note, created }
            }
            Err(err) => {
                tracing::warn!(error = %err, note_id = ?draft.id, "Failed to save note");
                self.set_status(STATUS_SAVE_FAILED);
                EditorOutcome::Failed {
                    status: STATUS_SAVE_FAILED,
                    message: err.message,
                }
            }
        }
    }

    /// Delete the bound note once the user has confirmed.
    pub async fn delete(&self, confirmed: bool) -> EditorOutcome {
        let Some(_guard) = self.try_begin() else {
            tracing::debug!("Delete ignored, editor busy");
            return EditorOutcome::Busy;
        };
        let Some(id) = self.draft().id else {
            return EditorOutcome::NothingToDelete;
        };
        if !confirmed {
            return EditorOutcome::NeedsConfirmation;
        }
        self.set_status(STATUS_DELETING);

        match self.actions.delete_note(&id).await {
            Ok(()) => {
                self.set_status(STATUS_DELETED);
                EditorOutcome::Deleted { id }
            }
            Err(err) => {
                tracing::warn!(error = %err, note_id = %id, "Failed to delete note");
                self.set_status(STATUS_DELETE_FAILED);
                EditorOutcome::Failed {
                    status: STATUS_DELETE_FAILED,
                    message: err.message,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use assert_matches::assert_matches;
    use jotter_db::memory::{MemoryDataClient, Operation};
    use jotter_db::models::note::NewNote;
    use jotter_db::DataClient;

    use super::*;
    use crate::cache::ViewCache;

    fn actions(client: &Arc<MemoryDataClient>) -> NoteActions {
        NoteActions::new(client.clone(), Arc::new(ViewCache::disabled()))
    }

    async fn existing_note(client: &MemoryDataClient) -> Note {
        let note = client
            .notes()
            .insert(NewNote {
                title: Some("Draft".into()),
                content: Some("old".into()),
                folder_id: None,
            })
            .await
            .unwrap();
        client.clear_calls();
        note
    }

    #[tokio::test]
    async fn first_save_inserts_and_binds_id() {
        let client = Arc::new(MemoryDataClient::new());
        let editor = Editor::blank(actions(&client));
        editor.edit("Hello", "World");

        let outcome = editor.save().await;

        let note = assert_matches!(outcome, EditorOutcome::Saved { note, created: true } => note);
        assert_eq!(editor.draft().id, Some(note.id.clone()));
        assert_eq!(editor.status(), STATUS_SAVED);
        assert_eq!(client.count_calls("notes", Operation::Insert), 1);
        assert_eq!(client.count_calls("notes", Operation::Update), 0);
    }

    #[tokio::test]
    async fn second_save_updates_the_bound_note() {
        let client = Arc::new(MemoryDataClient::new());
        let editor = Editor::blank(actions(&client));
        editor.save().await;
        let id = editor.draft().id.unwrap();

        editor.edit("again", "");
        let outcome = editor.save().await;

        assert_matches!(outcome, EditorOutcome::Saved { created: false, ref note } if note.id == id);
        assert_eq!(client.count_calls("notes", Operation::Insert), 1);
        assert_eq!(client.count_calls("notes", Operation::Update), 1);
    }

    #[tokio::test]
    async fn editing_existing_note_issues_one_update_with_typed_fields() {
        let client = Arc::new(MemoryDataClient::new());
        let note = existing_note(&client).await;
        let editor = Editor::new(actions(&client), Draft::from_note(&note));

        editor.edit("Hello", "World");
        let outcome = editor.save().await;

        let saved = assert_matches!(outcome, EditorOutcome::Saved { note, created: false } => note);
        assert_eq!(saved.id, note.id);
        assert_eq!(saved.title.as_deref(), Some("Hello"));
        assert_eq!(saved.content.as_deref(), Some("World"));
        assert_eq!(editor.draft().id, Some(note.id.clone()));

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].operation, Operation::Update);
        assert_eq!(calls[0].id, Some(note.id));
    }

    #[tokio::test]
    async fn empty_fields_are_saved_as_null() {
        let client = Arc::new(MemoryDataClient::new());
        let editor = Editor::blank(actions(&client));

        let note = assert_matches!(
            editor.save().await,
            EditorOutcome::Saved { note, .. } => note
        );
        assert_eq!(note.title, None);
        assert_eq!(note.content, None);
    }

    #[tokio::test]
    async fn failed_save_keeps_form_and_reports_status() {
        let client = Arc::new(MemoryDataClient::new());
        let editor = Editor::blank(actions(&client));
        editor.edit("typed", "text");
        client.fail_next("notes", Operation::Insert);

        let outcome = editor.save().await;

        assert_matches!(outcome, EditorOutcome::Failed { status: STATUS_SAVE_FAILED, .. });
        assert_eq!(editor.status(), STATUS_SAVE_FAILED);
        let draft = editor.draft();
        assert_eq!(draft.id, None);
        assert_eq!(draft.title, "typed");
        assert_eq!(draft.content, "text");
        assert!(!editor.is_busy());
    }

    #[tokio::test]
    async fn overlapping_save_is_ignored_while_busy() {
        let client = Arc::new(MemoryDataClient::new());
        client.set_latency(Some(Duration::from_millis(20)));
        let editor = Editor::blank(actions(&client));

        let (first, second) = tokio::join!(editor.save(), editor.save());

        assert_matches!(first, EditorOutcome::Saved { created: true, .. });
        assert_eq!(second, EditorOutcome::Busy);
        assert_eq!(client.count_calls("notes", Operation::Insert), 1);
        assert!(!editor.is_busy());
    }

    #[tokio::test]
    async fn delete_during_save_is_ignored() {
        let client = Arc::new(MemoryDataClient::new());
        let note = existing_note(&client).await;
        client.set_latency(Some(Duration::from_millis(20)));
        let editor = Editor::new(actions(&client), Draft::from_note(&note));

        let (saved, deleted) = tokio::join!(editor.save(), editor.delete(true));

        assert_matches!(saved, EditorOutcome::Saved { .. });
        assert_eq!(deleted, EditorOutcome::Busy);
        assert_eq!(client.count_calls("notes", Operation::Delete), 0);
    }

    #[tokio::test]
    async fn delete_requires_a_bound_id() {
        let client = Arc::new(MemoryDataClient::new());
        let editor = Editor::blank(actions(&client));

        assert_eq!(editor.delete(true).await, EditorOutcome::NothingToDelete);
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn delete_requires_confirmation() {
        let client = Arc::new(MemoryDataClient::new());
        let note = existing_note(&client).await;
        let editor = Editor::new(actions(&client), Draft::from_note(&note));

        assert_eq!(editor.delete(false).await, EditorOutcome::NeedsConfirmation);
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn confirmed_delete_removes_the_note() {
        let client = Arc::new(MemoryDataClient::new());
        let note = existing_note(&client).await;
        let editor = Editor::new(actions(&client), Draft::from_note(&note));

        assert_eq!(
            editor.delete(true).await,
            EditorOutcome::Deleted {
                id: note.id.clone()
            }
        );
        assert_eq!(editor.status(), STATUS_DELETED);
        assert_eq!(client.notes().get(&note.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn failed_delete_leaves_note_intact() {
        let client = Arc::new(MemoryDataClient::new());
        let note = existing_note(&client).await;
        let editor = Editor::new(actions(&client), Draft::from_note(&note));
        client.fail_next("notes", Operation::Delete);

        assert_matches!(
            editor.delete(true).await,
            EditorOutcome::Failed { status: STATUS_DELETE_FAILED, .. }
        );
        assert_eq!(client.notes().get(&note.id).await.unwrap(), Some(note));
    }

    #[tokio::test]
    async fn editors_sharing_a_token_do_not_overlap() {
        let client = Arc::new(MemoryDataClient::new());
        client.set_latency(Some(Duration::from_millis(20)));
        let registry = Arc::new(InFlightEditors::default());
        let token = InFlightEditors::issue_token();
        let first = Editor::blank(actions(&client)).with_token(Arc::clone(&registry), &token);
        let second = Editor::blank(actions(&client)).with_token(Arc::clone(&registry), &token);

        let (a, b) = tokio::join!(first.save(), second.save());

        assert_matches!(a, EditorOutcome::Saved { created: true, .. });
        assert_eq!(b, EditorOutcome::Busy);
        assert_eq!(client.count_calls("notes", Operation::Insert), 1);
        assert!(!registry.is_in_flight(&token));
        assert!(!second.is_busy());
    }

    #[tokio::test]
    async fn token_is_released_after_the_request() {
        let client = Arc::new(MemoryDataClient::new());
        let registry = Arc::new(InFlightEditors::default());
        let token = InFlightEditors::issue_token();

        let first = Editor::blank(actions(&client)).with_token(Arc::clone(&registry), &token);
        assert_matches!(first.save().await, EditorOutcome::Saved { .. });
        let again = Editor::blank(actions(&client)).with_token(Arc::clone(&registry), &token);
        assert_matches!(again.save().await, EditorOutcome::Saved { .. });

        assert_eq!(client.count_calls("notes", Operation::Insert), 2);
    }

    #[tokio::test]
    async fn editors_with_different_tokens_run_independently() {
        let client = Arc::new(MemoryDataClient::new());
        client.set_latency(Some(Duration::from_millis(20)));
        let registry = Arc::new(InFlightEditors::default());
        let first = Editor::blank(actions(&client))
            .with_token(Arc::clone(&registry), &InFlightEditors::issue_token());
        let second = Editor::blank(actions(&client))
            .with_token(Arc::clone(&registry), &InFlightEditors::issue_token());

        let (a, b) = tokio::join!(first.save(), second.save());

        assert_matches!(a, EditorOutcome::Saved { .. });
        assert_matches!(b, EditorOutcome::Saved { .. });
    }
}
