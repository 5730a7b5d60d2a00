//! Note model.

use serde::{Deserialize, Serialize};
use jotter_core::types::{RecordId, Timestamp};

use crate::client::Record;

/// A persisted row from the `notes` table.
///
/// A draft that has never been saved is not a `Note`; it has no id and no
/// timestamps until the store assigns them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub id: RecordId,
    pub title: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<RecordId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields sent when inserting a note.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewNote {
    pub title: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<RecordId>,
}

/// Fields sent when saving an existing note. Every field is replaced.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub folder_id: Option<RecordId>,
}

/// Columns a note listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteColumn {
    Title,
    CreatedAt,
    UpdatedAt,
}

impl NoteColumn {
    pub fn as_sql(self) -> &'static str {
        match self {
            NoteColumn::Title => "title",
            NoteColumn::CreatedAt => "created_at",
            NoteColumn::UpdatedAt => "updated_at",
        }
    }
}

impl Record for Note {
    type Column = NoteColumn;
    type New = NewNote;
    type Changes = NoteChanges;

    const TABLE: &'static str = "notes";

    fn id(&self) -> &RecordId {
        &self.id
    }
}
