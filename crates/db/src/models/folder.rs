//! Folder model.

use serde::{Deserialize, Serialize};
use jotter_core::types::{RecordId, Timestamp};

use crate::client::Record;

/// A persisted row from the `folders` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Folder {
    pub id: RecordId,
    pub name: String,
    pub created_at: Timestamp,
}

/// Fields sent when inserting a folder. `name` is already trimmed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewFolder {
    pub name: String,
}

/// Fields sent when renaming a folder.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FolderChanges {
    pub name: String,
}

/// Columns a folder listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderColumn {
    Name,
    CreatedAt,
}

impl FolderColumn {
    pub fn as_sql(self) -> &'static str {
        match self {
            FolderColumn::Name => "name",
            FolderColumn::CreatedAt => "created_at",
        }
    }
}

impl Record for Folder {
    type Column = FolderColumn;
    type New = NewFolder;
    type Changes = FolderChanges;

    const TABLE: &'static str = "folders";

    fn id(&self) -> &RecordId {
        &self.id
    }
}
