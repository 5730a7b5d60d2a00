//! The navigation sidebar component.
//!
//! Loads every folder and note, groups the notes by folder in memory and
//! keeps the set of expanded folders. New folders are created inline and
//! merged into the local list from the insert's own response.

use std::collections::{HashMap, HashSet};

use jotter_core::folder::validate_folder_name;
use jotter_core::types::RecordId;
use jotter_db::models::folder::{Folder, FolderColumn, NewFolder};
use jotter_db::models::note::{Note, NoteColumn};
use jotter_db::{DataClient, Order};

/// The slice of a note the sidebar needs.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteLink {
    pub id: RecordId,
    pub title: Option<String>,
    pub folder_id: Option<RecordId>,
}

impl From<Note> for NoteLink {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            folder_id: note.folder_id,
        }
    }
}

/// Notes filed under one folder.
#[derive(Debug, PartialEq)]
pub struct FolderGroup<'a> {
    pub folder: &'a Folder,
    pub notes: Vec<&'a NoteLink>,
}

/// Notes partitioned for display.
#[derive(Debug, PartialEq)]
pub struct SidebarGroups<'a> {
    /// Notes without a folder reference.
    pub unfiled: Vec<&'a NoteLink>,
    /// One group per folder, in folder order, including empty ones.
    pub folders: Vec<FolderGroup<'a>>,
}

/// Partition `notes` by folder reference, keeping their relative order.
///
/// A note whose folder is not in `folders` (e.g. created concurrently by
/// someone else) lands in no group.
pub fn group_notes<'a>(folders: &'a [Folder], notes: &'a [NoteLink]) -> SidebarGroups<'a> {
    let mut unfiled = Vec::new();
    let mut by_folder: HashMap<&RecordId, Vec<&NoteLink>> = HashMap::new();
    for note in notes {
        match &note.folder_id {
            None => unfiled.push(note),
            Some(folder_id) => by_folder.entry(folder_id).or_default().push(note),
        }
    }

    let folders = folders
        .iter()
        .map(|folder| FolderGroup {
            folder,
            notes: by_folder.remove(&folder.id).unwrap_or_default(),
        })
        .collect();

    SidebarGroups { unfiled, folders }
}

/// Result of [`Sidebar::create_folder`].
#[derive(Debug, Clone, PartialEq)]
pub enum FolderCreation {
    Created(Folder),
    /// The name was empty after trimming; nothing was sent.
    Rejected,
    /// The insert failed; the message is also kept in [`Sidebar::error`].
    Failed(String),
}

#[derive(Debug, Default)]
pub struct Sidebar {
    folders: Vec<Folder>,
    notes: Vec<NoteLink>,
    open_folders: HashSet<RecordId>,
    new_folder_name: String,
    error: Option<String>,
}

impl Sidebar {
    /// Fetch folders (by name) and notes (newest first).
    ///
    /// The two reads are independent round trips. A failure is kept as the
    /// sidebar's error instead of failing the page. Every folder starts
    /// expanded.
    pub async fn load(client: &dyn DataClient) -> Self {
        let mut sidebar = Sidebar::default();

        let folders = match client.folders().list(Some(Order::asc(FolderColumn::Name))).await {
            Ok(folders) => folders,
            Err(err) => {
                tracing::error!(error = %err, "Failed to load sidebar folders");
                sidebar.error = Some(err.message);
                return sidebar;
            }
        };
        sidebar.open_folders = folders.iter().map(|f| f.id.clone()).collect();
        sidebar.folders = folders;

        match client.notes().list(Some(Order::desc(NoteColumn::CreatedAt))).await {
            Ok(notes) => sidebar.notes = notes.into_iter().map(NoteLink::from).collect(),
            Err(err) => {
                tracing::error!(error = %err, "Failed to load sidebar notes");
                sidebar.error = Some(err.message);
            }
        }
        sidebar
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn notes(&self) -> &[NoteLink] {
        &self.notes
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn groups(&self) -> SidebarGroups<'_> {
        group_notes(&self.folders, &self.notes)
    }

    pub fn is_open(&self, folder_id: &RecordId) -> bool {
        self.open_folders.contains(folder_id)
    }

    /// Expand a collapsed folder or collapse an expanded one.
    ///
    /// Not called by the request handlers: pages render folders as
    /// `<details>` and the browser toggles them.
    pub fn toggle(&mut self, folder_id: &RecordId) {
        if !self.open_folders.remove(folder_id) {
            self.open_folders.insert(folder_id.clone());
        }
    }

    /// Show `message` in place of the tree.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn new_folder_name(&self) -> &str {
        &self.new_folder_name
    }

    pub fn set_new_folder_name(&mut self, name: impl Into<String>) {
        self.new_folder_name = name.into();
    }

    /// Create a folder from the typed name.
    ///
    /// On success the input is cleared and the returned folder is merged
    /// into the list at its sorted position and expanded. No re-fetch.
    pub async fn create_folder(&mut self, client: &dyn DataClient) -> FolderCreation {
        let Ok(name) = validate_folder_name(&self.new_folder_name) else {
            return FolderCreation::Rejected;
        };
        self.error = None;

        match client.folders().insert(NewFolder { name }).await {
            Ok(folder) => {
                tracing::info!(folder_id = %folder.id, name = %folder.name, "Folder created");
                self.new_folder_name.clear();
                let pos = self.folders.partition_point(|f| f.name <= folder.name);
                self.folders.insert(pos, folder.clone());
                self.open_folders.insert(folder.id.clone());
                FolderCreation::Created(folder)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to create folder");
                self.error = Some(err.message.clone());
                FolderCreation::Failed(err.message)
            }
        }
    }
}
