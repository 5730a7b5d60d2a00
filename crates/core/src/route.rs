//! Typed routes for the note views.
//!
//! Handlers bind a [`Route`] from their path parameters instead of
//! re-parsing the request path, and the same value doubles as the key of
//! the view cache and as the redirect target after a mutation.

use std::fmt;

use crate::types::RecordId;

/// Path of the note list view.
pub const NOTES_PATH: &str = "/notes";

/// A page the user can navigate to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// The list of all notes, with an editor for a new one.
    NoteList,
    /// A single note opened in the editor.
    NoteDetail { id: RecordId },
}

impl Route {
    pub fn note(id: RecordId) -> Self {
        Route::NoteDetail { id }
    }

    /// Absolute path of this route.
    pub fn path(&self) -> String {
        match self {
            Route::NoteList => NOTES_PATH.to_string(),
            Route::NoteDetail { id } => format!("{NOTES_PATH}/{id}"),
        }
    }

    /// The note highlighted in the sidebar while this route is shown.
    pub fn selected_note(&self) -> Option<&RecordId> {
        match self {
            Route::NoteList => None,
            Route::NoteDetail { id } => Some(id),
        }
    }

    /// Resolve a path submitted by a form (e.g. a `return_to` field).
    ///
    /// Only the two note views are accepted. Anything else, including
    /// absolute URLs and protocol-relative paths, yields `None` so callers
    /// can never be talked into redirecting off-site.
    pub fn from_path(path: &str) -> Option<Self> {
        let rest = path.strip_prefix(NOTES_PATH)?;
        if rest.is_empty() || rest == "/" {
            return Some(Route::NoteList);
        }
        let id = rest.strip_prefix('/')?;
        let id = id.strip_suffix('/').unwrap_or(id);
        if is_plain_id(id) {
            Some(Route::note(RecordId::from(id)))
        } else {
            None
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn is_plain_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
