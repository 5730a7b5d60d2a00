//! Main-area content of the note pages.

use jotter_core::markup::{escape_html, render_markup};
use jotter_core::route::Route;
use jotter_core::text::{display_title, excerpt};
use jotter_db::models::note::Note;

use crate::views::editor::token_input;

pub const NO_NOTES: &str = "No notes yet.";
pub const NO_CONTENT: &str = "No content";
pub const LOAD_ERROR: &str = "An error occurred while loading notes.";

/// List page: the create editor above the list of notes.
pub fn render_list_main(editor_html: &str, list_html: &str) -> String {
    format!(
        r#"<h1>Notes</h1><section class="create"><h2>Create a new note</h2>{editor_html}</section>{list_html}"#
    )
}

/// Every note as a link with its title and a rendered excerpt.
pub fn render_note_list(notes: &[Note]) -> String {
    if notes.is_empty() {
        return format!(r#"<p class="empty">{NO_NOTES}</p>"#);
    }

    let mut html = String::from(r#"<ul class="note-list">"#);
    for note in notes {
        let body = match excerpt(note.content.as_deref()) {
            Some(text) => render_markup(&text),
            None => NO_CONTENT.to_string(),
        };
        html.push_str(&format!(
            r#"<li><a href="{}"><h2>{}</h2><div class="excerpt">{body}</div></a></li>"#,
            escape_html(&Route::note(note.id.clone()).path()),
            escape_html(display_title(note.title.as_deref()))
        ));
    }
    html.push_str("</ul>");
    html
}

/// Shown in place of the list when fetching it failed.
pub fn render_list_error() -> String {
    format!(r#"<p class="error">{LOAD_ERROR}</p>"#)
}

/// Detail page: the pre-filled editor and a preview of the content.
pub fn render_detail_main(editor_html: &str, content: &str) -> String {
    format!(
        r#"<h1>Edit note</h1>{editor_html}<section class="preview"><h2>Preview</h2>{}</section>"#,
        render_markup(content)
    )
}

/// Confirmation step shown before a note is deleted.
///
/// `token` is the editor token of the form that asked for the delete.
pub fn render_confirm_delete(note: &Note, token: &str) -> String {
    let path = escape_html(&Route::note(note.id.clone()).path());
    format!(
        r#"<h1>Delete note</h1><p>Really delete "{}"? This cannot be undone.</p><form method="post" action="{path}/delete"><input type="hidden" name="confirm" value="yes">{}<button type="submit" class="danger">Delete</button> <a href="{path}">Cancel</a></form>"#,
        escape_html(display_title(note.title.as_deref())),
        token_input(token)
    )
}

/// Main area for a failed folder creation.
pub fn render_folder_error(message: &str) -> String {
    format!(
        r#"<h1>Folder not created</h1><p class="error">Failed to create folder: {}</p>"#,
        escape_html(message)
    )
}
