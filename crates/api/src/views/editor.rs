use jotter_core::markup::escape_html;
use jotter_core::route::{Route, NOTES_PATH};
use jotter_db::models::folder::Folder;

use crate::editor::Draft;

/// Everything the editor form shows.
pub struct EditorView<'a> {
    pub draft: &'a Draft,
    /// Choices for the folder select.
    pub folders: &'a [Folder],
    /// Status line from the last save or delete.
    pub status: &'a str,
    /// Editor token shared by the save and delete forms.
    pub token: &'a str,
}

/// Render the editor: the save form and, for a stored note, the delete form.
///
/// A draft without id posts to the list route (create); a stored note
/// posts to its own route (update).
pub fn render_editor(view: &EditorView<'_>) -> String {
    let draft = view.draft;
    let action = match &draft.id {
        Some(id) => Route::note(id.clone()).path(),
        None => NOTES_PATH.to_string(),
    };

    let mut html = String::from(r#"<div class="editor">"#);
    html.push_str(&format!(
        r#"<form method="post" action="{}"><input type="text" name="title" placeholder="Title" value="{}"><textarea name="content" placeholder="Write your note here...">{}</textarea>"#,
        escape_html(&action),
        escape_html(&draft.title),
        escape_html(&draft.content)
    ));
    html.push_str(&token_input(view.token));
    html.push_str(&render_folder_select(draft, view.folders));
    html.push_str(r#"<div class="actions"><button type="submit">Save</button></div></form>"#);

    if let Some(id) = &draft.id {
        html.push_str(&format!(
            r#"<form method="post" action="{}/delete">{}<button type="submit" class="danger">Delete</button></form>"#,
            escape_html(&Route::note(id.clone()).path()),
            token_input(view.token)
        ));
    }

    html.push_str(&format!(
        r#"<div class="status" role="status">{}</div></div>"#,
        escape_html(view.status)
    ));
    html
}

/// Hidden field carrying the editor token.
pub fn token_input(token: &str) -> String {
    format!(
        r#"<input type="hidden" name="editor_token" value="{}">"#,
        escape_html(token)
    )
}

fn render_folder_select(draft: &Draft, folders: &[Folder]) -> String {
    let mut html = String::from(r#"<label>Folder <select name="folder_id">"#);
    let none_selected = if draft.folder_id.is_none() {
        " selected"
    } else {
        ""
    };
    html.push_str(&format!(r#"<option value=""{none_selected}>No folder</option>"#));

    let mut current_listed = false;
    for folder in folders {
        let selected = draft.folder_id.as_ref() == Some(&folder.id);
        current_listed |= selected;
        html.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            escape_html(folder.id.as_str()),
            if selected { " selected" } else { "" },
            escape_html(&folder.name)
        ));
    }

    // Keep an assignment the folder list does not know about, so saving
    // does not silently move the note out of its folder.
    if let (Some(folder_id), false) = (&draft.folder_id, current_listed) {
        html.push_str(&format!(
            r#"<option value="{}" selected>(unknown folder)</option>"#,
            escape_html(folder_id.as_str())
        ));
    }

    html.push_str("</select></label>");
    html
}
