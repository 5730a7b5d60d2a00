use jotter_core::markup::escape_html;
use jotter_core::route::{Route, NOTES_PATH};
use jotter_core::text::display_title;
use jotter_core::types::RecordId;

use crate::sidebar::{NoteLink, Sidebar};

/// Render the sidebar for a page showing `route`.
///
/// The note selected by `route` is highlighted, and the new-folder form
/// returns to `route` after submitting.
pub fn render_sidebar(sidebar: &Sidebar, route: &Route) -> String {
    if let Some(error) = sidebar.error() {
        return format!(
            r#"<nav class="sidebar"><p class="error">Error: {}</p></nav>"#,
            escape_html(error)
        );
    }

    let selected = route.selected_note();
    let mut html = String::from(r#"<nav class="sidebar"><h2>Notes</h2>"#);
    html.push_str(&format!(
        r#"<a class="new-note" href="{NOTES_PATH}">+ New note</a>"#
    ));
    html.push_str(&render_new_folder_form(sidebar.new_folder_name(), route));

    let groups = sidebar.groups();
    if !groups.unfiled.is_empty() {
        html.push_str(r#"<section class="unfiled"><h3>Unfiled</h3>"#);
        html.push_str(&render_links(&groups.unfiled, selected));
        html.push_str("</section>");
    }

    for group in &groups.folders {
        let open = if sidebar.is_open(&group.folder.id) {
            " open"
        } else {
            ""
        };
        html.push_str(&format!(
            r#"<details class="folder" data-folder-id="{}"{open}><summary>{}</summary>"#,
            escape_html(group.folder.id.as_str()),
            escape_html(&group.folder.name)
        ));
        html.push_str(&render_links(&group.notes, selected));
        html.push_str("</details>");
    }

    if groups.folders.is_empty() && groups.unfiled.is_empty() {
        html.push_str(r#"<p class="empty">No folders or notes yet.</p>"#);
    }

    html.push_str("</nav>");
    html
}

fn render_new_folder_form(name: &str, route: &Route) -> String {
    format!(
        r#"<form class="new-folder" method="post" action="/folders"><h3>New folder</h3><input type="text" name="name" placeholder="Folder name" value="{}"><input type="hidden" name="return_to" value="{}"><button type="submit">Create folder</button></form>"#,
        escape_html(name),
        escape_html(&route.path())
    )
}

fn render_links(notes: &[&NoteLink], selected: Option<&RecordId>) -> String {
    let mut html = String::from("<ul>");
    for note in notes {
        let class = if selected == Some(&note.id) {
            "note-link selected"
        } else {
            "note-link"
        };
        html.push_str(&format!(
            r#"<li><a class="{class}" href="{}">{}</a></li>"#,
            escape_html(&Route::note(note.id.clone()).path()),
            escape_html(display_title(note.title.as_deref()))
        ));
    }
    html.push_str("</ul>");
    html
}
