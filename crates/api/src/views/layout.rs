use jotter_core::markup::escape_html;

/// Application name shown in the browser title.
pub const APP_TITLE: &str = "jotter";

const STYLE: &str = "\
body { margin: 0; font-family: system-ui, sans-serif; color: #1f2328; }
.layout { display: flex; min-height: 100vh; }
.sidebar { width: 16rem; background: #f3f4f6; padding: 1rem; border-right: 1px solid #d0d7de; }
.sidebar ul { list-style: none; padding: 0; margin: 0 0 0.5rem 0; }
.sidebar a { display: block; padding: 0.4rem; border-radius: 4px; color: inherit; text-decoration: none; }
.sidebar a:hover, .sidebar a.selected { background: #e5e7eb; }
.sidebar a.selected { font-weight: 600; }
.sidebar details ul { margin-left: 1rem; }
.sidebar summary { cursor: pointer; font-weight: 600; margin: 0.5rem 0; }
.content { flex: 1; padding: 1rem 2rem; overflow-y: auto; }
.editor input[type=text] { width: 100%; font-size: 1.8rem; font-weight: 700; border: none; border-bottom: 2px solid #e5e7eb; }
.editor textarea { width: 100%; height: 16rem; font-size: 1rem; border: none; resize: vertical; }
.editor .actions { display: flex; gap: 0.5rem; align-items: center; margin-top: 1rem; }
.status { color: #6b7280; font-size: 0.9rem; }
.error { color: #b91c1c; }
.note-list { list-style: none; padding: 0; }
.note-list li { border: 1px solid #d0d7de; border-radius: 4px; margin-bottom: 0.5rem; padding: 0.5rem; }
.note-list a { color: inherit; text-decoration: none; }
.excerpt { color: #57606a; font-size: 0.9rem; }
button.danger { background: #dc2626; color: white; }
";

/// Wrap `main_html` in the document shell with the sidebar beside it.
pub fn render_page(title: &str, sidebar_html: &str, main_html: &str) -> String {
    let title = if title.is_empty() {
        APP_TITLE.to_string()
    } else {
        format!("{} - {APP_TITLE}", escape_html(title))
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<div class="layout">
{sidebar_html}
<main class="content">
{main_html}
</main>
</div>
</body>
</html>
"#
    )
}

/// A bare document for error responses rendered without a sidebar.
pub fn render_bare_page(title: &str, main_html: &str) -> String {
    render_page(title, "", main_html)
}
