pub mod folders;
pub mod notes;

use axum::response::Html;
use jotter_core::route::Route;

use crate::sidebar::Sidebar;
use crate::views::layout::render_page;
use crate::views::sidebar::render_sidebar;

/// Render `main_html` inside the layout, with the sidebar showing `route`
/// as the current page.
pub(crate) fn layout(sidebar: &Sidebar, route: &Route, title: &str, main_html: &str) -> Html<String> {
    Html(render_page(title, &render_sidebar(sidebar, route), main_html))
}
