//! HTML rendering.
//!
//! Plain string building with every user-supplied value passed through
//! [`escape_html`](jotter_core::markup::escape_html). Note content is the
//! only thing rendered as markup, via
//! [`render_markup`](jotter_core::markup::render_markup).

pub mod editor;
pub mod layout;
pub mod notes;
pub mod sidebar;
