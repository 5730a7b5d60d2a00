//! HTML escaping and lightweight-markup rendering for note content.

use pulldown_cmark::{html as md_html, CowStr, Event, Options, Parser, Tag};

/// URL schemes a rendered link or image may point at. Scheme-less
/// (relative) destinations are always allowed.
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Escapes HTML special characters in a user-supplied string.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Converts note content (CommonMark) to an HTML fragment.
///
/// Enables strikethrough and tables. Raw HTML embedded in the content is
/// emitted as escaped text, and link or image destinations with a scheme
/// outside [`SAFE_SCHEMES`] are blanked, so a note cannot inject markup or
/// script into the page.
pub fn render_markup(text: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    let parser = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::Borrowed(""),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Image {
            link_type,
            dest_url: CowStr::Borrowed(""),
            title,
            id,
        }),
        other => other,
    });
    let mut html_output = String::new();
    md_html::push_html(&mut html_output, parser);
    html_output
}

/// Whether `url` is relative or uses one of [`SAFE_SCHEMES`].
///
/// Browsers ignore whitespace and control characters inside a scheme
/// (`java\tscript:`), so those are dropped before the scheme is read.
fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_control())
        .collect();
    match cleaned.find(|c: char| matches!(c, ':' | '/' | '?' | '#')) {
        Some(pos) if cleaned[pos..].starts_with(':') => {
            let scheme = cleaned[..pos].to_ascii_lowercase();
            SAFE_SCHEMES.contains(&scheme.as_str())
        }
        _ => true,
    }
}
