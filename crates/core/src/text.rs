//! Small text rules shared by the list page, sidebar and editor.

/// Number of leading characters kept in a list-page excerpt.
pub const EXCERPT_CHARS: usize = 100;

/// Suffix appended to every excerpt.
pub const EXCERPT_SUFFIX: &str = "...";

/// Label shown for a note without a title.
pub const UNTITLED_NOTE: &str = "Untitled note";

/// Leading substring of a note's content for the list page.
///
/// Cuts at a fixed character count without looking for word boundaries,
/// and always appends [`EXCERPT_SUFFIX`]. Empty or missing content has no
/// excerpt.
pub fn excerpt(content: Option<&str>) -> Option<String> {
    let content = content.filter(|c| !c.is_empty())?;
    let mut out: String = content.chars().take(EXCERPT_CHARS).collect();
    out.push_str(EXCERPT_SUFFIX);
    Some(out)
}

/// Title to display for a note, falling back to [`UNTITLED_NOTE`].
pub fn display_title(title: Option<&str>) -> &str {
    match title {
        Some(t) if !t.is_empty() => t,
        _ => UNTITLED_NOTE,
    }
}

/// Map an empty form field to `None`.
///
/// Title and content are optional columns; an empty input is stored as
/// NULL rather than as an empty string.
pub fn blank_to_none(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
