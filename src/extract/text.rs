//! Text cleaning and HTML text collection helpers

use scraper::{ElementRef, Node};

/// Maximum length of a cleaned text fragment
pub const MAX_TEXT_LEN: usize = 200;

/// Marker appended to truncated descriptions
pub const ELLIPSIS: &str = "...";

/// Elements whose text is never visible
const HIDDEN_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Collapses every run of whitespace (including newlines) to one space and trims
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes all non-ASCII code points
pub fn strip_non_ascii(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}

/// Collapses whitespace and strips non-ASCII, without truncating
///
/// Whitespace is collapsed again after stripping so a removed character
/// never leaves a double or edge space behind.
pub fn normalize_text(text: &str) -> String {
    collapse_whitespace(&strip_non_ascii(&collapse_whitespace(text)))
}

/// Cleans a text fragment: whitespace collapsed, ASCII only, at most 200 chars
pub fn clean_text(text: &str) -> String {
    let mut cleaned = normalize_text(text);
    cleaned.truncate(MAX_TEXT_LEN);
    cleaned
}

/// Keeps the first `limit` characters, appending `...` if anything was cut
pub fn truncate_with_ellipsis(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Concatenates the trimmed visible text nodes below `element`
///
/// Nodes are joined with `separator`. With an empty separator, inline
/// fragments such as `<b>Windows</b><b>Agent</b>` glue into one word.
pub fn visible_text(element: ElementRef<'_>, separator: &str) -> String {
    let mut parts = Vec::new();
    collect_text(element, &mut parts);
    parts.join(separator)
}

fn collect_text<'a>(element: ElementRef<'a>, parts: &mut Vec<&'a str>) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed);
                }
            }
            Node::Element(inner) if !HIDDEN_TAGS.contains(&inner.name()) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, parts);
                }
            }
            _ => {}
        }
    }
}
