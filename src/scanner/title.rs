//! Page title extraction.
//!
//! Picks a display title out of an HTML body, preferring `<title>`, then the
//! first `<h1>`, then the first `<h2>`, and shortens long titles to fit a
//! table column.

use scraper::{Html, Selector};

/// Longest title kept before truncation.
pub const MAX_TITLE_CHARS: usize = 45;

/// Appended to any shortened title or location.
pub const ELLIPSIS: &str = "...";

/// Tags consulted for a title, in order of preference.
const TITLE_TAGS: [&str; 3] = ["title", "h1", "h2"];

/// Extract a display title from a response body.
///
/// Returns `None` when the body has no non-empty title, h1 or h2 element,
/// including bodies that are not HTML at all.
pub fn extract_title(body: &str) -> Option<String> {
    let document = Html::parse_document(body);

    TITLE_TAGS
        .iter()
        .find_map(|tag| first_text(&document, tag))
        .map(|title| truncate_title(&title))
}

/// Text of the first element matching `tag` that has any.
fn first_text(document: &Html, tag: &str) -> Option<String> {
    let selector = Selector::parse(tag).ok()?;

    document
        .select(&selector)
        .map(|element| normalize(&element.text().collect::<String>()))
        .find(|text| !text.is_empty())
}

/// Remove embedded line breaks and surrounding whitespace.
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Shorten a title longer than [`MAX_TITLE_CHARS`].
///
/// When the cut falls inside a word, the partial word is dropped if an
/// earlier word boundary exists. Shortened titles end with [`ELLIPSIS`].
pub fn truncate_title(title: &str) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= MAX_TITLE_CHARS {
        return title.to_string();
    }

    let head: String = chars[..MAX_TITLE_CHARS].iter().collect();
    let mid_word =
        !chars[MAX_TITLE_CHARS - 1].is_whitespace() && !chars[MAX_TITLE_CHARS].is_whitespace();

    let kept = match head.rfind(char::is_whitespace) {
        Some(boundary) if mid_word => &head[..boundary],
        _ => head.as_str(),
    };

    format!("{}{}", kept.trim_end(), ELLIPSIS)
}

/// Title shown in place of the page title for 301/302 responses.
pub fn redirect_label(location: &str) -> String {
    let location = if location.chars().count() > MAX_TITLE_CHARS {
        let head: String = location.chars().take(MAX_TITLE_CHARS).collect();
        format!("{}{}", head, ELLIPSIS)
    } else {
        location.to_string()
    };

    format!("Redir -> {}", location)
}
