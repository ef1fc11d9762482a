//! Plain-text extraction for feeds, meta descriptions and word counts.

use crate::syntax::{
    BOLD, BOLD_ITALIC, FENCED_BLOCK, HEADING_MARKER, IMAGE, ITALIC, LINK, WHITESPACE_RUN,
    normalize_newlines, replace_inline_code,
};
use regex::Regex;
use std::borrow::Cow;

/// Default excerpt length, sized for meta description tags.
pub const DEFAULT_EXCERPT_LENGTH: usize = 160;

/// Strip markdown syntax from a document, leaving readable text.
///
/// Heading markers, emphasis markers and inline code markers are removed
/// while their text is kept. Fenced code blocks are dropped entirely.
/// Images keep their alt text and links keep their label. Whitespace runs
/// collapse to single spaces and the result is trimmed.
///
/// # Example
///
/// ```
/// use quill_content::extract_plain_text;
///
/// let text = extract_plain_text("# Hello\n\nSee the **[docs](https://example.com)**.");
/// assert_eq!(text, "Hello See the docs.");
/// ```
pub fn extract_plain_text(document: &str) -> String {
    let text = normalize_newlines(document);
    let text = HEADING_MARKER.replace_all(&text, "");
    let text = BOLD_ITALIC.replace_all(&text, "$1");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = replace_inline_code(&text, |code| code.to_string());
    let text = FENCED_BLOCK.replace_all(&text, "");
    let text = strip_until_stable(&IMAGE, text);
    let text = strip_until_stable(&LINK, text);
    WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
}

/// Plain-text excerpt of at most `max_chars` characters.
///
/// Text longer than the limit is cut back to the last whole word and ends
/// with `…`, which counts toward the limit.
///
/// # Example
///
/// ```
/// use quill_content::extract_excerpt;
///
/// let excerpt = extract_excerpt("# T\n\nThe quick brown fox jumps", 15);
/// assert_eq!(excerpt, "T The quick…");
/// ```
pub fn extract_excerpt(document: &str, max_chars: usize) -> String {
    let plain = extract_plain_text(document);
    if plain.chars().count() <= max_chars {
        return plain;
    }
    if max_chars == 0 {
        return String::new();
    }

    let budget = max_chars - 1;
    let cut: String = plain.chars().take(budget).collect();
    let at_word_break = plain.chars().nth(budget).is_some_and(char::is_whitespace);
    let kept = if at_word_break {
        cut.as_str()
    } else {
        match cut.rfind(' ') {
            Some(idx) if idx > 0 => &cut[..idx],
            _ => cut.as_str(),
        }
    };

    format!("{}…", kept.trim_end())
}

/// Replace `pattern` with its first group until nothing matches.
///
/// A single pass can leave syntax behind when brackets nest, e.g.
/// `[[a](b)](c)` becomes `[a](c)`. Every pass removes at least the `](…)`
/// part of a match, so the loop terminates.
fn strip_until_stable<'a>(pattern: &Regex, text: Cow<'a, str>) -> Cow<'a, str> {
    let mut current = text;
    while pattern.is_match(&current) {
        current = Cow::Owned(pattern.replace_all(&current, "$1").into_owned());
    }
    current
}
