//! Markdown syntax patterns shared by the renderer, the plain-text
//! extractor, the outline builder and the validator.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

pub(crate) static H3: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^### (.*)$").unwrap());

pub(crate) static H2: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^## (.*)$").unwrap());

pub(crate) static H1: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.*)$").unwrap());

/// `#` through `######` at line start, with the whitespace that follows.
pub(crate) static HEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}(?:[ \t]+|$)").unwrap());

/// Heading lines with their level marker captured, for outlines.
pub(crate) static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,3})[ \t]+(.+?)[ \t]*$").unwrap());

/// A line that renders as `<h1>`: a single `#`, a space, then text.
pub(crate) static MAIN_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^# [ \t]*\S").unwrap());

// Emphasis spans never cross a line break.
pub(crate) static BOLD_ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").unwrap());

pub(crate) static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

pub(crate) static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());

/// Backtick run, single-line body, backtick run. Only runs of exactly one
/// backtick delimit a code span; see [`replace_inline_code`].
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(`+)([^`\n]+)(`+)").unwrap());

/// Triple-backtick fenced block, non-greedy.
pub(crate) static FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").unwrap());

pub(crate) static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").unwrap());

pub(crate) static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").unwrap());

pub(crate) static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Replace each single-line `` `code` `` span with `render(code)`.
///
/// A backtick that touches another backtick neither opens nor closes a span,
/// so fences written on one line (`` ```code``` ``) are left for the fence
/// rule.
pub(crate) fn replace_inline_code<'t>(
    text: &'t str,
    render: impl Fn(&str) -> String,
) -> Cow<'t, str> {
    INLINE_CODE.replace_all(text, |caps: &Captures| {
        if caps[1].len() == 1 && caps[3].len() == 1 {
            render(&caps[2])
        } else {
            caps[0].to_string()
        }
    })
}

/// Normalise CRLF line endings to LF.
pub(crate) fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}
