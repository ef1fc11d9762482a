//! Reading-time estimates.
//!
//! Two computations live here and they intentionally disagree on empty
//! input: the render path counts raw words with no floor (empty text reads
//! in 0 minutes), while [`estimate_reading_time`] counts plain-text words
//! and never reports less than one minute. Callers may depend on either.

use crate::plain_text::extract_plain_text;

/// Reading speed used by every estimate.
pub const WORDS_PER_MINUTE: usize = 200;

/// Minutes to read `text`, counting its raw whitespace-separated words.
///
/// Markdown syntax is not stripped. Empty or whitespace-only text yields 0.
pub(crate) fn raw_reading_time(text: &str) -> u32 {
    minutes_for(text.split_whitespace().count())
}

/// Estimate minutes to read a document, never less than one.
///
/// Words are counted on the plain-text form of the document, so markup and
/// fenced code do not inflate the estimate.
///
/// # Example
///
/// ```
/// use quill_content::estimate_reading_time;
///
/// assert_eq!(estimate_reading_time(""), 1);
/// assert_eq!(estimate_reading_time(&"word ".repeat(401)), 3);
/// ```
pub fn estimate_reading_time(document: &str) -> u32 {
    let plain = extract_plain_text(document);
    let words = plain.split_whitespace().filter(|w| !w.is_empty()).count();
    minutes_for(words).max(1)
}

fn minutes_for(words: usize) -> u32 {
    u32::try_from(words.div_ceil(WORDS_PER_MINUTE)).unwrap_or(u32::MAX)
}
