//! Heading outline extraction.

use crate::plain_text::extract_plain_text;
use crate::slug::generate_slug;
use crate::syntax::HEADING_LINE;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One heading in a document outline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading level (1-3).
    pub level: u8,
    /// Heading text with inline markup stripped.
    pub text: String,
    /// Anchor id, unique within the document.
    pub id: String,
}

/// Collect `#` to `###` headings in document order.
///
/// Headings inside fenced code blocks are skipped. Repeated heading text
/// gets `-1`, `-2`, ... suffixes so ids stay unique.
pub fn extract_toc(document: &str) -> Vec<TocEntry> {
    let mut entries = Vec::new();
    let mut id_counts: HashMap<String, usize> = HashMap::new();
    let mut in_fence = false;

    for line in document.lines() {
        if line.matches("```").count() % 2 == 1 {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        let Some(caps) = HEADING_LINE.captures(line) else {
            continue;
        };
        let level = u8::try_from(caps[1].len()).unwrap_or(3);
        let text = extract_plain_text(&caps[2]);
        let id = unique_id(&mut id_counts, generate_slug(&text));

        entries.push(TocEntry { level, text, id });
    }

    entries
}

fn unique_id(id_counts: &mut HashMap<String, usize>, base_id: String) -> String {
    let count = id_counts.entry(base_id.clone()).or_default();
    let id = match *count {
        0 => base_id,
        n => format!("{base_id}-{n}"),
    };
    *count += 1;
    id
}
