//! URL slug generation.

use regex::Regex;
use std::sync::LazyLock;

/// Anything that is not an ASCII word character, whitespace or a hyphen.
static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_\s-]").unwrap());

static SEPARATOR_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s_-]+").unwrap());

static EDGE_HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-+|-+$").unwrap());

/// Derive a URL-safe slug from a title.
///
/// Lower-cases and trims the title, drops every character that is not an
/// ASCII word character, whitespace or `-`, collapses runs of
/// whitespace/underscore/hyphen into one `-`, then strips hyphens from both
/// ends. Re-slugging a slug returns it unchanged.
///
/// Duplicate titles produce identical slugs; uniqueness belongs to the
/// persistence layer.
///
/// # Example
///
/// ```
/// use quill_content::generate_slug;
///
/// assert_eq!(generate_slug("Building Modern Web Apps"), "building-modern-web-apps");
/// ```
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let cleaned = NON_SLUG_CHARS.replace_all(lowered.trim(), "");
    let hyphenated = SEPARATOR_RUNS.replace_all(&cleaned, "-");
    EDGE_HYPHENS.replace_all(&hyphenated, "").into_owned()
}
