//! Structural validation of markdown documents.
//!
//! Checks are advisory: they never fail and every applicable issue is
//! reported, not just the first. Whether issues block a save is the
//! caller's policy.

use crate::syntax::{LINK, MAIN_HEADING};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Documents shorter than this many characters are flagged.
pub const MIN_CONTENT_LENGTH: usize = 100;

// ============================================================================
// Types
// ============================================================================

/// A structural issue found in a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Issue type/code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl ValidationIssue {
    /// Create a new issue.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate a document for common structural problems.
///
/// Checks for:
/// - A missing main (`# `) heading
/// - Content shorter than [`MIN_CONTENT_LENGTH`] characters
/// - An odd number of ```` ``` ```` fences
/// - An odd number of backtick characters
/// - Links with an empty URL
///
/// # Example
///
/// ```
/// use quill_content::validate_markdown;
///
/// let issues = validate_markdown("short");
/// assert!(issues.iter().any(|i| i.code == "MISSING_HEADING"));
/// assert!(issues.iter().any(|i| i.code == "CONTENT_TOO_SHORT"));
/// ```
pub fn validate_markdown(document: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    check_main_heading(document, &mut issues);
    check_length(document, &mut issues);
    check_code_fences(document, &mut issues);
    check_inline_code(document, &mut issues);
    check_link_urls(document, &mut issues);

    if !issues.is_empty() {
        log::debug!("Document has {} validation issue(s)", issues.len());
    }
    issues
}

/// Quick check if a document has no validation issues.
pub fn is_valid(document: &str) -> bool {
    validate_markdown(document).is_empty()
}

// ============================================================================
// Individual checks
// ============================================================================

fn check_main_heading(document: &str, issues: &mut Vec<ValidationIssue>) {
    if !MAIN_HEADING.is_match(document) {
        issues.push(ValidationIssue::new(
            "MISSING_HEADING",
            "Content should have a main heading (# Title)",
        ));
    }
}

fn check_length(document: &str, issues: &mut Vec<ValidationIssue>) {
    if document.chars().count() < MIN_CONTENT_LENGTH {
        issues.push(ValidationIssue::new(
            "CONTENT_TOO_SHORT",
            format!("Content is too short (minimum {MIN_CONTENT_LENGTH} characters)"),
        ));
    }
}

fn check_code_fences(document: &str, issues: &mut Vec<ValidationIssue>) {
    if document.matches("```").count() % 2 != 0 {
        issues.push(ValidationIssue::new(
            "UNMATCHED_FENCE",
            "Unmatched code block fence (```)",
        ));
    }
}

/// Counts every backtick, including those inside fenced blocks.
fn check_inline_code(document: &str, issues: &mut Vec<ValidationIssue>) {
    if document.chars().filter(|&c| c == '`').count() % 2 != 0 {
        issues.push(ValidationIssue::new(
            "UNMATCHED_INLINE_CODE",
            "Unmatched inline code delimiter (`)",
        ));
    }
}

fn check_link_urls(document: &str, issues: &mut Vec<ValidationIssue>) {
    let empty = LINK
        .captures_iter(document)
        .filter(|caps| caps[2].trim().is_empty())
        .count();

    if empty > 0 {
        issues.push(ValidationIssue::new(
            "EMPTY_LINK_URL",
            format!("{empty} link(s) have an empty URL"),
        ));
    }
}
