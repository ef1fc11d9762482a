//! Handler functions for document CLI commands.
//!
//! Input is read asynchronously; each handler returns the text to print so
//! the dispatcher owns stdout.

use quill_content::{
    ProcessingResult, RenderOptions, TocEntry, ValidationIssue, estimate_reading_time,
    extract_excerpt, extract_plain_text, extract_toc, generate_slug, render_to_html,
    validate_markdown,
};
use quill_core::{Error, Result};
use tokio::io::AsyncReadExt;

/// Input path meaning "read from stdin".
pub const STDIN_INPUT: &str = "-";

// ============================================================================
// Input
// ============================================================================

/// Read a markdown document from a file path or stdin.
pub async fn read_document(input: &str) -> Result<String> {
    if input == STDIN_INPUT {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .map_err(|e| Error::io_with_path(e, "<stdin>"))?;
        return Ok(buf);
    }

    tokio::fs::read_to_string(input)
        .await
        .map_err(|e| Error::io_with_path(e, input))
}

// ============================================================================
// Handlers
// ============================================================================

/// Render a document, as bare HTML or as the full JSON result.
pub fn handle_render(document: &str, options: &RenderOptions, json: bool) -> Result<String> {
    let result = render_to_html(document, options).inspect_err(|e| {
        tracing::error!(error = %e, "Rendering failed");
    })?;

    if json {
        format_render_json(&result)
    } else {
        Ok(result.html_output)
    }
}

/// Plain text of a document.
pub fn handle_plain(document: &str) -> String {
    extract_plain_text(document)
}

/// Excerpt of a document.
pub fn handle_excerpt(document: &str, max_length: usize) -> String {
    extract_excerpt(document, max_length)
}

/// Reading time in minutes.
pub fn handle_reading_time(document: &str) -> String {
    estimate_reading_time(document).to_string()
}

/// Slug for a title.
pub fn handle_slug(title: &str) -> String {
    generate_slug(title)
}

/// Validation report; an error under `strict` when issues exist.
pub fn handle_validate(document: &str, strict: bool) -> Result<String> {
    let issues = validate_markdown(document);
    let report = format_issues(&issues);

    if strict && !issues.is_empty() {
        tracing::warn!(count = issues.len(), "Document failed strict validation");
        return Err(Error::validation(format!(
            "{} issue(s) found\n{report}",
            issues.len()
        )));
    }
    Ok(report)
}

/// Heading outline, one entry per line, indented by level.
pub fn handle_toc(document: &str) -> String {
    format_toc(&extract_toc(document))
}

// ============================================================================
// Formatting
// ============================================================================

fn format_render_json(result: &ProcessingResult) -> Result<String> {
    serde_json::to_string_pretty(result).map_err(|e| Error::serialization(e.to_string()))
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    if issues.is_empty() {
        return "No issues found.".to_string();
    }
    issues
        .iter()
        .map(|issue| format!("  [{}] {issue}", issue.code))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_toc(entries: &[TocEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
            format!("{indent}- {} (#{})", entry.text, entry.id)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Tests
// ============================================================================
