//! Markdown to HTML rendering.
//!
//! The renderer is a fixed sequence of substitutions, each applied once over
//! the whole document:
//!
//! 1. `###` / `##` / `#` headings (longest marker first)
//! 2. `***bold italic***`, then `**bold**`, then `*italic*`
//! 3. `` `inline code` ``
//! 4. triple-backtick fenced blocks
//! 5. images, then links
//! 6. paragraphs and line breaks
//! 7. a final paragraph wrap for output that opens with no block element
//!
//! It is not a CommonMark implementation. Malformed input produces imperfect
//! HTML, never an error.

use crate::options::RenderOptions;
use crate::reading_time::raw_reading_time;
use crate::syntax::{
    BOLD, BOLD_ITALIC, FENCED_BLOCK, H1, H2, H3, IMAGE, ITALIC, LINK, normalize_newlines,
    replace_inline_code,
};
use crate::toc::{TocEntry, extract_toc};
use quill_core::{Error, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};
use std::sync::LazyLock;

static PRE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<pre><code[^>]*>.*?</code></pre>").unwrap());

static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[ \t]*\n").unwrap());

static HEADING_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<h([1-3])>.*</h[1-3]>$").unwrap());

static LANGUAGE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_+#.-]+$").unwrap());

// ============================================================================
// Types
// ============================================================================

/// Output of rendering a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// Rendered HTML.
    pub html_output: String,
    /// Minutes to read the raw document. Zero for empty input.
    pub reading_time_minutes: u32,
    /// Heading outline, present when requested in the options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toc: Option<Vec<TocEntry>>,
}

// ============================================================================
// Rendering
// ============================================================================

/// Render a markdown document to HTML.
///
/// The reading time counts whitespace-separated words of the raw document,
/// markup included, at 200 words per minute with no minimum. This differs
/// from [`estimate_reading_time`](crate::estimate_reading_time) on empty
/// input (0 here, 1 there).
///
/// # Errors
///
/// Returns [`Error::Processing`] only if rendering hits an internal fault.
/// Malformed markdown is never an error. No partial HTML is returned.
///
/// # Example
///
/// ```
/// use quill_content::{render_to_html, RenderOptions};
///
/// let doc = "# Hello\n\nThis is **bold** text with a [link](https://example.com).";
/// let result = render_to_html(doc, &RenderOptions::default()).unwrap();
/// assert!(result.html_output.contains("<h1>Hello</h1>"));
/// assert!(result.html_output.contains(r#"<a href="https://example.com">link</a>"#));
/// ```
pub fn render_to_html(document: &str, options: &RenderOptions) -> Result<ProcessingResult> {
    let rendered = panic::catch_unwind(AssertUnwindSafe(|| {
        let html = render_markup(document, options);
        let toc = options.generate_toc.then(|| extract_toc(document));
        (html, toc)
    }));

    let (html_output, toc) = rendered.map_err(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown fault".to_string());
        log::warn!("Markdown rendering failed: {reason}");
        Error::processing(reason)
    })?;

    let reading_time_minutes = raw_reading_time(document);
    log::debug!(
        "Rendered {} bytes of markdown into {} bytes of HTML",
        document.len(),
        html_output.len()
    );

    Ok(ProcessingResult {
        html_output,
        reading_time_minutes,
        toc,
    })
}

fn render_markup(document: &str, options: &RenderOptions) -> String {
    let text = normalize_newlines(document);
    let text = if options.sanitize {
        Cow::Owned(escape_html(&text))
    } else {
        text
    };

    let text = H3.replace_all(&text, "<h3>$1</h3>");
    let text = H2.replace_all(&text, "<h2>$1</h2>");
    let text = H1.replace_all(&text, "<h1>$1</h1>");

    let text = BOLD_ITALIC.replace_all(&text, "<strong><em>$1</em></strong>");
    let text = BOLD.replace_all(&text, "<strong>$1</strong>");
    let text = ITALIC.replace_all(&text, "<em>$1</em>");

    let text = replace_inline_code(&text, |code| format!("<code>{code}</code>"));

    let text = FENCED_BLOCK.replace_all(&text, |caps: &Captures| {
        render_fence(&caps[1], options.highlight_code)
    });

    let text = IMAGE.replace_all(&text, r#"<img src="$2" alt="$1">"#);
    let text = LINK.replace_all(&text, r#"<a href="$2">$1</a>"#);

    wrap_bare(build_blocks(&text))
}

/// Render the inside of a fenced block.
fn render_fence(body: &str, highlight_code: bool) -> String {
    let (language, code) = match body.split_once('\n') {
        Some((first, rest)) if first.trim().is_empty() => (None, rest),
        Some((first, rest)) if LANGUAGE_TAG.is_match(first.trim()) => (Some(first.trim()), rest),
        _ => (None, body),
    };

    match language {
        Some(lang) if highlight_code => {
            format!(r#"<pre><code class="language-{lang}">{code}</code></pre>"#)
        }
        _ => format!("<pre><code>{code}</code></pre>"),
    }
}

/// Split rendered text into block elements.
///
/// Preformatted blocks pass through intact. Everything between them is cut
/// on blank lines; heading lines stand alone and the remaining lines of a
/// block form one paragraph joined by `<br>`.
fn build_blocks(text: &str) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut last = 0;

    for pre in PRE_BLOCK.find_iter(text) {
        push_text_blocks(&text[last..pre.start()], &mut blocks);
        blocks.push(pre.as_str().to_string());
        last = pre.end();
    }
    push_text_blocks(&text[last..], &mut blocks);

    blocks.join("\n")
}

fn push_text_blocks(segment: &str, blocks: &mut Vec<String>) {
    for chunk in BLANK_LINES.split(segment) {
        let mut paragraph: Vec<&str> = Vec::new();

        for line in chunk.lines().filter(|l| !l.trim().is_empty()) {
            if HEADING_ELEMENT.is_match(line) {
                flush_paragraph(&mut paragraph, blocks);
                blocks.push(line.to_string());
            } else {
                paragraph.push(line);
            }
        }
        flush_paragraph(&mut paragraph, blocks);
    }
}

fn flush_paragraph(lines: &mut Vec<&str>, blocks: &mut Vec<String>) {
    if !lines.is_empty() {
        blocks.push(format!("<p>{}</p>", lines.join("<br>")));
        lines.clear();
    }
}

/// Wrap the whole output in a paragraph unless it opens with a block element.
fn wrap_bare(html: String) -> String {
    if html.starts_with("<h") || html.starts_with("<p") || html.starts_with("<pre") {
        html
    } else {
        format!("<p>{html}</p>")
    }
}

/// Escape characters with special meaning in HTML text and attributes.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn render(doc: &str) -> String {
        render_to_html(doc, &RenderOptions::default())
            .unwrap()
            .html_output
    }

    fn render_plain(doc: &str) -> String {
        render_to_html(doc, &RenderOptions::plain())
            .unwrap()
            .html_output
    }

    // ------------------------------------------------------------------------
    // Round trip
    // ------------------------------------------------------------------------

    #[test]
    fn test_render_heading_bold_and_link() {
        let doc = "# Hello\n\nThis is **bold** text with a [link](https://example.com).";
        let result = render_to_html(doc, &RenderOptions::default()).unwrap();
        assert_eq!(
            result.html_output,
            "<h1>Hello</h1>\n<p>This is <strong>bold</strong> text with a \
             <a href=\"https://example.com\">link</a>.</p>"
        );
        assert_eq!(result.reading_time_minutes, 1);
        assert!(result.toc.is_none());
    }

    // ------------------------------------------------------------------------
    // Headings
    // ------------------------------------------------------------------------

    #[test]
    fn test_render_heading_levels() {
        assert_eq!(
            render("# A\n## B\n### C"),
            "<h1>A</h1>\n<h2>B</h2>\n<h3>C</h3>"
        );
    }

    #[test]
    fn test_render_deeper_heading_stays_text() {
        assert_eq!(render("#### four"), "<p>#### four</p>");
    }

    #[test]
    fn test_render_heading_then_body_without_blank_line() {
        assert_eq!(render("# T\nbody"), "<h1>T</h1>\n<p>body</p>");
    }

    // ------------------------------------------------------------------------
    // Inline formatting
    // ------------------------------------------------------------------------

    #[test]
    fn test_render_emphasis_order() {
        assert_eq!(
            render("***a*** **b** *c*"),
            "<p><strong><em>a</em></strong> <strong>b</strong> <em>c</em></p>"
        );
    }

    #[test]
    fn test_render_inline_code() {
        assert_eq!(render("Use `cargo`"), "<p>Use <code>cargo</code></p>");
    }

    #[test]
    fn test_render_image_before_link() {
        assert_eq!(
            render("![Cat](/uploads/cat.png)"),
            r#"<p><img src="/uploads/cat.png" alt="Cat"></p>"#
        );
    }

    // ------------------------------------------------------------------------
    // Fenced blocks
    // ------------------------------------------------------------------------

    #[test]
    fn test_render_fence_with_language_class() {
        assert_eq!(
            render("```rust\nfn main() {}\n```"),
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>"
        );
    }

    #[test]
    fn test_render_fence_language_dropped_without_highlight() {
        let opts = RenderOptions::default().with_highlight_code(false);
        let html = render_to_html("```rust\nfn main() {}\n```", &opts)
            .unwrap()
            .html_output;
        assert_eq!(html, "<pre><code>fn main() {}\n</code></pre>");
    }

    #[test]
    fn test_render_fence_without_language() {
        assert_eq!(
            render("```\nplain\n```"),
            "<pre><code>plain\n</code></pre>"
        );
    }

    #[test]
    fn test_render_single_line_fence() {
        assert_eq!(render("```let x = 1;```"), "<pre><code>let x = 1;</code></pre>");
    }

    #[test]
    fn test_render_single_line_fence_inside_text() {
        assert_eq!(
            render("Intro ``` code ``` outro"),
            "<p>Intro </p>\n<pre><code> code </code></pre>\n<p> outro</p>"
        );
    }

    #[test]
    fn test_render_inline_code_beside_single_line_fence() {
        assert_eq!(
            render("`a` ```b```"),
            "<p><code>a</code> </p>\n<pre><code>b</code></pre>"
        );
    }

    #[test]
    fn test_render_fence_keeps_blank_lines() {
        assert_eq!(
            render("Intro\n\n```\na\n\nb\n```\n\nOutro"),
            "<p>Intro</p>\n<pre><code>a\n\nb\n</code></pre>\n<p>Outro</p>"
        );
    }

    // ------------------------------------------------------------------------
    // Paragraphs
    // ------------------------------------------------------------------------

    #[test]
    fn test_render_paragraphs_and_line_breaks() {
        assert_eq!(
            render("line one\nline two\n\nnext para"),
            "<p>line one<br>line two</p>\n<p>next para</p>"
        );
    }

    #[test]
    fn test_render_keeps_line_indentation() {
        assert_eq!(
            render("first\n    indented\n\n  second para"),
            "<p>first<br>    indented</p>\n<p>  second para</p>"
        );
    }

    #[test]
    fn test_render_crlf_input() {
        assert_eq!(render("# T\r\n\r\nbody"), "<h1>T</h1>\n<p>body</p>");
    }

    #[test]
    fn test_render_empty_document() {
        let result = render_to_html("", &RenderOptions::default()).unwrap();
        assert_eq!(result.html_output, "<p></p>");
        assert_eq!(result.reading_time_minutes, 0);
    }

    #[test]
    fn test_render_whitespace_only_document() {
        let result = render_to_html("  \n\n \t ", &RenderOptions::default()).unwrap();
        assert_eq!(result.html_output, "<p></p>");
        assert_eq!(result.reading_time_minutes, 0);
    }

    // ------------------------------------------------------------------------
    // Options
    // ------------------------------------------------------------------------

    #[test]
    fn test_render_sanitize_escapes_html() {
        assert_eq!(
            render("<script>alert(1)</script>"),
            "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>"
        );
    }

    #[test]
    fn test_render_without_sanitize_passes_html() {
        assert_eq!(
            render_plain("<b>raw</b> & more"),
            "<p><b>raw</b> & more</p>"
        );
    }

    #[test]
    fn test_render_sanitize_escapes_link_url() {
        assert_eq!(
            render("[q](https://example.com/?a=1&b=2)"),
            r#"<p><a href="https://example.com/?a=1&amp;b=2">q</a></p>"#
        );
    }

    #[test]
    fn test_render_with_toc() {
        let opts = RenderOptions::default().with_toc(true);
        let result = render_to_html("# Intro\n\n## Setup Steps\n\ntext", &opts).unwrap();
        let toc = result.toc.unwrap();
        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].level, 1);
        assert_eq!(toc[1].id, "setup-steps");
    }

    // ------------------------------------------------------------------------
    // Reading time
    // ------------------------------------------------------------------------

    #[test]
    fn test_render_reading_time_counts_raw_words() {
        let doc = "word ".repeat(401);
        let result = render_to_html(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(result.reading_time_minutes, 3);
    }

    #[test]
    fn test_render_and_estimate_diverge_on_empty() {
        let rendered = render_to_html("", &RenderOptions::default()).unwrap();
        assert_eq!(rendered.reading_time_minutes, 0);
        assert_eq!(crate::estimate_reading_time(""), 1);
    }

    // ------------------------------------------------------------------------
    // Totality
    // ------------------------------------------------------------------------

    #[test]
    fn test_render_unmatched_delimiters() {
        for doc in [
            "**unclosed",
            "```\nno close",
            "[a](",
            "*",
            "`",
            "![",
            "# ",
            "***",
            "``````",
        ] {
            assert!(
                render_to_html(doc, &RenderOptions::default()).is_ok(),
                "failed on {doc:?}"
            );
            assert!(render_to_html(doc, &RenderOptions::plain()).is_ok());
        }
    }

    #[test]
    fn test_processing_result_json_omits_missing_toc() {
        let result = render_to_html("# Hi", &RenderOptions::default()).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"html_output\""));
        assert!(json.contains("\"reading_time_minutes\":1"));
        assert!(!json.contains("toc"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn code_fragment() -> impl Strategy<Value = String> {
            let word = "[a-z]{1,8}";
            prop_oneof![
                word.prop_map(|w| w),
                word.prop_map(|w| format!("`{w}`")),
                word.prop_map(|w| format!("\n```\n{w}\n```\n")),
                word.prop_map(|w| format!("```{w}```")),
                word.prop_map(|w| format!("``` {w} ```")),
                word.prop_map(|w| format!("`{w}` ```{w}```")),
                word.prop_map(|w| format!("```{w}``` `{w}`")),
            ]
        }

        fn code_document() -> impl Strategy<Value = String> {
            prop::collection::vec((code_fragment(), prop_oneof![Just(" "), Just("\n"), Just("\n\n")]), 0..16)
                .prop_map(|parts| {
                    parts
                        .into_iter()
                        .map(|(frag, sep)| format!("{frag}{sep}"))
                        .collect::<String>()
                })
        }

        proptest! {
            #[test]
            fn render_never_fails(
                doc in any::<String>(),
                sanitize in any::<bool>(),
                highlight in any::<bool>(),
                toc in any::<bool>(),
            ) {
                let opts = RenderOptions { sanitize, highlight_code: highlight, generate_toc: toc };
                prop_assert!(render_to_html(&doc, &opts).is_ok());
            }

            #[test]
            fn code_spans_and_fences_leave_no_backticks(doc in code_document()) {
                let html = render_to_html(&doc, &RenderOptions::default()).unwrap().html_output;
                prop_assert!(!html.contains('`'), "backtick left in {:?}", html);
            }

            #[test]
            fn render_never_fails_on_markdown_noise(doc in "[#*`\\[\\]()! \na-z]{0,120}") {
                let result = render_to_html(&doc, &RenderOptions::default());
                prop_assert!(result.is_ok());
                let html = result.unwrap().html_output;
                prop_assert!(html.starts_with("<h") || html.starts_with("<p"));
            }
        }
    }
}
