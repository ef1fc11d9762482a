//! Rendering options.

use serde::{Deserialize, Serialize};

/// Options accepted by [`render_to_html`](crate::render_to_html).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Escape `&`, `<`, `>` and `"` in the source before rendering.
    ///
    /// This keeps author-supplied HTML from reaching the page verbatim. It
    /// is not a security-grade sanitizer.
    pub sanitize: bool,
    /// Turn a fence language tag into a `language-*` class on the code element.
    pub highlight_code: bool,
    /// Attach a heading outline to the result.
    pub generate_toc: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            sanitize: true,
            highlight_code: true,
            generate_toc: false,
        }
    }
}

impl RenderOptions {
    /// Options that leave the source untouched apart from markdown rules.
    pub fn plain() -> Self {
        Self {
            sanitize: false,
            highlight_code: false,
            generate_toc: false,
        }
    }

    /// Set whether the source is escaped before rendering.
    pub fn with_sanitize(mut self, sanitize: bool) -> Self {
        self.sanitize = sanitize;
        self
    }

    /// Set whether fence language tags become classes.
    pub fn with_highlight_code(mut self, highlight_code: bool) -> Self {
        self.highlight_code = highlight_code;
        self
    }

    /// Set whether a heading outline is attached.
    pub fn with_toc(mut self, generate_toc: bool) -> Self {
        self.generate_toc = generate_toc;
        self
    }
}
