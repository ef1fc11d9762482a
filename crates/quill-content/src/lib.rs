//! Markdown rendering and derived metadata for Quill.
//!
//! Every operation is a pure function over borrowed text: no hidden state,
//! no I/O, safe to call concurrently from any number of threads.
//!
//! # Features
//!
//! - [`render_to_html`]: markdown to HTML plus a reading-time estimate
//! - [`extract_plain_text`] / [`extract_excerpt`]: text for feeds and meta tags
//! - [`estimate_reading_time`]: standalone reading time (floored at one minute)
//! - [`generate_slug`]: URL-safe identifiers from titles
//! - [`validate_markdown`]: advisory structural checks before saving
//! - [`extract_toc`]: heading outline
//!
//! # Example
//!
//! ```
//! use quill_content::{render_to_html, RenderOptions};
//!
//! let result = render_to_html("# Hello\n\nSome **bold** text.", &RenderOptions::default()).unwrap();
//! assert!(result.html_output.starts_with("<h1>Hello</h1>"));
//! assert_eq!(result.reading_time_minutes, 1);
//! ```

pub mod options;
pub mod plain_text;
pub mod reading_time;
pub mod render;
pub mod slug;
mod syntax;
pub mod toc;
pub mod validation;

pub use options::RenderOptions;
pub use plain_text::{DEFAULT_EXCERPT_LENGTH, extract_excerpt, extract_plain_text};
pub use reading_time::{WORDS_PER_MINUTE, estimate_reading_time};
pub use render::{ProcessingResult, render_to_html};
pub use slug::generate_slug;
pub use toc::{TocEntry, extract_toc};
pub use validation::{ValidationIssue, is_valid, validate_markdown};
