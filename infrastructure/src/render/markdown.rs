//! Markdown to sanitized HTML with comrak and ammonia.
//!
//! comrak converts with raw HTML disabled, then ammonia strips anything
//! that is not on its allow-list. Both are pure functions of their input,
//! so re-rendering the same buffer yields identical output.

use comrak::{Options, markdown_to_html, options::Extension};
use genie_application::ports::markdown_renderer::MarkdownRenderer;

#[derive(Debug, Default, Clone, Copy)]
pub struct SanitizedMarkdownRenderer;

impl SanitizedMarkdownRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Raw HTML stays disabled (the render default).
    fn options() -> Options<'static> {
        Options {
            extension: Extension {
                strikethrough: true,
                table: true,
                autolink: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

impl MarkdownRenderer for SanitizedMarkdownRenderer {
    fn render(&self, markdown: &str) -> String {
        let html = markdown_to_html(markdown, &Self::options());
        ammonia::clean(&html)
    }
}
