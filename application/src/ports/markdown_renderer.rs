//! Markdown renderer port

/// Converts markdown to sanitized HTML.
///
/// Implementations must be deterministic: the same input always yields the
/// same output, so re-rendering an unchanged buffer is invisible. Output must
/// be safe to insert into a page (no scripts, event handlers or `javascript:`
/// URLs survive).
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}

/// Renderer that passes text through untouched. For tests only.
pub struct PlainTextRenderer;

impl MarkdownRenderer for PlainTextRenderer {
    fn render(&self, markdown: &str) -> String {
        markdown.to_string()
    }
}
