//! Markdown rendering adapters.

mod markdown;

pub use markdown::SanitizedMarkdownRenderer;
