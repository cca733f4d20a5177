//! Render surface port
//!
//! Where the client shows the reply. Each `show_document` call carries the
//! whole document revealed so far, never a diff.

/// A revealed document: sanitized HTML plus the markdown it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub html: String,
    pub markdown: String,
}

pub trait RenderSurface: Send + Sync {
    /// Replace the visible document.
    fn show_document(&self, document: &RenderedDocument);

    /// Show the apology panel. `detail` is the provider message, when one
    /// was streamed.
    fn show_apology(&self, detail: Option<&str>);

    /// Clear the surface for a new request.
    fn clear(&self);
}
