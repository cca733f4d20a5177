//! Terminal render surface
//!
//! Streams the revealed markdown to a writer (stdout by default) and can
//! mirror the sanitized HTML document into a file. Writes suspend the
//! progress bar so the two never share a terminal line.

use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ProgressBarIndicator;
use genie_application::{RenderSurface, RenderedDocument};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::warn;

struct SurfaceState {
    out: Box<dyn Write + Send>,
    /// Markdown already written to `out` for the current document.
    printed: String,
}

pub struct TerminalSurface {
    state: Mutex<SurfaceState>,
    html_out: Option<PathBuf>,
    progress: Option<Arc<ProgressBarIndicator>>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            state: Mutex::new(SurfaceState {
                out,
                printed: String::new(),
            }),
            html_out: None,
            progress: None,
        }
    }

    /// Clear `progress` from the terminal around every write.
    pub fn with_progress(mut self, progress: Option<Arc<ProgressBarIndicator>>) -> Self {
        self.progress = progress;
        self
    }

    /// Mirror every revealed document into `path` as sanitized HTML.
    pub fn with_html_out(mut self, path: Option<PathBuf>) -> Self {
        self.html_out = path;
        self
    }

    pub fn html_out(&self) -> Option<&Path> {
        self.html_out.as_deref()
    }

    /// End the current document's line, if anything was printed.
    pub fn finish_line(&self) {
        self.emit(|state| {
            if !state.printed.is_empty() && !state.printed.ends_with('\n') {
                let _ = writeln!(state.out);
                let _ = state.out.flush();
            }
            state.printed.clear();
        });
    }

    fn emit(&self, f: impl FnOnce(&mut SurfaceState)) {
        let locked = || f(&mut self.lock());
        match &self.progress {
            Some(progress) => progress.suspend(locked),
            None => locked(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SurfaceState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn mirror(&self, html: &str) {
        if let Some(path) = &self.html_out {
            if let Err(e) = std::fs::write(path, html) {
                warn!("Failed to write {}: {}", path.display(), e);
            }
        }
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSurface for TerminalSurface {
    fn show_document(&self, document: &RenderedDocument) {
        self.emit(|state| {
            let SurfaceState { out, printed } = state;
            // Documents only grow while a reply streams; anything else is
            // a fresh document.
            let fresh = match document.markdown.strip_prefix(printed.as_str()) {
                Some(fresh) => fresh,
                None => {
                    let _ = writeln!(out);
                    printed.clear();
                    document.markdown.as_str()
                }
            };
            if !fresh.is_empty() {
                let _ = out.write_all(fresh.as_bytes());
                let _ = out.flush();
                printed.push_str(fresh);
            }
        });
        self.mirror(&document.html);
    }

    fn show_apology(&self, detail: Option<&str>) {
        let panel = ConsoleFormatter::apology(detail);
        self.emit(|state| {
            let _ = state.out.write_all(panel.as_bytes());
            let _ = state.out.flush();
            state.printed.clear();
        });
    }

    fn clear(&self) {
        self.emit(|state| {
            if !state.printed.is_empty() && !state.printed.ends_with('\n') {
                let _ = writeln!(state.out);
            }
            let _ = state.out.flush();
            state.printed.clear();
        });
    }
}
