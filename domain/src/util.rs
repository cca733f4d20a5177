//! Shared utility functions.

/// One-line preview of `text` for log messages: newlines become spaces and
/// anything past `max_chars` characters is replaced by `...`.
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.trim().replace(['\r', '\n'], " ");
    match flat.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &flat[..cut]),
        None => flat,
    }
}
