//! Common helper functions for output formatting.

use owo_colors::OwoColorize;
use todo_api::models::Todo;

/// Truncates a string to at most `max_len` characters, marking the cut with "...".
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Display form of a todo's id, or "-" when the server sent none.
pub fn display_id(todo: &Todo) -> String {
    todo.id().map_or_else(|| "-".to_string(), |id| id.to_string())
}

/// Display form of a todo's title, falling back to its compact JSON.
pub fn display_title(todo: &Todo) -> String {
    match todo.title() {
        Some(title) => title.to_string(),
        None => todo.as_value().to_string(),
    }
}

/// Checkbox marker for the done column, left-aligned to `width` before coloring.
pub fn format_done(done: bool, width: usize, use_colors: bool) -> String {
    let mark = format!("{:<width$}", if done { "[x]" } else { "[ ]" });
    if !use_colors {
        return mark;
    }
    if done {
        mark.green().to_string()
    } else {
        mark.dimmed().to_string()
    }
}
