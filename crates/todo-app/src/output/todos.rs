//! Todo output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;
use todo_api::models::{Todo, TodoId};

use super::helpers::{display_id, display_title, format_done, truncate_str};

/// Maximum title width in the list table.
const TITLE_WIDTH: usize = 50;

/// Whether a todo was just created or updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Created,
    Updated,
}

/// JSON output structure for a delete.
#[derive(Serialize)]
struct DeletedOutput<'a> {
    deleted: bool,
    id: &'a TodoId,
}

/// Formats todos as JSON, exactly as the server sent them.
pub fn format_todos_json(todos: &[Todo]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(todos)
}

/// Formats a single todo as JSON.
pub fn format_todo_json(todo: &Todo) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(todo)
}

/// Formats todos as a table.
pub fn format_todos_table(todos: &[Todo], use_colors: bool) -> String {
    if todos.is_empty() {
        return "No todos found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!("{:<10} {:<4} {}", "ID", "Done", "Title");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for todo in todos {
        let line = format!(
            "{:<10} {} {}",
            truncate_str(&display_id(todo), 10),
            format_done(todo.is_completed(), 4, use_colors),
            truncate_str(&display_title(todo), TITLE_WIDTH)
        );
        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Formats the confirmation for a created or updated todo.
pub fn format_saved_todo(todo: &Todo, kind: SaveKind, use_colors: bool) -> String {
    let verb = match kind {
        SaveKind::Created => "Created",
        SaveKind::Updated => "Updated",
    };
    let id = display_id(todo);
    let id = if use_colors {
        id.dimmed().to_string()
    } else {
        id
    };
    format!("{verb}: {} ({id})\n", display_title(todo))
}

/// Formats the confirmation for a delete.
pub fn format_deleted_todo(id: &TodoId) -> String {
    format!("Deleted todo {id}\n")
}

/// Formats the JSON confirmation for a delete.
pub fn format_deleted_todo_json(id: &TodoId) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&DeletedOutput { deleted: true, id })
}
