//! Output formatting for the todo CLI.
//!
//! - [`todos`] - todo list and single-todo results (list, add, update, delete)
//! - [`dashboard`] - dashboard summary
//! - [`helpers`] - shared formatting utilities

mod dashboard;
pub mod helpers;
mod todos;

pub use dashboard::{format_dashboard_json, format_dashboard_table};
pub use todos::{
    format_deleted_todo, format_deleted_todo_json, format_saved_todo, format_todo_json,
    format_todos_json, format_todos_table, SaveKind,
};
