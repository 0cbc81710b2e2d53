//! Dashboard page: completion summary.

use std::io::Write;

use serde::Serialize;
use todo_api::models::Todo;

use crate::output::{format_dashboard_json, format_dashboard_table};

use super::{fetch_todos, PageContext, RenderError};

/// Counts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl DashboardStats {
    pub fn from_todos(todos: &[Todo]) -> Self {
        let completed = todos.iter().filter(|t| t.is_completed()).count();
        Self {
            total: todos.len(),
            completed,
            pending: todos.len() - completed,
        }
    }

    /// Completed share in whole percent; 0 for an empty list.
    pub fn completion_percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        // completed <= total, so the result is in 0..=100.
        ((self.completed * 100) / self.total) as u8
    }
}

pub(super) async fn render(ctx: &PageContext<'_>, out: &mut dyn Write) -> Result<(), RenderError> {
    let todos = fetch_todos(ctx.api, ctx.query).await?;
    let stats = DashboardStats::from_todos(&todos);

    if ctx.options.json_output {
        writeln!(out, "{}", format_dashboard_json(&stats)?)?;
    } else {
        write!(out, "{}", format_dashboard_table(&stats, ctx.options.use_colors))?;
    }
    out.flush()?;
    Ok(())
}
