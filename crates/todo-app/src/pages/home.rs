//! Home page: the todo list.

use std::io::Write;

use crate::output::{format_todos_json, format_todos_table};

use super::{fetch_todos, PageContext, RenderError};

pub(super) async fn render(ctx: &PageContext<'_>, out: &mut dyn Write) -> Result<(), RenderError> {
    let todos = fetch_todos(ctx.api, ctx.query).await?;

    if ctx.options.json_output {
        writeln!(out, "{}", format_todos_json(&todos)?)?;
    } else {
        write!(out, "{}", format_todos_table(&todos, ctx.options.use_colors))?;
    }
    out.flush()?;
    Ok(())
}
