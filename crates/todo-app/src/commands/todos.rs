//! Todo CRUD commands: list, add, update, delete.
//!
//! Reads go through the query cache; mutations invalidate the todo list.

use std::io::Write;

use serde_json::{Map, Value};
use todo_api::models::{Todo, TodoId};

use super::{CommandContext, CommandError, Result};
use crate::app::MountedApp;
use crate::output::{
    format_deleted_todo, format_deleted_todo_json, format_saved_todo, format_todo_json,
    format_todos_json, format_todos_table, SaveKind,
};
use crate::pages::{fetch_todos, todos_key};

/// Options for the add command.
#[derive(Debug)]
pub struct AddOptions {
    pub title: Option<String>,
    pub data: Option<String>,
}

/// Options for the update command.
#[derive(Debug)]
pub struct UpdateOptions {
    pub id: String,
    pub title: Option<String>,
    pub done: Option<bool>,
    pub data: Option<String>,
}

/// Lists todos.
pub async fn execute_list(ctx: &CommandContext, app: &mut MountedApp) -> Result<()> {
    let todos = fetch_todos(app.api(), app.query()).await?;

    let out = app.target();
    if ctx.json_output {
        writeln!(out, "{}", format_todos_json(&todos)?)?;
    } else if !ctx.quiet {
        write!(out, "{}", format_todos_table(&todos, ctx.use_colors))?;
    }
    Ok(())
}

/// Creates a todo from a title or a raw JSON body.
pub async fn execute_add(ctx: &CommandContext, app: &mut MountedApp, opts: &AddOptions) -> Result<()> {
    let body = build_add_body(opts)?;

    let api = app.api();
    let created = app
        .query()
        .mutate(&[todos_key()], || api.create_todo(&body))
        .await?;

    write_saved(ctx, app, &created, SaveKind::Created)
}

/// Sends an update for one todo.
pub async fn execute_update(
    ctx: &CommandContext,
    app: &mut MountedApp,
    opts: &UpdateOptions,
) -> Result<()> {
    let id: TodoId = parse_id(&opts.id)?;
    let body = build_update_body(opts)?;

    let api = app.api();
    let updated = app
        .query()
        .mutate(&[todos_key()], || api.update_todo(id, &body))
        .await?;

    write_saved(ctx, app, &updated, SaveKind::Updated)
}

/// Deletes one todo.
pub async fn execute_delete(ctx: &CommandContext, app: &mut MountedApp, id: &str) -> Result<()> {
    let id = parse_id(id)?;

    let api = app.api();
    app.query()
        .mutate(&[todos_key()], || api.delete_todo(id.clone()))
        .await?;

    let out = app.target();
    if ctx.json_output {
        writeln!(out, "{}", format_deleted_todo_json(&id)?)?;
    } else if !ctx.quiet {
        write!(out, "{}", format_deleted_todo(&id))?;
    }
    Ok(())
}

fn write_saved(ctx: &CommandContext, app: &mut MountedApp, todo: &Todo, kind: SaveKind) -> Result<()> {
    let out = app.target();
    if ctx.json_output {
        writeln!(out, "{}", format_todo_json(todo)?)?;
    } else if !ctx.quiet {
        write!(out, "{}", format_saved_todo(todo, kind, ctx.use_colors))?;
    }
    Ok(())
}

fn parse_id(raw: &str) -> Result<TodoId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CommandError::InvalidInput("todo id must not be empty".to_string()));
    }
    if raw.contains(['/', '?', '#']) {
        return Err(CommandError::InvalidInput(format!(
            "todo id '{}' contains URL path characters",
            raw
        )));
    }
    Ok(raw.parse().unwrap_or_else(|never| match never {}))
}

fn parse_json_object(raw: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(CommandError::InvalidInput(format!(
            "--data must be a JSON object, got: {}",
            other
        ))),
    }
}

fn build_add_body(opts: &AddOptions) -> Result<Value> {
    match (&opts.title, &opts.data) {
        (Some(title), None) => Ok(Todo::with_title(title.as_str()).into_value()),
        (None, Some(raw)) => Ok(Value::Object(parse_json_object(raw)?)),
        _ => Err(CommandError::InvalidInput(
            "provide either a title or --data".to_string(),
        )),
    }
}

fn build_update_body(opts: &UpdateOptions) -> Result<Value> {
    let mut body = match &opts.data {
        Some(raw) => parse_json_object(raw)?,
        None => Map::new(),
    };
    if let Some(title) = &opts.title {
        body.insert("title".to_string(), Value::String(title.clone()));
    }
    if let Some(done) = opts.done {
        body.insert("completed".to_string(), Value::Bool(done));
    }
    if body.is_empty() {
        return Err(CommandError::InvalidInput(
            "nothing to update: pass --title, --done or --data".to_string(),
        ));
    }
    Ok(Value::Object(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update(title: Option<&str>, done: Option<bool>, data: Option<&str>) -> UpdateOptions {
        UpdateOptions {
            id: "5".to_string(),
            title: title.map(str::to_string),
            done,
            data: data.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("5").unwrap(), TodoId::Int(5));
        assert_eq!(parse_id(" abc ").unwrap(), TodoId::Str("abc".to_string()));
        assert!(parse_id("").is_err());
        assert!(parse_id("5/extra").is_err());
    }

    #[test]
    fn test_parse_id_keeps_typed_form() {
        assert_eq!(parse_id("0123").unwrap().to_string(), "0123");
        assert_eq!(parse_id("+5").unwrap().to_string(), "+5");
    }

    #[test]
    fn test_add_body_from_title() {
        let body = build_add_body(&AddOptions {
            title: Some("a".to_string()),
            data: None,
        })
        .unwrap();
        assert_eq!(body, json!({"title": "a"}));
    }

    #[test]
    fn test_add_body_from_data_is_verbatim() {
        let body = build_add_body(&AddOptions {
            title: None,
            data: Some(r#"{"title": "a", "priority": 2}"#.to_string()),
        })
        .unwrap();
        assert_eq!(body, json!({"title": "a", "priority": 2}));
    }

    #[test]
    fn test_add_body_rejects_non_object() {
        let err = build_add_body(&AddOptions {
            title: None,
            data: Some("[1, 2]".to_string()),
        })
        .unwrap_err();
        assert!(matches!(err, CommandError::InvalidInput(_)));
    }

    #[test]
    fn test_update_body_merges_flags_over_data() {
        let body = build_update_body(&update(
            Some("new"),
            Some(true),
            Some(r#"{"title": "old", "tag": "x"}"#),
        ))
        .unwrap();
        assert_eq!(body, json!({"title": "new", "completed": true, "tag": "x"}));
    }

    #[test]
    fn test_update_body_data_only() {
        let body = build_update_body(&update(None, None, Some(r#"{"done": true}"#))).unwrap();
        assert_eq!(body, json!({"done": true}));
    }

    #[test]
    fn test_update_body_requires_something() {
        assert!(build_update_body(&update(None, None, None)).is_err());
        assert!(build_update_body(&update(None, None, Some("{}"))).is_err());
    }

    #[test]
    fn test_invalid_json_is_json_error() {
        let err = build_update_body(&update(None, None, Some("{oops"))).unwrap_err();
        assert!(matches!(err, CommandError::Json(_)));
    }
}
