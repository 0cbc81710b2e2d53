//! Page components.
//!
//! A page loads its data through the query cache and writes its rendering
//! to the mount target. Pages never mutate todos.

mod dashboard;
mod home;

use std::io::{self, Write};

use todo_api::client::TodoClient;
use todo_api::models::Todo;
use todo_query::{QueryClient, QueryKey};

pub use dashboard::DashboardStats;

/// Errors raised while loading or writing a page.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Api(#[from] todo_api::error::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// How pages format their output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub json_output: bool,
    pub use_colors: bool,
}

/// Services a page may use while rendering.
pub struct PageContext<'a> {
    pub api: &'a TodoClient,
    pub query: &'a QueryClient,
    pub options: RenderOptions,
}

/// The pages a route can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Dashboard,
}

impl Page {
    /// Loads the page's data and writes it to `out`.
    pub async fn render(&self, ctx: &PageContext<'_>, out: &mut dyn Write) -> Result<(), RenderError> {
        match self {
            Page::Home => home::render(ctx, out).await,
            Page::Dashboard => dashboard::render(ctx, out).await,
        }
    }
}

/// Cache key shared by every view of the todo list.
pub fn todos_key() -> QueryKey {
    QueryKey::new(["todos"])
}

/// Fetches the todo list through the query cache.
pub async fn fetch_todos(
    api: &TodoClient,
    query: &QueryClient,
) -> Result<Vec<Todo>, todo_api::error::Error> {
    query.fetch_query(&todos_key(), || api.list_todos()).await
}
