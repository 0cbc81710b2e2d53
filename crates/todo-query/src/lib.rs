//! Keyed query cache for the todo client.
//!
//! Pages fetch data through a [`QueryClient`] instead of calling the API
//! directly. Results are stored as JSON under a [`QueryKey`]; a later fetch of
//! the same key is served from memory while the entry is fresh, and mutations
//! invalidate the keys they affect so the next read goes back to the server.
//!
//! # Example
//!
//! ```no_run
//! use todo_api::prelude::*;
//! use todo_query::{QueryClient, QueryKey};
//!
//! # async fn run() -> todo_api::error::Result<()> {
//! let api = TodoClient::new()?;
//! let query = QueryClient::new();
//!
//! let todos: Vec<Todo> = query
//!     .fetch_query(&QueryKey::new(["todos"]), || api.list_todos())
//!     .await?;
//!
//! query
//!     .mutate(&[QueryKey::new(["todos"])], || api.delete_todo(1))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod key;

pub use client::{QueryClient, DEFAULT_STALE_TIME};
pub use key::QueryKey;
