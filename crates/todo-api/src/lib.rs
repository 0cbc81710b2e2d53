//! REST client for the todo API.
//!
//! # Quick Start
//!
//! ```no_run
//! use todo_api::prelude::*;
//!
//! # async fn run() -> Result<()> {
//! let client = TodoClient::new()?;
//! let todos = client.list_todos().await?;
//! println!("{} todos", todos.len());
//! # Ok(())
//! # }
//! ```
//!
//! Every operation issues exactly one HTTP request and hands the server's
//! JSON back unchanged. Failures are never retried.

pub mod client;
pub mod error;
pub mod models;
pub mod prelude;
