//! Terminal-hosted todo client.
//!
//! - [`app`] - application bootstrap, plugins and the mount point
//! - [`router`] - the route table and navigation history
//! - [`pages`] - Home and Dashboard pages
//! - [`commands`] - CLI command handlers
//! - [`output`] - text and JSON formatting

pub mod app;
pub mod cli;
pub mod commands;
pub mod logging;
pub mod output;
pub mod pages;
pub mod router;
