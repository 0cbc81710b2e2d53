//! Command implementations for the todo CLI.

pub mod completions;
pub mod config;
pub mod open;
pub mod todos;

use crate::app::BootstrapError;
use crate::cli::Cli;
use crate::pages::{RenderError, RenderOptions};

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// API error.
    #[error("API error: {0}")]
    Api(#[from] todo_api::error::Error),

    /// The application could not start.
    #[error("startup failed: {0}")]
    Bootstrap(#[from] BootstrapError),

    /// Page load or render failure.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid command-line input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
#[derive(Debug, Clone, Copy)]
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
}

impl CommandContext {
    /// Creates a command context from CLI arguments and the configured color preference.
    pub fn from_cli(cli: &Cli, color_preference: Option<bool>) -> Self {
        let no_color_env = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && !no_color_env && color_preference.unwrap_or(true),
            quiet: cli.quiet,
            verbose: cli.verbose,
        }
    }

    /// Render settings handed to pages.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            json_output: self.json_output,
            use_colors: self.use_colors,
        }
    }
}
