//! CLI argument parsing using clap derive macros.

use clap::{Parser, Subcommand, ValueEnum};

/// todo - terminal client for a todo REST API
#[derive(Parser, Debug)]
#[command(name = "todo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Base URL of the todo API (default: from config, then http://localhost:3000)
    #[arg(long, global = true, env = "TODO_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Navigate to a route and render its page
    #[command(alias = "o")]
    Open {
        /// Location to open, e.g. "/" or "/dashboard"
        #[arg(default_value = "/")]
        path: String,
    },

    /// List todos
    #[command(alias = "l")]
    List,

    /// Create a todo
    #[command(alias = "a")]
    Add {
        /// Title of the new todo
        #[arg(required_unless_present = "data", conflicts_with = "data")]
        title: Option<String>,

        /// Raw JSON body to send instead of a title
        #[arg(long)]
        data: Option<String>,
    },

    /// Update a todo
    #[command(alias = "u")]
    Update {
        /// Todo ID
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// Mark done (true) or not done (false)
        #[arg(long)]
        done: Option<bool>,

        /// Raw JSON body; --title and --done are merged on top
        #[arg(long)]
        data: Option<String>,
    },

    /// Delete a todo
    #[command(alias = "rm")]
    Delete {
        /// Todo ID
        id: String,
    },

    /// View or change configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Print the config file path
    Path,
    /// Set a configuration value
    Set {
        /// Key (api_url, output.color, query.stale_secs)
        key: String,
        /// Value
        value: String,
    },
}

/// Supported shells for completions
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}
