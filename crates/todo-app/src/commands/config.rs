//! Config command implementation.
//!
//! Config file is located at ~/.config/todo/config.toml unless `TODO_CONFIG`
//! or `XDG_CONFIG_HOME` say otherwise.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use todo_api::client::DEFAULT_BASE_URL;

use super::{CommandContext, CommandError, Result};

/// Current config file version.
const CONFIG_VERSION: u32 = 1;

/// Directory name under the config root.
const APPLICATION: &str = "todo";

/// Configuration file structure.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Base URL of the todo API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Query cache settings.
    #[serde(default)]
    pub query: QueryConfig,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api_url: None,
            output: OutputConfig::default(),
            query: QueryConfig::default(),
        }
    }
}

impl Config {
    /// Picks the API base URL: explicit flag/env value, then config, then default.
    pub fn resolve_api_url(&self, flag: Option<&str>) -> String {
        flag.or(self.api_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string()
    }

    /// Freshness window for the query cache.
    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.query.stale_secs.unwrap_or(0))
    }
}

/// Output configuration.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Enable colors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

/// Query cache configuration.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Seconds a fetched result stays fresh.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale_secs: Option<u64>,
}

/// Gets the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("TODO_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join(APPLICATION).join("config.toml"));
    }

    BaseDirs::new()
        .map(|dirs| {
            dirs.home_dir()
                .join(".config")
                .join(APPLICATION)
                .join("config.toml")
        })
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Loads the configuration from disk. A missing file yields defaults.
pub fn load_config() -> Result<Config> {
    let path = get_config_path()?;

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    let mut config: Config = toml::from_str(&content)
        .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Saves the configuration to disk, creating the directory if needed.
fn save_config(config: &Config) -> Result<()> {
    let path = get_config_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CommandError::Config(format!("Failed to create config directory: {}", e))
        })?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| CommandError::Config(format!("Failed to serialize config: {}", e)))?;

    fs::write(&path, content)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    Ok(())
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let config = load_config()?;
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());

        println!("Settings:");
        println!("  api_url: {}", config.resolve_api_url(None));

        println!("\n[output]");
        if let Some(color) = config.output.color {
            println!("  color: {}", color);
        }

        println!("\n[query]");
        println!("  stale_secs: {}", config.stale_time().as_secs());
    }

    Ok(())
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    pub key: String,
    pub value: String,
}

/// Applies `key = value` to a config.
fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "api_url" => {
            // Reject values the client would refuse at startup.
            todo_api::client::TodoClient::with_base_url(value).map_err(|e| {
                CommandError::Config(format!("Invalid api_url '{}': {}", value, e))
            })?;
            config.api_url = Some(value.to_string());
        }
        "output.color" => {
            config.output.color = Some(parse_bool(value)?);
        }
        "query.stale_secs" => {
            let secs = value.parse::<u64>().map_err(|_| {
                CommandError::Config(format!(
                    "Invalid stale_secs value '{}'. Expected a whole number of seconds",
                    value
                ))
            })?;
            config.query.stale_secs = Some(secs);
        }
        _ => {
            return Err(CommandError::Config(format!(
                "Unknown config key '{}'. Valid keys: api_url, output.color, query.stale_secs",
                key
            )));
        }
    }
    Ok(())
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let mut config = load_config()?;
    apply_setting(&mut config, &opts.key, &opts.value)?;
    save_config(&config)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": opts.value,
            "path": get_config_path()?.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Set {} = {}", opts.key, opts.value);
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "Invalid boolean value '{}'. Use true or false",
            value
        ))),
    }
}
