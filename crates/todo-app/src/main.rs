use clap::Parser;
use std::process::ExitCode;

use todo_api::client::TodoClient;
use todo_app::app::{bootstrap, MountedApp, TerminalHost};
use todo_app::cli::{Cli, Commands, ConfigCommands};
use todo_app::commands::config::{load_config, Config};
use todo_app::commands::{self, CommandContext, CommandError};
use todo_app::logging;
use todo_app::pages;
use todo_app::router::Router;
use todo_query::QueryClient;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&error_json).unwrap_or_else(|_| e.to_string())
                );
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(exit_status(&e))
        }
    }
}

async fn run(cli: &Cli) -> commands::Result<()> {
    let config = load_config()?;
    let ctx = CommandContext::from_cli(cli, config.output.color);

    // Commands that never touch the API skip the bootstrap.
    match &cli.command {
        Some(Commands::Config { command }) => return dispatch_config(&ctx, command),
        Some(Commands::Completions { shell }) => {
            return commands::completions::execute(*shell).map_err(CommandError::Io)
        }
        None => {
            if !ctx.quiet {
                println!("todo - terminal todo client");
                println!("Use --help for usage information");
            }
            return Ok(());
        }
        Some(_) => {}
    }

    let mut app = start(cli, &config, &ctx)?;

    match &cli.command {
        Some(Commands::Open { path }) => commands::open::execute(&mut app, path).await,
        Some(Commands::List) => commands::todos::execute_list(&ctx, &mut app).await,
        Some(Commands::Add { title, data }) => {
            let opts = commands::todos::AddOptions {
                title: title.clone(),
                data: data.clone(),
            };
            commands::todos::execute_add(&ctx, &mut app, &opts).await
        }
        Some(Commands::Update {
            id,
            title,
            done,
            data,
        }) => {
            let opts = commands::todos::UpdateOptions {
                id: id.clone(),
                title: title.clone(),
                done: *done,
                data: data.clone(),
            };
            commands::todos::execute_update(&ctx, &mut app, &opts).await
        }
        Some(Commands::Delete { id }) => commands::todos::execute_delete(&ctx, &mut app, id).await,
        Some(Commands::Config { .. } | Commands::Completions { .. }) | None => Ok(()),
    }
}

/// Builds the API client and query cache from config, then mounts the app once.
fn start(cli: &Cli, config: &Config, ctx: &CommandContext) -> commands::Result<MountedApp> {
    let api_url = config.resolve_api_url(cli.api_url.as_deref());
    tracing::debug!(%api_url, "using todo API");

    let api = TodoClient::with_base_url(api_url)?;
    let query = QueryClient::with_stale_time(config.stale_time());

    Ok(bootstrap(
        &mut TerminalHost,
        api,
        query,
        Router::default(),
        ctx.render_options(),
    )?)
}

fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> commands::Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
        Some(ConfigCommands::Set { key, value }) => {
            let opts = commands::config::ConfigSetOptions {
                key: key.clone(),
                value: value.clone(),
            };
            commands::config::execute_set(ctx, &opts)
        }
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Api(_) => "API_ERROR",
        CommandError::Bootstrap(_) => "STARTUP_ERROR",
        CommandError::Render(_) => "RENDER_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::InvalidInput(_) => "INVALID_INPUT",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the process exit status for an error.
fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Api(todo_api::error::Error::InvalidUrl { .. }) => 5,
        CommandError::Api(_) => 2,
        CommandError::Render(pages::RenderError::Api(_)) => 2,
        CommandError::Render(pages::RenderError::Io(_)) | CommandError::Io(_) => 3,
        CommandError::Config(_) => 5,
        CommandError::Bootstrap(_)
        | CommandError::Render(_)
        | CommandError::InvalidInput(_)
        | CommandError::Json(_) => 1,
    }
}
