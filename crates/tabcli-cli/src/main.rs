//! tabcli - Tableau REST API command-line client.
//!
//! Authenticates with a personal access token, caches the session under the
//! user cache directory, and prints structured JSON for every operation.

mod cli;
mod output;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tabcli_core::Engine;

use cli::{AuthCommand, Cli, Commands, GetCommand, ListCommand, PermissionsCommand};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();
    output::emit(run(cli).await)
}

async fn run(cli: Cli) -> Result<Value> {
    let mut engine = Engine::from_env()?;

    let data = match cli.command {
        Commands::Auth { command } => match command {
            AuthCommand::Login => {
                let summary = engine.sign_in().await?;
                info!(site_id = %summary.site_id, "Login complete");
                serde_json::to_value(summary)?
            }
            AuthCommand::Logout => serde_json::to_value(engine.sign_out().await?)?,
            AuthCommand::Status => serde_json::to_value(engine.auth_status())?,
        },
        Commands::List { command } => match command {
            ListCommand::Sites => serde_json::to_value(engine.list_sites().await?)?,
            ListCommand::Projects => serde_json::to_value(engine.list_projects().await?)?,
            ListCommand::Workbooks => serde_json::to_value(engine.list_workbooks().await?)?,
            ListCommand::RefreshTasks => serde_json::to_value(engine.list_extract_tasks().await?)?,
        },
        Commands::Get { command } => match command {
            GetCommand::Workbook { id } => serde_json::to_value(engine.get_workbook(&id).await?)?,
        },
        Commands::Refresh { task_id } => {
            serde_json::to_value(engine.run_extract_refresh(&task_id).await?)?
        }
        Commands::Permissions { command } => match command {
            PermissionsCommand::Get { workbook_id } => {
                serde_json::to_value(engine.get_workbook_permissions(&workbook_id).await?)?
            }
            PermissionsCommand::Add {
                workbook_id,
                user,
                capability,
                mode,
            } => serde_json::to_value(
                engine
                    .add_workbook_permission(&workbook_id, &user, &capability, mode.as_str())
                    .await?,
            )?,
            PermissionsCommand::Delete {
                workbook_id,
                user,
                capability,
                mode,
            } => serde_json::to_value(
                engine
                    .delete_workbook_permission(&workbook_id, &user, &capability, mode.as_str())
                    .await?,
            )?,
        },
    };

    Ok(data)
}
