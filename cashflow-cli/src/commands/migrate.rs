//! Schema management command

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use cashflow_server::config::resolve_database_url;
use cashflow_server::db::{create_pool, migrations};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (falls back to the local cash-flow database)
    #[arg(long, env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: MigrateCommand,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateCommand {
    /// Create the records table if it does not exist
    Up,
    /// Drop the records table and all its rows
    Down,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = resolve_database_url(args.database_url);
    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    match args.command {
        MigrateCommand::Up => migrations::run(&pool)
            .await
            .context("Failed to apply migrations")?,
        MigrateCommand::Down => migrations::revert(&pool)
            .await
            .context("Failed to revert migrations")?,
    }

    pool.close().await;
    Ok(())
}
