//! HTTP server command
//!
//! Builds the pool, migrates the schema, then serves until Ctrl-C/SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use cashflow_server::config::resolve_database_url;
use cashflow_server::db::{create_pool_with_options, migrations, PgSessions, DEFAULT_MAX_CONNECTIONS};
use cashflow_server::http::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (falls back to the local cash-flow database)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Do not create the records table on startup
    #[arg(long)]
    pub skip_migrations: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = resolve_database_url(args.database_url);

    let pool = create_pool_with_options(&database_url, args.max_connections)
        .await
        .context("Failed to create database pool")?;

    if args.skip_migrations {
        tracing::info!("skipping migrations");
    } else {
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    tracing::info!("Starting cashflow server on {}", config.bind_addr);

    run_server(PgSessions::new(pool), config)
        .await
        .context("Server error")?;

    Ok(())
}
