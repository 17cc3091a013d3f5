//! `custapi serve`: run the customer API

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use custapi_server::{create_pool, run_server};

use super::DatabaseArgs;
use crate::config::AppConfig;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3000, or server.bind_addr from config)
    #[arg(long, short = 'b', env = "CUSTAPI_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
pub async fn run_serve(args: ServeArgs, mut config: AppConfig) -> Result<()> {
    args.database.apply(&mut config.database);
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }
    config.server.cors_permissive |= args.cors_permissive;

    tracing::info!(
        bind = %config.server.bind_addr,
        db = %config.database.describe(),
        pool_size = config.database.pool.max_connections,
        "Starting custapi server"
    );

    let pool = create_pool(&config.database)
        .await
        .context("Failed to create database pool")?;

    run_server(pool, config.server).await.context("Server error")?;

    Ok(())
}
