//! custapi - customer records over HTTP, backed by a pooled MySQL connection
//!
//! Subcommands:
//! - `serve`: run the REST API
//! - `check-db`: verify the database is reachable
//! - `config`: inspect the effective configuration

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use config::AppConfig;

#[derive(Parser, Debug)]
#[command(
    name = "custapi",
    author,
    version,
    about = "REST API for customer records over a pooled MySQL connection"
)]
struct Cli {
    /// Verbose logging (RUST_LOG overrides)
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Export traces over OTLP (needs the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    /// Config file (default: ~/.custapi/config.toml)
    #[arg(long, short = 'c', global = true, env = "CUSTAPI_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Connect to the database and report pool status
    CheckDb(commands::check_db::CheckDbArgs),
    /// Show configuration (show, path)
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;

    let config = AppConfig::load(cli.config.as_deref())?;

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args, config).await,
        Commands::CheckDb(args) => commands::check_db::run_check_db(args, config).await,
        Commands::Config(args) => config::run_config(args, cli.config.as_deref(), &config),
    };

    tracing_setup::shutdown();
    result
}
