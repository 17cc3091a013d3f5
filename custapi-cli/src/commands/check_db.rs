//! `custapi check-db`: verify connectivity and print pool status

use anyhow::{Context, Result};
use clap::Parser;

use custapi_server::db::statements::COUNT_ALL;
use custapi_server::db::Record;
use custapi_server::{create_pool, MySqlExecutor, PoolStatus, QueryExecutor};

use super::DatabaseArgs;
use crate::config::AppConfig;

#[derive(Parser, Debug)]
pub struct CheckDbArgs {
    /// Also count rows in the customer table
    #[arg(long)]
    pub table: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

pub async fn run_check_db(args: CheckDbArgs, mut config: AppConfig) -> Result<()> {
    args.database.apply(&mut config.database);
    let target = config.database.describe();

    let pool = create_pool(&config.database)
        .await
        .with_context(|| format!("Failed to create pool for {}", target))?;
    let executor = MySqlExecutor::new(pool.clone());

    executor
        .fetch("SELECT 1", &[])
        .await
        .with_context(|| format!("Cannot reach {}", target))?;

    let customers = if args.table {
        let rows = executor
            .fetch(COUNT_ALL, &[])
            .await
            .context("customer table is not readable")?;
        Some(row_count(&rows).context("COUNT(*) returned no total")?)
    } else {
        None
    };

    let status = PoolStatus::of(&pool);
    pool.close().await;

    if args.json {
        let report = serde_json::json!({
            "database": target,
            "ok": true,
            "customers": customers,
            "pool": status,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("✅ Connected to {}", target);
        if let Some(count) = customers {
            println!("   customer rows: {}", count);
        }
        println!(
            "   pool: {} open, {} idle, max {}",
            status.size, status.idle, status.max_connections
        );
    }

    Ok(())
}

fn row_count(rows: &[Record]) -> Option<u64> {
    rows.first()?.get("total")?.as_u64()
}
