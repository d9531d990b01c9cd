//! Database connectivity check, the CLI twin of `GET /api/test-db`

use anyhow::{Context, Result};
use clap::Parser;

use phrasebook_server::db::ping;

use super::database::DatabaseArgs;

#[derive(Parser, Debug)]
pub struct CheckDbArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

pub async fn run_check_db(args: CheckDbArgs) -> Result<()> {
    let pool = args.database.connect().await?;
    let result = ping(&pool).await.context("SELECT 1 failed")?;
    pool.close().await;

    tracing::debug!(result, "database ping");
    println!("Database connection successful (SELECT 1 = {})", result);
    Ok(())
}
