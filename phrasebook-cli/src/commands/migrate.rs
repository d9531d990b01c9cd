//! Apply embedded migrations without starting the server

use anyhow::{Context, Result};
use clap::Parser;

use phrasebook_server::db::migrate;

use super::database::DatabaseArgs;

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = args.database.connect().await?;
    migrate(&pool).await.context("Failed to apply migrations")?;
    pool.close().await;

    println!("Migrations applied");
    Ok(())
}
