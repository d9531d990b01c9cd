//! phrasebook CLI - runs and administers the phrasebook HTTP backend
//!
//! - `serve`: run the HTTP API (applies pending migrations first)
//! - `migrate`: apply schema and reference-data migrations
//! - `check-db`: verify the database is reachable

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "phrasebook",
    author,
    version,
    about = "Crowdsourced phrase collection server",
    long_about = "Collect short phrases tagged by language and category, rank them by \
                  community votes, and serve them over a JSON API."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the `telemetry` feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Apply pending database migrations
    Migrate(commands::migrate::MigrateArgs),
    /// Check database connectivity (SELECT 1)
    CheckDb(commands::check_db::CheckDbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })
    .ok();

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Migrate(args) => commands::run_migrate(args).await,
        Commands::CheckDb(args) => commands::run_check_db(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["phrasebook", "check-db", "--debug"]).unwrap();
        assert!(cli.debug);
        assert!(matches!(cli.command, Commands::CheckDb(_)));
    }
}
