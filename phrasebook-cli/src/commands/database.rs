//! Database connection flags shared by every subcommand

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use phrasebook_server::db::{create_pool, DatabaseConfig, PgPool};

/// Connection settings. Discrete flags override parts of the URL; with
/// neither, the libpq `PG*` variables apply.
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Database URL
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Database host
    #[arg(long, env = "PHRASEBOOK_DB_HOST")]
    pub db_host: Option<String>,

    /// Database port
    #[arg(long, env = "PHRASEBOOK_DB_PORT")]
    pub db_port: Option<u16>,

    /// Directory containing the database's unix socket
    #[arg(long, env = "PHRASEBOOK_DB_SOCKET")]
    pub db_socket: Option<PathBuf>,

    /// Database user
    #[arg(long, env = "PHRASEBOOK_DB_USER")]
    pub db_user: Option<String>,

    /// Database password
    #[arg(long, env = "PHRASEBOOK_DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Database name
    #[arg(long, env = "PHRASEBOOK_DB_NAME")]
    pub db_name: Option<String>,

    /// Client character encoding (UTF-8 spellings only)
    #[arg(long, env = "PHRASEBOOK_DB_CHARSET", default_value = "UTF8")]
    pub db_charset: String,

    /// Maximum pooled connections
    #[arg(long, env = "PHRASEBOOK_DB_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,
}

impl DatabaseArgs {
    pub fn to_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database_url.clone(),
            host: self.db_host.clone(),
            port: self.db_port,
            socket: self.db_socket.clone(),
            username: self.db_user.clone(),
            password: self.db_password.clone(),
            database: self.db_name.clone(),
            charset: Some(self.db_charset.clone()),
            max_connections: Some(self.max_connections),
        }
    }

    /// Connect, attaching the (redacted) settings to any failure.
    pub async fn connect(&self) -> Result<PgPool> {
        let config = self.to_config();
        create_pool(&config)
            .await
            .with_context(|| format!("Failed to create database pool ({:?})", config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(clap::Parser)]
    struct Harness {
        #[command(flatten)]
        db: DatabaseArgs,
    }

    fn parse(args: &[&str]) -> DatabaseArgs {
        use clap::Parser;
        let argv = std::iter::once("test").chain(args.iter().copied());
        Harness::try_parse_from(argv).unwrap().db
    }

    #[test]
    fn discrete_flags_map_to_config() {
        let config = parse(&[
            "--database-url",
            "postgres://localhost/phrasebook",
            "--db-port",
            "5433",
            "--db-user",
            "phrases",
            "--db-charset",
            "utf8mb4",
            "--max-connections",
            "12",
        ])
        .to_config();

        assert_eq!(config.url.as_deref(), Some("postgres://localhost/phrasebook"));
        assert_eq!(config.port, Some(5433));
        assert_eq!(config.username.as_deref(), Some("phrases"));
        assert_eq!(config.charset.as_deref(), Some("utf8mb4"));
        assert!(config.connect_options().is_ok());
        assert_eq!(config.max_connections(), 12);
    }

    #[test]
    fn non_utf8_charset_fails_before_connecting() {
        let config = parse(&["--db-charset", "LATIN1"]).to_config();
        assert!(config.connect_options().is_err());
    }

    #[test]
    fn invalid_port_is_rejected() {
        use clap::Parser;
        assert!(Harness::try_parse_from(["test", "--db-port", "seventy"]).is_err());
    }
}
