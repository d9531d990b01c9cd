//! HTTP server command
//!
//! Connects to the database, applies pending migrations, and runs the
//! phrasebook API until Ctrl+C / SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use phrasebook_server::db::migrate;
use phrasebook_server::http::{run_server, ServerConfig};
use phrasebook_server::session::{CookieSettings, SessionKeyConfig};

use super::database::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "PHRASEBOOK_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long, env = "PHRASEBOOK_CORS_PERMISSIVE")]
    pub cors_permissive: bool,

    /// Directory served under /static
    #[arg(long, env = "PHRASEBOOK_STATIC_DIR", default_value = "static")]
    pub static_dir: PathBuf,

    /// Base64 session signing key (at least 32 bytes); random per start if unset
    #[arg(long, env = "PHRASEBOOK_SESSION_KEY", hide_env_values = true)]
    pub session_key: Option<String>,

    /// Mark session cookies Secure (serve over HTTPS)
    #[arg(long, env = "PHRASEBOOK_SECURE_COOKIES")]
    pub secure_cookies: bool,

    /// Session cookie lifetime in seconds; browser-session cookie if unset
    #[arg(long, env = "PHRASEBOOK_SESSION_MAX_AGE")]
    pub session_max_age: Option<u64>,

    /// Do not apply pending migrations before starting
    #[arg(long, env = "PHRASEBOOK_SKIP_MIGRATIONS")]
    pub skip_migrations: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
            static_dir: self.static_dir.clone(),
            session_key: SessionKeyConfig::from_option(self.session_key.clone()),
            cookies: CookieSettings {
                secure: self.secure_cookies,
                max_age: self.session_max_age.map(Duration::from_secs),
            },
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting phrasebook server on {}", args.bind);

    let pool = args.database.connect().await?;

    if args.skip_migrations {
        tracing::warn!("Skipping migrations");
    } else {
        migrate(&pool).await.context("Failed to apply migrations")?;
    }

    // Blocks until shutdown
    run_server(pool, args.server_config())
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> ServeArgs {
        let argv = std::iter::once("serve").chain(args.iter().copied());
        ServeArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn flags_map_to_server_config() {
        let config = parse(&[
            "--bind",
            "0.0.0.0:8080",
            "--static-dir",
            "/srv/phrasebook",
            "--secure-cookies",
            "--session-max-age",
            "86400",
        ])
        .server_config();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.static_dir, PathBuf::from("/srv/phrasebook"));
        assert!(config.cookies.secure);
        assert_eq!(config.cookies.max_age, Some(Duration::from_secs(86400)));
    }

    #[test]
    fn blank_session_key_is_ephemeral() {
        let config = parse(&["--session-key", "  "]).server_config();
        assert!(matches!(config.session_key, SessionKeyConfig::Ephemeral));

        let config = parse(&["--session-key", "c2VjcmV0"]).server_config();
        assert!(matches!(config.session_key, SessionKeyConfig::Persisted(_)));
    }

    #[test]
    fn invalid_bind_address_is_rejected() {
        assert!(ServeArgs::try_parse_from(["serve", "--bind", "localhost"]).is_err());
    }
}
