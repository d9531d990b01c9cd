//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::session::{CookieSettings, SessionKey, SessionKeyConfig, SessionKeyError};

/// Origins allowed when CORS is not permissive
const LOCAL_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5000",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5000",
];

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:5000)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    ///
    /// WARNING: Setting this to true allows any origin.
    pub cors_permissive: bool,

    /// Directory served under `/static` (default: ./static)
    pub static_dir: PathBuf,

    /// Session signing key source
    pub session_key: SessionKeyConfig,

    /// Attributes for issued session cookies
    pub cookies: CookieSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            cors_permissive: false,
            static_dir: PathBuf::from("static"),
            session_key: SessionKeyConfig::Ephemeral,
            cookies: CookieSettings::default(),
        }
    }
}

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Signs and verifies session cookies
    pub session_key: SessionKey,
    pub cookies: CookieSettings,
}

impl AppState {
    pub fn new(pool: PgPool, session_key: SessionKey, cookies: CookieSettings) -> Self {
        Self {
            pool,
            session_key,
            cookies,
        }
    }
}

/// Build the application router.
pub fn build_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    let cors = if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(LOCAL_ORIGINS.map(HeaderValue::from_static))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE])
            .allow_credentials(true)
    };

    Router::new()
        .merge(routes::index::router(&config.static_dir))
        .merge(routes::health::router())
        .merge(routes::phrases::router())
        .merge(routes::votes::router())
        .merge(routes::reference::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_config).await?;
/// let config = ServerConfig::default();
/// run_server(pool, config).await?;
/// ```
pub async fn run_server(pool: PgPool, config: ServerConfig) -> Result<(), ServerError> {
    let session_key = config.session_key.clone().into_key()?;
    tracing::info!(
        persisted = session_key.is_persisted(),
        static_dir = %config.static_dir.display(),
        "Session key loaded"
    );

    let state = Arc::new(AppState::new(pool, session_key, config.cookies.clone()));
    let app = build_router(state, &config);

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid session key: {0}")]
    SessionKey(#[from] SessionKeyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 5000);
        assert!(!config.cors_permissive);
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert!(matches!(config.session_key, SessionKeyConfig::Ephemeral));
        assert!(!config.cookies.secure);
    }
}
