//! phrasebook-server: HTTP backend for a crowdsourced phrase collection
//!
//! Anonymous visitors submit short phrases tagged with a language and a
//! category, browse them ranked by score, and vote once per phrase.
//!
//! - [`db`]: pool, migrations, repositories (PostgreSQL via sqlx)
//! - [`models`]: request validation
//! - [`session`]: signed session cookies for anonymous identities
//! - [`http`]: axum router and handlers

pub mod db;
pub mod http;
pub mod models;
pub mod session;

pub use db::{create_pool, migrate, DatabaseConfig, MIGRATOR};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
