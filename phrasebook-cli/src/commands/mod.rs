//! Subcommand implementations

pub mod check_db;
pub mod database;
pub mod migrate;
pub mod serve;

pub use check_db::run_check_db;
pub use migrate::run_migrate;
pub use serve::run_serve;
