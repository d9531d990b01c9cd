//! Entry page redirect and static assets

use std::path::Path;
use std::sync::Arc;

use axum::{response::Redirect, routing::get, Router};
use tower_http::services::ServeDir;

use crate::http::server::AppState;

/// Static entry page
pub const ENTRY_PAGE: &str = "/static/index.html";

/// GET / - 303 to the static entry page
async fn index() -> Redirect {
    Redirect::to(ENTRY_PAGE)
}

/// Index routes; `static_dir` is served under `/static`
pub fn router(static_dir: &Path) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .nest_service("/static", ServeDir::new(static_dir))
}
