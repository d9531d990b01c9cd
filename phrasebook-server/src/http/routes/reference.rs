//! Language and category endpoints (read-only)

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::db::repos::{Category, Language, ReferenceRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET /api/languages
async fn list_languages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Language>>, ApiError> {
    Ok(Json(ReferenceRepo::new(&state.pool).languages().await?))
}

/// GET /api/categories
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(ReferenceRepo::new(&state.pool).categories().await?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/languages", get(list_languages))
        .route("/api/categories", get(list_categories))
}
