//! Health and database connectivity endpoints

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

use crate::db::ping;
use crate::http::server::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/test-db - run `SELECT 1` and report the outcome
async fn test_db(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    match ping(&state.pool).await {
        Ok(result) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "message": "Database connection successful",
                "result": result
            })),
        ),
        Err(e) => {
            tracing::error!("Database connectivity check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "error",
                    "message": e.to_string()
                })),
            )
        }
    }
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/api/test-db", get(test_db))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_returns_ok() {
        let Json(body) = health().await;
        assert_eq!(body.status, "ok");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }
}
