//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Body shape: `{"error": "<message>", "status": <code>}`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Referenced category, language, or phrase does not exist (400)
    NotFound { resource: &'static str, id: String },

    /// Operation needs a session identity and none is bound (401)
    Unauthorized,

    /// Database error (500, logged, message returned as-is)
    Database(DbError),

    /// Internal error (500)
    Internal { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::NotFound { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Database(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::NotFound { resource, id } => format!("{} '{}' not found", resource, id),
            Self::Unauthorized => "user not authenticated".to_owned(),
            Self::Database(e) => e.to_string(),
            Self::Internal { message } => message.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        match &self {
            Self::Database(_) => tracing::error!("Database error: {}", message),
            Self::Internal { .. } => tracing::error!("Internal error: {}", message),
            _ => tracing::debug!(status = status.as_u16(), "request rejected: {}", message),
        }

        let body = Json(json!({
            "error": message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Database(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(ValidationError::MalformedBody {
            reason: rejection.body_text(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Empty { field: "phrase" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "missing required field: phrase");
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn not_found_reuses_400() {
        let err = ApiError::from(DbError::NotFound {
            resource: "category",
            id: "Grandma".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "category 'Grandma' not found");
    }

    #[tokio::test]
    async fn unauthorized_is_401() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn database_error_is_500_with_message() {
        let err = ApiError::from(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("pool timed out"), "got: {}", message);
    }
}
