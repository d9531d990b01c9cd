//! Custom Axum extractors

use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::db::repos::SessionRepo;
use crate::session::{find_cookie, SESSION_COOKIE};
use super::error::ApiError;
use super::server::AppState;

/// JSON body whose rejections become 400 `ApiError`s in the usual shape
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// User bound to the caller's session cookie, if any.
///
/// A missing, unsigned, forged, or unknown cookie resolves to no identity;
/// only a storage failure rejects the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionIdentity {
    pub user_id: Option<i64>,
}

impl SessionIdentity {
    /// The bound user, or 401.
    pub fn require(&self) -> Result<i64, ApiError> {
        self.user_id.ok_or(ApiError::Unauthorized)
    }
}

impl FromRequestParts<Arc<AppState>> for SessionIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(raw) = find_cookie(&parts.headers, SESSION_COOKIE) else {
            return Ok(Self::default());
        };

        let Some(token) = state.session_key.verify(raw) else {
            tracing::debug!("ignoring session cookie with invalid signature");
            return Ok(Self::default());
        };

        let user_id = SessionRepo::new(&state.pool).user_for_token(token).await?;
        if user_id.is_none() {
            tracing::debug!("session cookie refers to unknown session");
        }
        Ok(Self { user_id })
    }
}
