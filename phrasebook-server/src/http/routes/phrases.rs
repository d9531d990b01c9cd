//! Phrase endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{PhraseRecord, PhraseRepo, Submitter};
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, SessionIdentity};
use crate::http::server::AppState;
use crate::models::{ListParams, NewPhrase, PhraseFilter};
use crate::session::new_token;

/// Submit phrase request; every field is checked for presence by hand so
/// a missing one is a 400 naming the field.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitPhraseRequest {
    pub phrase: Option<String>,
    #[serde(rename = "languageCode")]
    pub language_code: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitPhraseResponse {
    pub success: bool,
    pub message: &'static str,
    pub phrase_id: i64,
}

/// Phrase listing entry
#[derive(Debug, Serialize)]
pub struct PhraseResponse {
    pub phrase_id: i64,
    pub content: String,
    pub language_code: String,
    pub language_name: String,
    pub category_name: String,
    pub submitted_by: String,
    pub submitted_at: String,
    pub upvotes: i32,
    pub downvotes: i32,
    pub score: i32,
}

impl From<PhraseRecord> for PhraseResponse {
    fn from(p: PhraseRecord) -> Self {
        Self {
            phrase_id: p.phrase_id,
            content: p.content,
            language_code: p.language_code,
            language_name: p.language_name,
            category_name: p.category_name,
            submitted_by: p.submitted_by,
            submitted_at: p.submitted_at.to_rfc3339(),
            upvotes: p.upvotes,
            downvotes: p.downvotes,
            score: p.score,
        }
    }
}

/// POST /api/phrases - submit a phrase
///
/// Without a session, a temporary user is created and a session cookie set.
async fn submit_phrase(
    State(state): State<Arc<AppState>>,
    identity: SessionIdentity,
    ApiJson(req): ApiJson<SubmitPhraseRequest>,
) -> Result<Response, ApiError> {
    let phrase = NewPhrase::new(
        req.phrase.as_deref(),
        req.language_code.as_deref(),
        req.category.as_deref(),
    )?;

    let fresh_token = identity.user_id.is_none().then(new_token);
    let submitter = match &fresh_token {
        Some(token) => Submitter::Anonymous {
            session_token: token,
        },
        None => Submitter::User(identity.require()?),
    };

    let submission = PhraseRepo::new(&state.pool).submit(&phrase, submitter).await?;

    let mut response = (
        StatusCode::CREATED,
        Json(SubmitPhraseResponse {
            success: true,
            message: "Phrase submitted successfully",
            phrase_id: submission.phrase_id,
        }),
    )
        .into_response();

    if let Some(token) = fresh_token {
        let cookie = state
            .cookies
            .header_value(&state.session_key.sign(&token))
            .map_err(|e| ApiError::Internal {
                message: format!("could not encode session cookie: {}", e),
            })?;
        response.headers_mut().insert(SET_COOKIE, cookie);
    }

    Ok(response)
}

/// GET /api/phrases - list phrases by descending score
async fn list_phrases(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<PhraseResponse>>, ApiError> {
    let filter = PhraseFilter::try_from(params)?;
    let phrases = PhraseRepo::new(&state.pool).list(&filter).await?;

    Ok(Json(phrases.into_iter().map(PhraseResponse::from).collect()))
}

/// Phrase routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/phrases", get(list_phrases).post(submit_phrase))
}
