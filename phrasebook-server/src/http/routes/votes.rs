//! Vote endpoint

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::repos::VoteRepo;
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, SessionIdentity};
use crate::http::server::AppState;
use crate::models::{ValidationError, VoteValue};

/// `phrase_id` as clients send it: a JSON integer, or a decimal string
/// read straight from a DOM `data-` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PhraseIdField {
    Number(i64),
    Text(String),
}

impl PhraseIdField {
    pub fn parse(&self) -> Result<i64, ValidationError> {
        match self {
            Self::Number(id) => Ok(*id),
            Self::Text(raw) => raw.trim().parse().map_err(|_| ValidationError::InvalidFormat {
                field: "phrase_id",
                reason: "must be an integer",
            }),
        }
    }
}

/// Cast vote request
#[derive(Debug, Default, Deserialize)]
pub struct CastVoteRequest {
    pub phrase_id: Option<PhraseIdField>,
    /// 1 upvote, -1 downvote, 0 withdraws
    pub vote_value: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CastVoteResponse {
    pub success: bool,
    pub message: &'static str,
}

/// POST /api/votes - cast or replace the caller's vote on a phrase
///
/// Input is validated before the session is checked, so a malformed vote
/// is a 400 even without a session.
async fn cast_vote(
    State(state): State<Arc<AppState>>,
    identity: SessionIdentity,
    ApiJson(req): ApiJson<CastVoteRequest>,
) -> Result<Json<CastVoteResponse>, ApiError> {
    let phrase_id = req
        .phrase_id
        .ok_or(ValidationError::Empty { field: "phrase_id" })?
        .parse()?;
    let value = VoteValue::new(
        req.vote_value
            .ok_or(ValidationError::Empty { field: "vote_value" })?,
    )?;

    let user_id = identity.require()?;
    VoteRepo::new(&state.pool).cast(user_id, phrase_id, value).await?;

    Ok(Json(CastVoteResponse {
        success: true,
        message: "Vote recorded successfully",
    }))
}

/// Vote routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/votes", post(cast_vote))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_fields_are_optional() {
        let req: CastVoteRequest = serde_json::from_str(r#"{"phrase_id": 3}"#).unwrap();
        assert_eq!(req.phrase_id, Some(PhraseIdField::Number(3)));
        assert_eq!(req.vote_value, None);
    }

    #[test]
    fn non_integer_vote_is_rejected_at_parse() {
        assert!(serde_json::from_str::<CastVoteRequest>(r#"{"phrase_id": 3, "vote_value": "1"}"#).is_err());
        assert!(serde_json::from_str::<CastVoteRequest>(r#"{"phrase_id": 3, "vote_value": 0.5}"#).is_err());
    }

    #[test]
    fn phrase_id_accepts_number_or_decimal_string() {
        let req: CastVoteRequest =
            serde_json::from_str(r#"{"phrase_id": "12", "vote_value": 1}"#).unwrap();
        assert_eq!(req.phrase_id.unwrap().parse().unwrap(), 12);

        let req: CastVoteRequest = serde_json::from_str(r#"{"phrase_id": 12}"#).unwrap();
        assert_eq!(req.phrase_id.unwrap().parse().unwrap(), 12);

        let req: CastVoteRequest = serde_json::from_str(r#"{"phrase_id": " 7 "}"#).unwrap();
        assert_eq!(req.phrase_id.unwrap().parse().unwrap(), 7);
    }

    #[test]
    fn non_numeric_phrase_id_is_invalid_format() {
        let err = PhraseIdField::Text("twelve".into()).parse().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { field: "phrase_id", .. }));

        assert!(PhraseIdField::Text("1.5".into()).parse().is_err());
        assert!(PhraseIdField::Text(String::new()).parse().is_err());
    }
}
