//! Vote repository
//!
//! One vote per (user, phrase), enforced by `votes_user_phrase_key` and
//! written with a single upsert. The phrase's counters are recomputed from
//! the votes table in the same transaction.

use sqlx::{FromRow, PgPool};

use crate::models::VoteValue;
use super::DbError;

/// Denormalized counters on a phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct Tally {
    pub upvotes: i32,
    pub downvotes: i32,
    pub score: i32,
}

/// Result of casting a vote
#[derive(Debug, Clone)]
pub struct VoteOutcome {
    pub vote_id: i64,
    /// False when an earlier vote by the same user was overwritten
    pub inserted: bool,
    pub tally: Tally,
}

/// Vote repository
pub struct VoteRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> VoteRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Cast or replace `user_id`'s vote on `phrase_id` (atomic).
    ///
    /// The phrase row is locked first, so concurrent votes on one phrase
    /// recompute its counters one after another and never from a stale
    /// snapshot.
    pub async fn cast(
        &self,
        user_id: i64,
        phrase_id: i64,
        value: VoteValue,
    ) -> Result<VoteOutcome, DbError> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<i64> =
            sqlx::query_scalar("SELECT phrase_id FROM phrases WHERE phrase_id = $1 FOR UPDATE")
                .bind(phrase_id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Err(DbError::not_found("phrase", phrase_id));
        }

        // xmax is 0 only for a freshly inserted row version
        let (vote_id, inserted): (i64, bool) = sqlx::query_as(
            r#"
            INSERT INTO votes (user_id, phrase_id, vote_value)
            VALUES ($1, $2, $3)
            ON CONFLICT ON CONSTRAINT votes_user_phrase_key
            DO UPDATE SET vote_value = EXCLUDED.vote_value, updated_at = NOW()
            RETURNING vote_id, (xmax = 0) AS inserted
            "#,
        )
        .bind(user_id)
        .bind(phrase_id)
        .bind(value.as_i16())
        .fetch_one(&mut *tx)
        .await?;

        let tally: Tally = sqlx::query_as(
            r#"
            UPDATE phrases p
            SET upvotes = t.up, downvotes = t.down, score = t.up - t.down
            FROM (
                SELECT COUNT(*) FILTER (WHERE vote_value = 1)::INT AS up,
                       COUNT(*) FILTER (WHERE vote_value = -1)::INT AS down
                FROM votes
                WHERE phrase_id = $1
            ) t
            WHERE p.phrase_id = $1
            RETURNING p.upvotes, p.downvotes, p.score
            "#,
        )
        .bind(phrase_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            user_id,
            phrase_id,
            vote = value.as_i16(),
            inserted,
            score = tally.score,
            "vote recorded"
        );
        Ok(VoteOutcome {
            vote_id,
            inserted,
            tally,
        })
    }
}
