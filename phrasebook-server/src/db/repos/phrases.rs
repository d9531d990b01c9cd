//! Phrase repository
//!
//! Handles phrase submission and listing:
//! - submit: category lookup, optional user + session creation, and the
//!   phrase insert run in one transaction
//! - list: single JOIN query with optional conjunctive filters

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::models::{NewPhrase, PhraseFilter};
use super::{reference, sessions, users, DbError, User};

/// Who is submitting a phrase
#[derive(Debug, Clone, Copy)]
pub enum Submitter<'t> {
    /// A user already bound to the caller's session
    User(i64),
    /// No identity yet: create a temporary user and bind it to this new
    /// session token
    Anonymous { session_token: &'t str },
}

/// Result of a successful submission
#[derive(Debug, Clone)]
pub struct Submission {
    pub phrase_id: i64,
    pub user_id: i64,
    /// Set when the submission created the submitting user
    pub created_user: Option<User>,
}

/// Phrase joined with its display fields
#[derive(Debug, Clone, FromRow)]
pub struct PhraseRecord {
    pub phrase_id: i64,
    pub content: String,
    pub language_code: String,
    pub language_name: String,
    pub category_name: String,
    pub submitted_by: String,
    pub submitted_at: DateTime<Utc>,
    pub upvotes: i32,
    pub downvotes: i32,
    pub score: i32,
}

const SELECT_RECORD: &str = r#"
    SELECT p.phrase_id, p.content, p.language_code, l.language_name,
           c.name AS category_name, u.username AS submitted_by,
           p.submitted_at, p.upvotes, p.downvotes, p.score
    FROM phrases p
    JOIN languages l ON p.language_code = l.language_code
    JOIN categories c ON p.category_id = c.category_id
    JOIN users u ON p.user_id = u.user_id
"#;

/// Phrase repository
pub struct PhraseRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PhraseRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Submit a phrase (atomic).
    ///
    /// An unknown category or language fails with `NotFound` and leaves no
    /// rows behind, including the user a `Submitter::Anonymous` would have
    /// created.
    pub async fn submit(
        &self,
        phrase: &NewPhrase,
        submitter: Submitter<'_>,
    ) -> Result<Submission, DbError> {
        let mut tx = self.pool.begin().await?;

        let category_id = reference::category_id(&mut tx, phrase.category.as_str())
            .await?
            .ok_or_else(|| DbError::not_found("category", phrase.category.as_str()))?;

        let (user_id, created_user) = match submitter {
            Submitter::User(user_id) => (user_id, None),
            Submitter::Anonymous { session_token } => {
                let user = users::insert_temporary(&mut tx).await?;
                sessions::insert(&mut tx, session_token, user.user_id).await?;
                (user.user_id, Some(user))
            }
        };

        let phrase_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO phrases (user_id, content, language_code, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING phrase_id
            "#,
        )
        .bind(user_id)
        .bind(phrase.text.as_str())
        .bind(phrase.language.as_str())
        .bind(category_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            DbError::missing_reference(
                e,
                "phrases_language_code_fkey",
                "language",
                phrase.language.as_str(),
            )
        })?;

        tx.commit().await?;

        tracing::info!(phrase_id, user_id, category_id, "phrase submitted");
        Ok(Submission {
            phrase_id,
            user_id,
            created_user,
        })
    }

    /// List phrases, highest score first.
    ///
    /// Ties are broken by newest submission, then highest ID, so the order
    /// is stable between calls.
    pub async fn list(&self, filter: &PhraseFilter) -> Result<Vec<PhraseRecord>, DbError> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_RECORD);
        builder.push(" WHERE 1=1");
        if let Some(language) = &filter.language {
            builder.push(" AND p.language_code = ");
            builder.push_bind(language.clone());
        }
        if let Some(category) = &filter.category {
            builder.push(" AND (c.name = ");
            builder.push_bind(category.clone());
            if let Ok(category_id) = category.parse::<i32>() {
                builder.push(" OR p.category_id = ");
                builder.push_bind(category_id);
            }
            builder.push(")");
        }
        builder.push(" ORDER BY p.score DESC, p.submitted_at DESC, p.phrase_id DESC LIMIT ");
        builder.push_bind(filter.limit);

        let rows = builder.build_query_as::<PhraseRecord>().fetch_all(self.pool).await?;
        Ok(rows)
    }

    /// Get a single phrase by ID.
    #[cfg(test)]
    pub(crate) async fn get(&self, phrase_id: i64) -> Result<PhraseRecord, DbError> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_RECORD);
        builder.push(" WHERE p.phrase_id = ");
        builder.push_bind(phrase_id);

        builder
            .build_query_as::<PhraseRecord>()
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("phrase", phrase_id))
    }
}
