//! User repository
//!
//! Users are created implicitly on first submission and never modified.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection};
use uuid::Uuid;

use super::DbError;

/// Prefix of generated placeholder usernames
pub const TEMP_USER_PREFIX: &str = "temp_user_";

/// Attempts before giving up on a free placeholder name
const MAX_NAME_ATTEMPTS: usize = 5;

/// User record from database
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub linked_account: bool,
    pub created_at: DateTime<Utc>,
}

/// `temp_user_` followed by 8 random hex characters.
pub fn placeholder_username() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}{}", TEMP_USER_PREFIX, &suffix[..8])
}

/// Insert an anonymous user with a fresh placeholder name.
///
/// A name collision is skipped with `ON CONFLICT DO NOTHING` and a new name
/// drawn, so the surrounding transaction is never aborted by it.
pub(crate) async fn insert_temporary(conn: &mut PgConnection) -> Result<User, DbError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let username = placeholder_username();
        let user: Option<User> = sqlx::query_as(
            r#"
            INSERT INTO users (username, linked_account)
            VALUES ($1, FALSE)
            ON CONFLICT (username) DO NOTHING
            RETURNING user_id, username, linked_account, created_at
            "#,
        )
        .bind(&username)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(user) = user {
            tracing::info!(user_id = user.user_id, username = %user.username, "created temporary user");
            return Ok(user);
        }
        tracing::debug!(%username, "placeholder username taken, retrying");
    }

    Err(DbError::Sqlx(sqlx::Error::Protocol(format!(
        "no free placeholder username after {} attempts",
        MAX_NAME_ATTEMPTS
    ))))
}
