//! Session repository - server side of the session cookie
//!
//! Maps an opaque token to the user it was issued for.

use sqlx::{PgConnection, PgPool};

use super::DbError;

/// Bind `token` to `user_id`.
pub(crate) async fn insert(
    conn: &mut PgConnection,
    token: &str,
    user_id: i64,
) -> Result<(), DbError> {
    sqlx::query("INSERT INTO sessions (token, user_id) VALUES ($1, $2)")
        .bind(token)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Session repository
pub struct SessionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> SessionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// User bound to `token`, if the session exists.
    pub async fn user_for_token(&self, token: &str) -> Result<Option<i64>, DbError> {
        let user_id = sqlx::query_scalar("SELECT user_id FROM sessions WHERE token = $1")
            .bind(token)
            .fetch_optional(self.pool)
            .await?;
        Ok(user_id)
    }
}
