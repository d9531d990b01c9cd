//! Languages and categories - read-only reference data

use serde::Serialize;
use sqlx::{FromRow, PgConnection, PgPool};

use super::DbError;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Language {
    pub language_code: String,
    pub language_name: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub category_id: i32,
    pub name: String,
}

/// Resolve a category name to its ID.
pub(crate) async fn category_id(
    conn: &mut PgConnection,
    name: &str,
) -> Result<Option<i32>, DbError> {
    let id = sqlx::query_scalar("SELECT category_id FROM categories WHERE name = $1")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(id)
}

/// Reference data repository
pub struct ReferenceRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReferenceRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn languages(&self) -> Result<Vec<Language>, DbError> {
        let rows = sqlx::query_as(
            "SELECT language_code, language_name FROM languages ORDER BY language_code",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn categories(&self) -> Result<Vec<Category>, DbError> {
        let rows = sqlx::query_as("SELECT category_id, name FROM categories ORDER BY name")
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires database"]
    async fn seeded_reference_data(pool: PgPool) -> sqlx::Result<()> {
        let repo = ReferenceRepo::new(&pool);

        let languages = repo.languages().await.expect("languages");
        assert!(languages.iter().any(|l| l.language_code == "es"));
        assert!(languages.windows(2).all(|w| w[0].language_code <= w[1].language_code));

        let categories = repo.categories().await.expect("categories");
        assert!(categories.iter().any(|c| c.name == "Partner"));

        let mut conn = pool.acquire().await?;
        assert!(category_id(&mut conn, "Partner").await.expect("lookup").is_some());
        assert!(category_id(&mut conn, "Nobody").await.expect("lookup").is_none());
        Ok(())
    }
}
