use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::Comic;

/// Repository for comic database operations
pub struct ComicRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ComicRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the currently featured comic
    pub async fn find_comic_of_month(&self) -> Result<Comic> {
        let comic = sqlx::query_as::<_, Comic>(
            r#"
            SELECT comic_id, external_id, title, slug, description, image,
                   is_comic_of_month, published_at, created_at
            FROM comics
            WHERE is_comic_of_month
            "#,
        )
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(comic)
    }

    /// Feature one comic. The flag is cleared elsewhere and set on the
    /// target inside a single transaction, so at most one comic ever
    /// carries it.
    pub async fn set_comic_of_month(&self, external_id: i32) -> Result<Comic> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE comics
            SET is_comic_of_month = FALSE
            WHERE is_comic_of_month AND external_id <> $1
            "#,
        )
        .bind(external_id)
        .execute(&mut *tx)
        .await?;

        let comic = sqlx::query_as::<_, Comic>(
            r#"
            UPDATE comics
            SET is_comic_of_month = TRUE
            WHERE external_id = $1
            RETURNING comic_id, external_id, title, slug, description, image,
                      is_comic_of_month, published_at, created_at
            "#,
        )
        .bind(external_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        tx.commit().await?;

        Ok(comic)
    }
}
