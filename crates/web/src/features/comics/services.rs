use sqlx::PgPool;
use storage::{error::Result, models::Comic, repository::comic::ComicRepository};

/// Get the currently featured comic
pub async fn comic_of_month(pool: &PgPool) -> Result<Comic> {
    let repo = ComicRepository::new(pool);
    repo.find_comic_of_month().await
}

/// Feature a comic, unfeaturing whichever held the flag before
pub async fn set_comic_of_month(pool: &PgPool, id: i32) -> Result<Comic> {
    let repo = ComicRepository::new(pool);
    repo.set_comic_of_month(id).await
}
