use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Comic {
    pub comic_id: Uuid,
    pub external_id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub image: String,
    /// At most one comic carries this flag; the featured-comic service swap
    /// is the only writer.
    pub is_comic_of_month: bool,
    pub published_at: Option<chrono::NaiveDate>,
    pub created_at: DateTime<Utc>,
}
