use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Comic;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComicResponse {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub image: String,
    pub is_comic_of_month: bool,
    pub published_at: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<Comic> for ComicResponse {
    fn from(comic: Comic) -> Self {
        Self {
            id: comic.external_id,
            title: comic.title,
            slug: comic.slug,
            description: comic.description,
            image: comic.image,
            is_comic_of_month: comic.is_comic_of_month,
            published_at: comic.published_at,
            created_at: comic.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_response_uses_external_id() {
        let comic = Comic {
            comic_id: Uuid::new_v4(),
            external_id: 7,
            title: "The Great Jelly Heist".to_string(),
            slug: "the-great-jelly-heist".to_string(),
            description: "Issue one".to_string(),
            image: "/images/comics/jelly-heist.png".to_string(),
            is_comic_of_month: true,
            published_at: None,
            created_at: Utc::now(),
        };

        let body = serde_json::to_value(ComicResponse::from(comic)).unwrap();
        assert_eq!(body["id"], 7);
        assert_eq!(body["isComicOfMonth"], true);
        assert!(body.get("comicId").is_none());
    }
}
