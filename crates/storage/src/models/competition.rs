use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Competition {
    pub competition_id: Uuid,
    /// Stable public identifier used in API paths and registration rows.
    pub external_id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub long_description: String,
    pub prize: String,
    pub image: String,
    pub status: String,
    pub participants: i32,
    pub start_date: Option<chrono::NaiveDate>,
    pub end_date: Option<chrono::NaiveDate>,
    #[schema(value_type = Vec<String>)]
    pub rules: Json<Vec<String>>,
    #[schema(value_type = Vec<TimelineEntry>)]
    pub timeline: Json<Vec<TimelineEntry>>,
    #[schema(value_type = Vec<JudgingCriterion>)]
    pub judging_criteria: Json<Vec<JudgingCriterion>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Competition {
    /// Registrations are accepted only while a competition is active or
    /// still upcoming.
    pub fn is_open_for_registration(&self) -> bool {
        matches!(self.status.as_str(), "active" | "upcoming")
    }
}

/// One milestone on a competition's marketing timeline. The date is free
/// text ("March 1st"), not a schedulable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimelineEntry {
    pub date: String,
    pub event: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct JudgingCriterion {
    pub criterion: String,
    pub weight: i32,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn competition_with_status(status: &str) -> Competition {
        Competition {
            competition_id: Uuid::new_v4(),
            external_id: 42,
            title: "Art Fest".to_string(),
            slug: "art-fest".to_string(),
            description: String::new(),
            long_description: String::new(),
            prize: String::new(),
            image: String::new(),
            status: status.to_string(),
            participants: 0,
            start_date: None,
            end_date: None,
            rules: Json(Vec::new()),
            timeline: Json(Vec::new()),
            judging_criteria: Json(Vec::new()),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_active_and_upcoming_accept_registrations() {
        assert!(competition_with_status("active").is_open_for_registration());
        assert!(competition_with_status("upcoming").is_open_for_registration());
    }

    #[test]
    fn test_completed_and_cancelled_reject_registrations() {
        assert!(!competition_with_status("completed").is_open_for_registration());
        assert!(!competition_with_status("cancelled").is_open_for_registration());
    }
}
