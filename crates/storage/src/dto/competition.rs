use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Competition, JudgingCriterion, TimelineEntry};

/// Request payload for creating a new competition
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompetitionRequest {
    /// Public competition identifier, chosen by the caller and referenced by
    /// registrations.
    #[validate(range(min = 1, message = "Competition id must be a positive integer"))]
    pub id: i32,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: String,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Slug must be between 1 and 255 characters"
    ))]
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub long_description: String,

    #[serde(default)]
    #[validate(length(max = 255))]
    pub prize: String,

    #[serde(default)]
    #[validate(length(max = 500))]
    pub image: String,

    #[validate(custom(function = "validate_status"))]
    #[serde(default = "default_status")]
    pub status: String,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub rules: Vec<String>,

    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,

    #[serde(default)]
    pub judging_criteria: Vec<JudgingCriterion>,
}

/// Request payload for updating an existing competition
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompetitionRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 255))]
    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,

    pub description: Option<String>,

    pub long_description: Option<String>,

    #[validate(length(max = 255))]
    pub prize: Option<String>,

    #[validate(length(max = 500))]
    pub image: Option<String>,

    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    pub rules: Option<Vec<String>>,

    pub timeline: Option<Vec<TimelineEntry>>,

    pub judging_criteria: Option<Vec<JudgingCriterion>>,
}

/// Admin overwrite of the participant counter. Absolute value, not a delta;
/// the registration path never goes through here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SetParticipantsRequest {
    #[validate(range(min = 0, message = "Participants must be zero or more"))]
    pub participants: i32,
}

/// Response containing competition details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionResponse {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub long_description: String,
    pub prize: String,
    pub image: String,
    pub status: String,
    pub participants: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub rules: Vec<String>,
    pub timeline: Vec<TimelineEntry>,
    pub judging_criteria: Vec<JudgingCriterion>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// Validation helpers
fn default_status() -> String {
    "upcoming".to_string()
}

fn validate_slug(slug: &str) -> Result<(), validator::ValidationError> {
    let is_valid = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--");

    if is_valid {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_slug"))
    }
}

fn validate_status(status: &str) -> Result<(), validator::ValidationError> {
    const VALID_STATUSES: &[&str] = &["active", "upcoming", "completed", "cancelled"];

    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_status"))
    }
}

impl CreateCompetitionRequest {
    /// Additional validation that requires multiple fields
    pub fn validate_dates(&self) -> Result<(), &'static str> {
        if let (Some(end), Some(start)) = (self.end_date, self.start_date) {
            if end < start {
                return Err("End date must be on or after start date");
            }
        }

        Ok(())
    }
}

impl From<Competition> for CompetitionResponse {
    fn from(comp: Competition) -> Self {
        Self {
            id: comp.external_id,
            title: comp.title,
            slug: comp.slug,
            description: comp.description,
            long_description: comp.long_description,
            prize: comp.prize,
            image: comp.image,
            status: comp.status,
            participants: comp.participants,
            start_date: comp.start_date,
            end_date: comp.end_date,
            rules: comp.rules.0,
            timeline: comp.timeline.0,
            judging_criteria: comp.judging_criteria.0,
            created_at: comp.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateCompetitionRequest {
        CreateCompetitionRequest {
            id: 42,
            title: "Art Fest".to_string(),
            slug: "art-fest".to_string(),
            description: String::new(),
            long_description: String::new(),
            prize: String::new(),
            image: String::new(),
            status: default_status(),
            start_date: None,
            end_date: None,
            rules: Vec::new(),
            timeline: Vec::new(),
            judging_criteria: Vec::new(),
        }
    }

    #[test]
    fn test_default_status_is_upcoming() {
        let req: CreateCompetitionRequest =
            serde_json::from_str(r#"{"id": 1, "title": "Art Fest", "slug": "art-fest"}"#).unwrap();
        assert_eq!(req.status, "upcoming");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_rejects_unknown_status() {
        let mut req = valid_request();
        req.status = "archived".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_rejects_uppercase_slug() {
        let mut req = valid_request();
        req.slug = "Art-Fest".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_date_range() {
        let mut req = valid_request();
        req.start_date = NaiveDate::from_ymd_opt(2026, 3, 10);
        req.end_date = NaiveDate::from_ymd_opt(2026, 3, 1);
        assert!(req.validate_dates().is_err());
    }

    #[test]
    fn test_response_exposes_external_id_as_id() {
        let body = serde_json::to_value(CompetitionResponse {
            id: 42,
            title: "Art Fest".to_string(),
            slug: "art-fest".to_string(),
            description: String::new(),
            long_description: String::new(),
            prize: String::new(),
            image: String::new(),
            status: "active".to_string(),
            participants: 7,
            start_date: None,
            end_date: None,
            rules: Vec::new(),
            timeline: Vec::new(),
            judging_criteria: Vec::new(),
            created_at: chrono::Utc::now(),
        })
        .unwrap();

        assert_eq!(body["id"], 42);
        assert_eq!(body["participants"], 7);
        assert!(body.get("longDescription").is_some());
        assert!(body.get("judgingCriteria").is_some());
        assert!(body.get("competitionId").is_none());
    }
}
