use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::registration::TeamMember;

/// A stored team registration. Registration data arrives nested on the wire
/// and is flattened into columns here; `team_members` keeps its ordered list
/// shape (member 0 is the leader).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CompetitionRegistration {
    pub registration_id: Uuid,
    /// References `Competition::external_id`, same numeric type on both
    /// sides.
    pub competition_id: i32,
    pub competition_title: String,
    pub team_name: String,
    pub team_leader_name: String,
    pub email: String,
    pub mobile: String,
    #[schema(value_type = Vec<TeamMember>)]
    pub team_members: Json<Vec<TeamMember>>,
    pub college_name: String,
    pub accept_terms: bool,
    pub registered_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}
