use sqlx::PgPool;
use storage::{
    dto::common::PaginationParams,
    dto::registration::{
        MAX_TEAM_SIZE, MIN_TEAM_SIZE, RegistrationMetadata, RegistrationRequest,
        validate_registration,
    },
    models::CompetitionRegistration,
    repository::{CompetitionRepository, RegistrationRepository},
};

use crate::error::{COMPETITION_NOT_FOUND, WebError};

/// Connection-derived fallbacks for the metadata block. Values supplied in
/// the request body win over these.
pub struct RequestContext {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Execute a registration end to end. The order is fixed: request-shape
/// guard, team-size bounds, competition lookup, status gate, field
/// validation, normalization, then the transactional insert which also
/// bumps the participants counter. Nothing is written before every check
/// has passed.
pub async fn register(
    pool: &PgPool,
    competition_id: i32,
    req: RegistrationRequest,
    context: RequestContext,
) -> Result<CompetitionRegistration, WebError> {
    let (title, data) = match (req.competition_title, req.registration_data) {
        (Some(title), Some(data)) if !title.trim().is_empty() => (title.trim().to_string(), data),
        _ => {
            return Err(WebError::BadRequest(
                "Competition title and registration data are required".to_string(),
            ));
        }
    };

    // The stored title column is 255 characters wide.
    if title.chars().count() > 255 {
        return Err(WebError::BadRequest(
            "Competition title must be at most 255 characters".to_string(),
        ));
    }

    if data.named_member_count() < MIN_TEAM_SIZE || data.team_members.len() > MAX_TEAM_SIZE {
        return Err(WebError::BadRequest(format!(
            "A team must have between {MIN_TEAM_SIZE} and {MAX_TEAM_SIZE} members"
        )));
    }

    let competitions = CompetitionRepository::new(pool);
    let competition = competitions
        .find_by_external_id(competition_id)
        .await
        .map_err(|e| WebError::from_storage(e, COMPETITION_NOT_FOUND))?;

    if !competition.is_open_for_registration() {
        return Err(WebError::InvalidState(
            "Registration is only allowed for active or upcoming competitions".to_string(),
        ));
    }

    validate_registration(&data)?;
    let normalized = data.normalized();

    let supplied = req.metadata.unwrap_or_default();
    let metadata = RegistrationMetadata {
        registration_timestamp: supplied.registration_timestamp,
        user_agent: supplied.user_agent.or(context.user_agent),
        ip_address: supplied.ip_address.or(context.ip_address).map(clamp_ip),
    };

    let registrations = RegistrationRepository::new(pool);
    let registration = registrations
        .create(competition.external_id, &title, &normalized, &metadata)
        .await?;

    tracing::info!(
        competition_id = registration.competition_id,
        team_name = %registration.team_name,
        "Registration recorded"
    );

    Ok(registration)
}

/// Page of registrations for a competition. The competition must exist;
/// an unknown id gets the same 404 as the detail endpoint.
pub async fn list_registrations(
    pool: &PgPool,
    competition_id: i32,
    params: &PaginationParams,
) -> Result<(Vec<CompetitionRegistration>, i64), WebError> {
    let competitions = CompetitionRepository::new(pool);
    competitions
        .find_by_external_id(competition_id)
        .await
        .map_err(|e| WebError::from_storage(e, COMPETITION_NOT_FOUND))?;

    let repo = RegistrationRepository::new(pool);
    let page = repo.list_for_competition(competition_id, params).await?;

    Ok(page)
}

/// Cut an address to the width of the `ip_address` column. The value can
/// carry a whole forwarded-for chain when a caller puts one in the body.
fn clamp_ip(ip: String) -> String {
    const MAX_CHARS: usize = 64;

    if ip.chars().count() > MAX_CHARS {
        ip.chars().take(MAX_CHARS).collect()
    } else {
        ip
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_ip_keeps_ordinary_addresses() {
        assert_eq!(clamp_ip("203.0.113.9".to_string()), "203.0.113.9");

        let v6 = "2001:0db8:85a3:0000:0000:8a2e:0370:7334".to_string();
        assert_eq!(clamp_ip(v6.clone()), v6);
    }

    #[test]
    fn test_clamp_ip_cuts_to_column_width() {
        let chain = "203.0.113.9, ".repeat(20);
        let clamped = clamp_ip(chain);
        assert_eq!(clamped.chars().count(), 64);
        assert!(clamped.starts_with("203.0.113.9, 203.0.113.9"));
    }
}
