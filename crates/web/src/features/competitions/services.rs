use sqlx::PgPool;
use storage::{
    dto::competition::{CreateCompetitionRequest, UpdateCompetitionRequest},
    error::Result,
    models::Competition,
    repository::competition::CompetitionRepository,
};

/// List all competitions
pub async fn list_competitions(pool: &PgPool) -> Result<Vec<Competition>> {
    let repo = CompetitionRepository::new(pool);
    repo.list().await
}

/// Get a competition by its public id
pub async fn get_competition(pool: &PgPool, id: i32) -> Result<Competition> {
    let repo = CompetitionRepository::new(pool);
    repo.find_by_external_id(id).await
}

/// Create a new competition
pub async fn create_competition(
    pool: &PgPool,
    request: &CreateCompetitionRequest,
) -> Result<Competition> {
    let repo = CompetitionRepository::new(pool);
    repo.create(request).await
}

/// Update a competition
pub async fn update_competition(
    pool: &PgPool,
    id: i32,
    request: &UpdateCompetitionRequest,
) -> Result<Competition> {
    let repo = CompetitionRepository::new(pool);
    repo.update(id, request).await
}

/// Overwrite the participants counter
pub async fn set_participants(pool: &PgPool, id: i32, participants: i32) -> Result<Competition> {
    let repo = CompetitionRepository::new(pool);
    repo.set_participants(id, participants).await
}

/// Delete a competition
pub async fn delete_competition(pool: &PgPool, id: i32) -> Result<()> {
    let repo = CompetitionRepository::new(pool);
    repo.delete(id).await
}
