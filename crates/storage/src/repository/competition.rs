use sqlx::PgPool;
use sqlx::types::Json;

use crate::dto::competition::{CreateCompetitionRequest, UpdateCompetitionRequest};
use crate::error::{Result, StorageError, map_unique_violation};
use crate::models::Competition;

const UNIQUE_MESSAGES: &[(&str, &str)] = &[
    (
        "uq_competitions_external_id",
        "A competition with this id already exists",
    ),
    (
        "uq_competitions_slug",
        "A competition with this slug already exists",
    ),
];

/// Repository for competition database operations
pub struct CompetitionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CompetitionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all competitions, newest start date first
    pub async fn list(&self) -> Result<Vec<Competition>> {
        let competitions = sqlx::query_as::<_, Competition>(
            r#"
            SELECT competition_id, external_id, title, slug, description, long_description,
                   prize, image, status, participants, start_date, end_date,
                   rules, timeline, judging_criteria, created_at
            FROM competitions
            ORDER BY start_date DESC, created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(competitions)
    }

    /// Get a competition by its public id
    pub async fn find_by_external_id(&self, id: i32) -> Result<Competition> {
        let competition = sqlx::query_as::<_, Competition>(
            r#"
            SELECT competition_id, external_id, title, slug, description, long_description,
                   prize, image, status, participants, start_date, end_date,
                   rules, timeline, judging_criteria, created_at
            FROM competitions
            WHERE external_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(competition)
    }

    /// Create a new competition
    pub async fn create(&self, req: &CreateCompetitionRequest) -> Result<Competition> {
        let competition = sqlx::query_as::<_, Competition>(
            r#"
            INSERT INTO competitions (
                external_id, title, slug, description, long_description, prize,
                image, status, start_date, end_date, rules, timeline, judging_criteria
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING competition_id, external_id, title, slug, description, long_description,
                      prize, image, status, participants, start_date, end_date,
                      rules, timeline, judging_criteria, created_at
            "#,
        )
        .bind(req.id)
        .bind(&req.title)
        .bind(&req.slug)
        .bind(&req.description)
        .bind(&req.long_description)
        .bind(&req.prize)
        .bind(&req.image)
        .bind(&req.status)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(Json(&req.rules))
        .bind(Json(&req.timeline))
        .bind(Json(&req.judging_criteria))
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, UNIQUE_MESSAGES))?;

        Ok(competition)
    }

    /// Apply a partial update; absent fields keep their stored values
    pub async fn update(&self, id: i32, req: &UpdateCompetitionRequest) -> Result<Competition> {
        let competition = sqlx::query_as::<_, Competition>(
            r#"
            UPDATE competitions
            SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                long_description = COALESCE($5, long_description),
                prize = COALESCE($6, prize),
                image = COALESCE($7, image),
                status = COALESCE($8, status),
                start_date = COALESCE($9, start_date),
                end_date = COALESCE($10, end_date),
                rules = COALESCE($11, rules),
                timeline = COALESCE($12, timeline),
                judging_criteria = COALESCE($13, judging_criteria)
            WHERE external_id = $1
            RETURNING competition_id, external_id, title, slug, description, long_description,
                      prize, image, status, participants, start_date, end_date,
                      rules, timeline, judging_criteria, created_at
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.slug)
        .bind(&req.description)
        .bind(&req.long_description)
        .bind(&req.prize)
        .bind(&req.image)
        .bind(&req.status)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(req.rules.as_ref().map(Json))
        .bind(req.timeline.as_ref().map(Json))
        .bind(req.judging_criteria.as_ref().map(Json))
        .fetch_optional(self.pool)
        .await
        .map_err(|e| map_unique_violation(e, UNIQUE_MESSAGES))?
        .ok_or(StorageError::NotFound)?;

        Ok(competition)
    }

    /// Overwrite the participants counter
    pub async fn set_participants(&self, id: i32, participants: i32) -> Result<Competition> {
        let competition = sqlx::query_as::<_, Competition>(
            r#"
            UPDATE competitions
            SET participants = $2
            WHERE external_id = $1
            RETURNING competition_id, external_id, title, slug, description, long_description,
                      prize, image, status, participants, start_date, end_date,
                      rules, timeline, judging_criteria, created_at
            "#,
        )
        .bind(id)
        .bind(participants)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(competition)
    }

    /// Delete a competition by its public id; registrations cascade
    pub async fn delete(&self, id: i32) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM competitions
            WHERE external_id = $1
            "#,
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
