use sqlx::types::Json;
use sqlx::{PgPool, QueryBuilder};

use crate::dto::common::PaginationParams;
use crate::dto::registration::{RegistrationData, RegistrationMetadata, RegistrationSort};
use crate::error::{Result, map_unique_violation};
use crate::models::CompetitionRegistration;

const UNIQUE_MESSAGES: &[(&str, &str)] = &[
    (
        "uq_registrations_competition_team",
        "A registration with this team name already exists for this competition",
    ),
    (
        "uq_registrations_competition_email",
        "A registration with this email already exists for this competition",
    ),
];

/// Repository for team registration database operations
pub struct RegistrationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RegistrationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a registration and bump the competition's participant counter
    /// in one transaction. A duplicate team name or email surfaces as a
    /// `ConstraintViolation` naming the conflicting field and leaves the
    /// counter untouched.
    pub async fn create(
        &self,
        competition_id: i32,
        competition_title: &str,
        data: &RegistrationData,
        metadata: &RegistrationMetadata,
    ) -> Result<CompetitionRegistration> {
        let mut tx = self.pool.begin().await?;

        let registration = sqlx::query_as::<_, CompetitionRegistration>(
            r#"
            INSERT INTO competition_registrations (
                competition_id, competition_title, team_name, team_leader_name,
                email, mobile, team_members, college_name, accept_terms,
                registered_at, user_agent, ip_address
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, now()), $11, $12)
            RETURNING registration_id, competition_id, competition_title, team_name,
                      team_leader_name, email, mobile, team_members, college_name,
                      accept_terms, registered_at, user_agent, ip_address
            "#,
        )
        .bind(competition_id)
        .bind(competition_title)
        .bind(&data.team_name)
        .bind(&data.team_leader_name)
        .bind(&data.email)
        .bind(&data.mobile)
        .bind(Json(&data.team_members))
        .bind(&data.college_name)
        .bind(data.accept_terms)
        .bind(metadata.registration_timestamp)
        .bind(&metadata.user_agent)
        .bind(&metadata.ip_address)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, UNIQUE_MESSAGES))?;

        sqlx::query(
            r#"
            UPDATE competitions
            SET participants = participants + 1
            WHERE external_id = $1
            "#,
        )
        .bind(competition_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(registration)
    }

    /// Page of registrations for one competition plus the total row count
    pub async fn list_for_competition(
        &self,
        competition_id: i32,
        params: &PaginationParams,
    ) -> Result<(Vec<CompetitionRegistration>, i64)> {
        let total = self.count_for_competition(competition_id).await?;
        let rows = self.fetch_page(competition_id, params).await?;

        Ok((rows, total))
    }

    async fn count_for_competition(&self, competition_id: i32) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM competition_registrations
            WHERE competition_id = $1
            "#,
        )
        .bind(competition_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    async fn fetch_page(
        &self,
        competition_id: i32,
        params: &PaginationParams,
    ) -> Result<Vec<CompetitionRegistration>> {
        let sort = RegistrationSort::parse_lenient(params.sort.as_deref());

        let mut query = QueryBuilder::new(
            r#"
            SELECT registration_id, competition_id, competition_title, team_name,
                   team_leader_name, email, mobile, team_members, college_name,
                   accept_terms, registered_at, user_agent, ip_address
            FROM competition_registrations
            WHERE competition_id =
            "#,
        );
        query.push_bind(competition_id);
        query.push(" ORDER BY ");
        query.push(sort.order_clause());
        query.push(" LIMIT ");
        query.push_bind(params.limit as i64);
        query.push(" OFFSET ");
        query.push_bind(params.offset());

        let rows: Vec<CompetitionRegistration> =
            query.build_query_as().fetch_all(self.pool).await?;

        Ok(rows)
    }
}
