pub mod config;
pub mod error;
pub mod features;

use axum::Router;
use storage::Database;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::competitions::handlers::list_competitions,
        features::competitions::handlers::get_competition,
        features::competitions::handlers::create_competition,
        features::competitions::handlers::update_competition,
        features::competitions::handlers::delete_competition,
        features::competitions::handlers::set_participants,
        features::registrations::handlers::register_for_competition,
        features::registrations::handlers::list_registrations,
        features::comics::handlers::get_comic_of_month,
        features::comics::handlers::set_comic_of_month,
    ),
    components(
        schemas(
            storage::dto::competition::CreateCompetitionRequest,
            storage::dto::competition::UpdateCompetitionRequest,
            storage::dto::competition::SetParticipantsRequest,
            storage::dto::competition::CompetitionResponse,
            storage::dto::registration::RegistrationRequest,
            storage::dto::registration::RegistrationData,
            storage::dto::registration::TeamMember,
            storage::dto::registration::RegistrationMetadata,
            storage::dto::registration::RegistrationConfirmation,
            storage::dto::registration::RegistrationResponse,
            storage::dto::registration::RegistrationPagination,
            storage::dto::registration::RegistrationListResponse,
            storage::dto::comic::ComicResponse,
            storage::models::TimelineEntry,
            storage::models::JudgingCriterion,
        )
    ),
    tags(
        (name = "competitions", description = "Competition catalogue endpoints"),
        (name = "registrations", description = "Team registration endpoints"),
        (name = "comics", description = "Featured comic endpoints"),
    )
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(db: Database) -> Router {
    let competition_routes =
        features::competitions::routes::routes().merge(features::registrations::routes::routes());

    Router::new()
        .nest("/api/competitions", competition_routes)
        .nest("/api/comics", features::comics::routes::routes())
        .with_state(db)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
}
