use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{list_registrations, register_for_competition};

/// Nested under `/api/competitions` alongside the competition routes.
pub fn routes() -> Router<Database> {
    Router::new()
        .route("/:id/register", post(register_for_competition))
        .route("/:id/registrations", get(list_registrations))
}
