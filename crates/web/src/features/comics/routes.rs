use axum::{
    Router,
    routing::{get, put},
};
use storage::Database;

use super::handlers::{get_comic_of_month, set_comic_of_month};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/comic-of-the-month", get(get_comic_of_month))
        .route("/:id/comic-of-the-month", put(set_comic_of_month))
}
