use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{Database, dto::comic::ComicResponse, dto::common::ApiResponse};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/comics/comic-of-the-month",
    responses(
        (status = 200, description = "Currently featured comic", body = ApiResponse<ComicResponse>),
        (status = 404, description = "No comic is featured")
    ),
    tag = "comics"
)]
pub async fn get_comic_of_month(State(db): State<Database>) -> Result<Response, WebError> {
    let comic = services::comic_of_month(db.pool())
        .await
        .map_err(|e| WebError::from_storage(e, "Comic of the month not found"))?;

    Ok(Json(ApiResponse::success(ComicResponse::from(comic))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/comics/{id}/comic-of-the-month",
    params(
        ("id" = i32, Path, description = "Comic external id")
    ),
    responses(
        (status = 200, description = "Comic is now featured", body = ApiResponse<ComicResponse>),
        (status = 404, description = "Comic not found")
    ),
    tag = "comics"
)]
pub async fn set_comic_of_month(
    State(db): State<Database>,
    Path(id): Path<i32>,
) -> Result<Response, WebError> {
    let comic = services::set_comic_of_month(db.pool(), id)
        .await
        .map_err(|e| WebError::from_storage(e, "Comic not found"))?;

    Ok(Json(ApiResponse::success_with_message(
        ComicResponse::from(comic),
        "Comic of the month updated",
    ))
    .into_response())
}
