use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::ApiResponse,
    dto::competition::{
        CompetitionResponse, CreateCompetitionRequest, SetParticipantsRequest,
        UpdateCompetitionRequest,
    },
};
use validator::Validate;

use crate::error::{COMPETITION_NOT_FOUND, WebError};

use super::services;

#[utoipa::path(
    get,
    path = "/api/competitions",
    responses(
        (status = 200, description = "List all competitions successfully", body = ApiResponse<Vec<CompetitionResponse>>)
    ),
    tag = "competitions"
)]
pub async fn list_competitions(
    State(db): State<Database>,
) -> Result<Json<ApiResponse<Vec<CompetitionResponse>>>, WebError> {
    let competitions = services::list_competitions(db.pool()).await?;

    let response: Vec<CompetitionResponse> = competitions
        .into_iter()
        .map(CompetitionResponse::from)
        .collect();

    Ok(Json(ApiResponse::success(response)))
}

#[utoipa::path(
    get,
    path = "/api/competitions/{id}",
    params(
        ("id" = i32, Path, description = "Competition external id")
    ),
    responses(
        (status = 200, description = "Competition found", body = ApiResponse<CompetitionResponse>),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn get_competition(
    State(db): State<Database>,
    Path(id): Path<i32>,
) -> Result<Response, WebError> {
    let competition = services::get_competition(db.pool(), id)
        .await
        .map_err(|e| WebError::from_storage(e, COMPETITION_NOT_FOUND))?;

    Ok(Json(ApiResponse::success(CompetitionResponse::from(competition))).into_response())
}

#[utoipa::path(
    post,
    path = "/api/competitions",
    request_body = CreateCompetitionRequest,
    responses(
        (status = 201, description = "Competition created successfully", body = ApiResponse<CompetitionResponse>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Id or slug already exists")
    ),
    tag = "competitions"
)]
pub async fn create_competition(
    State(db): State<Database>,
    Json(req): Json<CreateCompetitionRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    req.validate_dates()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let competition = services::create_competition(db.pool(), &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            CompetitionResponse::from(competition),
            "Competition created successfully",
        )),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/api/competitions/{id}",
    params(
        ("id" = i32, Path, description = "Competition external id")
    ),
    request_body = UpdateCompetitionRequest,
    responses(
        (status = 200, description = "Competition updated successfully", body = ApiResponse<CompetitionResponse>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Competition not found"),
        (status = 409, description = "Slug already exists")
    ),
    tag = "competitions"
)]
pub async fn update_competition(
    State(db): State<Database>,
    Path(id): Path<i32>,
    Json(update_req): Json<UpdateCompetitionRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_competition(db.pool(), id, &update_req)
        .await
        .map_err(|e| WebError::from_storage(e, COMPETITION_NOT_FOUND))?;

    Ok(Json(ApiResponse::success_with_message(
        CompetitionResponse::from(updated),
        "Competition updated successfully",
    ))
    .into_response())
}

#[utoipa::path(
    delete,
    path = "/api/competitions/{id}",
    params(
        ("id" = i32, Path, description = "Competition external id")
    ),
    responses(
        (status = 200, description = "Competition deleted successfully"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn delete_competition(
    State(db): State<Database>,
    Path(id): Path<i32>,
) -> Result<Response, WebError> {
    services::delete_competition(db.pool(), id)
        .await
        .map_err(|e| WebError::from_storage(e, COMPETITION_NOT_FOUND))?;

    Ok(Json(ApiResponse::message_only("Competition deleted successfully")).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/competitions/{id}/participants",
    params(
        ("id" = i32, Path, description = "Competition external id")
    ),
    request_body = SetParticipantsRequest,
    responses(
        (status = 200, description = "Participants count overwritten", body = ApiResponse<CompetitionResponse>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Competition not found")
    ),
    tag = "competitions"
)]
pub async fn set_participants(
    State(db): State<Database>,
    Path(id): Path<i32>,
    Json(req): Json<SetParticipantsRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let updated = services::set_participants(db.pool(), id, req.participants)
        .await
        .map_err(|e| WebError::from_storage(e, COMPETITION_NOT_FOUND))?;

    Ok(Json(ApiResponse::success_with_message(
        CompetitionResponse::from(updated),
        "Participants count updated",
    ))
    .into_response())
}
