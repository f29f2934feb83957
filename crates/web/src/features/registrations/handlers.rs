use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::{ApiResponse, PaginationParams},
    dto::registration::{
        RegistrationConfirmation, RegistrationListResponse, RegistrationPagination,
        RegistrationRequest, RegistrationResponse,
    },
};

use crate::error::WebError;

use super::services::{self, RequestContext};

#[utoipa::path(
    post,
    path = "/api/competitions/{id}/register",
    params(
        ("id" = i32, Path, description = "Competition external id")
    ),
    request_body = RegistrationRequest,
    responses(
        (status = 201, description = "Registration recorded", body = ApiResponse<RegistrationConfirmation>),
        (status = 400, description = "Malformed submission or competition not open for registration"),
        (status = 404, description = "Competition not found"),
        (status = 409, description = "Duplicate team name or email for this competition")
    ),
    tag = "registrations"
)]
pub async fn register_for_competition(
    State(db): State<Database>,
    Path(id): Path<i32>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(req): Json<RegistrationRequest>,
) -> Result<Response, WebError> {
    let context = RequestContext {
        ip_address: Some(client_ip(&headers, addr)),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string),
    };

    let registration = services::register(db.pool(), id, req, context).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            RegistrationConfirmation::from(&registration),
            "Registration completed successfully",
        )),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/competitions/{id}/registrations",
    params(
        ("id" = i32, Path, description = "Competition external id"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Page of registrations", body = RegistrationListResponse),
        (status = 400, description = "Invalid pagination parameters"),
        (status = 404, description = "Competition not found")
    ),
    tag = "registrations"
)]
pub async fn list_registrations(
    State(db): State<Database>,
    Path(id): Path<i32>,
    Query(params): Query<PaginationParams>,
) -> Result<Response, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let (rows, total) = services::list_registrations(db.pool(), id, &params).await?;

    let response = RegistrationListResponse {
        success: true,
        data: rows.into_iter().map(RegistrationResponse::from).collect(),
        pagination: RegistrationPagination::new(params.page, params.limit, total),
    };

    Ok(Json(response).into_response())
}

/// First hop of `X-Forwarded-For` when present, else the peer address.
fn client_ip(headers: &HeaderMap, addr: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| addr.ip().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> SocketAddr {
        "192.0.2.7:4433".parse().unwrap()
    }

    #[test]
    fn test_client_ip_prefers_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.9, 10.0.0.1".parse().unwrap());
        assert_eq!(client_ip(&headers, addr()), "203.0.113.9");
    }

    #[test]
    fn test_client_ip_falls_back_to_peer_address() {
        assert_eq!(client_ip(&HeaderMap::new(), addr()), "192.0.2.7");
    }
}
