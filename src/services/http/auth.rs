use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};

use super::{client_ip, dispatch, ApiJson, AppState, ErrorBody};
use crate::models::users::{AuthResponse, LoginRequest, SignupRequest};
use crate::services::auth::AuthRequest;
use crate::services::ServiceError;

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account and zeroed portfolio created", body = AuthResponse),
        (status = 400, description = "Missing or malformed field", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody)
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ServiceError> {
    let ip = client_ip(&headers);

    let response = dispatch(&state.channels.auth_tx, |tx| AuthRequest::Signup {
        request,
        ip,
        response: tx,
    })
    .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = AuthResponse),
        (status = 401, description = "Invalid credentials or inactive account", body = ErrorBody)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ServiceError> {
    let ip = client_ip(&headers);

    let response = dispatch(&state.channels.auth_tx, |tx| AuthRequest::Login {
        request,
        ip,
        response: tx,
    })
    .await?;

    Ok(Json(response))
}
