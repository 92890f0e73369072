use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};

use super::{client_ip, dispatch, ApiJson, AppState, ErrorBody};
use crate::models::users::{UpdateProfile, UpdateUserStatus, UserProfile, UserStatusUpdated};
use crate::services::policy::Caller;
use crate::services::users::UserRequest;
use crate::services::ServiceError;

#[utoipa::path(
    get,
    path = "/api/users/profile",
    responses(
        (status = 200, body = UserProfile),
        (status = 401, body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<UserProfile>, ServiceError> {
    let profile = dispatch(&state.channels.user_tx, |tx| UserRequest::GetProfile {
        user_id: caller.user_id,
        response: tx,
    })
    .await?;

    Ok(Json(profile))
}

#[utoipa::path(
    put,
    path = "/api/users/profile",
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Only the supplied fields change", body = UserProfile),
        (status = 401, body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(update): ApiJson<UpdateProfile>,
) -> Result<Json<UserProfile>, ServiceError> {
    let profile = dispatch(&state.channels.user_tx, |tx| UserRequest::UpdateProfile {
        user_id: caller.user_id,
        update,
        response: tx,
    })
    .await?;

    Ok(Json(profile))
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, body = Vec<UserProfile>),
        (status = 403, description = "Admin only", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<UserProfile>>, ServiceError> {
    let users = dispatch(&state.channels.user_tx, |tx| UserRequest::ListUsers {
        caller,
        response: tx,
    })
    .await?;

    Ok(Json(users))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, body = UserProfile),
        (status = 403, description = "Admin or self only", body = ErrorBody),
        (status = 404, body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    caller: Caller,
) -> Result<Json<UserProfile>, ServiceError> {
    let user = dispatch(&state.channels.user_tx, |tx| UserRequest::GetUser {
        id,
        caller,
        response: tx,
    })
    .await?;

    Ok(Json(user))
}

#[utoipa::path(
    patch,
    path = "/api/users/{id}/status",
    params(("id" = String, Path, description = "User id")),
    request_body = UpdateUserStatus,
    responses(
        (status = 200, body = UserStatusUpdated),
        (status = 403, description = "Admin only", body = ErrorBody),
        (status = 404, body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    caller: Caller,
    headers: HeaderMap,
    ApiJson(update): ApiJson<UpdateUserStatus>,
) -> Result<Json<UserStatusUpdated>, ServiceError> {
    let ip = client_ip(&headers);

    let updated = dispatch(&state.channels.user_tx, |tx| UserRequest::UpdateStatus {
        id,
        status: update.status,
        caller,
        ip,
        response: tx,
    })
    .await?;

    Ok(Json(updated))
}
