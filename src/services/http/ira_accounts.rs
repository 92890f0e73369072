use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use super::{dispatch, ApiJson, AppState, ErrorBody};
use crate::models::ira_accounts::{IraAccountView, OpenIraAccount, UpdateIraAccount};
use crate::services::ira_accounts::IraAccountRequest;
use crate::services::policy::Caller;
use crate::services::ServiceError;

#[utoipa::path(
    post,
    path = "/api/ira-accounts",
    request_body = OpenIraAccount,
    responses(
        (status = 201, description = "IRA account opened", body = IraAccountView),
        (status = 401, body = ErrorBody),
        (status = 409, description = "Caller already has an IRA account", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "ira-accounts"
)]
pub async fn open(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(request): ApiJson<OpenIraAccount>,
) -> Result<(StatusCode, Json<IraAccountView>), ServiceError> {
    let account = dispatch(&state.channels.ira_tx, |tx| IraAccountRequest::Open {
        user_id: caller.user_id,
        request,
        response: tx,
    })
    .await?;

    Ok((StatusCode::CREATED, Json(account)))
}

#[utoipa::path(
    get,
    path = "/api/ira-accounts/my",
    responses(
        (status = 200, body = IraAccountView),
        (status = 401, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "ira-accounts"
)]
pub async fn get_mine(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<IraAccountView>, ServiceError> {
    let account = dispatch(&state.channels.ira_tx, |tx| IraAccountRequest::GetMine {
        user_id: caller.user_id,
        response: tx,
    })
    .await?;

    Ok(Json(account))
}

#[utoipa::path(
    put,
    path = "/api/ira-accounts",
    request_body = UpdateIraAccount,
    responses(
        (status = 200, description = "Only the supplied fields change", body = IraAccountView),
        (status = 401, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "ira-accounts"
)]
pub async fn update(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(update): ApiJson<UpdateIraAccount>,
) -> Result<Json<IraAccountView>, ServiceError> {
    let account = dispatch(&state.channels.ira_tx, |tx| IraAccountRequest::Update {
        user_id: caller.user_id,
        update,
        response: tx,
    })
    .await?;

    Ok(Json(account))
}

#[utoipa::path(
    get,
    path = "/api/ira-accounts/all",
    responses(
        (status = 200, body = Vec<IraAccountView>),
        (status = 403, description = "Admin only", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "ira-accounts"
)]
pub async fn list_all(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<IraAccountView>>, ServiceError> {
    let accounts = dispatch(&state.channels.ira_tx, |tx| IraAccountRequest::ListAll {
        caller,
        response: tx,
    })
    .await?;

    Ok(Json(accounts))
}
