use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::IntoParams;

use super::{dispatch, ApiQuery, AppState, ErrorBody, Pagination};
use crate::models::audit_logs::AuditLogView;
use crate::services::audit_logs::AuditRequest;
use crate::services::policy::Caller;
use crate::services::ServiceError;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ActionFilter {
    pub action: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/audit-logs/my",
    params(Pagination),
    responses(
        (status = 200, body = Vec<AuditLogView>),
        (status = 401, body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "audit-logs"
)]
pub async fn list_mine(
    State(state): State<AppState>,
    caller: Caller,
    ApiQuery(pagination): ApiQuery<Pagination>,
) -> Result<Json<Vec<AuditLogView>>, ServiceError> {
    let logs = dispatch(&state.channels.audit_tx, |tx| AuditRequest::ListMine {
        user_id: caller.user_id,
        limit: pagination.limit(),
        offset: pagination.offset(),
        response: tx,
    })
    .await?;

    Ok(Json(logs))
}

#[utoipa::path(
    get,
    path = "/api/audit-logs/all",
    params(ActionFilter, Pagination),
    responses(
        (status = 200, body = Vec<AuditLogView>),
        (status = 403, description = "Admin or compliance only", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "audit-logs"
)]
pub async fn list_all(
    State(state): State<AppState>,
    caller: Caller,
    ApiQuery(filter): ApiQuery<ActionFilter>,
    ApiQuery(pagination): ApiQuery<Pagination>,
) -> Result<Json<Vec<AuditLogView>>, ServiceError> {
    let logs = dispatch(&state.channels.audit_tx, |tx| AuditRequest::ListAll {
        caller,
        action: filter.action,
        limit: pagination.limit(),
        offset: pagination.offset(),
        response: tx,
    })
    .await?;

    Ok(Json(logs))
}
