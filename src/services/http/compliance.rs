use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use super::{dispatch, ApiJson, AppState, ErrorBody};
use crate::models::compliance::{ComplianceReportView, NewComplianceReport};
use crate::services::compliance::ComplianceRequest;
use crate::services::policy::Caller;
use crate::services::ServiceError;

#[utoipa::path(
    post,
    path = "/api/compliance/report",
    request_body = NewComplianceReport,
    responses(
        (status = 201, description = "Report generated", body = ComplianceReportView),
        (status = 403, description = "Admin or compliance only", body = ErrorBody),
        (status = 404, description = "Subject user does not exist", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "compliance"
)]
pub async fn generate(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(request): ApiJson<NewComplianceReport>,
) -> Result<(StatusCode, Json<ComplianceReportView>), ServiceError> {
    let report = dispatch(&state.channels.compliance_tx, |tx| ComplianceRequest::Generate {
        caller,
        request,
        response: tx,
    })
    .await?;

    Ok((StatusCode::CREATED, Json(report)))
}

#[utoipa::path(
    get,
    path = "/api/compliance/my",
    responses(
        (status = 200, description = "Reports about the caller", body = Vec<ComplianceReportView>),
        (status = 401, body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "compliance"
)]
pub async fn list_mine(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<ComplianceReportView>>, ServiceError> {
    let reports = dispatch(&state.channels.compliance_tx, |tx| ComplianceRequest::ListMine {
        user_id: caller.user_id,
        response: tx,
    })
    .await?;

    Ok(Json(reports))
}

#[utoipa::path(
    get,
    path = "/api/compliance/all",
    responses(
        (status = 200, body = Vec<ComplianceReportView>),
        (status = 403, description = "Admin or compliance only", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "compliance"
)]
pub async fn list_all(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<ComplianceReportView>>, ServiceError> {
    let reports = dispatch(&state.channels.compliance_tx, |tx| ComplianceRequest::ListAll {
        caller,
        response: tx,
    })
    .await?;

    Ok(Json(reports))
}
