use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::{client_ip, dispatch, ApiJson, ApiQuery, AppState, ErrorBody};
use crate::models::documents::{DocumentStatus, DocumentView, ReviewDocument, UploadDocument};
use crate::services::documents::DocumentRequest;
use crate::services::policy::Caller;
use crate::services::ServiceError;

#[derive(Debug, Deserialize, IntoParams)]
pub struct StatusFilter {
    pub status: Option<DocumentStatus>,
}

#[utoipa::path(
    post,
    path = "/api/documents/upload",
    request_body = UploadDocument,
    responses(
        (status = 201, description = "Document registered for review", body = DocumentView),
        (status = 400, body = ErrorBody),
        (status = 401, body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "documents"
)]
pub async fn upload(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(upload): ApiJson<UploadDocument>,
) -> Result<(StatusCode, Json<DocumentView>), ServiceError> {
    let document = dispatch(&state.channels.document_tx, |tx| DocumentRequest::Upload {
        user_id: caller.user_id,
        upload,
        response: tx,
    })
    .await?;

    Ok((StatusCode::CREATED, Json(document)))
}

#[utoipa::path(
    get,
    path = "/api/documents/my",
    responses(
        (status = 200, body = Vec<DocumentView>),
        (status = 401, body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "documents"
)]
pub async fn list_mine(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<DocumentView>>, ServiceError> {
    let documents = dispatch(&state.channels.document_tx, |tx| DocumentRequest::ListMine {
        user_id: caller.user_id,
        response: tx,
    })
    .await?;

    Ok(Json(documents))
}

#[utoipa::path(
    get,
    path = "/api/documents/all",
    params(StatusFilter),
    responses(
        (status = 200, body = Vec<DocumentView>),
        (status = 403, description = "Admin or compliance only", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "documents"
)]
pub async fn list_all(
    State(state): State<AppState>,
    caller: Caller,
    ApiQuery(filter): ApiQuery<StatusFilter>,
) -> Result<Json<Vec<DocumentView>>, ServiceError> {
    let documents = dispatch(&state.channels.document_tx, |tx| DocumentRequest::ListAll {
        caller,
        status: filter.status,
        response: tx,
    })
    .await?;

    Ok(Json(documents))
}

#[utoipa::path(
    get,
    path = "/api/documents/{id}",
    params(("id" = String, Path, description = "Document id")),
    responses(
        (status = 200, body = DocumentView),
        (status = 403, description = "Owner, admin or compliance only", body = ErrorBody),
        (status = 404, body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "documents"
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
    caller: Caller,
) -> Result<Json<DocumentView>, ServiceError> {
    let document = dispatch(&state.channels.document_tx, |tx| DocumentRequest::GetById {
        id,
        caller,
        response: tx,
    })
    .await?;

    Ok(Json(document))
}

#[utoipa::path(
    put,
    path = "/api/documents/{id}",
    params(("id" = String, Path, description = "Document id")),
    request_body = ReviewDocument,
    responses(
        (status = 200, description = "Review verdict recorded", body = DocumentView),
        (status = 400, description = "Rejection without a reason", body = ErrorBody),
        (status = 403, description = "Admin or compliance only", body = ErrorBody),
        (status = 404, body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "documents"
)]
pub async fn review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    caller: Caller,
    headers: HeaderMap,
    ApiJson(review): ApiJson<ReviewDocument>,
) -> Result<Json<DocumentView>, ServiceError> {
    let ip = client_ip(&headers);

    let document = dispatch(&state.channels.document_tx, |tx| DocumentRequest::Review {
        id,
        review,
        caller,
        ip,
        response: tx,
    })
    .await?;

    Ok(Json(document))
}
