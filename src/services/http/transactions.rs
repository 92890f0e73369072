use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use super::{client_ip, dispatch, ApiJson, ApiQuery, AppState, ErrorBody, Pagination};
use crate::models::transactions::{NewTransaction, ReviewTransaction, TransactionView};
use crate::services::policy::Caller;
use crate::services::transactions::TransactionRequest;
use crate::services::ServiceError;

#[utoipa::path(
    post,
    path = "/api/transactions",
    request_body = NewTransaction,
    responses(
        (status = 201, description = "Pending transaction created", body = TransactionView),
        (status = 400, body = ErrorBody),
        (status = 401, body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "transactions"
)]
pub async fn create(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(new): ApiJson<NewTransaction>,
) -> Result<(StatusCode, Json<TransactionView>), ServiceError> {
    let transaction = dispatch(&state.channels.transaction_tx, |tx| TransactionRequest::Create {
        user_id: caller.user_id,
        new,
        response: tx,
    })
    .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

#[utoipa::path(
    get,
    path = "/api/transactions/my",
    params(Pagination),
    responses(
        (status = 200, body = Vec<TransactionView>),
        (status = 401, body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "transactions"
)]
pub async fn list_mine(
    State(state): State<AppState>,
    caller: Caller,
    ApiQuery(pagination): ApiQuery<Pagination>,
) -> Result<Json<Vec<TransactionView>>, ServiceError> {
    let transactions = dispatch(&state.channels.transaction_tx, |tx| {
        TransactionRequest::ListMine {
            user_id: caller.user_id,
            limit: pagination.limit(),
            offset: pagination.offset(),
            response: tx,
        }
    })
    .await?;

    Ok(Json(transactions))
}

#[utoipa::path(
    get,
    path = "/api/transactions/all",
    params(Pagination),
    responses(
        (status = 200, body = Vec<TransactionView>),
        (status = 403, description = "Admin or compliance only", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "transactions"
)]
pub async fn list_all(
    State(state): State<AppState>,
    caller: Caller,
    ApiQuery(pagination): ApiQuery<Pagination>,
) -> Result<Json<Vec<TransactionView>>, ServiceError> {
    let transactions = dispatch(&state.channels.transaction_tx, |tx| {
        TransactionRequest::ListAll {
            caller,
            limit: pagination.limit(),
            offset: pagination.offset(),
            response: tx,
        }
    })
    .await?;

    Ok(Json(transactions))
}

#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    params(("id" = String, Path, description = "Transaction id")),
    responses(
        (status = 200, body = TransactionView),
        (status = 403, description = "Owner, admin or compliance only", body = ErrorBody),
        (status = 404, body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "transactions"
)]
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
    caller: Caller,
) -> Result<Json<TransactionView>, ServiceError> {
    let transaction = dispatch(&state.channels.transaction_tx, |tx| {
        TransactionRequest::GetById {
            id,
            caller,
            response: tx,
        }
    })
    .await?;

    Ok(Json(transaction))
}

#[utoipa::path(
    put,
    path = "/api/transactions/{id}",
    params(("id" = String, Path, description = "Transaction id")),
    request_body = ReviewTransaction,
    responses(
        (status = 200, description = "Status updated; completion adjusts the portfolio totals", body = TransactionView),
        (status = 403, description = "Admin or compliance only", body = ErrorBody),
        (status = 404, body = ErrorBody),
        (status = 409, description = "Transaction already reviewed", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "transactions"
)]
pub async fn review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    caller: Caller,
    headers: HeaderMap,
    ApiJson(review): ApiJson<ReviewTransaction>,
) -> Result<Json<TransactionView>, ServiceError> {
    let ip = client_ip(&headers);

    let transaction = dispatch(&state.channels.transaction_tx, |tx| {
        TransactionRequest::Review {
            id,
            status: review.status,
            caller,
            ip,
            response: tx,
        }
    })
    .await?;

    Ok(Json(transaction))
}
