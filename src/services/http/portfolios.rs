use axum::{extract::State, Json};

use super::{dispatch, ApiJson, AppState, ErrorBody};
use crate::models::portfolios::{PortfolioView, UpdateNav};
use crate::services::policy::Caller;
use crate::services::portfolios::PortfolioRequest;
use crate::services::ServiceError;

#[utoipa::path(
    get,
    path = "/api/portfolios/my",
    responses(
        (status = 200, body = PortfolioView),
        (status = 401, body = ErrorBody),
        (status = 404, body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "portfolios"
)]
pub async fn get_mine(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<PortfolioView>, ServiceError> {
    let portfolio = dispatch(&state.channels.portfolio_tx, |tx| PortfolioRequest::GetMine {
        user_id: caller.user_id,
        response: tx,
    })
    .await?;

    Ok(Json(portfolio))
}

#[utoipa::path(
    get,
    path = "/api/portfolios/all",
    responses(
        (status = 200, body = Vec<PortfolioView>),
        (status = 403, description = "Admin only", body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "portfolios"
)]
pub async fn list_all(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<PortfolioView>>, ServiceError> {
    let portfolios = dispatch(&state.channels.portfolio_tx, |tx| PortfolioRequest::ListAll {
        caller,
        response: tx,
    })
    .await?;

    Ok(Json(portfolios))
}

#[utoipa::path(
    put,
    path = "/api/portfolios/update-nav",
    request_body = UpdateNav,
    responses(
        (status = 200, description = "Nav and performance recomputed", body = PortfolioView),
        (status = 403, description = "Admin only", body = ErrorBody),
        (status = 404, body = ErrorBody)
    ),
    security(("bearer" = [])),
    tag = "portfolios"
)]
pub async fn update_nav(
    State(state): State<AppState>,
    caller: Caller,
    ApiJson(update): ApiJson<UpdateNav>,
) -> Result<Json<PortfolioView>, ServiceError> {
    let portfolio = dispatch(&state.channels.portfolio_tx, |tx| PortfolioRequest::UpdateNav {
        caller,
        update,
        response: tx,
    })
    .await?;

    Ok(Json(portfolio))
}
