use async_trait::async_trait;
use sqlx::PgPool;

use super::policy::{self, Caller};
use super::{RequestHandler, Responder, Service, ServiceError};
use crate::models::portfolios::{PortfolioView, UpdateNav};
use crate::repositories::portfolios::PortfolioRepository;

pub enum PortfolioRequest {
    GetMine {
        user_id: String,
        response: Responder<PortfolioView>,
    },
    ListAll {
        caller: Caller,
        response: Responder<Vec<PortfolioView>>,
    },
    UpdateNav {
        caller: Caller,
        update: UpdateNav,
        response: Responder<PortfolioView>,
    },
}

#[derive(Clone)]
pub struct PortfolioRequestHandler {
    repository: PortfolioRepository,
}

impl PortfolioRequestHandler {
    pub fn new(sql_conn: PgPool) -> Self {
        let repository = PortfolioRepository::new(sql_conn);

        PortfolioRequestHandler { repository }
    }

    async fn get_mine(&self, user_id: &str) -> Result<PortfolioView, ServiceError> {
        let portfolio = self
            .repository
            .get_by_user(user_id)
            .await
            .map_err(ServiceError::from_db)?
            .ok_or_else(|| ServiceError::NotFound("portfolio not found".to_string()))?;

        Ok(portfolio.into())
    }

    async fn list_all(&self, caller: &Caller) -> Result<Vec<PortfolioView>, ServiceError> {
        policy::require(caller, policy::PORTFOLIOS_LIST)?;

        let portfolios = self
            .repository
            .list_all()
            .await
            .map_err(ServiceError::from_db)?;

        Ok(portfolios.into_iter().map(Into::into).collect())
    }

    async fn update_nav(&self, caller: &Caller, update: UpdateNav) -> Result<PortfolioView, ServiceError> {
        policy::require(caller, policy::PORTFOLIOS_NAV_UPDATE)?;

        if !update.bitcoin_price.is_finite() || update.bitcoin_price <= 0.0 {
            return Err(ServiceError::BadRequest(
                "bitcoinPrice must be a positive number".to_string(),
            ));
        }

        let portfolio = self
            .repository
            .update_nav(&update.user_id, update.bitcoin_price)
            .await
            .map_err(ServiceError::from_db)?
            .ok_or_else(|| ServiceError::NotFound("portfolio not found".to_string()))?;

        Ok(portfolio.into())
    }
}

#[async_trait]
impl RequestHandler<PortfolioRequest> for PortfolioRequestHandler {
    async fn handle_request(&self, request: PortfolioRequest) {
        match request {
            PortfolioRequest::GetMine { user_id, response } => {
                let result = self.get_mine(&user_id).await;
                let _ = response.send(result);
            }
            PortfolioRequest::ListAll { caller, response } => {
                let result = self.list_all(&caller).await;
                let _ = response.send(result);
            }
            PortfolioRequest::UpdateNav {
                caller,
                update,
                response,
            } => {
                let result = self.update_nav(&caller, update).await;
                let _ = response.send(result);
            }
        }
    }
}

pub struct PortfolioService;

impl PortfolioService {
    pub fn new() -> Self {
        PortfolioService {}
    }
}

#[async_trait]
impl Service<PortfolioRequest, PortfolioRequestHandler> for PortfolioService {}
