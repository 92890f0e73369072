use async_trait::async_trait;
use sqlx::PgPool;

use super::policy::{self, Caller};
use super::{RequestHandler, Responder, Service, ServiceError};
use crate::models::ira_accounts::{IraAccountView, OpenIraAccount, UpdateIraAccount};
use crate::repositories::ira_accounts::IraAccountRepository;

pub enum IraAccountRequest {
    Open {
        user_id: String,
        request: OpenIraAccount,
        response: Responder<IraAccountView>,
    },
    GetMine {
        user_id: String,
        response: Responder<IraAccountView>,
    },
    Update {
        user_id: String,
        update: UpdateIraAccount,
        response: Responder<IraAccountView>,
    },
    ListAll {
        caller: Caller,
        response: Responder<Vec<IraAccountView>>,
    },
}

#[derive(Clone)]
pub struct IraAccountRequestHandler {
    repository: IraAccountRepository,
}

impl IraAccountRequestHandler {
    pub fn new(sql_conn: PgPool) -> Self {
        let repository = IraAccountRepository::new(sql_conn);

        IraAccountRequestHandler { repository }
    }

    async fn open(&self, user_id: &str, request: OpenIraAccount) -> Result<IraAccountView, ServiceError> {
        if request.custodian.trim().is_empty() {
            return Err(ServiceError::BadRequest("missing required field".to_string()));
        }

        let existing = self
            .repository
            .get_by_user(user_id)
            .await
            .map_err(ServiceError::from_db)?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "user already has an IRA account".to_string(),
            ));
        }

        let account = self
            .repository
            .insert(user_id, request.account_type.as_str(), &request.custodian)
            .await
            .map_err(ServiceError::from_db)?;

        Ok(account.into())
    }

    async fn get_mine(&self, user_id: &str) -> Result<IraAccountView, ServiceError> {
        let account = self
            .repository
            .get_by_user(user_id)
            .await
            .map_err(ServiceError::from_db)?
            .ok_or_else(|| ServiceError::NotFound("IRA account not found".to_string()))?;

        Ok(account.into())
    }

    async fn update(&self, user_id: &str, update: UpdateIraAccount) -> Result<IraAccountView, ServiceError> {
        if let Some(contributed) = update.contributed_this_year {
            if !contributed.is_finite() || contributed < 0.0 {
                return Err(ServiceError::BadRequest(
                    "contributedThisYear must be a non-negative number".to_string(),
                ));
            }
        }

        let account = self
            .repository
            .update(
                user_id,
                update.custodian.as_deref(),
                update.contributed_this_year,
            )
            .await
            .map_err(ServiceError::from_db)?
            .ok_or_else(|| ServiceError::NotFound("IRA account not found".to_string()))?;

        Ok(account.into())
    }

    async fn list_all(&self, caller: &Caller) -> Result<Vec<IraAccountView>, ServiceError> {
        policy::require(caller, policy::IRA_ACCOUNTS_LIST)?;

        let accounts = self
            .repository
            .list_all()
            .await
            .map_err(ServiceError::from_db)?;

        Ok(accounts.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl RequestHandler<IraAccountRequest> for IraAccountRequestHandler {
    async fn handle_request(&self, request: IraAccountRequest) {
        match request {
            IraAccountRequest::Open {
                user_id,
                request,
                response,
            } => {
                let result = self.open(&user_id, request).await;
                let _ = response.send(result);
            }
            IraAccountRequest::GetMine { user_id, response } => {
                let result = self.get_mine(&user_id).await;
                let _ = response.send(result);
            }
            IraAccountRequest::Update {
                user_id,
                update,
                response,
            } => {
                let result = self.update(&user_id, update).await;
                let _ = response.send(result);
            }
            IraAccountRequest::ListAll { caller, response } => {
                let result = self.list_all(&caller).await;
                let _ = response.send(result);
            }
        }
    }
}

pub struct IraAccountService;

impl IraAccountService {
    pub fn new() -> Self {
        IraAccountService {}
    }
}

#[async_trait]
impl Service<IraAccountRequest, IraAccountRequestHandler> for IraAccountService {}
