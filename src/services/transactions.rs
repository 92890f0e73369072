use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::mpsc;

use super::audit_logs::AuditRequest;
use super::policy::{self, Caller};
use super::{RequestHandler, Responder, Service, ServiceError};
use crate::models::audit_logs::{AuditEvent, AuditStatus};
use crate::models::transactions::{NewTransaction, TransactionStatus, TransactionView};
use crate::repositories::transactions::{StatusUpdate, TransactionRepository};

pub enum TransactionRequest {
    Create {
        user_id: String,
        new: NewTransaction,
        response: Responder<TransactionView>,
    },
    GetById {
        id: String,
        caller: Caller,
        response: Responder<TransactionView>,
    },
    ListMine {
        user_id: String,
        limit: i64,
        offset: i64,
        response: Responder<Vec<TransactionView>>,
    },
    ListAll {
        caller: Caller,
        limit: i64,
        offset: i64,
        response: Responder<Vec<TransactionView>>,
    },
    Review {
        id: String,
        status: TransactionStatus,
        caller: Caller,
        ip: String,
        response: Responder<TransactionView>,
    },
}

#[derive(Clone)]
pub struct TransactionRequestHandler {
    repository: TransactionRepository,
    audit_tx: mpsc::Sender<AuditRequest>,
}

impl TransactionRequestHandler {
    pub fn new(sql_conn: PgPool, audit_tx: mpsc::Sender<AuditRequest>) -> Self {
        let repository = TransactionRepository::new(sql_conn);

        TransactionRequestHandler { repository, audit_tx }
    }

    async fn create(&self, user_id: &str, new: NewTransaction) -> Result<TransactionView, ServiceError> {
        if !new.amount.is_finite() || new.amount <= 0.0 {
            return Err(ServiceError::BadRequest(
                "amount must be a positive number".to_string(),
            ));
        }

        let transaction = self
            .repository
            .insert(user_id, new.tx_type.as_str(), new.amount)
            .await
            .map_err(ServiceError::from_db)?;

        Ok(transaction.into())
    }

    async fn get_by_id(&self, id: &str, caller: &Caller) -> Result<TransactionView, ServiceError> {
        let transaction = self
            .repository
            .get_by_id(id)
            .await
            .map_err(ServiceError::from_db)?
            .ok_or_else(|| ServiceError::NotFound("transaction not found".to_string()))?;

        policy::require_self_or(caller, &transaction.user_id, policy::TRANSACTIONS_LIST)?;

        Ok(transaction.into())
    }

    async fn list_mine(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TransactionView>, ServiceError> {
        let transactions = self
            .repository
            .list_for_user(user_id, limit, offset)
            .await
            .map_err(ServiceError::from_db)?;

        Ok(transactions.into_iter().map(Into::into).collect())
    }

    async fn list_all(
        &self,
        caller: &Caller,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TransactionView>, ServiceError> {
        policy::require(caller, policy::TRANSACTIONS_LIST)?;

        let transactions = self
            .repository
            .list_all(limit, offset)
            .await
            .map_err(ServiceError::from_db)?;

        Ok(transactions.into_iter().map(Into::into).collect())
    }

    async fn review(
        &self,
        id: &str,
        status: TransactionStatus,
        caller: &Caller,
        ip: &str,
    ) -> Result<TransactionView, ServiceError> {
        policy::require(caller, policy::TRANSACTIONS_REVIEW)?;

        let outcome = self
            .repository
            .set_status(id, status.as_str())
            .await
            .map_err(ServiceError::from_db)?
            .ok_or_else(|| ServiceError::NotFound("transaction not found".to_string()))?;

        let transaction = match outcome {
            StatusUpdate::Applied(transaction) => transaction,
            StatusUpdate::AlreadyReviewed(_) => {
                return Err(ServiceError::Conflict(
                    "transaction has already been reviewed".to_string(),
                ));
            }
        };

        let event = AuditEvent {
            actor: caller.user_id.clone(),
            action: "transaction.review".to_string(),
            ip: ip.to_string(),
            status: AuditStatus::Success,
        };
        let _ = self.audit_tx.send(AuditRequest::Record { event }).await;

        Ok(transaction.into())
    }
}

#[async_trait]
impl RequestHandler<TransactionRequest> for TransactionRequestHandler {
    async fn handle_request(&self, request: TransactionRequest) {
        match request {
            TransactionRequest::Create {
                user_id,
                new,
                response,
            } => {
                let result = self.create(&user_id, new).await;
                let _ = response.send(result);
            }
            TransactionRequest::GetById { id, caller, response } => {
                let result = self.get_by_id(&id, &caller).await;
                let _ = response.send(result);
            }
            TransactionRequest::ListMine {
                user_id,
                limit,
                offset,
                response,
            } => {
                let result = self.list_mine(&user_id, limit, offset).await;
                let _ = response.send(result);
            }
            TransactionRequest::ListAll {
                caller,
                limit,
                offset,
                response,
            } => {
                let result = self.list_all(&caller, limit, offset).await;
                let _ = response.send(result);
            }
            TransactionRequest::Review {
                id,
                status,
                caller,
                ip,
                response,
            } => {
                let result = self.review(&id, status, &caller, &ip).await;
                let _ = response.send(result);
            }
        }
    }
}

pub struct TransactionService;

impl TransactionService {
    pub fn new() -> Self {
        TransactionService {}
    }
}

#[async_trait]
impl Service<TransactionRequest, TransactionRequestHandler> for TransactionService {}
