use async_trait::async_trait;
use sqlx::PgPool;

use super::policy::{self, Caller};
use super::{RequestHandler, Responder, Service, ServiceError};
use crate::models::audit_logs::{AuditEvent, AuditLogView};
use crate::repositories::audit_logs::AuditLogRepository;

pub enum AuditRequest {
    /// Fire-and-forget append from the other services. Failures are logged,
    /// never propagated back to the request that triggered them.
    Record {
        event: AuditEvent,
    },
    ListMine {
        user_id: String,
        limit: i64,
        offset: i64,
        response: Responder<Vec<AuditLogView>>,
    },
    ListAll {
        caller: Caller,
        action: Option<String>,
        limit: i64,
        offset: i64,
        response: Responder<Vec<AuditLogView>>,
    },
}

#[derive(Clone)]
pub struct AuditRequestHandler {
    repository: AuditLogRepository,
}

impl AuditRequestHandler {
    pub fn new(sql_conn: PgPool) -> Self {
        let repository = AuditLogRepository::new(sql_conn);

        AuditRequestHandler { repository }
    }

    async fn record(&self, event: AuditEvent) {
        if let Err(e) = self.repository.insert(&event).await {
            log::warn!("Failed to record audit event {}: {}", event.action, e);
        }
    }

    async fn list_mine(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AuditLogView>, ServiceError> {
        let logs = self
            .repository
            .list_for_actor(user_id, limit, offset)
            .await
            .map_err(ServiceError::from_db)?;

        Ok(logs.into_iter().map(Into::into).collect())
    }

    async fn list_all(
        &self,
        caller: &Caller,
        action: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AuditLogView>, ServiceError> {
        policy::require(caller, policy::AUDIT_LOGS_LIST)?;

        let logs = self
            .repository
            .list_all(action, limit, offset)
            .await
            .map_err(ServiceError::from_db)?;

        Ok(logs.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl RequestHandler<AuditRequest> for AuditRequestHandler {
    async fn handle_request(&self, request: AuditRequest) {
        match request {
            AuditRequest::Record { event } => {
                self.record(event).await;
            }
            AuditRequest::ListMine {
                user_id,
                limit,
                offset,
                response,
            } => {
                let result = self.list_mine(&user_id, limit, offset).await;
                let _ = response.send(result);
            }
            AuditRequest::ListAll {
                caller,
                action,
                limit,
                offset,
                response,
            } => {
                let result = self.list_all(&caller, action.as_deref(), limit, offset).await;
                let _ = response.send(result);
            }
        }
    }
}

pub struct AuditService;

impl AuditService {
    pub fn new() -> Self {
        AuditService {}
    }
}

#[async_trait]
impl Service<AuditRequest, AuditRequestHandler> for AuditService {}
