use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::mpsc;

use super::audit_logs::AuditRequest;
use super::policy::{self, Caller};
use super::{RequestHandler, Responder, Service, ServiceError};
use crate::models::audit_logs::{AuditEvent, AuditStatus};
use crate::models::users::{UpdateProfile, UserProfile, UserStatus, UserStatusUpdated};
use crate::repositories::users::UserRepository;

pub enum UserRequest {
    GetProfile {
        user_id: String,
        response: Responder<UserProfile>,
    },
    UpdateProfile {
        user_id: String,
        update: UpdateProfile,
        response: Responder<UserProfile>,
    },
    ListUsers {
        caller: Caller,
        response: Responder<Vec<UserProfile>>,
    },
    GetUser {
        id: String,
        caller: Caller,
        response: Responder<UserProfile>,
    },
    UpdateStatus {
        id: String,
        status: UserStatus,
        caller: Caller,
        ip: String,
        response: Responder<UserStatusUpdated>,
    },
}

#[derive(Clone)]
pub struct UserRequestHandler {
    repository: UserRepository,
    audit_tx: mpsc::Sender<AuditRequest>,
}

impl UserRequestHandler {
    pub fn new(sql_conn: PgPool, audit_tx: mpsc::Sender<AuditRequest>) -> Self {
        let repository = UserRepository::new(sql_conn);

        UserRequestHandler { repository, audit_tx }
    }

    async fn get_profile(&self, user_id: &str) -> Result<UserProfile, ServiceError> {
        let user = self
            .repository
            .get_by_id(user_id)
            .await
            .map_err(ServiceError::from_db)?
            .ok_or_else(|| ServiceError::NotFound("user not found".to_string()))?;

        Ok(user.into())
    }

    async fn update_profile(
        &self,
        user_id: &str,
        update: UpdateProfile,
    ) -> Result<UserProfile, ServiceError> {
        let user = self
            .repository
            .update_profile(
                user_id,
                update.first_name.as_deref(),
                update.last_name.as_deref(),
                update.phone.as_deref(),
            )
            .await
            .map_err(ServiceError::from_db)?
            .ok_or_else(|| ServiceError::NotFound("user not found".to_string()))?;

        Ok(user.into())
    }

    async fn list_users(&self, caller: &Caller) -> Result<Vec<UserProfile>, ServiceError> {
        policy::require(caller, policy::USERS_LIST)?;

        let users = self
            .repository
            .list_all()
            .await
            .map_err(ServiceError::from_db)?;

        Ok(users.into_iter().map(Into::into).collect())
    }

    async fn get_user(&self, id: &str, caller: &Caller) -> Result<UserProfile, ServiceError> {
        policy::require_self_or(caller, id, policy::USERS_LIST)?;

        self.get_profile(id).await
    }

    async fn update_status(
        &self,
        id: &str,
        status: UserStatus,
        caller: &Caller,
        ip: &str,
    ) -> Result<UserStatusUpdated, ServiceError> {
        policy::require(caller, policy::USERS_STATUS_UPDATE)?;

        let user = self
            .repository
            .update_status(id, status.as_str())
            .await
            .map_err(ServiceError::from_db)?
            .ok_or_else(|| ServiceError::NotFound("user not found".to_string()))?;

        let event = AuditEvent {
            actor: caller.user_id.clone(),
            action: "user.status_update".to_string(),
            ip: ip.to_string(),
            status: AuditStatus::Success,
        };
        let _ = self.audit_tx.send(AuditRequest::Record { event }).await;

        Ok(UserStatusUpdated {
            id: user.id,
            email: user.email,
            status: user.status,
        })
    }
}

#[async_trait]
impl RequestHandler<UserRequest> for UserRequestHandler {
    async fn handle_request(&self, request: UserRequest) {
        match request {
            UserRequest::GetProfile { user_id, response } => {
                let result = self.get_profile(&user_id).await;
                let _ = response.send(result);
            }
            UserRequest::UpdateProfile {
                user_id,
                update,
                response,
            } => {
                let result = self.update_profile(&user_id, update).await;
                let _ = response.send(result);
            }
            UserRequest::ListUsers { caller, response } => {
                let result = self.list_users(&caller).await;
                let _ = response.send(result);
            }
            UserRequest::GetUser { id, caller, response } => {
                let result = self.get_user(&id, &caller).await;
                let _ = response.send(result);
            }
            UserRequest::UpdateStatus {
                id,
                status,
                caller,
                ip,
                response,
            } => {
                let result = self.update_status(&id, status, &caller, &ip).await;
                let _ = response.send(result);
            }
        }
    }
}

pub struct UserService;

impl UserService {
    pub fn new() -> Self {
        UserService {}
    }
}

#[async_trait]
impl Service<UserRequest, UserRequestHandler> for UserService {}
