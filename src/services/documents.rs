use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::mpsc;

use super::audit_logs::AuditRequest;
use super::policy::{self, Caller};
use super::{RequestHandler, Responder, Service, ServiceError};
use crate::models::audit_logs::{AuditEvent, AuditStatus};
use crate::models::documents::{DocumentStatus, DocumentView, ReviewDocument, UploadDocument};
use crate::repositories::documents::DocumentRepository;

pub enum DocumentRequest {
    Upload {
        user_id: String,
        upload: UploadDocument,
        response: Responder<DocumentView>,
    },
    GetById {
        id: String,
        caller: Caller,
        response: Responder<DocumentView>,
    },
    ListMine {
        user_id: String,
        response: Responder<Vec<DocumentView>>,
    },
    ListAll {
        caller: Caller,
        status: Option<DocumentStatus>,
        response: Responder<Vec<DocumentView>>,
    },
    Review {
        id: String,
        review: ReviewDocument,
        caller: Caller,
        ip: String,
        response: Responder<DocumentView>,
    },
}

#[derive(Clone)]
pub struct DocumentRequestHandler {
    repository: DocumentRepository,
    audit_tx: mpsc::Sender<AuditRequest>,
}

impl DocumentRequestHandler {
    pub fn new(sql_conn: PgPool, audit_tx: mpsc::Sender<AuditRequest>) -> Self {
        let repository = DocumentRepository::new(sql_conn);

        DocumentRequestHandler { repository, audit_tx }
    }

    async fn upload(&self, user_id: &str, upload: UploadDocument) -> Result<DocumentView, ServiceError> {
        if upload.document_type.trim().is_empty() || upload.file_name.trim().is_empty() {
            return Err(ServiceError::BadRequest("missing required field".to_string()));
        }

        let document = self
            .repository
            .insert(user_id, &upload.document_type, &upload.file_name)
            .await
            .map_err(ServiceError::from_db)?;

        Ok(document.into())
    }

    async fn get_by_id(&self, id: &str, caller: &Caller) -> Result<DocumentView, ServiceError> {
        let document = self
            .repository
            .get_by_id(id)
            .await
            .map_err(ServiceError::from_db)?
            .ok_or_else(|| ServiceError::NotFound("document not found".to_string()))?;

        policy::require_self_or(caller, &document.user_id, policy::DOCUMENTS_LIST)?;

        Ok(document.into())
    }

    async fn list_mine(&self, user_id: &str) -> Result<Vec<DocumentView>, ServiceError> {
        let documents = self
            .repository
            .list_for_user(user_id)
            .await
            .map_err(ServiceError::from_db)?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn list_all(
        &self,
        caller: &Caller,
        status: Option<DocumentStatus>,
    ) -> Result<Vec<DocumentView>, ServiceError> {
        policy::require(caller, policy::DOCUMENTS_LIST)?;

        let documents = self
            .repository
            .list_all(status.map(|s| s.as_str()))
            .await
            .map_err(ServiceError::from_db)?;

        Ok(documents.into_iter().map(Into::into).collect())
    }

    async fn review(
        &self,
        id: &str,
        review: ReviewDocument,
        caller: &Caller,
        ip: &str,
    ) -> Result<DocumentView, ServiceError> {
        policy::require(caller, policy::DOCUMENTS_REVIEW)?;

        if review.status == DocumentStatus::Rejected && review.rejection_reason.is_none() {
            return Err(ServiceError::BadRequest(
                "rejectionReason is required when rejecting a document".to_string(),
            ));
        }

        // A verdict other than rejected clears any previous rejection reason.
        let reason = match review.status {
            DocumentStatus::Rejected => review.rejection_reason.as_deref(),
            _ => None,
        };

        let document = self
            .repository
            .review(id, review.status.as_str(), reason)
            .await
            .map_err(ServiceError::from_db)?
            .ok_or_else(|| ServiceError::NotFound("document not found".to_string()))?;

        let event = AuditEvent {
            actor: caller.user_id.clone(),
            action: "document.review".to_string(),
            ip: ip.to_string(),
            status: AuditStatus::Success,
        };
        let _ = self.audit_tx.send(AuditRequest::Record { event }).await;

        Ok(document.into())
    }
}

#[async_trait]
impl RequestHandler<DocumentRequest> for DocumentRequestHandler {
    async fn handle_request(&self, request: DocumentRequest) {
        match request {
            DocumentRequest::Upload {
                user_id,
                upload,
                response,
            } => {
                let result = self.upload(&user_id, upload).await;
                let _ = response.send(result);
            }
            DocumentRequest::GetById { id, caller, response } => {
                let result = self.get_by_id(&id, &caller).await;
                let _ = response.send(result);
            }
            DocumentRequest::ListMine { user_id, response } => {
                let result = self.list_mine(&user_id).await;
                let _ = response.send(result);
            }
            DocumentRequest::ListAll {
                caller,
                status,
                response,
            } => {
                let result = self.list_all(&caller, status).await;
                let _ = response.send(result);
            }
            DocumentRequest::Review {
                id,
                review,
                caller,
                ip,
                response,
            } => {
                let result = self.review(&id, review, &caller, &ip).await;
                let _ = response.send(result);
            }
        }
    }
}

pub struct DocumentService;

impl DocumentService {
    pub fn new() -> Self {
        DocumentService {}
    }
}

#[async_trait]
impl Service<DocumentRequest, DocumentRequestHandler> for DocumentService {}
