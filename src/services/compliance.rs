use async_trait::async_trait;
use sqlx::PgPool;

use super::policy::{self, Caller};
use super::{RequestHandler, Responder, Service, ServiceError};
use crate::models::compliance::{ComplianceReportView, NewComplianceReport};
use crate::repositories::compliance::ComplianceRepository;

pub enum ComplianceRequest {
    Generate {
        caller: Caller,
        request: NewComplianceReport,
        response: Responder<ComplianceReportView>,
    },
    ListMine {
        user_id: String,
        response: Responder<Vec<ComplianceReportView>>,
    },
    ListAll {
        caller: Caller,
        response: Responder<Vec<ComplianceReportView>>,
    },
}

#[derive(Clone)]
pub struct ComplianceRequestHandler {
    repository: ComplianceRepository,
}

impl ComplianceRequestHandler {
    pub fn new(sql_conn: PgPool) -> Self {
        let repository = ComplianceRepository::new(sql_conn);

        ComplianceRequestHandler { repository }
    }

    async fn generate(
        &self,
        caller: &Caller,
        request: NewComplianceReport,
    ) -> Result<ComplianceReportView, ServiceError> {
        policy::require(caller, policy::COMPLIANCE_GENERATE)?;

        if request.content.trim().is_empty() {
            return Err(ServiceError::BadRequest("missing required field".to_string()));
        }

        // The foreign key on user_id rejects reports about unknown users; that
        // surfaces as NotFound through the repository error mapping.
        let report = self
            .repository
            .insert(&request.user_id, &caller.user_id, &request.content)
            .await
            .map_err(ServiceError::from_db)?;

        Ok(report.into())
    }

    async fn list_mine(&self, user_id: &str) -> Result<Vec<ComplianceReportView>, ServiceError> {
        let reports = self
            .repository
            .list_for_user(user_id)
            .await
            .map_err(ServiceError::from_db)?;

        Ok(reports.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self, caller: &Caller) -> Result<Vec<ComplianceReportView>, ServiceError> {
        policy::require(caller, policy::COMPLIANCE_LIST)?;

        let reports = self
            .repository
            .list_all()
            .await
            .map_err(ServiceError::from_db)?;

        Ok(reports.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl RequestHandler<ComplianceRequest> for ComplianceRequestHandler {
    async fn handle_request(&self, request: ComplianceRequest) {
        match request {
            ComplianceRequest::Generate {
                caller,
                request,
                response,
            } => {
                let result = self.generate(&caller, request).await;
                let _ = response.send(result);
            }
            ComplianceRequest::ListMine { user_id, response } => {
                let result = self.list_mine(&user_id).await;
                let _ = response.send(result);
            }
            ComplianceRequest::ListAll { caller, response } => {
                let result = self.list_all(&caller).await;
                let _ = response.send(result);
            }
        }
    }
}

pub struct ComplianceService;

impl ComplianceService {
    pub fn new() -> Self {
        ComplianceService {}
    }
}

#[async_trait]
impl Service<ComplianceRequest, ComplianceRequestHandler> for ComplianceService {}
