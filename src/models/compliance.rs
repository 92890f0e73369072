use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct ComplianceReport {
    pub id: String,
    pub user_id: String,
    pub generated_by: String,
    pub content: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReportView {
    pub id: String,
    pub user_id: String,
    pub generated_by: String,
    pub content: String,
    pub created_at: chrono::NaiveDateTime,
}

impl From<ComplianceReport> for ComplianceReportView {
    fn from(report: ComplianceReport) -> Self {
        ComplianceReportView {
            id: report.id,
            user_id: report.user_id,
            generated_by: report.generated_by,
            content: report.content,
            created_at: report.created_at,
        }
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewComplianceReport {
    pub user_id: String,
    pub content: String,
}
