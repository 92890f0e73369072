use serde::Serialize;
use utoipa::ToSchema;

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct AuditLog {
    pub id: String,
    pub actor: String,
    pub action: String,
    pub ip: String,
    pub status: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogView {
    pub id: String,
    pub actor: String,
    pub action: String,
    pub ip: String,
    pub status: String,
    pub created_at: chrono::NaiveDateTime,
}

impl From<AuditLog> for AuditLogView {
    fn from(log: AuditLog) -> Self {
        AuditLogView {
            id: log.id,
            actor: log.actor,
            action: log.action,
            ip: log.ip,
            status: log.status,
            created_at: log.created_at,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditStatus {
    Success,
    Failure,
}

impl AuditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditStatus::Success => "success",
            AuditStatus::Failure => "failure",
        }
    }
}

/// Internal event pushed through the audit channel. Not part of the HTTP API.
#[derive(Clone, Debug)]
pub struct AuditEvent {
    pub actor: String,
    pub action: String,
    pub ip: String,
    pub status: AuditStatus,
}
