use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Document {
    pub id: String,
    pub user_id: String,
    pub document_type: String,
    pub file_name: String,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub uploaded_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView {
    pub id: String,
    pub user_id: String,
    pub document_type: String,
    pub file_name: String,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub uploaded_at: chrono::NaiveDateTime,
}

impl From<Document> for DocumentView {
    fn from(doc: Document) -> Self {
        DocumentView {
            id: doc.id,
            user_id: doc.user_id,
            document_type: doc.document_type,
            file_name: doc.file_name,
            status: doc.status,
            rejection_reason: doc.rejection_reason,
            uploaded_at: doc.uploaded_at,
        }
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UploadDocument {
    pub document_type: String,
    pub file_name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Pending,
    Verified,
    Rejected,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Pending => "pending",
            DocumentStatus::Verified => "verified",
            DocumentStatus::Rejected => "rejected",
        }
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReviewDocument {
    pub status: DocumentStatus,
    pub rejection_reason: Option<String>,
}
