use crate::models::compliance::ComplianceReport;

use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct ComplianceRepository {
    conn: PgPool,
}

impl ComplianceRepository {
    pub fn new(conn: PgPool) -> Self {
        ComplianceRepository { conn }
    }

    pub async fn insert(
        &self,
        user_id: &str,
        generated_by: &str,
        content: &str,
    ) -> Result<ComplianceReport, anyhow::Error> {
        let report_id = Uuid::new_v4().hyphenated().to_string();

        let report = sqlx::query_as::<_, ComplianceReport>(
            r#"
                INSERT INTO compliance_reports (id, user_id, generated_by, content)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            "#,
        )
        .bind(&report_id)
        .bind(user_id)
        .bind(generated_by)
        .bind(content)
        .fetch_one(&self.conn)
        .await?;

        Ok(report)
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<ComplianceReport>, anyhow::Error> {
        let reports = sqlx::query_as::<_, ComplianceReport>(
            "SELECT * FROM compliance_reports WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.conn)
        .await?;

        Ok(reports)
    }

    pub async fn list_all(&self) -> Result<Vec<ComplianceReport>, anyhow::Error> {
        let reports = sqlx::query_as::<_, ComplianceReport>(
            "SELECT * FROM compliance_reports ORDER BY created_at DESC",
        )
        .fetch_all(&self.conn)
        .await?;

        Ok(reports)
    }
}
