use crate::models::audit_logs::{AuditEvent, AuditLog};

use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct AuditLogRepository {
    conn: PgPool,
}

impl AuditLogRepository {
    pub fn new(conn: PgPool) -> Self {
        AuditLogRepository { conn }
    }

    /// Append-only: there is no update or delete path for audit entries.
    pub async fn insert(&self, event: &AuditEvent) -> Result<(), anyhow::Error> {
        let log_id = Uuid::new_v4().hyphenated().to_string();

        sqlx::query(
            "INSERT INTO audit_logs (id, actor, action, ip, status) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&log_id)
        .bind(&event.actor)
        .bind(&event.action)
        .bind(&event.ip)
        .bind(event.status.as_str())
        .execute(&self.conn)
        .await?;

        Ok(())
    }

    pub async fn list_for_actor(
        &self,
        actor: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AuditLog>, anyhow::Error> {
        let logs = sqlx::query_as::<_, AuditLog>(
            "SELECT * FROM audit_logs WHERE actor = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(actor)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.conn)
        .await?;

        Ok(logs)
    }

    pub async fn list_all(
        &self,
        action: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AuditLog>, anyhow::Error> {
        let logs = match action {
            Some(action) => {
                sqlx::query_as::<_, AuditLog>(
                    "SELECT * FROM audit_logs WHERE action = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
                )
                .bind(action)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.conn)
                .await?
            }
            None => {
                sqlx::query_as::<_, AuditLog>(
                    "SELECT * FROM audit_logs ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.conn)
                .await?
            }
        };

        Ok(logs)
    }
}
