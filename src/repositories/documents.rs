use crate::models::documents::Document;

use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct DocumentRepository {
    conn: PgPool,
}

impl DocumentRepository {
    pub fn new(conn: PgPool) -> Self {
        DocumentRepository { conn }
    }

    pub async fn insert(
        &self,
        user_id: &str,
        document_type: &str,
        file_name: &str,
    ) -> Result<Document, anyhow::Error> {
        let document_id = Uuid::new_v4().hyphenated().to_string();

        let document = sqlx::query_as::<_, Document>(
            r#"
                INSERT INTO documents (id, user_id, document_type, file_name, status)
                VALUES ($1, $2, $3, $4, 'pending')
                RETURNING *
            "#,
        )
        .bind(&document_id)
        .bind(user_id)
        .bind(document_type)
        .bind(file_name)
        .fetch_one(&self.conn)
        .await?;

        Ok(document)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Document>, anyhow::Error> {
        let document = sqlx::query_as::<_, Document>("SELECT * FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.conn)
            .await?;

        Ok(document)
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Document>, anyhow::Error> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT * FROM documents WHERE user_id = $1 ORDER BY uploaded_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.conn)
        .await?;

        Ok(documents)
    }

    pub async fn list_all(&self, status: Option<&str>) -> Result<Vec<Document>, anyhow::Error> {
        let documents = match status {
            Some(status) => {
                sqlx::query_as::<_, Document>(
                    "SELECT * FROM documents WHERE status = $1 ORDER BY uploaded_at DESC",
                )
                .bind(status)
                .fetch_all(&self.conn)
                .await?
            }
            None => {
                sqlx::query_as::<_, Document>("SELECT * FROM documents ORDER BY uploaded_at DESC")
                    .fetch_all(&self.conn)
                    .await?
            }
        };

        Ok(documents)
    }

    pub async fn review(
        &self,
        id: &str,
        status: &str,
        rejection_reason: Option<&str>,
    ) -> Result<Option<Document>, anyhow::Error> {
        let document = sqlx::query_as::<_, Document>(
            r#"
                UPDATE documents
                SET status = $1, rejection_reason = $2, updated_at = CURRENT_TIMESTAMP
                WHERE id = $3
                RETURNING *
            "#,
        )
        .bind(status)
        .bind(rejection_reason)
        .bind(id)
        .fetch_optional(&self.conn)
        .await?;

        Ok(document)
    }
}
