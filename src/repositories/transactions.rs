use crate::models::transactions::{Transaction, TransactionStatus};

use sqlx::PgPool;
use uuid::Uuid;

/// Outcome of a status review inside its database transaction.
pub enum StatusUpdate {
    Applied(Transaction),
    AlreadyReviewed(Transaction),
}

#[derive(Clone)]
pub struct TransactionRepository {
    conn: PgPool,
}

impl TransactionRepository {
    pub fn new(conn: PgPool) -> Self {
        TransactionRepository { conn }
    }

    pub async fn insert(
        &self,
        user_id: &str,
        tx_type: &str,
        amount: f64,
    ) -> Result<Transaction, anyhow::Error> {
        let transaction_id = Uuid::new_v4().hyphenated().to_string();

        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
                INSERT INTO transactions (id, user_id, tx_type, amount, status)
                VALUES ($1, $2, $3, $4, 'pending')
                RETURNING *
            "#,
        )
        .bind(&transaction_id)
        .bind(user_id)
        .bind(tx_type)
        .bind(amount)
        .fetch_one(&self.conn)
        .await?;

        Ok(transaction)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Transaction>, anyhow::Error> {
        let transaction = sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.conn)
            .await?;

        Ok(transaction)
    }

    pub async fn list_for_user(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>, anyhow::Error> {
        let transactions = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.conn)
        .await?;

        Ok(transactions)
    }

    pub async fn list_all(&self, limit: i64, offset: i64) -> Result<Vec<Transaction>, anyhow::Error> {
        let transactions = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.conn)
        .await?;

        Ok(transactions)
    }

    /// Status change and the resulting portfolio adjustment commit together.
    /// Completing a deposit adds to total_invested, completing a withdrawal to
    /// total_withdrawn. Terminal transactions are locked and reported back
    /// unchanged, so the totals can never be applied twice.
    pub async fn set_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<Option<StatusUpdate>, anyhow::Error> {
        let mut tx = self.conn.begin().await?;

        let current =
            sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(current) = current else {
            return Ok(None);
        };

        if TransactionStatus::is_terminal(&current.status) {
            return Ok(Some(StatusUpdate::AlreadyReviewed(current)));
        }

        let updated = sqlx::query_as::<_, Transaction>(
            "UPDATE transactions SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        if status == "completed" {
            let apply = if current.tx_type == "deposit" {
                "UPDATE portfolios SET total_invested = total_invested + $1, updated_at = CURRENT_TIMESTAMP WHERE user_id = $2"
            } else {
                "UPDATE portfolios SET total_withdrawn = total_withdrawn + $1, updated_at = CURRENT_TIMESTAMP WHERE user_id = $2"
            };

            sqlx::query(apply)
                .bind(current.amount)
                .bind(&current.user_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(Some(StatusUpdate::Applied(updated)))
    }
}
