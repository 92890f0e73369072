use crate::models::portfolios::Portfolio;

use sqlx::PgPool;

#[derive(Clone)]
pub struct PortfolioRepository {
    conn: PgPool,
}

impl PortfolioRepository {
    pub fn new(conn: PgPool) -> Self {
        Self { conn }
    }

    pub async fn get_by_user(&self, user_id: &str) -> Result<Option<Portfolio>, anyhow::Error> {
        let portfolio = sqlx::query_as::<_, Portfolio>("SELECT * FROM portfolios WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.conn)
            .await?;

        Ok(portfolio)
    }

    pub async fn list_all(&self) -> Result<Vec<Portfolio>, anyhow::Error> {
        let portfolios =
            sqlx::query_as::<_, Portfolio>("SELECT * FROM portfolios ORDER BY updated_at DESC")
                .fetch_all(&self.conn)
                .await?;

        Ok(portfolios)
    }

    /// Recomputes nav and performance from the current bitcoin price in a
    /// single statement, so concurrent updates cannot observe a half-applied
    /// portfolio.
    pub async fn update_nav(
        &self,
        user_id: &str,
        bitcoin_price: f64,
    ) -> Result<Option<Portfolio>, anyhow::Error> {
        let portfolio = sqlx::query_as::<_, Portfolio>(
            r#"
                UPDATE portfolios
                SET nav = bitcoin_balance * $1,
                    performance = CASE
                        WHEN total_invested > 0
                        THEN (bitcoin_balance * $1 + total_withdrawn - total_invested) / total_invested * 100
                        ELSE 0
                    END,
                    updated_at = CURRENT_TIMESTAMP
                WHERE user_id = $2
                RETURNING *
            "#,
        )
        .bind(bitcoin_price)
        .bind(user_id)
        .fetch_optional(&self.conn)
        .await?;

        Ok(portfolio)
    }
}
