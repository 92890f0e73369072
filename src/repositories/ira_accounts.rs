use crate::models::ira_accounts::IraAccount;

use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct IraAccountRepository {
    conn: PgPool,
}

impl IraAccountRepository {
    pub fn new(conn: PgPool) -> Self {
        IraAccountRepository { conn }
    }

    pub async fn get_by_user(&self, user_id: &str) -> Result<Option<IraAccount>, anyhow::Error> {
        let account = sqlx::query_as::<_, IraAccount>("SELECT * FROM ira_accounts WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.conn)
            .await?;

        Ok(account)
    }

    pub async fn list_all(&self) -> Result<Vec<IraAccount>, anyhow::Error> {
        let accounts =
            sqlx::query_as::<_, IraAccount>("SELECT * FROM ira_accounts ORDER BY opened_date DESC")
                .fetch_all(&self.conn)
                .await?;

        Ok(accounts)
    }

    /// The user_id primary key enforces the one-account-per-user invariant; a
    /// second insert surfaces as a unique violation.
    pub async fn insert(
        &self,
        user_id: &str,
        account_type: &str,
        custodian: &str,
    ) -> Result<IraAccount, anyhow::Error> {
        let account_number = format!(
            "IRA-{}",
            Uuid::new_v4().simple().to_string()[..12].to_uppercase()
        );

        let account = sqlx::query_as::<_, IraAccount>(
            r#"
                INSERT INTO ira_accounts (user_id, account_number, account_type, custodian)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&account_number)
        .bind(account_type)
        .bind(custodian)
        .fetch_one(&self.conn)
        .await?;

        Ok(account)
    }

    pub async fn update(
        &self,
        user_id: &str,
        custodian: Option<&str>,
        contributed_this_year: Option<f64>,
    ) -> Result<Option<IraAccount>, anyhow::Error> {
        let account = sqlx::query_as::<_, IraAccount>(
            r#"
                UPDATE ira_accounts
                SET custodian = COALESCE($1, custodian),
                    contributed_this_year = COALESCE($2, contributed_this_year),
                    updated_at = CURRENT_TIMESTAMP
                WHERE user_id = $3
                RETURNING *
            "#,
        )
        .bind(custodian)
        .bind(contributed_this_year)
        .bind(user_id)
        .fetch_optional(&self.conn)
        .await?;

        Ok(account)
    }
}
