use crate::models::users::User;

use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct UserRepository {
    conn: PgPool,
}

impl UserRepository {
    pub fn new(conn: PgPool) -> Self {
        Self { conn }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, anyhow::Error> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.conn)
            .await?;

        Ok(user)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<User>, anyhow::Error> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.conn)
            .await?;

        Ok(user)
    }

    pub async fn list_all(&self) -> Result<Vec<User>, anyhow::Error> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(&self.conn)
            .await?;

        Ok(users)
    }

    /// Inserts the user and a zeroed portfolio in one database transaction so a
    /// crash between the two writes cannot leave a user without a portfolio.
    pub async fn insert_with_portfolio(
        &self,
        email: &str,
        password_hash: &str,
        first_name: &str,
        last_name: &str,
        phone: Option<&str>,
    ) -> Result<User, anyhow::Error> {
        let user_id = Uuid::new_v4().hyphenated().to_string();
        let mut tx = self.conn.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
                INSERT INTO users (id, email, password_hash, first_name, last_name, phone, role, status)
                VALUES ($1, $2, $3, $4, $5, $6, 'investor', 'active')
                RETURNING *
            "#,
        )
        .bind(&user_id)
        .bind(email)
        .bind(password_hash)
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO portfolios (user_id) VALUES ($1)")
            .bind(&user.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(user)
    }

    pub async fn update_profile(
        &self,
        id: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<User>, anyhow::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
                UPDATE users
                SET first_name = COALESCE($1, first_name),
                    last_name = COALESCE($2, last_name),
                    phone = COALESCE($3, phone),
                    updated_at = CURRENT_TIMESTAMP
                WHERE id = $4
                RETURNING *
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .bind(id)
        .fetch_optional(&self.conn)
        .await?;

        Ok(user)
    }

    pub async fn update_status(&self, id: &str, status: &str) -> Result<Option<User>, anyhow::Error> {
        let user = sqlx::query_as::<_, User>(
            "UPDATE users SET status = $1, updated_at = CURRENT_TIMESTAMP WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.conn)
        .await?;

        Ok(user)
    }
}
