use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub tx_type: String,
    pub amount: f64,
    pub status: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub tx_type: String,
    pub amount: f64,
    pub status: String,
    pub created_at: chrono::NaiveDateTime,
}

impl From<Transaction> for TransactionView {
    fn from(tx: Transaction) -> Self {
        TransactionView {
            id: tx.id,
            user_id: tx.user_id,
            tx_type: tx.tx_type,
            amount: tx.amount,
            status: tx.status,
            created_at: tx.created_at,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Withdrawal => "withdrawal",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
        }
    }

    /// Completed and failed are terminal: a reviewed transaction cannot be
    /// reviewed again, otherwise completing it twice would credit the
    /// portfolio totals twice.
    pub fn is_terminal(status: &str) -> bool {
        matches!(status, "completed" | "failed")
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub amount: f64,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ReviewTransaction {
    pub status: TransactionStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reviewed_statuses_are_terminal() {
        assert!(TransactionStatus::is_terminal("completed"));
        assert!(TransactionStatus::is_terminal("failed"));
        assert!(!TransactionStatus::is_terminal("pending"));
    }
}
