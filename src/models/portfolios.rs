use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Portfolio {
    pub user_id: String,
    pub bitcoin_balance: f64,
    pub nav: f64,
    pub performance: f64,
    pub total_invested: f64,
    pub total_withdrawn: f64,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioView {
    pub user_id: String,
    pub bitcoin_balance: f64,
    pub nav: f64,
    pub performance: f64,
    pub total_invested: f64,
    pub total_withdrawn: f64,
    pub updated_at: chrono::NaiveDateTime,
}

impl From<Portfolio> for PortfolioView {
    fn from(p: Portfolio) -> Self {
        PortfolioView {
            user_id: p.user_id,
            bitcoin_balance: p.bitcoin_balance,
            nav: p.nav,
            performance: p.performance,
            total_invested: p.total_invested,
            total_withdrawn: p.total_withdrawn,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateNav {
    pub user_id: String,
    pub bitcoin_price: f64,
}
