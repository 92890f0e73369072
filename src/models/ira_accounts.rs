use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct IraAccount {
    pub user_id: String,
    pub account_number: String,
    pub account_type: String,
    pub custodian: String,
    pub contribution_limit: f64,
    pub contributed_this_year: f64,
    pub status: String,
    pub opened_date: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IraAccountView {
    pub user_id: String,
    pub account_number: String,
    pub account_type: String,
    pub custodian: String,
    pub contribution_limit: f64,
    pub contributed_this_year: f64,
    pub status: String,
    pub opened_date: chrono::NaiveDateTime,
}

impl From<IraAccount> for IraAccountView {
    fn from(account: IraAccount) -> Self {
        IraAccountView {
            user_id: account.user_id,
            account_number: account.account_number,
            account_type: account.account_type,
            custodian: account.custodian,
            contribution_limit: account.contribution_limit,
            contributed_this_year: account.contributed_this_year,
            status: account.status,
            opened_date: account.opened_date,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum IraAccountType {
    Traditional,
    Roth,
}

impl IraAccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IraAccountType::Traditional => "traditional",
            IraAccountType::Roth => "roth",
        }
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OpenIraAccount {
    pub account_type: IraAccountType,
    pub custodian: String,
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateIraAccount {
    pub custodian: Option<String>,
    pub contributed_this_year: Option<f64>,
}
