//! Declarative role checks: one allow-list per resource and action, applied by
//! the services before any repository call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Investor,
    Admin,
    Compliance,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Investor => "investor",
            Role::Admin => "admin",
            Role::Compliance => "compliance",
        }
    }
}

impl FromStr for Role {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "investor" => Ok(Role::Investor),
            "admin" => Ok(Role::Admin),
            "compliance" => Ok(Role::Compliance),
            other => Err(ServiceError::Unauthorized(format!("unknown role: {}", other))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated identity extracted from the bearer token.
#[derive(Clone, Debug)]
pub struct Caller {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

pub const USERS_LIST: &[Role] = &[Role::Admin];
pub const USERS_STATUS_UPDATE: &[Role] = &[Role::Admin];
pub const PORTFOLIOS_LIST: &[Role] = &[Role::Admin];
pub const PORTFOLIOS_NAV_UPDATE: &[Role] = &[Role::Admin];
pub const TRANSACTIONS_LIST: &[Role] = &[Role::Admin, Role::Compliance];
pub const TRANSACTIONS_REVIEW: &[Role] = &[Role::Admin, Role::Compliance];
pub const DOCUMENTS_LIST: &[Role] = &[Role::Admin, Role::Compliance];
pub const DOCUMENTS_REVIEW: &[Role] = &[Role::Admin, Role::Compliance];
pub const IRA_ACCOUNTS_LIST: &[Role] = &[Role::Admin];
pub const COMPLIANCE_GENERATE: &[Role] = &[Role::Admin, Role::Compliance];
pub const COMPLIANCE_LIST: &[Role] = &[Role::Admin, Role::Compliance];
pub const AUDIT_LOGS_LIST: &[Role] = &[Role::Admin, Role::Compliance];

pub fn require(caller: &Caller, allowed: &[Role]) -> Result<(), ServiceError> {
    if allowed.contains(&caller.role) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(format!(
            "role {} is not allowed to perform this action",
            caller.role
        )))
    }
}

/// Owners always pass; everyone else needs one of the allowed roles.
pub fn require_self_or(caller: &Caller, owner_id: &str, allowed: &[Role]) -> Result<(), ServiceError> {
    if caller.user_id == owner_id {
        return Ok(());
    }

    require(caller, allowed)
        .map_err(|_| ServiceError::Forbidden("you can only access your own records".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller(role: Role) -> Caller {
        Caller {
            user_id: "u-1".to_string(),
            email: "user@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn admin_only_actions_reject_other_roles() {
        for allowed in [USERS_LIST, USERS_STATUS_UPDATE, PORTFOLIOS_LIST, PORTFOLIOS_NAV_UPDATE, IRA_ACCOUNTS_LIST] {
            assert!(require(&caller(Role::Admin), allowed).is_ok());
            assert!(require(&caller(Role::Investor), allowed).is_err());
            assert!(require(&caller(Role::Compliance), allowed).is_err());
        }
    }

    #[test]
    fn review_actions_allow_admin_and_compliance() {
        for allowed in [
            TRANSACTIONS_LIST,
            TRANSACTIONS_REVIEW,
            DOCUMENTS_LIST,
            DOCUMENTS_REVIEW,
            COMPLIANCE_GENERATE,
            COMPLIANCE_LIST,
            AUDIT_LOGS_LIST,
        ] {
            assert!(require(&caller(Role::Admin), allowed).is_ok());
            assert!(require(&caller(Role::Compliance), allowed).is_ok());
            assert!(require(&caller(Role::Investor), allowed).is_err());
        }
    }

    #[test]
    fn owner_passes_ownership_check_regardless_of_role() {
        let investor = caller(Role::Investor);
        assert!(require_self_or(&investor, "u-1", USERS_LIST).is_ok());

        let err = require_self_or(&investor, "someone-else", USERS_LIST).unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[test]
    fn admin_passes_ownership_check_for_other_users() {
        let admin = caller(Role::Admin);
        assert!(require_self_or(&admin, "someone-else", USERS_LIST).is_ok());
    }

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::Investor, Role::Admin, Role::Compliance] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("superuser".parse::<Role>().is_err());
    }
}
