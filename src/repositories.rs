pub mod audit_logs;
pub mod compliance;
pub mod documents;
pub mod ira_accounts;
pub mod portfolios;
pub mod transactions;
pub mod users;
