use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::{mpsc, oneshot};

use crate::settings::Settings;

pub mod audit_logs;
pub mod auth;
pub mod compliance;
pub mod documents;
pub mod http;
pub mod ira_accounts;
pub mod policy;
pub mod portfolios;
pub mod transactions;
pub mod users;

#[derive(Clone, Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Collapses repository errors onto the error taxonomy. Pool-level
    /// failures become Unavailable so an unreachable database degrades to a
    /// 503 instead of taking the process down.
    pub fn from_db(e: anyhow::Error) -> Self {
        if let Some(db_err) = e.downcast_ref::<sqlx::Error>() {
            match db_err {
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                    return ServiceError::Unavailable("database unreachable".to_string());
                }
                sqlx::Error::RowNotFound => {
                    return ServiceError::NotFound("record not found".to_string());
                }
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    return ServiceError::Conflict("record already exists".to_string());
                }
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    return ServiceError::NotFound("referenced record not found".to_string());
                }
                _ => {}
            }
        }

        ServiceError::Database(e.to_string())
    }
}

/// One-shot reply slot carried inside every service request.
pub type Responder<T> = oneshot::Sender<Result<T, ServiceError>>;

#[async_trait]
pub trait RequestHandler<T>: Send + Sync + 'static
where
    T: Send + 'static,
{
    async fn handle_request(&self, request: T);
}

#[async_trait]
pub trait Service<T, H>: Send + Sync + 'static
where
    T: Send + 'static,
    H: RequestHandler<T> + Clone + Send,
{
    async fn run(&mut self, handler: H, receiver: &mut mpsc::Receiver<T>) {
        while let Some(request) = receiver.recv().await {
            let handler = handler.clone();

            tokio::spawn(async move {
                handler.handle_request(request).await;
            });
        }
    }
}

/// Senders for every resource service, handed to the HTTP layer.
#[derive(Clone)]
pub struct ServiceChannels {
    pub auth_tx: mpsc::Sender<auth::AuthRequest>,
    pub user_tx: mpsc::Sender<users::UserRequest>,
    pub portfolio_tx: mpsc::Sender<portfolios::PortfolioRequest>,
    pub transaction_tx: mpsc::Sender<transactions::TransactionRequest>,
    pub document_tx: mpsc::Sender<documents::DocumentRequest>,
    pub ira_tx: mpsc::Sender<ira_accounts::IraAccountRequest>,
    pub compliance_tx: mpsc::Sender<compliance::ComplianceRequest>,
    pub audit_tx: mpsc::Sender<audit_logs::AuditRequest>,
}

pub async fn start_services(pool: PgPool, settings: &Settings) -> Result<ServiceChannels, anyhow::Error> {
    let (auth_tx, mut auth_rx) = mpsc::channel(512);
    let (user_tx, mut user_rx) = mpsc::channel(512);
    let (portfolio_tx, mut portfolio_rx) = mpsc::channel(512);
    let (transaction_tx, mut transaction_rx) = mpsc::channel(512);
    let (document_tx, mut document_rx) = mpsc::channel(512);
    let (ira_tx, mut ira_rx) = mpsc::channel(512);
    let (compliance_tx, mut compliance_rx) = mpsc::channel(512);
    let (audit_tx, mut audit_rx) = mpsc::channel(512);

    let mut auth_service = auth::AuthService::new();
    let mut user_service = users::UserService::new();
    let mut portfolio_service = portfolios::PortfolioService::new();
    let mut transaction_service = transactions::TransactionService::new();
    let mut document_service = documents::DocumentService::new();
    let mut ira_service = ira_accounts::IraAccountService::new();
    let mut compliance_service = compliance::ComplianceService::new();
    let mut audit_service = audit_logs::AuditService::new();

    log::info!("Starting audit log service.");
    let audit_pool = pool.clone();
    tokio::spawn(async move {
        audit_service
            .run(audit_logs::AuditRequestHandler::new(audit_pool), &mut audit_rx)
            .await;
    });

    log::info!("Starting auth service.");
    let auth_pool = pool.clone();
    let auth_audit_tx = audit_tx.clone();
    let jwt_secret = settings.auth.jwt_secret.clone();
    let token_expiry_secs = settings.auth.token_expiry_secs;
    tokio::spawn(async move {
        auth_service
            .run(
                auth::AuthRequestHandler::new(auth_pool, auth_audit_tx, jwt_secret, token_expiry_secs),
                &mut auth_rx,
            )
            .await;
    });

    log::info!("Starting user service.");
    let user_pool = pool.clone();
    let user_audit_tx = audit_tx.clone();
    tokio::spawn(async move {
        user_service
            .run(users::UserRequestHandler::new(user_pool, user_audit_tx), &mut user_rx)
            .await;
    });

    log::info!("Starting portfolio service.");
    let portfolio_pool = pool.clone();
    tokio::spawn(async move {
        portfolio_service
            .run(
                portfolios::PortfolioRequestHandler::new(portfolio_pool),
                &mut portfolio_rx,
            )
            .await;
    });

    log::info!("Starting transaction service.");
    let transaction_pool = pool.clone();
    let transaction_audit_tx = audit_tx.clone();
    tokio::spawn(async move {
        transaction_service
            .run(
                transactions::TransactionRequestHandler::new(transaction_pool, transaction_audit_tx),
                &mut transaction_rx,
            )
            .await;
    });

    log::info!("Starting document service.");
    let document_pool = pool.clone();
    let document_audit_tx = audit_tx.clone();
    tokio::spawn(async move {
        document_service
            .run(
                documents::DocumentRequestHandler::new(document_pool, document_audit_tx),
                &mut document_rx,
            )
            .await;
    });

    log::info!("Starting IRA account service.");
    let ira_pool = pool.clone();
    tokio::spawn(async move {
        ira_service
            .run(ira_accounts::IraAccountRequestHandler::new(ira_pool), &mut ira_rx)
            .await;
    });

    log::info!("Starting compliance service.");
    let compliance_pool = pool.clone();
    tokio::spawn(async move {
        compliance_service
            .run(
                compliance::ComplianceRequestHandler::new(compliance_pool),
                &mut compliance_rx,
            )
            .await;
    });

    log::info!("Started services.");
    Ok(ServiceChannels {
        auth_tx,
        user_tx,
        portfolio_tx,
        transaction_tx,
        document_tx,
        ira_tx,
        compliance_tx,
        audit_tx,
    })
}
