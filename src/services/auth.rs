use async_trait::async_trait;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tokio::sync::mpsc;

use super::audit_logs::AuditRequest;
use super::{RequestHandler, Responder, Service, ServiceError};
use crate::models::audit_logs::{AuditEvent, AuditStatus};
use crate::models::users::{AuthResponse, AuthenticatedUser, LoginRequest, SignupRequest, User};
use crate::repositories::users::UserRepository;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: String,
    pub email: String,
    pub role: String,
    pub exp: i64,
}

pub fn issue_token(
    user_id: &str,
    email: &str,
    role: &str,
    secret: &str,
    expiry_secs: i64,
) -> Result<String, ServiceError> {
    let claims = Claims {
        user_id: user_id.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        exp: chrono::Utc::now().timestamp() + expiry_secs,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ServiceError::Internal(format!("could not sign token: {}", e)))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, ServiceError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ServiceError::Unauthorized("invalid or expired token".to_string()))
}

pub enum AuthRequest {
    Signup {
        request: SignupRequest,
        ip: String,
        response: Responder<AuthResponse>,
    },
    Login {
        request: LoginRequest,
        ip: String,
        response: Responder<AuthResponse>,
    },
}

#[derive(Clone)]
pub struct AuthRequestHandler {
    repository: UserRepository,
    audit_tx: mpsc::Sender<AuditRequest>,
    jwt_secret: String,
    token_expiry_secs: i64,
}

impl AuthRequestHandler {
    pub fn new(
        sql_conn: PgPool,
        audit_tx: mpsc::Sender<AuditRequest>,
        jwt_secret: String,
        token_expiry_secs: i64,
    ) -> Self {
        let repository = UserRepository::new(sql_conn);

        AuthRequestHandler {
            repository,
            audit_tx,
            jwt_secret,
            token_expiry_secs,
        }
    }

    async fn record_audit(&self, actor: &str, action: &str, ip: &str, status: AuditStatus) {
        let event = AuditEvent {
            actor: actor.to_string(),
            action: action.to_string(),
            ip: ip.to_string(),
            status,
        };

        if self.audit_tx.send(AuditRequest::Record { event }).await.is_err() {
            log::warn!("Audit channel closed; dropping {} event.", action);
        }
    }

    fn token_for(&self, user: &User) -> Result<String, ServiceError> {
        issue_token(
            &user.id,
            &user.email,
            &user.role,
            &self.jwt_secret,
            self.token_expiry_secs,
        )
    }

    async fn signup(&self, request: SignupRequest, ip: &str) -> Result<AuthResponse, ServiceError> {
        if request.email.trim().is_empty()
            || request.password.is_empty()
            || request.first_name.trim().is_empty()
            || request.last_name.trim().is_empty()
        {
            return Err(ServiceError::BadRequest("missing required field".to_string()));
        }

        let existing = self
            .repository
            .find_by_email(&request.email)
            .await
            .map_err(ServiceError::from_db)?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "user with this email already exists".to_string(),
            ));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| ServiceError::Internal(format!("could not hash password: {}", e)))?;

        let user = self
            .repository
            .insert_with_portfolio(
                &request.email,
                &password_hash,
                &request.first_name,
                &request.last_name,
                request.phone.as_deref(),
            )
            .await
            .map_err(ServiceError::from_db)?;

        let token = self.token_for(&user)?;
        self.record_audit(&user.id, "auth.signup", ip, AuditStatus::Success)
            .await;

        Ok(AuthResponse {
            user: AuthenticatedUser {
                id: user.id,
                email: user.email,
                role: user.role,
                first_name: user.first_name,
                last_name: user.last_name,
            },
            token,
        })
    }

    async fn login(&self, request: LoginRequest, ip: &str) -> Result<AuthResponse, ServiceError> {
        let user = self
            .repository
            .find_by_email(&request.email)
            .await
            .map_err(ServiceError::from_db)?;

        let Some(user) = user else {
            self.record_audit(&request.email, "auth.login", ip, AuditStatus::Failure)
                .await;
            return Err(ServiceError::Unauthorized("invalid credentials".to_string()));
        };

        if user.status != "active" {
            self.record_audit(&user.id, "auth.login", ip, AuditStatus::Failure)
                .await;
            return Err(ServiceError::Unauthorized("account is not active".to_string()));
        }

        let password_ok = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| ServiceError::Internal(format!("could not verify password: {}", e)))?;
        if !password_ok {
            self.record_audit(&user.id, "auth.login", ip, AuditStatus::Failure)
                .await;
            return Err(ServiceError::Unauthorized("invalid credentials".to_string()));
        }

        let token = self.token_for(&user)?;
        self.record_audit(&user.id, "auth.login", ip, AuditStatus::Success)
            .await;

        Ok(AuthResponse {
            user: AuthenticatedUser {
                id: user.id,
                email: user.email,
                role: user.role,
                first_name: user.first_name,
                last_name: user.last_name,
            },
            token,
        })
    }
}

#[async_trait]
impl RequestHandler<AuthRequest> for AuthRequestHandler {
    async fn handle_request(&self, request: AuthRequest) {
        match request {
            AuthRequest::Signup { request, ip, response } => {
                let result = self.signup(request, &ip).await;
                let _ = response.send(result);
            }
            AuthRequest::Login { request, ip, response } => {
                let result = self.login(request, &ip).await;
                let _ = response.send(result);
            }
        }
    }
}

pub struct AuthService;

impl AuthService {
    pub fn new() -> Self {
        AuthService {}
    }
}

#[async_trait]
impl Service<AuthRequest, AuthRequestHandler> for AuthService {}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issued_token_round_trips() {
        let token = issue_token("u-1", "alice@example.com", "investor", SECRET, 3600).unwrap();
        let claims = verify_token(&token, SECRET).unwrap();

        assert_eq!(claims.user_id, "u-1");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, "investor");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = issue_token("u-1", "alice@example.com", "investor", "other-secret", 3600).unwrap();

        let err = verify_token(&token, SECRET).unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = issue_token("u-1", "alice@example.com", "investor", SECRET, -3600).unwrap();

        assert!(verify_token(&token, SECRET).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = issue_token("u-1", "alice@example.com", "investor", SECRET, 3600).unwrap();
        let mut tampered = token.clone();
        tampered.truncate(token.len() - 2);

        assert!(verify_token(&tampered, SECRET).is_err());
    }

    #[test]
    fn claims_serialize_with_camel_case_user_id() {
        let claims = Claims {
            user_id: "u-1".to_string(),
            email: "a@b.c".to_string(),
            role: "admin".to_string(),
            exp: 0,
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("userId").is_some());
    }
}
