use axum::{response::Html, Json};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::ErrorBody;
use crate::models::{audit_logs, compliance, documents, ira_accounts, portfolios, transactions, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Investment Portal API",
        description = "Self-directed Bitcoin IRA backend."
    ),
    paths(
        super::auth::signup,
        super::auth::login,
        super::users::get_profile,
        super::users::update_profile,
        super::users::list_users,
        super::users::get_user,
        super::users::update_status,
        super::portfolios::get_mine,
        super::portfolios::list_all,
        super::portfolios::update_nav,
        super::transactions::create,
        super::transactions::list_mine,
        super::transactions::list_all,
        super::transactions::get_by_id,
        super::transactions::review,
        super::documents::upload,
        super::documents::list_mine,
        super::documents::list_all,
        super::documents::get_by_id,
        super::documents::review,
        super::ira_accounts::open,
        super::ira_accounts::get_mine,
        super::ira_accounts::update,
        super::ira_accounts::list_all,
        super::compliance::generate,
        super::compliance::list_mine,
        super::compliance::list_all,
        super::audit_logs::list_mine,
        super::audit_logs::list_all,
    ),
    components(schemas(
        ErrorBody,
        users::SignupRequest,
        users::LoginRequest,
        users::AuthResponse,
        users::AuthenticatedUser,
        users::UserProfile,
        users::UpdateProfile,
        users::UserStatus,
        users::UpdateUserStatus,
        users::UserStatusUpdated,
        portfolios::PortfolioView,
        portfolios::UpdateNav,
        transactions::TransactionView,
        transactions::TransactionType,
        transactions::TransactionStatus,
        transactions::NewTransaction,
        transactions::ReviewTransaction,
        documents::DocumentView,
        documents::DocumentStatus,
        documents::UploadDocument,
        documents::ReviewDocument,
        ira_accounts::IraAccountView,
        ira_accounts::IraAccountType,
        ira_accounts::OpenIraAccount,
        ira_accounts::UpdateIraAccount,
        compliance::ComplianceReportView,
        compliance::NewComplianceReport,
        audit_logs::AuditLogView,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "auth", description = "Signup and login"),
        (name = "users", description = "Profiles and account administration"),
        (name = "portfolios", description = "Holdings and valuation"),
        (name = "transactions", description = "Deposits and withdrawals"),
        (name = "documents", description = "KYC document review"),
        (name = "ira-accounts", description = "IRA account management"),
        (name = "compliance", description = "Compliance reports"),
        (name = "audit-logs", description = "Audit trail"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_PAGE)
}

const SWAGGER_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Investment Portal API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {
      SwaggerUIBundle({
        url: "/api/docs/openapi.json",
        dom_id: "#swagger-ui",
      });
    };
  </script>
</body>
</html>
"##;
