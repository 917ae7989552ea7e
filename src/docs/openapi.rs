//! OpenAPI specification for the relay API

use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};

use crate::{
    error::ErrorResponse,
    procore::{AccessTokenResponse, AccidentLog, AuthorizationUrlResponse, TokenExchangeRequest},
};

/// OpenAPI specification for the Procore Relay API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Procore Relay API",
        version = "1.0.0",
        description = "Relay for Procore accident logs and OAuth authorization code exchange"
    ),
    paths(
        crate::routes::auth::exchange_token,
        crate::routes::auth::authorization_url,
        crate::routes::accident_logs::list_accident_logs,
        crate::routes::accident_logs::list_filtered_accident_logs,
        crate::routes::accident_logs::create_accident_log,
        crate::routes::accident_logs::delete_accident_log,
    ),
    components(
        schemas(
            AccidentLog,
            TokenExchangeRequest,
            AccessTokenResponse,
            AuthorizationUrlResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "OAuth authorization code exchange"),
        (name = "Accident Logs", description = "Project accident logs relayed to Procore")
    )
)]
pub struct RelayApiDoc;

/// The caller's Procore token, forwarded as-is
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
