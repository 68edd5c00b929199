//! Authentication Middleware
//! Mission: Protect admin API endpoints with JWT validation
//!
//! This is the authoritative session check, applied per admin API route.
//! The gatekeeper's cookie-presence redirect is only a coarse early gate
//! for admin pages and never substitutes for this one.

use crate::auth::{jwt::JwtHandler, models::AuthClaims, ADMIN_TOKEN_COOKIE};
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use std::sync::Arc;

/// Auth middleware that validates the admin session cookie
pub async fn admin_auth_middleware(
    State(jwt_handler): State<Arc<JwtHandler>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let jar = CookieJar::from_headers(req.headers());

    let token = jar
        .get(ADMIN_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or(AuthError::Unauthenticated)?;

    // Fail closed: any verifier error counts as an invalid credential.
    let claims = jwt_handler
        .verify_token(&token)
        .map_err(|_| AuthError::InvalidCredential)?;

    // Expose claims to handlers (e.g. comment attribution)
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Extract verified claims from a request (use after auth middleware)
pub fn extract_claims(req: &Request) -> Option<&AuthClaims> {
    req.extensions().get::<AuthClaims>()
}

/// Auth rejection kinds. Both answer identically on the wire so a caller
/// cannot tell a missing credential from a bad one.
#[derive(Debug)]
pub enum AuthError {
    Unauthenticated,
    InvalidCredential,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized" })),
        )
            .into_response()
    }
}
