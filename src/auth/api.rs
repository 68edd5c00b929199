//! Session API Endpoints
//! Mission: Provide admin login and logout endpoints

use crate::auth::{
    admin_store::AdminStore,
    jwt::JwtHandler,
    models::{LoginRequest, SessionResponse},
    ADMIN_TOKEN_COOKIE,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub admin_store: Arc<AdminStore>,
    pub jwt_handler: Arc<JwtHandler>,
    /// Session cookies are marked Secure only in production.
    pub secure_cookies: bool,
}

impl AuthState {
    pub fn new(
        admin_store: Arc<AdminStore>,
        jwt_handler: Arc<JwtHandler>,
        secure_cookies: bool,
    ) -> Self {
        Self {
            admin_store,
            jwt_handler,
            secure_cookies,
        }
    }
}

fn session_cookie(token: String, secure: bool, max_age: time::Duration) -> Cookie<'static> {
    Cookie::build((ADMIN_TOKEN_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(max_age)
        .path("/")
        .build()
}

/// Login endpoint - POST /api/admin/login
pub async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), AuthApiError> {
    info!("🔐 Login attempt: {}", payload.email);

    // Unknown email and wrong password answer identically.
    let valid = state
        .admin_store
        .verify_password(&payload.email, &payload.password)
        .map_err(|_| AuthApiError::InternalError)?;

    if !valid {
        warn!("❌ Failed login attempt: {}", payload.email);
        return Err(AuthApiError::InvalidCredentials);
    }

    let admin = state
        .admin_store
        .get_admin_by_email(&payload.email)
        .map_err(|_| AuthApiError::InternalError)?
        .ok_or(AuthApiError::InvalidCredentials)?;

    let (token, _expires_in) = state
        .jwt_handler
        .issue_token(&admin)
        .map_err(|_| AuthApiError::InternalError)?;

    info!("✅ Login successful: {}", admin.email);

    let cookie = session_cookie(token, state.secure_cookies, time::Duration::hours(24));

    Ok((jar.add(cookie), Json(SessionResponse { success: true })))
}

/// Logout endpoint - POST /api/admin/logout (session required)
pub async fn logout(
    State(state): State<AuthState>,
    jar: CookieJar,
) -> (CookieJar, Json<SessionResponse>) {
    // Expire the cookie immediately.
    let cookie = session_cookie(String::new(), state.secure_cookies, time::Duration::ZERO);

    (jar.add(cookie), Json(SessionResponse { success: true }))
}

/// Session API errors
#[derive(Debug)]
pub enum AuthApiError {
    InvalidCredentials,
    InternalError,
}

impl IntoResponse for AuthApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            AuthApiError::InternalError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_flags() {
        let cookie = session_cookie("tok".to_string(), true, time::Duration::hours(24));

        assert_eq!(cookie.name(), ADMIN_TOKEN_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::hours(24)));
    }

    #[test]
    fn test_session_cookie_insecure_outside_production() {
        let cookie = session_cookie("tok".to_string(), false, time::Duration::ZERO);
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }

    #[test]
    fn test_auth_api_error_responses() {
        let invalid = AuthApiError::InvalidCredentials.into_response();
        assert_eq!(invalid.status(), StatusCode::UNAUTHORIZED);

        let internal = AuthApiError::InternalError.into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
