//! Authentication module
//! Mission: Admin session management with JWT verification

pub mod admin_store;
pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;

pub use admin_store::AdminStore;
pub use api::AuthState;
pub use jwt::JwtHandler;
pub use middleware::admin_auth_middleware;
pub use models::AuthClaims;

/// Name of the session cookie carrying the admin JWT.
pub const ADMIN_TOKEN_COOKIE: &str = "admin_token";
