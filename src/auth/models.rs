//! Authentication Models
//! Mission: Define admin account and session data structures

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Admin account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub created_at: String,
}

/// JWT Claims payload for an admin session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    pub sub: String, // subject (admin id)
    pub email: String,
    pub exp: usize, // expiration timestamp
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login/logout response
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
}
