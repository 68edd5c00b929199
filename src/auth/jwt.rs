//! JWT Token Handler
//! Mission: Issue and verify admin session tokens securely

use crate::auth::models::{Admin, AuthClaims};
use anyhow::{bail, Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

/// JWT Handler for token operations
pub struct JwtHandler {
    secret: String,
    expiration_hours: i64,
}

impl JwtHandler {
    /// Create a new JWT handler with the process-wide signing secret
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            expiration_hours: 24, // 24-hour sessions
        }
    }

    /// Issue a session token for an admin
    pub fn issue_token(&self, admin: &Admin) -> Result<(String, usize)> {
        let expiration = Utc::now()
            .checked_add_signed(chrono::Duration::hours(self.expiration_hours))
            .context("Invalid timestamp")?
            .timestamp() as usize;

        let expires_in = (self.expiration_hours * 3600) as usize;

        let claims = AuthClaims {
            sub: admin.id.to_string(),
            email: admin.email.clone(),
            exp: expiration,
        };

        debug!(
            "Issuing session token for {} ({}), expires in {}h",
            admin.email, admin.id, self.expiration_hours
        );

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to issue token")?;

        Ok((token, expires_in))
    }

    /// Verify a session token and extract claims.
    ///
    /// Fails uniformly: bad signature, expired credential, and malformed
    /// input all produce the same error so callers cannot leak which kind
    /// of failure occurred.
    pub fn verify_token(&self, token: &str) -> Result<AuthClaims> {
        if token.is_empty() {
            bail!("Invalid or expired token");
        }

        let decoded = decode::<AuthClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| anyhow::anyhow!("Invalid or expired token"))?;

        Ok(decoded.claims)
    }
}
