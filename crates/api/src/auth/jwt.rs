//! In-process verification of identity-service access tokens.
//!
//! Used when no `IDENTITY_SERVICE_URL` is configured: the token's HS256
//! signature is checked against the secret shared with the identity service
//! and the caller is read straight from the claims.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use villa_core::types::DbId;

use crate::clients::Principal;

/// The claims this service relies on. Any others the issuer adds are ignored.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The user's id in the identity service.
    pub sub: DbId,
    pub role: String,
    /// Expiry as a UTC Unix timestamp; checked on decode.
    pub exp: u64,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the identity service.
    pub secret: String,
}

impl JwtConfig {
    /// Read `JWT_SECRET`.
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");
        Self { secret }
    }
}

/// Verify `token` and return the caller it was issued to.
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Principal, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(Principal {
        id: data.claims.sub,
        role: data.claims.role,
    })
}
