//! Bearer-token validation against the identity collaborator.

use async_trait::async_trait;
use reqwest::StatusCode;
use villa_core::error::CoreError;

use super::{ensure_success, IdentityProvider, Principal, UpstreamError, IDENTITY_SERVICE};
use crate::auth::jwt::{verify_token, JwtConfig};

/// Asks the identity service who owns a token via `GET /users/profile`.
pub struct HttpIdentityClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIdentityClient {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    async fn fetch_profile(&self, bearer_token: &str) -> Result<Option<Principal>, UpstreamError> {
        let response = self
            .client
            .get(format!("{}/users/profile", self.base_url))
            .bearer_auth(bearer_token)
            .send()
            .await?;

        if matches!(
            response.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Ok(None);
        }

        let principal = ensure_success(response).await?.json::<Principal>().await?;
        Ok(Some(principal))
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityClient {
    async fn authenticate(&self, bearer_token: &str) -> Result<Principal, CoreError> {
        self.fetch_profile(bearer_token)
            .await
            .map_err(|e| e.into_core(IDENTITY_SERVICE))?
            .ok_or_else(|| CoreError::Unauthorized("Invalid or expired token".into()))
    }
}

/// Verifies HS256 tokens in-process with the secret shared with the
/// identity service.
pub struct LocalJwtIdentity {
    config: JwtConfig,
}

impl LocalJwtIdentity {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl IdentityProvider for LocalJwtIdentity {
    async fn authenticate(&self, bearer_token: &str) -> Result<Principal, CoreError> {
        verify_token(bearer_token, &self.config)
            .map_err(|_| CoreError::Unauthorized("Invalid or expired token".into()))
    }
}
