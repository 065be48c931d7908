//! Collaborator service clients.
//!
//! Each collaborator is reached through a small async trait so handlers and
//! the booking workflow can run against either the HTTP implementation or an
//! in-process one:
//!
//! - [`IdentityProvider`] -- resolves a bearer token to a [`Principal`].
//! - [`VillaLookup`] -- fetches the booking-relevant fields of a villa.
//! - [`MediaStore`] -- uploads an image and returns its public URL.
//!
//! Calls are single-attempt. Transport failures, timeouts and unexpected
//! statuses surface as [`CoreError::UpstreamUnavailable`].

pub mod identity;
pub mod media;
pub mod villa_directory;

use async_trait::async_trait;
use serde::Deserialize;
use villa_core::error::CoreError;
use villa_core::pricing::VillaRates;
use villa_core::types::DbId;

pub use identity::{HttpIdentityClient, LocalJwtIdentity};
pub use media::HttpMediaStore;
pub use villa_directory::{HttpVillaDirectory, LocalVillaDirectory};

/// Service name reported for identity failures.
pub const IDENTITY_SERVICE: &str = "identity";
/// Service name reported for villa lookup failures.
pub const VILLA_SERVICE: &str = "villa-directory";
/// Service name reported for media upload failures.
pub const MEDIA_SERVICE: &str = "media";

/// The authenticated caller as reported by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Principal {
    pub id: DbId,
    pub role: String,
}

/// An image received from a client, ready to forward to the media service.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a bearer token. Bad tokens yield [`CoreError::Unauthorized`].
    async fn authenticate(&self, bearer_token: &str) -> Result<Principal, CoreError>;
}

#[async_trait]
pub trait VillaLookup: Send + Sync {
    /// `Ok(None)` when the directory has no villa with this id.
    async fn fetch_rates(&self, villa_id: DbId) -> Result<Option<VillaRates>, CoreError>;
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store the image and return the URL it can be retrieved from.
    async fn upload(&self, image: ImageUpload) -> Result<String, CoreError>;
}

/// Errors from the collaborator HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The collaborator returned a status the caller does not handle.
    #[error("unexpected status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The collaborator answered 2xx but the payload lacked a required field.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl UpstreamError {
    /// Log the failure and convert it into the domain error surfaced to callers.
    pub fn into_core(self, service: &'static str) -> CoreError {
        tracing::warn!(service, error = %self, "Upstream call failed");
        CoreError::UpstreamUnavailable {
            service,
            reason: self.to_string(),
        }
    }
}

/// Return the response unchanged on a 2xx status, or an
/// [`UpstreamError::Status`] carrying the status and body text.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(UpstreamError::Status {
        status: status.as_u16(),
        body,
    })
}
