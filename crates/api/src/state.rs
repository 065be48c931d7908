use std::sync::Arc;
use std::time::Duration;

use crate::clients::{
    HttpIdentityClient, HttpMediaStore, HttpVillaDirectory, IdentityProvider, LocalJwtIdentity,
    LocalVillaDirectory, MediaStore, VillaLookup,
};
use crate::config::{IdentityConfig, ServerConfig};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: villa_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Bearer token validation.
    pub identity: Arc<dyn IdentityProvider>,
    /// Villa lookups used by the booking workflow.
    pub villas: Arc<dyn VillaLookup>,
    /// Image uploads for villa create/update.
    pub media: Arc<dyn MediaStore>,
}

impl AppState {
    /// Wire the collaborator clients described by `config`.
    ///
    /// All HTTP collaborators share one [`reqwest::Client`] (and its
    /// connection pool) with the configured per-call timeout.
    pub fn from_config(
        pool: villa_db::DbPool,
        config: ServerConfig,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()?;

        let identity: Arc<dyn IdentityProvider> = match &config.identity {
            IdentityConfig::Remote { base_url } => {
                Arc::new(HttpIdentityClient::new(http.clone(), base_url.clone()))
            }
            IdentityConfig::Local(jwt) => Arc::new(LocalJwtIdentity::new(jwt.clone())),
        };

        let villas: Arc<dyn VillaLookup> = match &config.villa_service_url {
            Some(base_url) => Arc::new(HttpVillaDirectory::new(http.clone(), base_url.clone())),
            None => Arc::new(LocalVillaDirectory::new(pool.clone())),
        };

        let media: Arc<dyn MediaStore> = Arc::new(HttpMediaStore::new(
            http,
            config.media_service_url.clone(),
        ));

        Ok(Self {
            pool,
            config: Arc::new(config),
            identity,
            villas,
            media,
        })
    }
}
