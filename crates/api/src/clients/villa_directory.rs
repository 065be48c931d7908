//! Villa lookups for the Reservation Ledger.

use async_trait::async_trait;
use reqwest::StatusCode;
use villa_core::error::CoreError;
use villa_core::pricing::VillaRates;
use villa_core::types::DbId;
use villa_db::repositories::VillaRepo;
use villa_db::DbPool;

use super::{ensure_success, UpstreamError, VillaLookup, VILLA_SERVICE};

/// Fetches villas from a remote Villa Directory via `GET /api/v1/villas/{id}`.
pub struct HttpVillaDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpVillaDirectory {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    async fn get_villa(&self, villa_id: DbId) -> Result<Option<VillaRates>, UpstreamError> {
        let response = self
            .client
            .get(format!("{}/api/v1/villas/{villa_id}", self.base_url))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let rates = ensure_success(response).await?.json::<VillaRates>().await?;
        Ok(Some(rates))
    }
}

#[async_trait]
impl VillaLookup for HttpVillaDirectory {
    async fn fetch_rates(&self, villa_id: DbId) -> Result<Option<VillaRates>, CoreError> {
        self.get_villa(villa_id)
            .await
            .map_err(|e| e.into_core(VILLA_SERVICE))
    }
}

/// Reads the `villas` table directly when both services share a database.
pub struct LocalVillaDirectory {
    pool: DbPool,
}

impl LocalVillaDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VillaLookup for LocalVillaDirectory {
    async fn fetch_rates(&self, villa_id: DbId) -> Result<Option<VillaRates>, CoreError> {
        let villa = VillaRepo::find_by_id(&self.pool, villa_id).await.map_err(|e| {
            tracing::error!(error = %e, villa_id, "Villa lookup query failed");
            CoreError::UpstreamUnavailable {
                service: VILLA_SERVICE,
                reason: e.to_string(),
            }
        })?;
        Ok(villa.map(|v| v.rates()))
    }
}
