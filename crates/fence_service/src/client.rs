use std::env;

use chrono::{DateTime, Utc};
use geofence::fence::Fence;
use geofence::geojson::{self, FeatureCollection, Geometry};
use indexmap::IndexMap;
use reqwest::multipart;
use serde::{Deserialize, Serialize};
use utility::id::Id;

use crate::{ApiError, ApiResult};

pub const FENCE_API_URL: &str = "https://geofencing.api.openmaps.dev/v1";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FenceApiCredentials {
    pub api_key: String,
    pub base_url: Option<String>,
}

impl FenceApiCredentials {
    pub fn env() -> Self {
        let api_key = env::var("FENCE_API_KEY").expect("Expected Fence-API-Key.");

        Self {
            api_key,
            base_url: env::var("FENCE_API_URL").ok(),
        }
    }

    fn api_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(FENCE_API_URL)
    }
}

/// A fence as the service sends and receives it: the geometry travels as
/// GeoJSON, everything else as plain JSON fields.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireFence {
    pub id: Id<Fence>,
    pub geometry: Geometry,
    pub meta: Option<IndexMap<String, String>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl WireFence {
    pub fn into_fence(self) -> ApiResult<Fence> {
        let boundaries = geojson::decode(&self.geometry)?;
        let fence = Fence::new(self.id, boundaries)?
            .with_meta(self.meta.unwrap_or_default())
            .with_timestamps(self.created_at, self.updated_at);
        Ok(fence)
    }
}

pub struct FenceApiClient {
    pub credentials: FenceApiCredentials,
    http: reqwest::Client,
}

impl FenceApiClient {
    pub fn new(credentials: &FenceApiCredentials) -> Self {
        Self {
            credentials: credentials.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// Uploads a fence definition and returns the fence as the service now
    /// knows it, with the authoritative id.
    ///
    /// Validation happens locally before this point: a `Fence` value cannot
    /// hold an empty boundary list or a ring with too few coordinates, so a
    /// malformed definition never reaches the network.
    pub async fn upload(&self, fence: &Fence) -> ApiResult<Fence> {
        let geometry = geojson::encode(fence.boundaries())?;
        let envelope = serde_json::to_string(&FeatureCollection::single(geometry))?;
        let part = multipart::Part::text(envelope)
            .file_name("polygons.geojson")
            .mime_str("application/json")?;
        let form = multipart::Form::new().part("polygons", part);

        let url = format!("{}/geofences", self.credentials.api_url());
        log::debug!("uploading fence to {}", url);
        let response = self
            .http
            .post(&url)
            .header("X-Api-Key", &self.credentials.api_key)
            .multipart(form)
            .send()
            .await?;
        let response = check_status(response).await?;

        let wire: WireFence = response.json().await?;
        let fence = wire.into_fence()?;
        log::info!("uploaded fence, service assigned id {}", fence.id);
        Ok(fence)
    }

    /// Fetches every fence known to the service for these credentials.
    pub async fn list(&self) -> ApiResult<Vec<Fence>> {
        let url = format!("{}/geofences", self.credentials.api_url());
        log::debug!("listing fences from {}", url);
        let response = self
            .http
            .get(&url)
            .header("X-Api-Key", &self.credentials.api_key)
            .send()
            .await?;
        let response = check_status(response).await?;

        let wire: Vec<WireFence> = response.json().await?;
        wire.into_iter().map(WireFence::into_fence).collect()
    }

    pub async fn delete(&self, id: &Id<Fence>) -> ApiResult<()> {
        let url = format!("{}/geofences/{}", self.credentials.api_url(), id);
        log::debug!("deleting fence {}", id);
        let response = self
            .http
            .delete(&url)
            .header("X-Api-Key", &self.credentials.api_key)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: reqwest::Response) -> ApiResult<reqwest::Response> {
    let status_code = response.status();
    if status_code.is_success() {
        return Ok(response);
    }
    let url = response.url().to_string();
    let body = response.text().await.ok();
    Err(ApiError::InvalidResponse {
        status_code,
        url,
        response: body,
    })
}
