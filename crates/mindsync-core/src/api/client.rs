//! HTTP client for the MindSync backend.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::types::{MoodRequest, MoodResult, ScheduleRequest, ScheduleResponse};
use super::PlannerBackend;
use crate::error::{ConfigError, RequestError};

/// Backend address used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// JSON client for `detect_mood`, `generate_schedule` and `health`.
///
/// One best-effort call per operation: no retries, no timeout, no caching.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: String,
}

#[derive(Deserialize)]
struct Health {
    #[serde(default)]
    ok: bool,
}

impl ApiClient {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base_url).map_err(|e| ConfigError::InvalidValue {
            key: "api.base_url".to_string(),
            message: format!("'{base_url}' is not a valid URL: {e}"),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                key: "api.base_url".to_string(),
                message: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        Ok(Self {
            http: Client::new(),
            base: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base, endpoint)
    }

    /// `POST {base}/detect_mood`
    pub async fn detect_mood(&self, text: &str) -> Result<MoodResult, RequestError> {
        self.post_json("detect_mood", &MoodRequest { text }).await
    }

    /// `POST {base}/generate_schedule`
    pub async fn generate_schedule(
        &self,
        request: &ScheduleRequest,
    ) -> Result<ScheduleResponse, RequestError> {
        self.post_json("generate_schedule", request).await
    }

    /// `GET {base}/health`; true when the backend reports `{"ok": true}`.
    pub async fn health(&self) -> Result<bool, RequestError> {
        const ENDPOINT: &str = "health";
        let resp = self
            .http
            .get(self.url(ENDPOINT))
            .send()
            .await
            .map_err(|e| RequestError::transport(ENDPOINT, e))?;
        if !resp.status().is_success() {
            return Err(RequestError::status(ENDPOINT, resp.status()));
        }
        let health: Health = resp
            .json()
            .await
            .map_err(|e| RequestError::transport(ENDPOINT, e))?;
        Ok(health.ok)
    }

    async fn post_json<B, T>(&self, endpoint: &'static str, body: &B) -> Result<T, RequestError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(endpoint);
        debug!(%url, "POST");
        let resp = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| RequestError::transport(endpoint, e))?;

        let status = resp.status();
        debug!(%url, %status, "response");
        if !status.is_success() {
            return Err(RequestError::status(endpoint, status));
        }
        resp.json()
            .await
            .map_err(|e| RequestError::transport(endpoint, e))
    }
}

impl PlannerBackend for ApiClient {
    async fn detect_mood(&self, text: &str) -> Result<MoodResult, RequestError> {
        ApiClient::detect_mood(self, text).await
    }

    async fn generate_schedule(
        &self,
        request: &ScheduleRequest,
    ) -> Result<ScheduleResponse, RequestError> {
        ApiClient::generate_schedule(self, request).await
    }
}
