//! Main clean room REST API client.

use std::time::Duration;

use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::models::{
    CreateProjectParams, ExploreMetric, ExploreRequest, FederationConfig, JoinRequest, SyncStat,
};

/// Builder for creating a new [`CleanRoomClient`].
pub struct CleanRoomClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
    max_retries: usize,
}

impl Default for CleanRoomClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            max_retries: 3,
        }
    }
}

impl CleanRoomClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the clean room API (including the `/api` prefix).
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retries for rate-limited requests.
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    ///
    /// Prevents double slashes when concatenating with endpoint paths.
    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the client.
    pub fn build(self) -> Result<CleanRoomClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(format!(
                "base_url must start with http:// or https://: {base_url}"
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(CleanRoomClient {
            http,
            base_url,
            max_retries: self.max_retries,
        })
    }
}

/// Clean room REST API client.
///
/// All methods take `&self`; the backend is unauthenticated from the
/// client's point of view, so the client is freely shareable behind an
/// `Arc` without interior locking.
#[derive(Debug)]
pub struct CleanRoomClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: usize,
}

impl CleanRoomClient {
    /// Create a new client builder.
    pub fn builder() -> CleanRoomClientBuilder {
        CleanRoomClientBuilder::new()
    }

    /// Create a federation.
    pub async fn create_federation(&self, config: &FederationConfig) -> Result<serde_json::Value> {
        endpoints::create_federation(&self.http, &self.base_url, config, self.max_retries).await
    }

    /// Generate an invite payload for a federation.
    pub async fn generate_invite(&self, pid: &str, password: &str) -> Result<serde_json::Value> {
        endpoints::generate_invite(&self.http, &self.base_url, pid, password, self.max_retries)
            .await
    }

    /// Join an existing federation.
    pub async fn join_federation(&self, request: &JoinRequest) -> Result<serde_json::Value> {
        endpoints::join_federation(&self.http, &self.base_url, request, self.max_retries).await
    }

    /// Enable periodic synchronization for a federation.
    pub async fn start_pulsing(&self, pid: &str) -> Result<()> {
        endpoints::start_pulsing(&self.http, &self.base_url, pid, self.max_retries).await
    }

    /// Disable periodic synchronization for a federation.
    pub async fn stop_pulsing(&self, pid: &str) -> Result<()> {
        endpoints::stop_pulsing(&self.http, &self.base_url, pid, self.max_retries).await
    }

    /// Fetch sync statistics for a federation.
    pub async fn get_sync_stats(&self, pid: &str) -> Result<Vec<SyncStat>> {
        endpoints::get_sync_stats(&self.http, &self.base_url, pid, self.max_retries).await
    }

    /// Create an analysis project.
    pub async fn create_project(&self, params: &CreateProjectParams) -> Result<serde_json::Value> {
        endpoints::create_project(&self.http, &self.base_url, params, self.max_retries).await
    }

    /// Push raw CSV data into a project.
    pub async fn push_data(&self, pid: &str, csv_text: String) -> Result<serde_json::Value> {
        endpoints::push_data(&self.http, &self.base_url, pid, csv_text, self.max_retries).await
    }

    /// Run an exploration query against a project.
    pub async fn explore(
        &self,
        pid: &str,
        metric: ExploreMetric,
        request: &ExploreRequest,
    ) -> Result<serde_json::Value> {
        endpoints::explore(
            &self.http,
            &self.base_url,
            pid,
            metric,
            request,
            self.max_retries,
        )
        .await
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
