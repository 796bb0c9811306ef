//! Client for the VPLEX management REST API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ProbeError;
use crate::types::{
    ClusterSummary, HealthCheckRequest, HealthCheckResponse, MonitorStatistics, ProbeSettings,
    RequestContext, StructuredHealth,
};

/// Authenticated VPLEX API client. Every request carries the `Username`/`Password` headers.
#[derive(Debug, Clone)]
pub struct VplexClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
    retries: u32,
    retry_backoff: Duration,
}

impl VplexClient {
    pub fn builder() -> VplexClientBuilder {
        VplexClientBuilder::default()
    }

    pub fn from_context(ctx: &RequestContext, settings: &ProbeSettings) -> Result<Self, ProbeError> {
        Self::builder()
            .host(&ctx.hostname)
            .credentials(&ctx.username, &ctx.password)
            .timeout(settings.timeout)
            .retries(settings.retries)
            .retry_backoff(settings.retry_backoff)
            .verify_tls(settings.verify_tls)
            .build()
    }

    pub async fn list_clusters(&self) -> Result<Vec<ClusterSummary>, ProbeError> {
        self.get_json("/vplex/v2/clusters").await
    }

    /// Name of the first cluster flagged `is_local`; remote clusters are never queried.
    pub async fn local_cluster_name(&self) -> Result<String, ProbeError> {
        let clusters = self.list_clusters().await?;
        let local = clusters
            .into_iter()
            .find(|c| c.is_local)
            .ok_or_else(|| ProbeError::Parse("no local cluster in cluster list".to_string()))?;
        debug!("local cluster is {}", local.name);
        Ok(local.name)
    }

    /// Resource paths of the cluster's system monitors.
    pub async fn system_monitors(&self, cluster: &str) -> Result<Vec<String>, ProbeError> {
        self.get_json(&format!("/vplex/v2/clusters/{}/system_monitors", cluster)).await
    }

    pub async fn monitor_statistics(&self, resource_path: &str) -> Result<MonitorStatistics, ProbeError> {
        self.get_json(resource_path).await
    }

    pub async fn cluster_health(&self, cluster: &str) -> Result<StructuredHealth, ProbeError> {
        self.get_json(&format!("/vplex/v2/clusters/{}", cluster)).await
    }

    /// Raw text of a health-check run, ANSI sequences still included.
    pub async fn health_check(&self, flag: &str) -> Result<String, ProbeError> {
        let url = self.url("/vplex/health-check");
        let body = HealthCheckRequest { args: flag };
        let response = self
            .send(|| self.authenticated(self.client.post(&url)).json(&body))
            .await?;
        let parsed: HealthCheckResponse = decode(response).await?;
        Ok(parsed.response.custom_data)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ProbeError> {
        let url = self.url(path);
        let response = self.send(|| self.authenticated(self.client.get(&url))).await?;
        decode(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authenticated(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Username", self.username.as_str())
            .header("Password", self.password.as_str())
    }

    /// Send with bounded retry: connect failures, timeouts and 5xx are retried with
    /// exponential backoff, 4xx is returned immediately.
    async fn send<F>(&self, build: F) -> Result<Response, ProbeError>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempt: u32 = 0;
        loop {
            let err = match build().send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }
                    let err = if status == reqwest::StatusCode::UNAUTHORIZED {
                        ProbeError::Transport(format!("authentication rejected ({})", status))
                    } else {
                        ProbeError::Transport(format!("API returned status {}", status))
                    };
                    if !status.is_server_error() {
                        return Err(err);
                    }
                    err
                }
                Err(err) => ProbeError::from(err),
            };

            if attempt >= self.retries || !err.is_retryable() {
                return Err(err);
            }
            let delay = self
                .retry_backoff
                .checked_mul(2u32.saturating_pow(attempt))
                .unwrap_or(self.retry_backoff);
            warn!("request failed ({}), retrying in {:?}", err, delay);
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ProbeError> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Builder for VplexClient.
#[derive(Debug, Default)]
pub struct VplexClientBuilder {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    timeout: Option<Duration>,
    retries: Option<u32>,
    retry_backoff: Option<Duration>,
    verify_tls: bool,
}

impl VplexClientBuilder {
    /// Target management host; requests go to `https://<host>`.
    pub fn host(mut self, host: &str) -> Self {
        self.base_url = Some(format!("https://{}", host));
        self
    }

    /// Full base URL including scheme, e.g. `http://127.0.0.1:8080`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Per-request timeout (default: 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Extra attempts after a transport failure (default: 1).
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Delay before the first retry, doubled for each further one (default: 500ms).
    pub fn retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = Some(backoff);
        self
    }

    /// Certificate validation is off unless enabled here.
    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    pub fn build(self) -> Result<VplexClient, ProbeError> {
        let client = Client::builder()
            .timeout(self.timeout.unwrap_or(Duration::from_secs(30)))
            .danger_accept_invalid_certs(!self.verify_tls)
            .build()
            .map_err(|e| ProbeError::Transport(format!("cannot build HTTP client: {}", e)))?;

        Ok(VplexClient {
            client,
            base_url: self.base_url.unwrap_or_else(|| "https://localhost".to_string()),
            username: self.username.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            retries: self.retries.unwrap_or(1),
            retry_backoff: self.retry_backoff.unwrap_or(Duration::from_millis(500)),
        })
    }
}
