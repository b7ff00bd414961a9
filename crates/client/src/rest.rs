use std::sync::Arc;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use jobdeck_core::types::{JobDraft, JobPatch, JobRecord};

/// Source of the base URL for the remote job collection.
///
/// Consulted on every call, so a runtime override takes effect on the
/// next request without rebuilding the client.
pub trait EndpointSource: Send + Sync {
    fn api_url(&self) -> Url;
}

/// Endpoint fixed at construction time.
#[derive(Debug, Clone)]
pub struct FixedEndpoint(pub Url);

impl EndpointSource for FixedEndpoint {
    fn api_url(&self) -> Url {
        self.0.clone()
    }
}

/// Client for the remote job collection.
///
/// One network call per operation, no retries, no timeouts; recovery is
/// the caller's responsibility.
#[derive(Clone)]
pub struct JobStoreClient {
    http: Client,
    endpoint: Arc<dyn EndpointSource>,
}

impl JobStoreClient {
    /// Creates a new client over the provided endpoint source.
    pub fn new(endpoint: Arc<dyn EndpointSource>, http: Client) -> Self {
        Self { http, endpoint }
    }

    /// Fetches the full collection of job records.
    pub async fn list_jobs(&self) -> Result<Vec<JobRecord>, JobStoreError> {
        let response = self.http.get(self.endpoint.api_url()).send().await?;
        parse_json(response).await
    }

    /// Creates a new record and returns the canonical one, including the
    /// identifier assigned by the service.
    pub async fn create_job(&self, draft: &JobDraft) -> Result<JobRecord, JobStoreError> {
        let response = self
            .http
            .post(self.endpoint.api_url())
            .json(draft)
            .send()
            .await?;
        parse_json(response).await
    }

    /// Applies a partial or full update and returns the canonical
    /// updated record.
    pub async fn update_job(&self, id: &str, patch: &JobPatch) -> Result<JobRecord, JobStoreError> {
        let url = self.item_url(id)?;
        let response = self.http.put(url).json(patch).send().await?;
        parse_json(response).await
    }

    /// Deletes the record with the given id. Any response body is
    /// ignored.
    pub async fn delete_job(&self, id: &str) -> Result<(), JobStoreError> {
        let url = self.item_url(id)?;
        let response = self.http.delete(url).send().await?;
        ensure_success(response).await
    }

    fn item_url(&self, id: &str) -> Result<Url, JobStoreError> {
        let base = self.endpoint.api_url();
        let joined = format!("{}/{}", base.as_str().trim_end_matches('/'), id);
        Ok(Url::parse(&joined)?)
    }
}

/// Errors produced by the job store client.
#[derive(Debug, Error)]
pub enum JobStoreError {
    #[error("failed to build url: {0}")]
    Url(#[from] url::ParseError),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

async fn ensure_success(response: Response) -> Result<(), JobStoreError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<unavailable>"));
        return Err(JobStoreError::Status { status, body });
    }
    Ok(())
}

async fn parse_json<T>(response: Response) -> Result<T, JobStoreError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<unavailable>"));
        return Err(JobStoreError::Status { status, body });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
