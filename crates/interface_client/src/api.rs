//! Claims API calls

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use domain_claims::{Claim, ClaimDetail, ClaimPage, ClaimSubmission};

use crate::error::ClientError;

/// Where the service listens in local development
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// The calls a front-end makes against the claims service
#[async_trait]
pub trait ClaimsApi: Send + Sync {
    /// Fetches the first page of claims, newest first
    async fn fetch_claims(&self) -> Result<Vec<Claim>, ClientError>;

    /// Submits a claim and returns it as stored, events included
    async fn create_claim(&self, submission: &ClaimSubmission) -> Result<ClaimDetail, ClientError>;
}

/// [`ClaimsApi`] over HTTP
#[derive(Debug, Clone)]
pub struct HttpClaimsApi {
    client: reqwest::Client,
    base_url: String,
}

impl Default for HttpClaimsApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl HttpClaimsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Uses a preconfigured client, e.g. one with timeouts
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ClaimsApi for HttpClaimsApi {
    #[instrument(skip(self))]
    async fn fetch_claims(&self) -> Result<Vec<Claim>, ClientError> {
        let response = self.client.get(self.url("/claims")).send().await?;
        let page: ClaimPage = read(response).await?;
        debug!(total = page.total, returned = page.items.len(), "Fetched claims");
        Ok(page.items)
    }

    #[instrument(skip(self, submission))]
    async fn create_claim(&self, submission: &ClaimSubmission) -> Result<ClaimDetail, ClientError> {
        let response = self
            .client
            .post(self.url("/claims"))
            .json(submission)
            .send()
            .await?;
        let detail: ClaimDetail = read(response).await?;
        debug!(claim_number = %detail.claim.claim_number, "Created claim");
        Ok(detail)
    }
}

/// Decodes a success body, or captures the error body with its status
async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()));
    }

    let body = response.json::<Value>().await.ok();
    Err(ClientError::Api {
        status: status.as_u16(),
        body,
    })
}
