//! # Prosthesis API Client
//!
//! HTTP client for the order store, laboratory registry, and label
//! catalog endpoints. Mutations are retried a bounded number of times
//! with a fixed delay; client errors (4xx) are never retried. Reads are
//! issued once and surface their failure directly.

use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::client::{ClientError, ClientResult};
use crate::config::ProsthesisConfig;
use crate::models::{
    Label, Laboratory, NewLabel, NewLaboratory, NewProsthesisOrder, ProsthesisOrder,
    ProsthesisOrderUpdate,
};
use crate::web::extract::COMPANY_ID_HEADER;

/// Configuration for the prosthesis API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the API (e.g. "http://localhost:8080")
    pub base_url: String,
    /// Tenant id stamped onto every request
    pub company_id: i64,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    /// Maximum number of attempts for a mutation
    pub max_retries: u32,
    /// Fixed delay between retry attempts in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            company_id: 1,
            timeout_ms: 30_000,
            max_retries: 3,
            retry_delay_ms: 1_000,
        }
    }
}

impl ApiClientConfig {
    /// Derive a client configuration from the application configuration
    pub fn from_config(config: &ProsthesisConfig, company_id: i64) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            company_id,
            timeout_ms: config.request_timeout_ms,
            max_retries: config.max_retries,
            retry_delay_ms: config.retry_delay_ms,
        }
    }
}

/// Typed client over the prosthesis HTTP surface
#[derive(Debug, Clone)]
pub struct ProsthesisApiClient {
    client: Client,
    config: ApiClientConfig,
    base_url: Url,
}

impl ProsthesisApiClient {
    pub fn new(config: ApiClientConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Configuration(format!("Invalid base URL: {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ClientError::Configuration(format!("Failed to build client: {e}")))?;

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    fn url(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Configuration(format!("Failed to construct URL: {e}")))
    }

    /// One request, no retry. Used for reads.
    async fn send_once<B: Serialize>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> ClientResult<reqwest::Response> {
        let mut request = self
            .client
            .request(method, url)
            .header(COMPANY_ID_HEADER, self.config.company_id);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Self::check_status(response).await
    }

    /// Bounded retry with a fixed delay. Used for mutations. A 4xx
    /// response or a success ends the loop immediately; network errors
    /// and 5xx responses are retried until attempts run out.
    async fn send_with_retry<B: Serialize>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> ClientResult<reqwest::Response> {
        let mut attempts = 0;
        loop {
            attempts += 1;

            let mut request = self
                .client
                .request(method.clone(), url.clone())
                .header(COMPANY_ID_HEADER, self.config.company_id);
            if let Some(body) = body {
                request = request.json(body);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() || status.is_client_error() {
                        return Self::check_status(response).await;
                    }
                    warn!(
                        status = %status,
                        attempt = attempts,
                        max_retries = self.config.max_retries,
                        url = %url,
                        "Server error on mutation, will retry"
                    );
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        attempt = attempts,
                        max_retries = self.config.max_retries,
                        url = %url,
                        "Network error on mutation, will retry"
                    );
                }
            }

            if attempts >= self.config.max_retries {
                error!(
                    attempts = attempts,
                    url = %url,
                    "Exhausted all retries for mutation"
                );
                return Err(ClientError::RetriesExhausted { attempts });
            }

            tokio::time::sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
        }
    }

    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ClientError::Http {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Fetch the canonical order list: GET /prosthesis
    pub async fn list_orders(&self) -> ClientResult<Vec<ProsthesisOrder>> {
        let url = self.url("/prosthesis")?;
        debug!(url = %url, "Fetching canonical order list");
        let response = self.send_once::<()>(Method::GET, url, None).await?;
        Self::parse(response).await
    }

    /// Create an order: POST /prosthesis
    pub async fn create_order(
        &self,
        new_order: &NewProsthesisOrder,
    ) -> ClientResult<ProsthesisOrder> {
        let url = self.url("/prosthesis")?;
        let response = self
            .send_with_retry(Method::POST, url, Some(new_order))
            .await?;
        Self::parse(response).await
    }

    /// Partially update an order: PATCH /prosthesis/{id}
    pub async fn update_order(
        &self,
        id: i64,
        update: &ProsthesisOrderUpdate,
    ) -> ClientResult<ProsthesisOrder> {
        let url = self.url(&format!("/prosthesis/{id}"))?;
        let response = self
            .send_with_retry(Method::PATCH, url, Some(update))
            .await?;
        Self::parse(response).await
    }

    /// Delete an order: DELETE /prosthesis/{id}
    pub async fn delete_order(&self, id: i64) -> ClientResult<()> {
        let url = self.url(&format!("/prosthesis/{id}"))?;
        self.send_with_retry::<()>(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// List laboratories: GET /laboratories
    pub async fn list_laboratories(&self) -> ClientResult<Vec<Laboratory>> {
        let url = self.url("/laboratories")?;
        let response = self.send_once::<()>(Method::GET, url, None).await?;
        Self::parse(response).await
    }

    /// Register a laboratory: POST /laboratories
    pub async fn create_laboratory(&self, new_lab: &NewLaboratory) -> ClientResult<Laboratory> {
        let url = self.url("/laboratories")?;
        let response = self
            .send_with_retry(Method::POST, url, Some(new_lab))
            .await?;
        Self::parse(response).await
    }

    /// Resolve a laboratory name against the registry, creating the entry
    /// when no case-insensitive match exists. Returns the stored casing.
    pub async fn resolve_laboratory(&self, name: &str) -> ClientResult<Laboratory> {
        let trimmed = name.trim();
        let labs = self.list_laboratories().await?;
        if let Some(existing) = labs
            .into_iter()
            .find(|lab| lab.name.eq_ignore_ascii_case(trimmed))
        {
            return Ok(existing);
        }

        self.create_laboratory(&NewLaboratory {
            name: trimmed.to_string(),
            phone: None,
            email: None,
        })
        .await
    }

    /// List labels: GET /prosthesis/labels
    pub async fn list_labels(&self) -> ClientResult<Vec<Label>> {
        let url = self.url("/prosthesis/labels")?;
        let response = self.send_once::<()>(Method::GET, url, None).await?;
        Self::parse(response).await
    }

    /// Create a label: POST /prosthesis/labels
    pub async fn create_label(&self, new_label: &NewLabel) -> ClientResult<Label> {
        let url = self.url("/prosthesis/labels")?;
        let response = self
            .send_with_retry(Method::POST, url, Some(new_label))
            .await?;
        Self::parse(response).await
    }

    /// Delete a label: DELETE /prosthesis/labels/{id}
    pub async fn delete_label(&self, id: &str) -> ClientResult<()> {
        let url = self.url(&format!("/prosthesis/labels/{id}"))?;
        self.send_with_retry::<()>(Method::DELETE, url, None).await?;
        Ok(())
    }

    /// Restore the default labels: POST /prosthesis/labels/restore-defaults
    pub async fn restore_default_labels(&self) -> ClientResult<Vec<Label>> {
        let url = self.url("/prosthesis/labels/restore-defaults")?;
        let response = self.send_with_retry::<()>(Method::POST, url, None).await?;
        Self::parse(response).await
    }
}
