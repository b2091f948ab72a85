//! Typed HTTP client for the receipts API
//!
//! A thin wrapper over reqwest issuing the seven operations the views need:
//! list, get-one, upload, update, delete, analytics, and export. There is no
//! retry, caching, or auth layer, and no request cancellation; the server is
//! trusted for matching, ordering, and export content. The client is a plain
//! value passed into each view so tests can point it at a mock server.

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::export::ExportFormat;
use crate::filter::FilterState;
use crate::models::{AnalyticsSnapshot, ExtractionResult, ListPayload, Receipt, ReceiptUpdate};

/// Structured error body the server sends on validation failures
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
}

#[derive(Debug, Clone)]
pub struct ReceiptClient {
    http_client: Client,
    base_url: String,
}

impl ReceiptClient {
    /// Create a client against the given API base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create from resolved configuration (env var, config file, or default)
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List receipts matching the filter state
    ///
    /// The response order is taken as-is; no client-side re-sorting.
    pub async fn list_receipts(&self, filters: &FilterState) -> Result<Vec<Receipt>> {
        let response = self
            .http_client
            .get(format!("{}/receipts/", self.base_url))
            .query(&filters.to_query())
            .send()
            .await?;

        let response = Self::check(response).await?;
        let payload: ListPayload = response.json().await?;
        let receipts = payload.into_receipts();
        debug!("Listed {} receipts", receipts.len());
        Ok(receipts)
    }

    /// Fetch a single receipt by id
    pub async fn get_receipt(&self, id: i64) -> Result<Receipt> {
        let response = self
            .http_client
            .get(format!("{}/receipts/{}/", self.base_url, id))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(format!("Receipt #{}", id)));
        }
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// Submit a file to the extraction endpoint as a single multipart
    /// field named `file`
    ///
    /// No type or size validation happens here; the server is the authority
    /// on acceptable formats and the 10MB limit.
    pub async fn upload_receipt(&self, filename: &str, data: Vec<u8>) -> Result<ExtractionResult> {
        let part = reqwest::multipart::Part::bytes(data).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http_client
            .post(format!("{}/receipts/upload/", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let response = Self::check(response).await?;
        let result: ExtractionResult = response.json().await?;
        debug!(
            "Extracted receipt: {} - {:.2} ({})",
            result.vendor, result.amount, result.category
        );
        Ok(result)
    }

    /// Apply a partial update to a receipt
    pub async fn update_receipt(&self, id: i64, update: &ReceiptUpdate) -> Result<Receipt> {
        let response = self
            .http_client
            .patch(format!("{}/receipts/{}/", self.base_url, id))
            .json(update)
            .send()
            .await?;

        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// Delete a receipt
    pub async fn delete_receipt(&self, id: i64) -> Result<()> {
        let response = self
            .http_client
            .delete(format!("{}/receipts/{}/", self.base_url, id))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// Fetch the precomputed analytics snapshot, optionally constrained
    /// by the same filter parameters as the list
    pub async fn analytics(&self, filters: &FilterState) -> Result<AnalyticsSnapshot> {
        let response = self
            .http_client
            .get(format!("{}/receipts/analytics/", self.base_url))
            .query(&filters.to_query())
            .send()
            .await?;

        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    /// Fetch an export of the filtered receipts in the given format
    ///
    /// Content correctness is entirely the server's responsibility; the
    /// bytes are relayed untouched.
    pub async fn export(&self, format: ExportFormat, filters: &FilterState) -> Result<Vec<u8>> {
        let mut params = vec![("format", format.as_str().to_string())];
        params.extend(filters.to_query());

        let response = self
            .http_client
            .get(format!("{}/receipts/export/", self.base_url))
            .query(&params)
            .send()
            .await?;

        let response = Self::check(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Map error responses to the structured server message when present,
    /// else a generic fallback carrying the status code
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(parsed) => parsed.error,
            Err(_) => format!("Request failed with status {}", status),
        };
        debug!("API error ({}): {}", status, message);
        Err(Error::Api(message))
    }
}
