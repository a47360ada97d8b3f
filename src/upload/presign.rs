//! Presign endpoint client
//!
//! Sends `POST {"fileName": "<name>"}` to the configured endpoint and reads
//! the `url` field of the JSON reply.
//!
//! # Example
//!
//! ```no_run
//! use presign_uploadr::config::PresignConfig;
//! use presign_uploadr::upload::{PresignClient, PresignService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PresignConfig {
//!     endpoint: "https://api.example.com/prod/get-presigned-url".to_string(),
//!     timeout_seconds: None,
//! };
//! let client = PresignClient::new(&config)?;
//!
//! let url = client.request_upload_url("cv.pdf").await?;
//! println!("PUT to {}", url);
//! # Ok(())
//! # }
//! ```

use super::{PresignService, UploadError};
use crate::config::PresignConfig;
use crate::metrics;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PresignRequest<'a> {
    file_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct PresignResponse {
    url: String,
}

/// Build the shared HTTP client, honouring an optional timeout
pub(crate) fn build_http_client(
    timeout_seconds: Option<u64>,
) -> Result<reqwest::Client, UploadError> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = timeout_seconds {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder
        .build()
        .map_err(|e| UploadError::ClientConfigError(e.to_string()))
}

/// HTTP client for the presign endpoint
pub struct PresignClient {
    endpoint: String,
    http_client: reqwest::Client,
}

impl PresignClient {
    /// Create a new presign client
    pub fn new(config: &PresignConfig) -> Result<Self, UploadError> {
        Ok(Self::with_http_client(
            &config.endpoint,
            build_http_client(config.timeout_seconds)?,
        ))
    }

    /// Create a presign client sharing an existing HTTP client
    pub fn with_http_client(endpoint: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http_client,
        }
    }

    /// Get the endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PresignService for PresignClient {
    #[tracing::instrument(
        name = "presign.request_url",
        skip(self),
        fields(
            presign.endpoint = %self.endpoint,
            http.method = "POST",
            http.status_code = tracing::field::Empty
        ),
        err
    )]
    async fn request_upload_url(&self, file_name: &str) -> Result<String, UploadError> {
        let start_time = Instant::now();

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&PresignRequest { file_name })
            .send()
            .await
            .map_err(|e| {
                metrics::record_error("presign_request");
                UploadError::PresignRequestFailed(e.to_string())
            })?;

        let status = response.status();
        tracing::Span::current().record("http.status_code", status.as_u16());

        if !status.is_success() {
            metrics::record_error("presign_status");
            return Err(UploadError::PresignRequestFailed(format!(
                "presign endpoint returned {}",
                status
            )));
        }

        let body: PresignResponse = response.json().await.map_err(|e| {
            metrics::record_error("presign_response");
            UploadError::PresignRequestFailed(format!("invalid presign response: {}", e))
        })?;

        metrics::record_stage_duration("presign", start_time.elapsed().as_secs_f64());
        tracing::debug!(url = %body.url, "Presigned URL response");

        Ok(body.url)
    }
}
