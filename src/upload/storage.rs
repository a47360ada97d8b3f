//! Direct PUT to object storage through a presigned URL

use super::presign::build_http_client;
use super::{StorageService, UploadError};
use crate::metrics;
use crate::selector::SelectedFile;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Instant;

/// Public location of an object uploaded through `presigned_url`: everything
/// before the first `?`.
///
/// ```
/// use presign_uploadr::upload::public_url;
///
/// assert_eq!(public_url("https://bucket.example/key?sig=abc"), "https://bucket.example/key");
/// assert_eq!(public_url("https://bucket.example/key"), "https://bucket.example/key");
/// ```
pub fn public_url(presigned_url: &str) -> &str {
    presigned_url
        .split_once('?')
        .map_or(presigned_url, |(base, _)| base)
}

/// HTTP client for presigned storage PUTs
pub struct StorageClient {
    http_client: reqwest::Client,
}

impl StorageClient {
    /// Create a new storage client with an optional request timeout
    pub fn new(timeout_seconds: Option<u64>) -> Result<Self, UploadError> {
        Ok(Self::with_http_client(build_http_client(timeout_seconds)?))
    }

    /// Create a storage client sharing an existing HTTP client
    pub fn with_http_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl StorageService for StorageClient {
    #[tracing::instrument(
        name = "storage.put_object",
        skip(self, file, presigned_url),
        fields(
            file.name = %file.name(),
            http.method = "PUT",
            http.content_type = %file.mime_type(),
            upload.bytes = file.len(),
            http.status_code = tracing::field::Empty
        ),
        err
    )]
    async fn upload_to_storage(
        &self,
        file: &SelectedFile,
        presigned_url: &str,
    ) -> Result<String, UploadError> {
        let start_time = Instant::now();

        let response = self
            .http_client
            .put(presigned_url)
            .header(CONTENT_TYPE, file.mime_type())
            .body(file.bytes().clone())
            .send()
            .await
            .map_err(|e| {
                metrics::record_error("storage_request");
                UploadError::StorageUploadFailed(e.to_string())
            })?;

        let status = response.status();
        tracing::Span::current().record("http.status_code", status.as_u16());

        if !status.is_success() {
            metrics::record_error("storage_status");
            return Err(UploadError::StorageUploadFailed(format!(
                "storage endpoint returned {}",
                status
            )));
        }

        let duration = start_time.elapsed();
        metrics::record_stage_duration("storage", duration.as_secs_f64());

        let url = public_url(presigned_url).to_string();
        tracing::info!(
            public_url = %url,
            duration_ms = duration.as_millis(),
            "Object stored"
        );

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use crate::selector::{FileSelector, RawFile};
    use std::sync::Arc;

    #[test]
    fn test_public_url_strips_query() {
        assert_eq!(
            public_url("https://bucket.example/key?sig=abc&X-Amz-Expires=300"),
            "https://bucket.example/key"
        );
    }

    #[test]
    fn test_public_url_splits_on_first_question_mark() {
        assert_eq!(public_url("https://b.example/k?a=1?b=2"), "https://b.example/k");
    }

    #[test]
    fn test_public_url_without_query() {
        assert_eq!(public_url("https://b.example/k"), "https://b.example/k");
        assert_eq!(public_url(""), "");
    }

    #[tokio::test]
    async fn test_malformed_url_is_storage_failure() {
        let client = StorageClient::new(None).unwrap();
        let mut selector = FileSelector::new(Arc::new(RecordingNotifier::default()));
        selector
            .select_file(Some(RawFile::new("cv.pdf", "application/pdf", "%PDF")))
            .unwrap();
        let file = selector.current().unwrap();

        let result = client.upload_to_storage(file, "not a url").await;

        assert!(matches!(result, Err(UploadError::StorageUploadFailed(_))));
    }
}
