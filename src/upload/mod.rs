//! Upload module
//!
//! Two-step direct upload: ask the presign endpoint for a signed URL, then PUT
//! the file bytes to that URL.
//!
//! The two HTTP collaborators sit behind [`PresignService`] and
//! [`StorageService`] so the orchestration in [`form::UploadForm`] can be
//! driven against any implementation.

use crate::selector::SelectedFile;
use async_trait::async_trait;
use thiserror::Error;

pub mod form;
pub mod presign;
pub mod storage;

pub use form::UploadForm;
pub use presign::PresignClient;
pub use storage::{public_url, StorageClient};

/// Upload errors
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("No file selected")]
    NoFileSelected,

    #[error("Failed to get presigned URL: {0}")]
    PresignRequestFailed(String),

    #[error("Storage upload failed: {0}")]
    StorageUploadFailed(String),

    #[error("HTTP client configuration error: {0}")]
    ClientConfigError(String),
}

/// Upload button state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    Uploading,
}

/// Issues presigned upload URLs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresignService: Send + Sync {
    /// Request a URL authorizing a PUT of `file_name`.
    ///
    /// The returned value is not checked for being a well-formed URL.
    async fn request_upload_url(&self, file_name: &str) -> Result<String, UploadError>;
}

/// Receives file bytes at a presigned URL
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageService: Send + Sync {
    /// PUT the file to `presigned_url` and return the public object URL
    async fn upload_to_storage(
        &self,
        file: &SelectedFile,
        presigned_url: &str,
    ) -> Result<String, UploadError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_idle() {
        assert_eq!(UploadState::default(), UploadState::Idle);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(UploadError::NoFileSelected.to_string(), "No file selected");
        assert_eq!(
            UploadError::PresignRequestFailed("status 500".into()).to_string(),
            "Failed to get presigned URL: status 500"
        );
    }
}
