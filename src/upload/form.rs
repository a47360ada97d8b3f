//! Upload form state
//!
//! [`UploadForm`] is the UI-state container behind the drop target and the
//! upload button. It owns the selector, the `Idle`/`Uploading` flag and the
//! two remote services, and it runs the presign-then-PUT sequence.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use presign_uploadr::config::PresignConfig;
//! use presign_uploadr::notify::ConsoleNotifier;
//! use presign_uploadr::selector::RawFile;
//! use presign_uploadr::upload::UploadForm;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PresignConfig {
//!     endpoint: "https://api.example.com/prod/get-presigned-url".to_string(),
//!     timeout_seconds: None,
//! };
//! let mut form = UploadForm::from_config(&config, Arc::new(ConsoleNotifier))?;
//!
//! let raw = RawFile::from_path("resume.pdf", None).await?;
//! form.select_file(Some(raw))?;
//!
//! let public_url = form.handle_upload().await?;
//! println!("{}", public_url);
//! # Ok(())
//! # }
//! ```

use super::presign::build_http_client;
use super::{
    PresignClient, PresignService, StorageClient, StorageService, UploadError, UploadState,
};
use crate::config::PresignConfig;
use crate::metrics;
use crate::notify::Notifier;
use crate::selector::{FileSelector, RawFile, SelectError, SelectedFile};
use std::sync::Arc;

/// Alert shown when the upload button is triggered with nothing selected.
pub const NO_FILE_MESSAGE: &str = "Please select a file first.";

/// Alert shown when either upload step fails.
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed.";

/// Keeps the form in `Uploading` for as long as it lives.
///
/// Dropping it restores `Idle`, whether the upload finished, failed, or the
/// future was dropped.
struct UploadingGuard<'a>(&'a mut UploadState);

impl<'a> UploadingGuard<'a> {
    fn enter(state: &'a mut UploadState) -> Self {
        *state = UploadState::Uploading;
        Self(state)
    }
}

impl Drop for UploadingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = UploadState::Idle;
    }
}

/// Single-document upload form
pub struct UploadForm<P = PresignClient, S = StorageClient> {
    selector: FileSelector,
    state: UploadState,
    presign: P,
    storage: S,
    notifier: Arc<dyn Notifier>,
}

impl UploadForm<PresignClient, StorageClient> {
    /// Create a form talking HTTP to the configured presign endpoint.
    ///
    /// Both requests share one connection pool and the configured timeout.
    pub fn from_config(
        config: &PresignConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, UploadError> {
        let http_client = build_http_client(config.timeout_seconds)?;

        Ok(Self::new(
            PresignClient::with_http_client(&config.endpoint, http_client.clone()),
            StorageClient::with_http_client(http_client),
            notifier,
        ))
    }
}

impl<P, S> UploadForm<P, S>
where
    P: PresignService,
    S: StorageService,
{
    /// Create an idle form with nothing selected
    pub fn new(presign: P, storage: S, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            selector: FileSelector::new(notifier.clone()),
            state: UploadState::Idle,
            presign,
            storage,
            notifier,
        }
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selector.current()
    }

    /// Name shown in the selected-file readout
    pub fn selected_file_name(&self) -> Option<&str> {
        self.selector.current().map(SelectedFile::name)
    }

    pub fn is_dragging(&self) -> bool {
        self.selector.is_dragging()
    }

    /// Upload button label
    pub fn button_label(&self) -> &'static str {
        match self.state {
            UploadState::Idle => "Upload",
            UploadState::Uploading => "Uploading...",
        }
    }

    /// The upload button is disabled without a file or while uploading
    pub fn upload_enabled(&self) -> bool {
        self.selector.current().is_some() && self.state == UploadState::Idle
    }

    /// Browse control picked a file (or was cancelled, with `None`)
    pub fn select_file(
        &mut self,
        candidate: Option<RawFile>,
    ) -> Result<Option<&SelectedFile>, SelectError> {
        self.selector.select_file(candidate)
    }

    pub fn drag_over(&mut self) {
        self.selector.drag_over();
    }

    pub fn drag_leave(&mut self) {
        self.selector.drag_leave();
    }

    /// Files dropped on the target; only the first is attached
    pub fn drop_files(
        &mut self,
        files: Vec<RawFile>,
    ) -> Result<Option<&SelectedFile>, SelectError> {
        self.selector.drop_files(files)
    }

    /// Upload the selected file.
    ///
    /// Requests a presigned URL, then PUTs the file to it. The outcome is
    /// always surfaced through the notifier: the public URL on success, a
    /// generic failure message otherwise. The form is back to `Idle` when
    /// this returns.
    #[tracing::instrument(
        name = "upload.handle",
        skip(self),
        fields(
            file.name = tracing::field::Empty,
            upload.bytes = tracing::field::Empty
        )
    )]
    pub async fn handle_upload(&mut self) -> Result<String, UploadError> {
        let Some(file) = self.selector.current().cloned() else {
            tracing::warn!("Upload requested without a selected file");
            self.notifier.alert(NO_FILE_MESSAGE);
            return Err(UploadError::NoFileSelected);
        };

        let span = tracing::Span::current();
        span.record("file.name", file.name());
        span.record("upload.bytes", file.len());

        let presign = &self.presign;
        let storage = &self.storage;
        let uploading = UploadingGuard::enter(&mut self.state);

        let result = async {
            let presigned_url = presign.request_upload_url(file.name()).await?;
            storage.upload_to_storage(&file, &presigned_url).await
        }
        .await;

        drop(uploading);

        match result {
            Ok(url) => {
                metrics::record_upload_success(file.len() as u64);
                tracing::info!(public_url = %url, "File uploaded successfully");
                self.notifier.alert(&format!("File uploaded! URL: {}", url));
                Ok(url)
            }
            Err(e) => {
                metrics::record_upload_failure();
                tracing::error!(error = %e, "Upload failed");
                self.notifier.alert(UPLOAD_FAILED_MESSAGE);
                Err(e)
            }
        }
    }
}
