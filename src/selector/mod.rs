//! File selector module
//!
//! Accepts a document through click-to-browse or drag-and-drop, normalizes its
//! name and keeps it as the current upload candidate when its MIME type is one
//! of the accepted document types.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use presign_uploadr::notify::RecordingNotifier;
//! use presign_uploadr::selector::{FileSelector, RawFile};
//!
//! let notifier = Arc::new(RecordingNotifier::default());
//! let mut selector = FileSelector::new(notifier.clone());
//!
//! let raw = RawFile::new("Quarterly Report.PDF", "application/pdf", "%PDF-1.7");
//! let selected = selector.select_file(Some(raw)).unwrap().unwrap();
//! assert_eq!(selected.name(), "quarterly_report.pdf");
//! assert!(notifier.messages().is_empty());
//! ```

mod raw_file;
mod sanitize;

pub use raw_file::RawFile;
pub use sanitize::sanitize_file_name;

use crate::metrics;
use crate::notify::Notifier;
use bytes::Bytes;
use std::sync::Arc;
use thiserror::Error;

/// MIME types a document must carry to be accepted: PDF, DOCX and legacy DOC.
pub const ALLOWED_TYPES: [&str; 3] = [
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/msword",
];

/// Alert shown when a file with a disallowed MIME type is offered.
pub const INVALID_TYPE_MESSAGE: &str = "Please select a valid PDF.";

/// Check whether a MIME type is accepted for upload
pub fn is_allowed_type(mime_type: &str) -> bool {
    ALLOWED_TYPES.contains(&mime_type)
}

/// Selection errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    #[error("Invalid file type: {mime_type:?}")]
    InvalidFileType { mime_type: String },
}

/// The current upload candidate.
///
/// Only ever constructed by [`FileSelector`], so the name is always sanitized
/// and the MIME type is always one of [`ALLOWED_TYPES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    mime_type: String,
    bytes: Bytes,
}

impl SelectedFile {
    /// Sanitized file name, used as the storage key
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Drop target and browse control state.
///
/// Holds the single `SelectedFile` slot and the `dragging` visual flag.
pub struct FileSelector {
    current: Option<SelectedFile>,
    dragging: bool,
    notifier: Arc<dyn Notifier>,
}

impl FileSelector {
    /// Create an empty selector that reports rejections through `notifier`
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            current: None,
            dragging: false,
            notifier,
        }
    }

    /// Currently selected file, if any
    pub fn current(&self) -> Option<&SelectedFile> {
        self.current.as_ref()
    }

    /// Whether a drag is hovering over the drop target
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Offer a candidate file.
    ///
    /// An absent candidate is a no-op and yields `Ok(None)`. A candidate whose
    /// MIME type is not allowed raises the invalid-type alert and leaves the
    /// current selection untouched. Otherwise the candidate replaces the
    /// current selection under its sanitized name.
    pub fn select_file(
        &mut self,
        candidate: Option<RawFile>,
    ) -> Result<Option<&SelectedFile>, SelectError> {
        let Some(raw) = candidate else {
            return Ok(None);
        };

        let (original_name, mime_type, bytes) = raw.into_parts();
        let sanitized = SelectedFile {
            name: sanitize_file_name(&original_name),
            mime_type,
            bytes,
        };

        if !is_allowed_type(&sanitized.mime_type) {
            tracing::warn!(
                file.name = %sanitized.name,
                file.mime_type = %sanitized.mime_type,
                "Rejected file with disallowed type"
            );
            metrics::record_selection("rejected");
            self.notifier.alert(INVALID_TYPE_MESSAGE);
            return Err(SelectError::InvalidFileType {
                mime_type: sanitized.mime_type,
            });
        }

        tracing::debug!(
            file.original_name = %original_name,
            file.name = %sanitized.name,
            file.mime_type = %sanitized.mime_type,
            file.bytes = sanitized.len(),
            "File selected"
        );
        metrics::record_selection("accepted");

        let selected: &SelectedFile = self.current.insert(sanitized);
        Ok(Some(selected))
    }

    /// A drag entered or moved over the drop target
    pub fn drag_over(&mut self) {
        self.dragging = true;
    }

    /// The drag left the drop target without dropping
    pub fn drag_leave(&mut self) {
        self.dragging = false;
    }

    /// Files were dropped on the target. Only the first one is considered.
    pub fn drop_files(
        &mut self,
        files: Vec<RawFile>,
    ) -> Result<Option<&SelectedFile>, SelectError> {
        self.dragging = false;

        if files.len() > 1 {
            tracing::debug!(ignored = files.len() - 1, "Ignoring extra dropped files");
        }

        self.select_file(files.into_iter().next())
    }
}
