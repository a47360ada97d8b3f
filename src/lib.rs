//! Presign Uploadr Library
//!
//! Uploads a single document straight to object storage through a presigned
//! URL issued by a remote endpoint.
//!
//! # Features
//!
//! - **Document Only**: PDF, DOCX and legacy DOC are accepted, nothing else
//! - **Safe Keys**: File names are reduced to `[a-z0-9._-]` before upload
//! - **Direct Upload**: Bytes go to storage without passing through a server
//! - **Drop Semantics**: Browse, drag and drop handlers with the same rules
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use presign_uploadr::{config::Config, notify::ConsoleNotifier, selector::RawFile, UploadForm};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     let mut form = UploadForm::from_config(&config.presign, Arc::new(ConsoleNotifier))?;
//!     form.select_file(Some(RawFile::from_path("cv.pdf", None).await?))?;
//!     form.handle_upload().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod metrics;
pub mod notify;
pub mod selector;
pub mod telemetry;
pub mod upload;

// Re-export commonly used types
pub use config::Config;
pub use upload::UploadForm;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
