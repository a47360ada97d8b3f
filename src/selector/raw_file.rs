//! Unvalidated file candidates

use bytes::Bytes;
use std::path::Path;

/// A file as handed over by the user agent, before any validation.
///
/// The MIME type is whatever the agent reported; an unknown type is the empty
/// string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    name: String,
    mime_type: String,
    bytes: Bytes,
}

impl RawFile {
    /// Create a candidate from in-memory parts
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a candidate from disk.
    ///
    /// The name is the final path component. Unless `mime_type` is given, the
    /// type is derived from the file extension.
    pub async fn from_path(path: impl AsRef<Path>, mime_type: Option<&str>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mime_type = match mime_type {
            Some(explicit) => explicit.to_string(),
            None => mime_guess::from_path(path)
                .first_raw()
                .unwrap_or_default()
                .to_string(),
        };

        tracing::debug!(
            path = %path.display(),
            file.mime_type = %mime_type,
            file.bytes = bytes.len(),
            "Read candidate file"
        );

        Ok(Self::new(name, mime_type, bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub(crate) fn into_parts(self) -> (String, String, Bytes) {
        (self.name, self.mime_type, self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_from_path_guesses_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Cover Letter.pdf");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"%PDF-1.4")
            .unwrap();

        let raw = RawFile::from_path(&path, None).await.unwrap();

        assert_eq!(raw.name(), "Cover Letter.pdf");
        assert_eq!(raw.mime_type(), "application/pdf");
        assert_eq!(raw.bytes().as_ref(), b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_from_path_guesses_word_documents() {
        let dir = tempfile::tempdir().unwrap();
        let docx = dir.path().join("cv.docx");
        let doc = dir.path().join("cv.doc");
        std::fs::write(&docx, b"PK").unwrap();
        std::fs::write(&doc, b"\xd0\xcf").unwrap();

        let docx = RawFile::from_path(&docx, None).await.unwrap();
        let doc = RawFile::from_path(&doc, None).await.unwrap();

        assert_eq!(
            docx.mime_type(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(doc.mime_type(), "application/msword");
    }

    #[tokio::test]
    async fn test_from_path_explicit_type_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan");
        std::fs::write(&path, b"%PDF").unwrap();

        let raw = RawFile::from_path(&path, Some("application/pdf")).await.unwrap();

        assert_eq!(raw.mime_type(), "application/pdf");
    }

    #[tokio::test]
    async fn test_from_path_unknown_extension_has_empty_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.zzzunknown");
        std::fs::write(&path, b"x").unwrap();

        let raw = RawFile::from_path(&path, None).await.unwrap();

        assert_eq!(raw.mime_type(), "");
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let result = RawFile::from_path("/definitely/not/here.pdf", None).await;
        assert!(result.is_err());
    }
}
