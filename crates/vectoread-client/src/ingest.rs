//! Document ingestion.
//!
//! Uploads a PDF to the ingestion endpoint and yields the session
//! identifier that binds subsequent queries to the document. Validation
//! happens before any network activity; a failed upload leaves the
//! uploader ready for a retry.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::http_client::build_http_client;

/// The only media type the ingestion endpoint accepts.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Opaque token binding queries to a previously ingested document.
///
/// Issued by the service; the client never inspects its shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document selected for upload.
#[derive(Debug, Clone)]
pub struct DocumentPayload {
    pub file_name: String,
    /// Declared media type, checked against [`PDF_MEDIA_TYPE`] before upload.
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentPayload {
    pub fn new(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Read a document from disk, inferring the media type from the file
    /// extension the way a browser file input would.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let media_type = if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        {
            PDF_MEDIA_TYPE
        } else {
            "application/octet-stream"
        };
        Ok(Self::new(file_name, media_type, bytes))
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MEDIA_TYPE
    }
}

/// Successful ingestion response.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestReceipt {
    /// Human-readable confirmation, e.g. `Successfully ingested 'doc.pdf'`.
    #[serde(default)]
    pub message: Option<String>,
    /// Number of items indexed from the document.
    #[serde(default)]
    pub item_count: Option<u64>,
    pub session_id: SessionId,
}

/// Uploads documents to the ingestion endpoint.
pub struct DocumentUploader {
    client: Client,
    config: ServiceConfig,
    processing: Arc<AtomicBool>,
}

impl DocumentUploader {
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_client(build_http_client(), config)
    }

    /// Use an injected HTTP client instead of the default one.
    pub fn with_client(client: Client, config: ServiceConfig) -> Self {
        Self {
            client,
            config,
            processing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether an upload is currently in flight. Callers use this to
    /// disable duplicate submissions; it clears on success and failure.
    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::SeqCst)
    }

    /// Upload a document and return the service's receipt.
    ///
    /// Non-PDF payloads are rejected before any request is made. On a
    /// non-success status the `detail` field of the error body becomes the
    /// failure message, with a generic fallback when the body has none.
    pub async fn upload(&self, payload: DocumentPayload) -> Result<IngestReceipt> {
        if !payload.is_pdf() {
            return Err(Error::InvalidDocument {
                media_type: payload.media_type,
            });
        }

        self.processing.store(true, Ordering::SeqCst);
        let processing = Arc::clone(&self.processing);
        let _clear = scopeguard::guard((), move |_| {
            processing.store(false, Ordering::SeqCst);
        });

        let DocumentPayload {
            file_name,
            media_type,
            bytes,
        } = payload;

        debug!(file = %file_name, size = bytes.len(), "uploading document");

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&media_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.config.ingest_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Ingestion(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("detail")
                        .and_then(Value::as_str)
                        .map(str::to_owned)
                })
                .unwrap_or_else(|| format!("server returned {status}"));
            warn!(%status, detail = %detail, "ingestion rejected");
            return Err(Error::Ingestion(detail));
        }

        let receipt: IngestReceipt = response
            .json()
            .await
            .map_err(|e| Error::Ingestion(format!("invalid ingestion response: {e}")))?;

        debug!(session_id = %receipt.session_id, "document ingested");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn from_path_infers_pdf_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"%PDF-1.4")
            .unwrap();

        let payload = DocumentPayload::from_path(&path).unwrap();
        assert_eq!(payload.file_name, "doc.pdf");
        assert_eq!(payload.media_type, PDF_MEDIA_TYPE);
        assert!(payload.is_pdf());
    }

    #[test]
    fn from_path_marks_other_extensions_as_binary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "plain text").unwrap();

        let payload = DocumentPayload::from_path(&path).unwrap();
        assert_eq!(payload.media_type, "application/octet-stream");
        assert!(!payload.is_pdf());
    }

    #[test]
    fn from_path_is_case_insensitive_about_the_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("REPORT.PDF");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let payload = DocumentPayload::from_path(&path).unwrap();
        assert!(payload.is_pdf());
    }

    #[test]
    fn session_id_round_trips_through_json() {
        let receipt: IngestReceipt = serde_json::from_str(
            r#"{"message":"Successfully ingested 'doc.pdf'","item_count":12,"session_id":"abc123"}"#,
        )
        .unwrap();
        assert_eq!(receipt.session_id, SessionId::new("abc123"));
        assert_eq!(receipt.item_count, Some(12));
    }

    #[test]
    fn receipt_tolerates_a_minimal_body() {
        let receipt: IngestReceipt =
            serde_json::from_str(r#"{"session_id":"abc123"}"#).unwrap();
        assert_eq!(receipt.session_id.as_str(), "abc123");
        assert!(receipt.message.is_none());
        assert!(receipt.item_count.is_none());
    }
}
