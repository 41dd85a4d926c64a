//! Error types for the VectoRead client

use thiserror::Error;

/// Client error types
#[derive(Error, Debug)]
pub enum Error {
    /// The selected document is not a PDF. Raised before any network
    /// activity, so selecting another file is a full recovery.
    #[error("Invalid file type. Please upload a PDF.")]
    InvalidDocument { media_type: String },

    /// The ingestion endpoint rejected the upload, or the upload request
    /// failed in transit.
    #[error("Upload failed: {0}")]
    Ingestion(String),

    /// A query stream could not be opened or failed mid-read.
    #[error("Streaming error: {0}")]
    Streaming(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;
