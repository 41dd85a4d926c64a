//! VectoRead client - document question answering over HTTP
//!
//! This crate provides:
//! - Ingestion submitter: multipart PDF upload yielding a session identifier
//! - Streaming chat session: incremental consumption of chunked query replies
//! - Incremental UTF-8 decoding across arbitrary transport chunk boundaries
//! - An emitter seam so any presentation surface can track partial output

pub mod chat;
pub mod config;
pub mod error;
mod http_client;
pub mod ingest;

// Re-export commonly used types
pub use chat::{
    ChannelEmitter, ChatEmitter, ChatEvent, ChatMessage, ChatSession, ChatState, NullEmitter,
    Role, STREAM_ERROR_SENTINEL, StreamDecoder, StreamPhase, TextStream,
};
pub use config::ServiceConfig;
pub use error::{Error, Result};
pub use ingest::{
    DocumentPayload, DocumentUploader, IngestReceipt, PDF_MEDIA_TYPE, SessionId,
};
