//! Streaming chat session driver.
//!
//! Ties the pure transcript state machine to the query endpoint: one
//! in-flight request at a time (enforced by the phase guard, not a
//! lock), chunks applied strictly in arrival order, and the fixed error
//! sentinel on any mid-stream failure.

use std::pin::Pin;

use futures::{Stream, StreamExt};
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::http_client::build_http_client;
use crate::ingest::SessionId;

use super::decode::StreamDecoder;
use super::emitter::ChatEmitter;
use super::message::ChatMessage;
use super::state::{ChatState, STREAM_ERROR_SENTINEL};

/// Stream of decoded text deltas from the query endpoint.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// An interactive chat session over one ingested document.
pub struct ChatSession {
    client: Client,
    config: ServiceConfig,
    session_id: SessionId,
    state: ChatState,
}

impl ChatSession {
    pub fn new(config: ServiceConfig, session_id: SessionId) -> Self {
        Self::with_client(build_http_client(), config, session_id)
    }

    /// Use an injected HTTP client instead of the default one.
    pub fn with_client(client: Client, config: ServiceConfig, session_id: SessionId) -> Self {
        Self {
            client,
            config,
            session_id,
            state: ChatState::new(),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// The transcript so far, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        self.state.messages()
    }

    /// Whether a turn is in progress and submissions are disabled.
    pub fn is_streaming(&self) -> bool {
        self.state.is_streaming()
    }

    /// Submit one user query and stream the reply into the transcript.
    ///
    /// Returns whether the submission was accepted: blank input and
    /// submissions made while a turn is active are ignored. A transport
    /// failure replaces the open reply with [`STREAM_ERROR_SENTINEL`]
    /// instead of surfacing an error; the submission guard clears on
    /// every path, so the caller can always submit again.
    pub async fn send<E: ChatEmitter>(&mut self, input: &str, emitter: &mut E) -> bool {
        let Some(query) = self.state.begin_submission(input) else {
            debug!("submission ignored");
            return false;
        };
        emitter.emit_user_message(&query).await;

        match self.stream_reply(&query, emitter).await {
            Ok(()) => {
                let content = self.state.open_content().unwrap_or_default().to_string();
                self.state.finish();
                emitter.emit_turn_complete(&content).await;
            }
            Err(err) => {
                warn!(error = %err, "query stream failed");
                self.state.record_error();
                self.state.finish();
                emitter.emit_stream_error(STREAM_ERROR_SENTINEL).await;
            }
        }
        true
    }

    /// Open a query stream and yield decoded text deltas as they arrive.
    ///
    /// The transport's chunk boundaries carry no meaning; deltas are
    /// whatever the incremental decoder can produce from each read, with
    /// partial multi-byte sequences carried across reads.
    pub fn query_stream(&self, query: &str) -> TextStream {
        let client = self.client.clone();
        let url = self.config.query_url();
        let body = serde_json::json!({
            "query": query,
            "session_id": self.session_id.as_str(),
        });

        Box::pin(async_stream::stream! {
            let response = match client.post(&url).json(&body).send().await {
                Ok(resp) => resp,
                Err(e) => {
                    yield Err(Error::Streaming(format!("request failed: {e}")));
                    return;
                }
            };

            let status = response.status();
            if !status.is_success() {
                yield Err(Error::Streaming(format!("server returned {status}")));
                return;
            }

            let mut byte_stream = response.bytes_stream();
            let mut decoder = StreamDecoder::new();

            while let Some(chunk_result) = byte_stream.next().await {
                let chunk = match chunk_result {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        yield Err(Error::Streaming(format!("read failed: {e}")));
                        return;
                    }
                };

                let text = decoder.feed(&chunk);
                if !text.is_empty() {
                    yield Ok(text);
                }
            }

            let tail = decoder.finish();
            if !tail.is_empty() {
                yield Ok(tail);
            }
        })
    }

    async fn stream_reply<E: ChatEmitter>(&mut self, query: &str, emitter: &mut E) -> Result<()> {
        let mut deltas = self.query_stream(query);

        while let Some(delta) = deltas.next().await {
            let delta = delta?;
            self.state.mark_streaming();
            self.state.append_chunk(&delta);
            emitter.emit_assistant_delta(&delta).await;
        }
        Ok(())
    }
}
