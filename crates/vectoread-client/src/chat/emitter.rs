//! Observer seam between the chat session and a presentation surface.
//!
//! Emitters fire after every transcript mutation, not just at message
//! boundaries, so a view can track partial assistant output as it grows.

use async_trait::async_trait;
use tokio::sync::mpsc;

/// Receives transcript updates from a [`super::ChatSession`].
#[async_trait]
pub trait ChatEmitter: Send {
    /// A user message was appended and a turn has started.
    async fn emit_user_message(&mut self, content: &str);

    /// Decoded text was appended to the open assistant message.
    async fn emit_assistant_delta(&mut self, delta: &str);

    /// The open assistant message was replaced with the error sentinel.
    async fn emit_stream_error(&mut self, sentinel: &str);

    /// The turn closed normally; `content` is the full assistant reply.
    async fn emit_turn_complete(&mut self, content: &str);
}

/// Emitter that discards everything.
pub struct NullEmitter;

#[async_trait]
impl ChatEmitter for NullEmitter {
    async fn emit_user_message(&mut self, _content: &str) {}
    async fn emit_assistant_delta(&mut self, _delta: &str) {}
    async fn emit_stream_error(&mut self, _sentinel: &str) {}
    async fn emit_turn_complete(&mut self, _content: &str) {}
}

/// Transcript event forwarded over a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    UserMessage(String),
    AssistantDelta(String),
    StreamError(String),
    TurnComplete(String),
}

/// Forwards events over an unbounded channel, for consumers that render
/// on their own schedule. Send failures mean the receiver is gone and are
/// ignored.
pub struct ChannelEmitter {
    tx: mpsc::UnboundedSender<ChatEvent>,
}

impl ChannelEmitter {
    pub fn new(tx: mpsc::UnboundedSender<ChatEvent>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl ChatEmitter for ChannelEmitter {
    async fn emit_user_message(&mut self, content: &str) {
        let _ = self.tx.send(ChatEvent::UserMessage(content.to_string()));
    }

    async fn emit_assistant_delta(&mut self, delta: &str) {
        let _ = self.tx.send(ChatEvent::AssistantDelta(delta.to_string()));
    }

    async fn emit_stream_error(&mut self, sentinel: &str) {
        let _ = self.tx.send(ChatEvent::StreamError(sentinel.to_string()));
    }

    async fn emit_turn_complete(&mut self, content: &str) {
        let _ = self.tx.send(ChatEvent::TurnComplete(content.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn null_emitter_accepts_everything() {
        let mut emitter = NullEmitter;
        emitter.emit_user_message("hello").await;
        emitter.emit_assistant_delta("hi").await;
        emitter.emit_stream_error("boom").await;
        emitter.emit_turn_complete("hi").await;
    }

    #[tokio::test]
    async fn channel_emitter_forwards_events_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut emitter = ChannelEmitter::new(tx);

        emitter.emit_user_message("question").await;
        emitter.emit_assistant_delta("ans").await;
        emitter.emit_assistant_delta("wer").await;
        emitter.emit_turn_complete("answer").await;

        assert_eq!(
            rx.recv().await,
            Some(ChatEvent::UserMessage("question".to_string()))
        );
        assert_eq!(
            rx.recv().await,
            Some(ChatEvent::AssistantDelta("ans".to_string()))
        );
        assert_eq!(
            rx.recv().await,
            Some(ChatEvent::AssistantDelta("wer".to_string()))
        );
        assert_eq!(
            rx.recv().await,
            Some(ChatEvent::TurnComplete("answer".to_string()))
        );
    }

    #[tokio::test]
    async fn channel_emitter_survives_a_dropped_receiver() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let mut emitter = ChannelEmitter::new(tx);
        emitter.emit_assistant_delta("nobody listening").await;
    }
}
