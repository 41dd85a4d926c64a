//! Transcript state machine for streaming chat turns.
//!
//! Pure transitions over `{messages, phase}` so the whole turn lifecycle
//! is unit-testable without a network or rendering surface. The async
//! driver in [`super::session`] applies these transitions as transport
//! events arrive.

use super::message::{ChatMessage, Role};

/// Fixed content shown in place of a reply when a stream fails.
pub const STREAM_ERROR_SENTINEL: &str = "Error: Could not get a response.";

/// Where the session currently is in the request/stream cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StreamPhase {
    #[default]
    Idle,
    /// Request sent, response body not yet observed.
    Awaiting,
    /// Response body being read incrementally.
    Streaming,
    /// A failure was recorded for the current turn.
    Error,
}

/// Ordered, append-only chat transcript plus the current stream phase.
#[derive(Debug, Default)]
pub struct ChatState {
    messages: Vec<ChatMessage>,
    phase: StreamPhase,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    /// Submission guard: true while a turn is in progress in any form.
    pub fn is_streaming(&self) -> bool {
        self.phase != StreamPhase::Idle
    }

    /// Content of the open assistant message, if a turn is in progress.
    pub fn open_content(&self) -> Option<&str> {
        if self.phase == StreamPhase::Idle {
            return None;
        }
        match self.messages.last() {
            Some(last) if last.role == Role::Assistant => Some(&last.content),
            _ => None,
        }
    }

    /// Accept a user submission.
    ///
    /// Returns the trimmed query when accepted. Rejected with no mutation
    /// when the input trims to nothing or a turn is already in progress.
    /// On acceptance the user message and an empty placeholder assistant
    /// message are appended, and the phase moves to `Awaiting`.
    pub fn begin_submission(&mut self, input: &str) -> Option<String> {
        if self.is_streaming() {
            return None;
        }
        let query = input.trim();
        if query.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(query));
        self.messages.push(ChatMessage::assistant(""));
        self.phase = StreamPhase::Awaiting;
        Some(query.to_string())
    }

    /// The response body has started producing chunks.
    pub fn mark_streaming(&mut self) {
        if self.phase == StreamPhase::Awaiting {
            self.phase = StreamPhase::Streaming;
        }
    }

    /// Append decoded text to the open assistant message, in arrival order.
    pub fn append_chunk(&mut self, text: &str) {
        if !matches!(self.phase, StreamPhase::Awaiting | StreamPhase::Streaming) {
            return;
        }
        if let Some(open) = self.open_message_mut() {
            open.content.push_str(text);
        }
    }

    /// Record a stream failure: the open assistant message's content is
    /// replaced, not appended to, with [`STREAM_ERROR_SENTINEL`].
    pub fn record_error(&mut self) {
        if let Some(open) = self.open_message_mut() {
            open.content.clear();
            open.content.push_str(STREAM_ERROR_SENTINEL);
        }
        self.phase = StreamPhase::Error;
    }

    /// Close the turn. The guard clears unconditionally, including after an
    /// error, so the next submission needs no manual intervention.
    pub fn finish(&mut self) {
        self.phase = StreamPhase::Idle;
    }

    fn open_message_mut(&mut self) -> Option<&mut ChatMessage> {
        match self.messages.last_mut() {
            Some(last) if last.role == Role::Assistant => Some(last),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_submissions_are_rejected_without_mutation() {
        let mut state = ChatState::new();
        assert!(state.begin_submission("").is_none());
        assert!(state.begin_submission("   \t\n").is_none());
        assert!(state.messages().is_empty());
        assert_eq!(state.phase(), StreamPhase::Idle);
    }

    #[test]
    fn acceptance_appends_user_and_placeholder() {
        let mut state = ChatState::new();
        let query = state.begin_submission("  What is the refund policy?  ");
        assert_eq!(query.as_deref(), Some("What is the refund policy?"));

        let messages = state.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "What is the refund policy?");
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[1].content, "");
        assert_eq!(state.phase(), StreamPhase::Awaiting);
    }

    #[test]
    fn submissions_are_guarded_while_a_turn_is_active() {
        let mut state = ChatState::new();
        state.begin_submission("first");
        assert!(state.begin_submission("second").is_none());
        assert_eq!(state.messages().len(), 2);

        state.mark_streaming();
        assert!(state.begin_submission("third").is_none());
    }

    #[test]
    fn chunks_append_to_the_open_message_in_order() {
        let mut state = ChatState::new();
        state.begin_submission("question");
        state.mark_streaming();
        state.append_chunk("The ");
        state.append_chunk("refund ");
        state.append_chunk("policy is 30 days.");

        assert_eq!(
            state.open_content(),
            Some("The refund policy is 30 days.")
        );
        // The user message is untouched.
        assert_eq!(state.messages()[0].content, "question");
    }

    #[test]
    fn record_error_replaces_partial_content() {
        let mut state = ChatState::new();
        state.begin_submission("question");
        state.mark_streaming();
        state.append_chunk("partial rep");
        state.record_error();

        assert_eq!(state.messages().last().unwrap().content, STREAM_ERROR_SENTINEL);
        assert_eq!(state.phase(), StreamPhase::Error);
    }

    #[test]
    fn finish_clears_the_guard_even_after_an_error() {
        let mut state = ChatState::new();
        state.begin_submission("question");
        state.record_error();
        state.finish();

        assert!(!state.is_streaming());
        assert!(state.begin_submission("again").is_some());
        assert_eq!(state.messages().len(), 4);
    }

    #[test]
    fn chunks_are_ignored_once_an_error_is_recorded() {
        let mut state = ChatState::new();
        state.begin_submission("question");
        state.mark_streaming();
        state.record_error();
        state.append_chunk("late chunk");

        assert_eq!(state.messages().last().unwrap().content, STREAM_ERROR_SENTINEL);
    }

    #[test]
    fn a_zero_chunk_stream_completes_with_an_empty_reply() {
        let mut state = ChatState::new();
        state.begin_submission("question");
        state.finish();

        assert_eq!(state.messages().last().unwrap().content, "");
        assert!(!state.is_streaming());
    }
}
