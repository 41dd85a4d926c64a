//! Streaming chat session: transcript state machine, incremental UTF-8
//! decoding, and the async driver that ties them to the query endpoint.

mod decode;
mod emitter;
mod message;
mod session;
mod state;

pub use decode::StreamDecoder;
pub use emitter::{ChannelEmitter, ChatEmitter, ChatEvent, NullEmitter};
pub use message::{ChatMessage, Role};
pub use session::{ChatSession, TextStream};
pub use state::{ChatState, STREAM_ERROR_SENTINEL, StreamPhase};
