//! Decoding of chat-completion event streams into message fragments.
//!
//! Upstream sends one `data: ` line per chunk, each holding a JSON envelope
//! with the next piece of text at `choices[0].delta.content`, and finishes
//! with `data: [DONE]`. Everything that does not fit that shape is skipped.

mod event;
mod response;
mod stream;

pub use event::{DATA_PREFIX, DONE_SENTINEL, LineEvent, decode_line};
pub use response::{
    NETWORK_FAILURE_NOTICE, into_message_fragments, response_lines, status_failure_notice,
};
pub use stream::into_fragments;
