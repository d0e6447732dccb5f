//! Shared value types of the streaming chat renderer: styled spans, the
//! documents built from them, the sink that receives documents and the chat
//! messages that make up a conversation.

mod document;
mod message;
mod sink;
mod span;

pub use document::*;
pub use message::*;
pub use sink::*;
pub use span::*;
