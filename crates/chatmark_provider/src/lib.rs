//! OpenAI-compatible chat-completion client.

mod openai;
mod request;
mod response;
mod utils;

pub use openai::*;
pub use request::*;
pub use response::*;
pub use utils::sanitize_headers;
