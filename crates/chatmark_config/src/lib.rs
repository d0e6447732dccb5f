//! Layered settings for the chatmark client: built-in defaults, an optional
//! TOML file and `CHATMARK_` environment variables, in that order.

mod error;
mod reader;
mod settings;

pub use error::*;
pub use reader::*;
pub use settings::*;
