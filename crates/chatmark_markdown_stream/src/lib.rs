//! Chatmark Markdown Stream - incremental markup parsing for streamed chat
//! replies.
//!
//! Every update re-parses the whole accumulated message into a fresh
//! [`Document`] of styled spans. Code fence state threads across lines within
//! one pass; headers, list items and quotes each consume a whole line; bold,
//! italic and inline code are parsed per line.
//!
//! # Example
//!
//! ```
//! use chatmark_markdown_stream::parse;
//!
//! let document = parse("**Hello** `world`");
//! assert_eq!(document.len(), 4);
//! assert_eq!(document.plain_text(), "Hello world\n");
//! ```

mod code;
mod heading;
mod inline;
mod list;
mod parser;
mod renderer;
mod state;
mod style;
mod theme;

pub use chatmark_domain::Document;
pub use code::{CodeHighlighter, Highlighted, ThemeMode, detect_theme_mode};
pub use parser::parse;
pub use renderer::{render_document, render_span};
pub use state::ParserState;
pub use style::SpanStyler;
pub use theme::{Style, Theme};
