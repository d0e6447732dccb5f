use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Deepest header level that keeps a distinct role; deeper headers share it.
pub const MAX_HEADER_LEVEL: u8 = 5;

/// Semantic role of a span. The presentation layer decides how each role
/// looks; the parser only decides which role a piece of text has.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SpanRole {
    Plain,
    Header { level: u8 },
    ListItem,
    Quote,
    InlineCode,
    BlockCode { language: Option<String> },
    Bold,
    Italic,
    /// Small italic caption naming the language of a fenced code block.
    Caption,
}

impl SpanRole {
    /// Header role for a run of `count` leading `#` characters.
    pub fn header(count: usize) -> Self {
        let level = count.clamp(1, MAX_HEADER_LEVEL as usize) as u8;
        Self::Header { level }
    }

    pub fn block_code(language: impl Into<String>) -> Self {
        let language = language.into();
        Self::BlockCode { language: (!language.is_empty()).then_some(language) }
    }
}

/// One contiguous piece of rendered text with a single role.
#[derive(Clone, Debug, PartialEq, Eq, Setters, Serialize, Deserialize)]
#[setters(into)]
pub struct StyledSpan {
    pub text: String,
    pub role: SpanRole,
    pub line_break_after: bool,
}

impl StyledSpan {
    pub fn new(role: SpanRole, text: impl Into<String>) -> Self {
        Self { text: text.into(), role, line_break_after: false }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(SpanRole::Plain, text)
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(SpanRole::Bold, text)
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(SpanRole::Italic, text)
    }

    pub fn inline_code(text: impl Into<String>) -> Self {
        Self::new(SpanRole::InlineCode, text)
    }

    /// An empty plain span that only ends the current line.
    pub fn line_break() -> Self {
        Self::plain("").line_break_after(true)
    }
}
