//! Fenced code block state threaded across the lines of one reparse.

use chatmark_domain::{SpanRole, StyledSpan};

pub const FENCE: &str = "```";

/// Transient parser state. A fresh value is created for every reparse and
/// dropped at its end; nothing survives between reparses.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParserState {
    in_code_block: bool,
    code_block_language: String,
    code_block_buffer: Vec<String>,
}

impl ParserState {
    pub fn in_code_block(&self) -> bool {
        self.in_code_block
    }

    pub fn code_block_language(&self) -> &str {
        &self.code_block_language
    }

    /// Handles a fence line, opening or closing a block. Opening yields the
    /// language caption when there is a language; closing yields the code.
    pub fn toggle_fence(&mut self, info: &str) -> Option<StyledSpan> {
        if self.in_code_block {
            Some(self.close())
        } else {
            self.open(info)
        }
    }

    /// Buffers a line verbatim while a block is open.
    pub fn push_code_line(&mut self, line: &str) {
        self.code_block_buffer.push(line.to_string());
    }

    fn open(&mut self, info: &str) -> Option<StyledSpan> {
        self.in_code_block = true;
        self.code_block_language = info.trim().to_string();
        self.code_block_buffer.clear();

        (!self.code_block_language.is_empty()).then(|| {
            StyledSpan::new(SpanRole::Caption, format!("[{}]", self.code_block_language))
                .line_break_after(true)
        })
    }

    fn close(&mut self) -> StyledSpan {
        self.in_code_block = false;
        let code = std::mem::take(&mut self.code_block_buffer).join("\n");
        let role = SpanRole::block_code(std::mem::take(&mut self.code_block_language));
        StyledSpan::new(role, code).line_break_after(true)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_open_with_language_emits_caption() {
        let mut fixture = ParserState::default();
        let actual = fixture.toggle_fence(" rust ");
        let expected = Some(StyledSpan::new(SpanRole::Caption, "[rust]").line_break_after(true));
        assert_eq!(actual, expected);
        assert!(fixture.in_code_block());
        assert_eq!(fixture.code_block_language(), "rust");
    }

    #[test]
    fn test_open_without_language_is_silent() {
        let mut fixture = ParserState::default();
        assert_eq!(fixture.toggle_fence(""), None);
        assert!(fixture.in_code_block());
    }

    #[test]
    fn test_close_joins_buffer_and_resets() {
        let mut fixture = ParserState::default();
        fixture.toggle_fence("sh");
        fixture.push_code_line("echo a");
        fixture.push_code_line("  echo b");

        let actual = fixture.toggle_fence("ignored");
        let expected = Some(
            StyledSpan::new(SpanRole::block_code("sh"), "echo a\n  echo b").line_break_after(true),
        );
        assert_eq!(actual, expected);
        assert_eq!(fixture, ParserState::default());
    }
}
