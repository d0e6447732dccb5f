//! Full reparse of an accumulated message into a span document.

use chatmark_domain::{Document, StyledSpan};

use crate::heading::parse_heading;
use crate::inline::parse_inline;
use crate::list::{parse_ordered_item, parse_quote, parse_unordered_item};
use crate::state::{FENCE, ParserState};

/// Line rules tried in order outside code blocks; the first match consumes
/// the line.
const BLOCK_RULES: [fn(&str) -> Option<StyledSpan>; 4] =
    [parse_heading, parse_unordered_item, parse_ordered_item, parse_quote];

/// Parse the whole accumulated text of a message.
///
/// This is a pure function of `text`: calling it twice with the same input
/// yields the same document. A trailing partial line is parsed as it stands,
/// and a code block without its closing fence stays open, so its buffered
/// lines are not part of the output until the fence arrives.
pub fn parse(text: &str) -> Document {
    if text.is_empty() {
        return Document::default();
    }

    let mut state = ParserState::default();
    let mut spans = Vec::new();

    for line in text.split('\n') {
        // Checked before the fence state, so blank lines inside a code block
        // break the output line instead of joining the buffer.
        if line.trim().is_empty() {
            spans.push(StyledSpan::line_break());
            continue;
        }

        if let Some(info) = line.strip_prefix(FENCE) {
            spans.extend(state.toggle_fence(info));
            continue;
        }

        if state.in_code_block() {
            state.push_code_line(line);
            continue;
        }

        if let Some(span) = BLOCK_RULES.iter().find_map(|rule| rule(line)) {
            spans.push(span);
            continue;
        }

        spans.extend(parse_inline(line));
        spans.push(StyledSpan::line_break());
    }

    Document::new(spans)
}
