//! ATX-style headers.

use chatmark_domain::{SpanRole, StyledSpan};

/// Parse a line starting with one or more `#`. Lines made of `#` only fall
/// through to the next rule.
pub fn parse_heading(line: &str) -> Option<StyledSpan> {
    let rest = line.trim_start_matches('#');
    let count = line.len() - rest.len();
    if count == 0 {
        return None;
    }

    let text = rest.trim();
    if text.is_empty() {
        return None;
    }

    Some(StyledSpan::new(SpanRole::header(count), text).line_break_after(true))
}
