use derive_more::{Deref, From};
use serde::{Deserialize, Serialize};

use crate::StyledSpan;

/// Complete, ordered span sequence for one message at one point in time.
///
/// A document is never patched. Every reparse produces a new one, so a sink
/// can keep an older document around while the next one is being built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deref, From, Serialize, Deserialize)]
pub struct Document(Vec<StyledSpan>);

impl Document {
    pub fn new(spans: Vec<StyledSpan>) -> Self {
        Self(spans)
    }

    pub fn spans(&self) -> &[StyledSpan] {
        &self.0
    }

    pub fn into_spans(self) -> Vec<StyledSpan> {
        self.0
    }

    /// Concatenated span text with styling dropped; every `line_break_after`
    /// becomes a `\n`.
    pub fn plain_text(&self) -> String {
        self.0.iter().fold(String::new(), |mut out, span| {
            out.push_str(&span.text);
            if span.line_break_after {
                out.push('\n');
            }
            out
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plain_text_joins_line_breaks() {
        let fixture: Document = vec![
            StyledSpan::plain("a "),
            StyledSpan::bold("b"),
            StyledSpan::line_break(),
            StyledSpan::line_break(),
        ]
        .into();
        let actual = fixture.plain_text();
        let expected = "a b\n\n";
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_deref_to_span_slice() {
        let fixture = Document::new(vec![StyledSpan::plain("x")]);
        assert_eq!(fixture.len(), 1);
        assert_eq!(fixture[0].text, "x");
    }
}
