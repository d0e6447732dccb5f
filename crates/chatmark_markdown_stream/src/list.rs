//! List items and block quotes. Every rule here consumes a whole line.

use chatmark_domain::{SpanRole, StyledSpan};
use lazy_static::lazy_static;
use regex::Regex;

/// Glyph that replaces the `-`, `*` or `+` marker of an unordered item.
const BULLET: &str = "• ";

const UNORDERED_MARKERS: [&str; 3] = ["- ", "* ", "+ "];

lazy_static! {
    static ref ORDERED_ITEM: Regex = Regex::new(r"^\d+\.\s").unwrap();
}

/// `- item`, `* item` or `+ item`, ignoring leading indentation.
pub fn parse_unordered_item(line: &str) -> Option<StyledSpan> {
    let trimmed = line.trim_start();
    UNORDERED_MARKERS
        .iter()
        .find_map(|marker| trimmed.strip_prefix(marker))
        .map(|rest| list_item(format!("{BULLET}{rest}")))
}

/// `1. item`. The numbering is kept exactly as written.
pub fn parse_ordered_item(line: &str) -> Option<StyledSpan> {
    let trimmed = line.trim_start();
    ORDERED_ITEM.is_match(trimmed).then(|| list_item(trimmed))
}

/// `> quoted`. Only a `>` in the very first column counts.
pub fn parse_quote(line: &str) -> Option<StyledSpan> {
    line.strip_prefix('>')
        .map(|rest| StyledSpan::new(SpanRole::Quote, rest.trim()).line_break_after(true))
}

fn list_item(text: impl Into<String>) -> StyledSpan {
    StyledSpan::new(SpanRole::ListItem, text).line_break_after(true)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_unordered_markers() {
        let actual: Vec<_> = ["- a", "* b", "+ c", "    - nested"]
            .into_iter()
            .filter_map(parse_unordered_item)
            .map(|span| span.text)
            .collect();
        let expected = vec!["• a", "• b", "• c", "• nested"];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_unordered_needs_space_after_marker() {
        assert_eq!(parse_unordered_item("-a"), None);
        assert_eq!(parse_unordered_item("**bold**"), None);
    }

    #[test]
    fn test_unordered_item_keeps_inline_markers() {
        let actual = parse_unordered_item("- use `cargo`").unwrap();
        let expected = list_item("• use `cargo`");
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_ordered_item_passthrough() {
        let actual = parse_ordered_item("2. second").unwrap();
        let expected = StyledSpan::new(SpanRole::ListItem, "2. second").line_break_after(true);
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_ordered_item_drops_indentation_only() {
        let actual = parse_ordered_item("   10. tenth  ").map(|span| span.text);
        assert_eq!(actual.as_deref(), Some("10. tenth  "));
    }

    #[test]
    fn test_ordered_item_requires_whitespace() {
        assert_eq!(parse_ordered_item("3.14 is pi"), None);
        assert_eq!(parse_ordered_item("v1. release"), None);
    }

    #[test]
    fn test_quote() {
        let actual = parse_quote(">  wise words ").unwrap();
        let expected = StyledSpan::new(SpanRole::Quote, "wise words").line_break_after(true);
        assert_eq!(actual, expected);
        assert_eq!(parse_quote(" > indented"), None);
    }
}
