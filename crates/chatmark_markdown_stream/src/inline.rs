//! Inline parsing: code spans first, then bold/italic on the text left over.

use chatmark_domain::StyledSpan;

/// A piece of a line after the code-span pass.
#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    /// Text that may still carry bold/italic markers.
    Text(&'a str),
    /// Text enclosed in a pair of backticks.
    Code(&'a str),
}

/// Parse one line into inline spans. No line break is appended.
pub fn parse_inline(line: &str) -> Vec<StyledSpan> {
    let mut spans = Vec::new();
    for segment in split_code_spans(line) {
        match segment {
            Segment::Code(code) => spans.push(StyledSpan::inline_code(code)),
            Segment::Text(text) => parse_emphasis(text, &mut spans),
        }
    }
    spans
}

/// Splits on paired backticks. An unpaired backtick turns the rest of the
/// line, starting at the last consumed position, into text.
fn split_code_spans(line: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = line;

    while !rest.is_empty() {
        let Some(open) = rest.find('`') else {
            segments.push(Segment::Text(rest));
            break;
        };
        let Some(len) = rest[open + 1..].find('`') else {
            segments.push(Segment::Text(rest));
            break;
        };

        if open > 0 {
            segments.push(Segment::Text(&rest[..open]));
        }
        segments.push(Segment::Code(&rest[open + 1..open + 1 + len]));
        rest = &rest[open + 1 + len + 1..];
    }

    segments
}

/// Bold/italic scan. `**` pairs are looked for first across the remaining
/// text; a `*` pair needs at least one character between its markers.
/// Scanning resumes right after each closing marker, so nothing nests.
fn parse_emphasis(text: &str, spans: &mut Vec<StyledSpan>) {
    let mut rest = text;

    while !rest.is_empty() {
        if let Some(open) = rest.find("**")
            && let Some(len) = rest[open + 2..].find("**")
        {
            if open > 0 {
                spans.push(StyledSpan::plain(&rest[..open]));
            }
            spans.push(StyledSpan::bold(&rest[open + 2..open + 2 + len]));
            rest = &rest[open + 2 + len + 2..];
            continue;
        }

        if let Some(open) = rest.find('*')
            && let Some(len) = rest[open + 1..].find('*')
            && len > 0
        {
            if open > 0 {
                spans.push(StyledSpan::plain(&rest[..open]));
            }
            spans.push(StyledSpan::italic(&rest[open + 1..open + 1 + len]));
            rest = &rest[open + 1 + len + 1..];
            continue;
        }

        spans.push(StyledSpan::plain(rest));
        break;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_plain_text() {
        let actual = parse_inline("hello world");
        let expected = vec![StyledSpan::plain("hello world")];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_bold_takes_precedence_over_inner_italic() {
        let actual = parse_inline("**a*b*c**");
        let expected = vec![StyledSpan::bold("a*b*c")];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_unterminated_italic_stays_plain() {
        let actual = parse_inline("*oops");
        let expected = vec![StyledSpan::plain("*oops")];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_mixed_bold_and_italic() {
        let actual = parse_inline("hello **bold** and *italic*!");
        let expected = vec![
            StyledSpan::plain("hello "),
            StyledSpan::bold("bold"),
            StyledSpan::plain(" and "),
            StyledSpan::italic("italic"),
            StyledSpan::plain("!"),
        ];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_bold_pair_found_before_earlier_italic() {
        // The `**` search spans the whole remainder, so an italic pair that
        // sits before a bold pair is swallowed into the leading plain text.
        let actual = parse_inline("*a* **b**");
        let expected = vec![StyledSpan::plain("*a* "), StyledSpan::bold("b")];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_lone_asterisk_pairs_with_next_one() {
        let actual = parse_inline("2 * 3 = 6 and *x*");
        let expected = vec![
            StyledSpan::plain("2 "),
            StyledSpan::italic(" 3 = 6 and "),
            StyledSpan::plain("x*"),
        ];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_empty_italic_pair_is_plain() {
        let actual = parse_inline("**a");
        let expected = vec![StyledSpan::plain("**a")];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_inline_code_is_not_scanned_for_emphasis() {
        let actual = parse_inline("run `a **b**` now");
        let expected = vec![
            StyledSpan::plain("run "),
            StyledSpan::inline_code("a **b**"),
            StyledSpan::plain(" now"),
        ];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_unterminated_backtick_degrades_to_text() {
        let actual = parse_inline("x `a` and `b *c*");
        let expected = vec![
            StyledSpan::plain("x "),
            StyledSpan::inline_code("a"),
            StyledSpan::plain(" and `b "),
            StyledSpan::italic("c"),
        ];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_empty_code_span() {
        let actual = parse_inline("``");
        let expected = vec![StyledSpan::inline_code("")];
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_multibyte_text_around_markers() {
        let actual = parse_inline("你好 **世界**");
        let expected = vec![StyledSpan::plain("你好 "), StyledSpan::bold("世界")];
        assert_eq!(actual, expected);
    }
}
