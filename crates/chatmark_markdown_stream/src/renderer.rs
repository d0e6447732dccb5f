//! Turns a span document into display text through a [`SpanStyler`].

use chatmark_domain::{Document, SpanRole, StyledSpan};

use crate::style::SpanStyler;

/// Render a single span, without its trailing line break.
pub fn render_span<S: SpanStyler>(span: &StyledSpan, styler: &S) -> String {
    let text = span.text.as_str();
    match &span.role {
        SpanRole::Plain => styler.plain(text),
        SpanRole::Header { level } => styler.heading(*level, text),
        SpanRole::ListItem => styler.list_item(text),
        SpanRole::Quote => styler.quote(text),
        SpanRole::InlineCode => styler.inline_code(text),
        SpanRole::BlockCode { language } => styler.block_code(text, language.as_deref()),
        SpanRole::Bold => styler.bold(text),
        SpanRole::Italic => styler.italic(text),
        SpanRole::Caption => styler.caption(text),
    }
}

/// Render a whole document. Line breaks become `\n`.
pub fn render_document<S: SpanStyler>(document: &Document, styler: &S) -> String {
    let mut out = String::new();
    for span in document.iter() {
        if !span.text.is_empty() {
            out.push_str(&render_span(span, styler));
        }
        if span.line_break_after {
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use crate::theme::TagStyler;

    fn render(markdown: &str) -> String {
        render_document(&parse(markdown), &TagStyler).trim_end().to_string()
    }

    #[test]
    fn test_plain() {
        insta::assert_snapshot!(render("hello world"), @"hello world");
    }

    #[test]
    fn test_inline_styles() {
        insta::assert_snapshot!(render("a **b** *c* `d`"), @"a <b>b</b> <i>c</i> <code>d</code>");
    }

    #[test]
    fn test_headers() {
        insta::assert_snapshot!(render("# One\n##### Five\n###### Six"), @r"
        <h1>One</h1>
        <h5>Five</h5>
        <h5>Six</h5>
        ");
    }

    #[test]
    fn test_lists_and_quote() {
        insta::assert_snapshot!(render("- first\n2. second\n> said"), @r"
        <li>• first</li>
        <li>2. second</li>
        <quote>said</quote>
        ");
    }

    #[test]
    fn test_code_block() {
        insta::assert_snapshot!(render("```rust\nlet x = 1;\nlet y = 2;\n```\ndone"), @r#"
        <small>[rust]</small>
        <pre lang="rust">let x = 1;
        let y = 2;</pre>
        done
        "#);
    }

    #[test]
    fn test_empty_line_break_spans_render_nothing() {
        insta::assert_snapshot!(render("a\n\nb"), @r"
        a

        b
        ");
    }
}
