use std::io::Write;

use anyhow::Result;
use chatmark_domain::{Document, DocumentSink};
use chatmark_markdown_stream::{SpanStyler, render_document};
use crossterm::cursor::{MoveToColumn, MoveToPreviousLine};
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use unicode_width::UnicodeWidthStr;

fn term_width() -> u16 {
    crossterm::terminal::size().map(|(w, _)| w).unwrap_or(80)
}

/// Draws each document in place, replacing the rendering of the previous
/// update of the same message.
///
/// A rendering identical to the one on screen is not redrawn. After the
/// final document of a message the sink forgets it, so the next message
/// starts below.
pub struct TerminalSink<W, S> {
    out: W,
    styler: S,
    width: u16,
    on_screen: String,
    rows: u16,
}

impl<W: Write, S: SpanStyler> TerminalSink<W, S> {
    pub fn new(out: W, styler: S) -> Self {
        Self { out, styler, width: term_width(), on_screen: String::new(), rows: 0 }
    }

    /// Fix the wrap width instead of asking the terminal.
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Write text that is not part of any message, such as the input
    /// prompt.
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn redraw(&mut self, rendered: String) -> Result<()> {
        if !self.on_screen.is_empty() {
            if self.rows > 0 {
                queue!(self.out, MoveToPreviousLine(self.rows))?;
            } else {
                queue!(self.out, MoveToColumn(0))?;
            }
            queue!(self.out, Clear(ClearType::FromCursorDown))?;
        }

        self.out.write_all(rendered.as_bytes())?;
        self.rows = rows_above_cursor(&rendered, self.width);
        self.on_screen = rendered;
        Ok(())
    }

    /// End the message on screen without a final document, e.g. when the
    /// session is cancelled.
    pub fn finish(&mut self) -> Result<()> {
        if !self.on_screen.is_empty() && !self.on_screen.ends_with('\n') {
            self.out.write_all(b"\n")?;
        }
        self.on_screen.clear();
        self.rows = 0;
        Ok(())
    }
}

impl<W: Write, S: SpanStyler> DocumentSink for TerminalSink<W, S> {
    fn on_document(&mut self, document: &Document, still_streaming: bool) -> Result<()> {
        let rendered = render_document(document, &self.styler);
        if rendered != self.on_screen {
            self.redraw(rendered)?;
        }
        if !still_streaming {
            self.finish()?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Terminal rows between the first row of `rendered` and the row the cursor
/// ends on, accounting for soft wraps at `width` columns.
fn rows_above_cursor(rendered: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let plain = strip_ansi_escapes::strip_str(rendered);
    let mut lines = plain.split('\n').peekable();
    let mut rows = 0usize;

    while let Some(line) = lines.next() {
        let columns = line.width();
        // A line that exactly fills the terminal leaves the cursor on its
        // last row until more text arrives.
        rows += columns.saturating_sub(1) / width;
        if lines.peek().is_some() {
            rows += 1;
        }
    }

    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Styler without escape codes, for asserting on terminal output.
#[cfg(test)]
pub(crate) struct PlainStyler;

#[cfg(test)]
impl SpanStyler for PlainStyler {
    fn plain(&self, text: &str) -> String {
        text.to_string()
    }
    fn heading(&self, level: u8, text: &str) -> String {
        format!("{} {text}", "#".repeat(level.into()))
    }
    fn list_item(&self, text: &str) -> String {
        text.to_string()
    }
    fn quote(&self, text: &str) -> String {
        format!("| {text}")
    }
    fn inline_code(&self, text: &str) -> String {
        text.to_string()
    }
    fn block_code(&self, code: &str, _: Option<&str>) -> String {
        code.to_string()
    }
    fn bold(&self, text: &str) -> String {
        text.to_uppercase()
    }
    fn italic(&self, text: &str) -> String {
        text.to_string()
    }
    fn caption(&self, text: &str) -> String {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use chatmark_markdown_stream::parse;
    use pretty_assertions::assert_eq;

    use super::*;

    fn sink() -> TerminalSink<Vec<u8>, PlainStyler> {
        TerminalSink::new(Vec::new(), PlainStyler).with_width(20)
    }

    fn output(sink: &TerminalSink<Vec<u8>, PlainStyler>) -> String {
        String::from_utf8(sink.get_ref().clone()).unwrap()
    }

    #[test]
    fn test_first_document_is_written_as_is() {
        let mut fixture = sink();
        fixture.on_document(&parse("# Title\nsay **hi**"), true).unwrap();
        assert_eq!(output(&fixture), "# Title\nsay HI\n");
    }

    #[test]
    fn test_changed_document_is_redrawn_in_place() {
        let mut fixture = sink();
        fixture.on_document(&parse("one"), true).unwrap();
        fixture.on_document(&parse("one\ntwo"), true).unwrap();
        assert_eq!(output(&fixture), "one\n\x1b[1F\x1b[Jone\ntwo\n");
    }

    #[test]
    fn test_unchanged_document_is_not_redrawn() {
        let mut fixture = sink();
        let document = parse("same");
        fixture.on_document(&document, true).unwrap();
        fixture.on_document(&document, true).unwrap();
        fixture.on_document(&document, false).unwrap();
        assert_eq!(output(&fixture), "same\n");
    }

    #[test]
    fn test_next_message_starts_below_the_finished_one() {
        let mut fixture = sink();
        fixture.on_document(&parse("first"), false).unwrap();
        fixture.on_document(&parse("second"), true).unwrap();
        assert_eq!(output(&fixture), "first\nsecond\n");
    }

    #[test]
    fn test_finish_terminates_the_last_line() {
        let mut fixture = sink();
        let document = Document::new(vec![chatmark_domain::StyledSpan::plain("tail")]);
        fixture.on_document(&document, false).unwrap();
        assert_eq!(output(&fixture), "tail\n");
    }

    #[test]
    fn test_rows_account_for_wrapping() {
        assert_eq!(rows_above_cursor("", 10), 0);
        assert_eq!(rows_above_cursor("abc\n", 10), 1);
        assert_eq!(rows_above_cursor("0123456789\n", 10), 1);
        assert_eq!(rows_above_cursor("0123456789a\n", 10), 2);
        assert_eq!(rows_above_cursor("a\nb\n", 10), 2);
    }

    #[test]
    fn test_rows_ignore_escape_codes_and_count_wide_characters() {
        assert_eq!(rows_above_cursor("\x1b[1mabc\x1b[0m\n", 3), 1);
        // Six CJK characters take twelve columns.
        assert_eq!(rows_above_cursor("你好你好你好\n", 10), 2);
    }
}
