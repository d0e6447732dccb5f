//! Theme configuration for span rendering.
//!
//! Provides a style per span role using the `colored` crate.

use colored::{Color, ColoredString, Colorize};

use crate::code::{ThemeMode, detect_theme_mode};
use crate::style::SpanStyler;

/// Style configuration for a single role.
#[derive(Clone, Debug, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub italic: bool,
    pub dimmed: bool,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn dimmed(mut self) -> Self {
        self.dimmed = true;
        self
    }

    /// Apply this style to a string.
    pub fn apply(&self, text: &str) -> ColoredString {
        let mut result = text.normal();

        if let Some(fg) = self.fg {
            result = result.color(fg);
        }
        if let Some(bg) = self.bg {
            result = result.on_color(bg);
        }
        if self.bold {
            result = result.bold();
        }
        if self.italic {
            result = result.italic();
        }
        if self.dimmed {
            result = result.dimmed();
        }

        result
    }
}

/// Styles for every span role.
#[derive(Clone, Debug)]
pub struct Theme {
    pub text: Style,
    pub bold: Style,
    pub italic: Style,
    pub inline_code: Style,

    /// Header styles for levels 1 through 5.
    pub headings: [Style; 5],

    pub list_item: Style,
    pub quote: Style,
    pub code_block: Style,
    pub caption: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}

impl Theme {
    /// Picks the dark or light variant from the terminal background.
    pub fn detect() -> Self {
        Self::for_mode(detect_theme_mode())
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Dark theme (default).
    pub fn dark() -> Self {
        Self {
            text: Style::new().fg(Color::White),
            bold: Style::new().bold(),
            italic: Style::new().italic(),
            inline_code: Style::new().fg(Color::Yellow),

            headings: [
                Style::new().fg(Color::Magenta).bold(),
                Style::new().fg(Color::Blue).bold(),
                Style::new().fg(Color::Cyan).bold(),
                Style::new().fg(Color::Green).bold(),
                Style::new().bold(),
            ],

            list_item: Style::new().fg(Color::White),
            quote: Style::new().fg(Color::BrightBlack).italic(),
            code_block: Style::new().fg(Color::BrightWhite).bg(Color::Black),
            caption: Style::new().fg(Color::BrightBlack).italic(),
        }
    }

    /// Light theme for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            text: Style::new(),
            bold: Style::new().bold(),
            italic: Style::new().italic(),
            inline_code: Style::new().fg(Color::Red),

            headings: [
                Style::new().fg(Color::Magenta).bold(),
                Style::new().fg(Color::Blue).bold(),
                Style::new().fg(Color::Cyan).bold(),
                Style::new().fg(Color::Green).bold(),
                Style::new().bold(),
            ],

            list_item: Style::new(),
            quote: Style::new().fg(Color::BrightBlack).italic(),
            code_block: Style::new().fg(Color::Black).bg(Color::BrightWhite),
            caption: Style::new().fg(Color::BrightBlack).italic(),
        }
    }

    fn heading_style(&self, level: u8) -> &Style {
        let index = usize::from(level.max(1)) - 1;
        &self.headings[index.min(self.headings.len() - 1)]
    }
}

/// Theme-based styler that outputs ANSI codes.
impl SpanStyler for Theme {
    fn plain(&self, text: &str) -> String {
        self.text.apply(text).to_string()
    }

    fn heading(&self, level: u8, text: &str) -> String {
        self.heading_style(level).apply(text).to_string()
    }

    fn list_item(&self, text: &str) -> String {
        self.list_item.apply(text).to_string()
    }

    fn quote(&self, text: &str) -> String {
        self.quote.apply(text).to_string()
    }

    fn inline_code(&self, text: &str) -> String {
        self.inline_code.apply(text).to_string()
    }

    fn block_code(&self, code: &str, _language: Option<&str>) -> String {
        code.split('\n')
            .map(|line| self.code_block.apply(line).to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn bold(&self, text: &str) -> String {
        self.bold.apply(text).to_string()
    }

    fn italic(&self, text: &str) -> String {
        self.italic.apply(text).to_string()
    }

    fn caption(&self, text: &str) -> String {
        self.caption.apply(text).to_string()
    }
}

/// Test styler that outputs readable HTML-like tags.
#[cfg(test)]
pub struct TagStyler;

#[cfg(test)]
impl SpanStyler for TagStyler {
    fn plain(&self, text: &str) -> String {
        text.to_string()
    }

    fn heading(&self, level: u8, text: &str) -> String {
        format!("<h{level}>{text}</h{level}>")
    }

    fn list_item(&self, text: &str) -> String {
        format!("<li>{text}</li>")
    }

    fn quote(&self, text: &str) -> String {
        format!("<quote>{text}</quote>")
    }

    fn inline_code(&self, text: &str) -> String {
        format!("<code>{text}</code>")
    }

    fn block_code(&self, code: &str, language: Option<&str>) -> String {
        match language {
            Some(language) => format!("<pre lang=\"{language}\">{code}</pre>"),
            None => format!("<pre>{code}</pre>"),
        }
    }

    fn bold(&self, text: &str) -> String {
        format!("<b>{text}</b>")
    }

    fn italic(&self, text: &str) -> String {
        format!("<i>{text}</i>")
    }

    fn caption(&self, text: &str) -> String {
        format!("<small>{text}</small>")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_deep_headings_share_last_style() {
        let fixture = Theme::dark();
        let actual = fixture.heading_style(9).bold;
        assert!(actual);
        assert_eq!(fixture.heading_style(0).fg, Some(Color::Magenta));
    }

    #[test]
    fn test_block_code_styles_each_line() {
        colored::control::set_override(false);
        let fixture = Theme::dark();
        let actual = fixture.block_code("a\nb", Some("rust"));
        let expected = "a\nb";
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_block_code_keeps_trailing_empty_line() {
        colored::control::set_override(false);
        let fixture = Theme::dark();
        assert_eq!(fixture.block_code("a\n", None), "a\n");
        assert_eq!(fixture.block_code("", None), "");
    }
}
