//! Code block syntax highlighting.

use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::as_24_bit_terminal_escaped;

use crate::style::SpanStyler;

const RESET: &str = "\x1b[0m";

/// Terminal theme mode (dark or light).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    /// Dark terminal background.
    Dark,
    /// Light terminal background.
    Light,
}

/// Detects the terminal theme mode (dark or light).
pub fn detect_theme_mode() -> ThemeMode {
    use terminal_colorsaurus::{QueryOptions, ThemeMode as ColorsaurusThemeMode, theme_mode};

    match theme_mode(QueryOptions::default()) {
        Ok(ColorsaurusThemeMode::Light) => ThemeMode::Light,
        Ok(ColorsaurusThemeMode::Dark) | Err(_) => ThemeMode::Dark,
    }
}

/// Code block highlighter using syntect.
pub struct CodeHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_mode: ThemeMode,
}

impl Default for CodeHighlighter {
    fn default() -> Self {
        Self::new(detect_theme_mode())
    }
}

impl CodeHighlighter {
    pub fn new(theme_mode: ThemeMode) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_mode,
        }
    }

    fn syntax(&self, language: &str) -> Option<&SyntaxReference> {
        self.syntax_set.find_syntax_by_token(language)
    }

    /// Highlight a whole block. Returns `None` when the language is unknown
    /// or highlighting fails, so the caller can fall back to its own style.
    pub fn highlight(&self, code: &str, language: &str) -> Option<String> {
        let syntax = self.syntax(language)?;
        let theme_name = match self.theme_mode {
            ThemeMode::Dark => "base16-ocean.dark",
            ThemeMode::Light => "InspiredGitHub",
        };
        let theme = self.theme_set.themes.get(theme_name)?;
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut lines = Vec::new();
        for line in code.split('\n') {
            // The newline-aware syntaxes expect each line to end with `\n`.
            let with_newline = format!("{line}\n");
            let ranges = highlighter.highlight_line(&with_newline, &self.syntax_set).ok()?;
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            lines.push(format!("{}{RESET}", escaped.trim_end_matches('\n')));
        }
        Some(lines.join("\n"))
    }
}

/// Wraps a styler and syntax-highlights code blocks whose language syntect
/// knows. Everything else goes to the wrapped styler.
pub struct Highlighted<S> {
    inner: S,
    highlighter: CodeHighlighter,
}

impl<S> Highlighted<S> {
    pub fn new(inner: S, highlighter: CodeHighlighter) -> Self {
        Self { inner, highlighter }
    }
}

impl<S: SpanStyler> SpanStyler for Highlighted<S> {
    fn plain(&self, text: &str) -> String {
        self.inner.plain(text)
    }

    fn heading(&self, level: u8, text: &str) -> String {
        self.inner.heading(level, text)
    }

    fn list_item(&self, text: &str) -> String {
        self.inner.list_item(text)
    }

    fn quote(&self, text: &str) -> String {
        self.inner.quote(text)
    }

    fn inline_code(&self, text: &str) -> String {
        self.inner.inline_code(text)
    }

    fn block_code(&self, code: &str, language: Option<&str>) -> String {
        language
            .and_then(|language| self.highlighter.highlight(code, language))
            .unwrap_or_else(|| self.inner.block_code(code, language))
    }

    fn bold(&self, text: &str) -> String {
        self.inner.bold(text)
    }

    fn italic(&self, text: &str) -> String {
        self.inner.italic(text)
    }

    fn caption(&self, text: &str) -> String {
        self.inner.caption(text)
    }
}
