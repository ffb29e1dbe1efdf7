//! Terminal styling for doublon.
//!
//! Highlights the TOML and JSON the CLI prints, and wraps short strings in ANSI styles for
//! headers, match labels and warnings.

#![warn(missing_docs)]

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::{SyntaxReference, SyntaxSet},
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// Highlights structured text for the terminal.
pub struct Highlighter {
    /// Language definitions, including TOML.
    syntax_set: SyntaxSet,
    /// Bundled color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// Active theme.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter using the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights a TOML document, such as a config file.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights a JSON document, such as a search result bundle.
    pub fn highlight_json(&self, content: &str) -> String {
        self.highlight(content, "json")
    }

    /// Highlights `content` as the syntax named or extended by `syntax_name`.
    ///
    /// Unknown syntaxes fall back to plain text.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        let syntax = self.find_syntax(syntax_name);
        let theme = self.theme_set.get(self.theme);
        let mut lines = HighlightLines::new(syntax, theme);

        let mut output = String::with_capacity(content.len() * 2);
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = lines
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }

    /// Looks a syntax up by extension, then by name.
    fn find_syntax(&self, syntax_name: &str) -> &SyntaxReference {
        self.syntax_set
            .find_syntax_by_extension(syntax_name)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax_name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }
}

/// ANSI escape sequences.
pub mod colors {
    /// Bold.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan, for headers.
    pub const CYAN: &str = "\x1b[36m";
    /// Green, for strong matches and success.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow, for medium matches and warnings.
    pub const YELLOW: &str = "\x1b[33m";
    /// Red, for errors.
    pub const RED: &str = "\x1b[31m";
    /// Dim.
    pub const DIM: &str = "\x1b[2m";
    /// Clears all styling.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps `text` in `style` followed by a reset.
fn paint(style: &str, text: &str) -> String {
    format!("{style}{text}{}", colors::RESET)
}

/// Bold cyan section header.
pub fn header(text: &str) -> String {
    paint(&format!("{}{}", colors::BOLD, colors::CYAN), text)
}

/// Bold subheader.
pub fn subheader(text: &str) -> String {
    paint(colors::BOLD, text)
}

/// Dimmed secondary text.
pub fn dim(text: &str) -> String {
    paint(colors::DIM, text)
}

/// Green text.
pub fn success(text: &str) -> String {
    paint(colors::GREEN, text)
}

/// Yellow text.
pub fn warning(text: &str) -> String {
    paint(colors::YELLOW, text)
}

/// Red text.
pub fn error(text: &str) -> String {
    paint(colors::RED, text)
}

/// Indents every line of `content` by two spaces.
pub fn indent_content(content: &str) -> String {
    content
        .lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
