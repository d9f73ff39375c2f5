//! Built-in text rules.
//!
//! Rules work on raw source text, one line at a time, and report ranges as
//! [`Position`]s. Severity is not a rule concern; the engine attaches the
//! configured severity to every finding.

mod eofline;
mod max_line_length;
mod no_console;
mod no_debugger;
mod no_todo;
mod no_trailing_whitespace;

use serde_json::Value;

use crate::Position;

pub use eofline::Eofline;
pub use max_line_length::MaxLineLength;
pub use no_console::NoConsole;
pub use no_debugger::NoDebugger;
pub use no_todo::NoTodo;
pub use no_trailing_whitespace::NoTrailingWhitespace;

/// Names of every built-in rule.
pub const BUILTIN_RULES: &[&str] = &[
    Eofline::NAME,
    MaxLineLength::NAME,
    NoConsole::NAME,
    NoDebugger::NAME,
    NoTodo::NAME,
    NoTrailingWhitespace::NAME,
];

/// A range reported by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFailure {
    pub start: Position,
    pub end: Position,
    pub message: String,
}

impl RuleFailure {
    pub fn new(start: Position, end: Position, message: impl Into<String>) -> Self {
        Self {
            start,
            end,
            message: message.into(),
        }
    }

    /// A failure spanning `start..end` character columns of a single line.
    pub fn on_line(line: u32, start: u32, end: u32, message: impl Into<String>) -> Self {
        Self::new(Position::new(line, start), Position::new(line, end), message)
    }
}

/// A lint rule over source text.
pub trait Rule: Send + Sync {
    /// Name used to enable the rule in configuration.
    fn name(&self) -> &'static str;

    /// Checks `source` with the configured `options`.
    fn check(&self, source: &str, options: &[Value]) -> Vec<RuleFailure>;
}

/// Returns an instance of every built-in rule.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(Eofline),
        Box::new(MaxLineLength),
        Box::new(NoConsole),
        Box::new(NoDebugger),
        Box::new(NoTodo),
        Box::new(NoTrailingWhitespace),
    ]
}

/// Iterates `(line number, line)` pairs with 1-indexed line numbers.
pub(crate) fn numbered_lines(source: &str) -> impl Iterator<Item = (u32, &str)> {
    source
        .lines()
        .enumerate()
        .map(|(index, line)| (u32::try_from(index + 1).unwrap_or(u32::MAX), line))
}

/// Number of characters in `text`, saturating at `u32::MAX`.
pub(crate) fn char_len(text: &str) -> u32 {
    u32::try_from(text.chars().count()).unwrap_or(u32::MAX)
}

/// Converts a byte offset within `line` into a character column.
pub(crate) fn column_at(line: &str, byte_offset: usize) -> u32 {
    char_len(&line[..byte_offset])
}

pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Byte offsets of `word` in `line` that are not part of a longer identifier.
pub(crate) fn word_matches<'a>(line: &'a str, word: &'a str) -> impl Iterator<Item = usize> + 'a {
    line.match_indices(word).filter_map(move |(offset, _)| {
        let before = line[..offset].chars().next_back();
        let after = line[offset + word.len()..].chars().next();
        let standalone = !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char);
        standalone.then_some(offset)
    })
}
