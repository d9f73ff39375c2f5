//! eofline: files must end with a newline.

use serde_json::Value;

use super::{Rule, RuleFailure, char_len, numbered_lines};

pub struct Eofline;

impl Eofline {
    pub const NAME: &'static str = "eofline";
}

impl Rule for Eofline {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check(&self, source: &str, _options: &[Value]) -> Vec<RuleFailure> {
        if source.is_empty() || source.ends_with('\n') {
            return Vec::new();
        }

        let (line, text) = numbered_lines(source).last().unwrap_or((1, ""));
        let end = char_len(text);
        vec![RuleFailure::on_line(
            line,
            end,
            end,
            "file should end with a newline",
        )]
    }
}
