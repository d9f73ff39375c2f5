//! no-trailing-whitespace: disallow whitespace at the end of lines.

use serde_json::Value;

use super::{Rule, RuleFailure, char_len, numbered_lines};

pub struct NoTrailingWhitespace;

impl NoTrailingWhitespace {
    pub const NAME: &'static str = "no-trailing-whitespace";
}

impl Rule for NoTrailingWhitespace {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check(&self, source: &str, _options: &[Value]) -> Vec<RuleFailure> {
        numbered_lines(source)
            .filter_map(|(line, text)| {
                let trimmed = text.trim_end();
                (trimmed.len() < text.len()).then(|| {
                    RuleFailure::on_line(
                        line,
                        char_len(trimmed),
                        char_len(text),
                        "trailing whitespace",
                    )
                })
            })
            .collect()
    }
}
