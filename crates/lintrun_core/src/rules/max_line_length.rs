//! max-line-length: limit the number of characters on a line.
//!
//! # Configuration
//!
//! `[true, 100]` or `[true, { "limit": 100 }]`. The default limit is 120.

use serde_json::Value;

use super::{Rule, RuleFailure, char_len, numbered_lines};

const DEFAULT_LIMIT: u64 = 120;

pub struct MaxLineLength;

impl MaxLineLength {
    pub const NAME: &'static str = "max-line-length";

    fn limit(options: &[Value]) -> u64 {
        match options.first() {
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::Object(map)) => map.get("limit").and_then(Value::as_u64),
            _ => None,
        }
        .unwrap_or(DEFAULT_LIMIT)
    }
}

impl Rule for MaxLineLength {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check(&self, source: &str, options: &[Value]) -> Vec<RuleFailure> {
        let limit = Self::limit(options);

        numbered_lines(source)
            .filter_map(|(line, text)| {
                let len = char_len(text);
                (u64::from(len) > limit).then(|| {
                    RuleFailure::on_line(
                        line,
                        0,
                        len,
                        format!("Exceeds maximum line length of {limit}"),
                    )
                })
            })
            .collect()
    }
}
