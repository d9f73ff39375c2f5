//! no-console: disallow calls to `console` methods.
//!
//! # Configuration
//!
//! `true` bans every method; `[true, "log", "debug"]` bans only the listed ones.

use serde_json::Value;

use super::{Rule, RuleFailure, column_at, is_ident_char, numbered_lines};

const PREFIX: &str = "console.";

pub struct NoConsole;

impl NoConsole {
    pub const NAME: &'static str = "no-console";
}

impl Rule for NoConsole {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check(&self, source: &str, options: &[Value]) -> Vec<RuleFailure> {
        let banned: Vec<&str> = options.iter().filter_map(Value::as_str).collect();
        let mut failures = Vec::new();

        for (line, text) in numbered_lines(source) {
            for (offset, _) in text.match_indices(PREFIX) {
                let before = text[..offset].chars().next_back();
                if before.is_some_and(|c| is_ident_char(c) || c == '.') {
                    continue;
                }

                let rest = &text[offset + PREFIX.len()..];
                let method_len = rest
                    .char_indices()
                    .find(|(_, c)| !is_ident_char(*c))
                    .map_or(rest.len(), |(i, _)| i);
                let method = &rest[..method_len];
                if method.is_empty() || (!banned.is_empty() && !banned.contains(&method)) {
                    continue;
                }

                failures.push(RuleFailure::on_line(
                    line,
                    column_at(text, offset),
                    column_at(text, offset + PREFIX.len() + method_len),
                    format!("Calls to 'console.{method}' are not allowed."),
                ));
            }
        }

        failures
    }
}
