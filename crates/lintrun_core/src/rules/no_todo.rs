//! no-todo: disallow TODO/FIXME markers.
//!
//! # Configuration
//!
//! | Option | Type | Default | Description |
//! |--------|------|---------|-------------|
//! | patterns | string[] | ["TODO:", "TODO ", "FIXME:", "FIXME ", "XXX:", "XXX "] | Patterns to detect |
//! | ignore_patterns | string[] | [] | Patterns to ignore |
//! | case_sensitive | boolean | false | Case-sensitive matching |

use serde::Deserialize;
use serde_json::Value;

use super::{Rule, RuleFailure, column_at, numbered_lines};

/// Default patterns to detect.
const DEFAULT_PATTERNS: &[&str] = &["TODO:", "TODO ", "FIXME:", "FIXME ", "XXX:", "XXX "];

#[derive(Debug, Deserialize, Default)]
struct Config {
    #[serde(default)]
    patterns: Vec<String>,
    #[serde(default)]
    ignore_patterns: Vec<String>,
    #[serde(default)]
    case_sensitive: bool,
}

impl Config {
    fn from_options(options: &[Value]) -> Self {
        options
            .first()
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or_default()
    }

    fn effective_patterns(&self) -> Vec<String> {
        if self.patterns.is_empty() {
            DEFAULT_PATTERNS.iter().map(|s| (*s).to_string()).collect()
        } else {
            self.patterns.clone()
        }
    }

    fn should_ignore(&self, line: &str) -> bool {
        self.ignore_patterns.iter().any(|p| line.contains(p.as_str()))
    }
}

pub struct NoTodo;

impl NoTodo {
    pub const NAME: &'static str = "no-todo";
}

impl Rule for NoTodo {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check(&self, source: &str, options: &[Value]) -> Vec<RuleFailure> {
        let config = Config::from_options(options);
        let patterns = config.effective_patterns();
        let mut failures = Vec::new();

        for (line, text) in numbered_lines(source) {
            if config.should_ignore(text) {
                continue;
            }

            // ASCII folding keeps byte offsets valid in the original line.
            let haystack = if config.case_sensitive {
                text.to_string()
            } else {
                text.to_ascii_lowercase()
            };

            let mut hits: Vec<(usize, usize)> = Vec::new();
            for pattern in &patterns {
                let needle = if config.case_sensitive {
                    pattern.clone()
                } else {
                    pattern.to_ascii_lowercase()
                };
                if needle.is_empty() {
                    continue;
                }
                for (offset, _) in haystack.match_indices(needle.as_str()) {
                    if !hits.iter().any(|(start, _)| *start == offset) {
                        hits.push((offset, offset + needle.len()));
                    }
                }
            }
            hits.sort_unstable();

            for (start, end) in hits {
                let matched = text[start..end].trim();
                failures.push(RuleFailure::on_line(
                    line,
                    column_at(text, start),
                    column_at(text, end),
                    format!(
                        "Found '{}' comment. Consider resolving this before committing.",
                        matched.trim_end_matches(':')
                    ),
                ));
            }
        }

        failures
    }
}
