//! no-debugger: disallow `debugger` statements.

use serde_json::Value;

use super::{Rule, RuleFailure, column_at, numbered_lines, word_matches};

const KEYWORD: &str = "debugger";

pub struct NoDebugger;

impl NoDebugger {
    pub const NAME: &'static str = "no-debugger";
}

impl Rule for NoDebugger {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn check(&self, source: &str, _options: &[Value]) -> Vec<RuleFailure> {
        let mut failures = Vec::new();
        for (line, text) in numbered_lines(source) {
            for offset in word_matches(text, KEYWORD) {
                let start = column_at(text, offset);
                failures.push(RuleFailure::on_line(
                    line,
                    start,
                    column_at(text, offset + KEYWORD.len()),
                    "Use of debugger statements is forbidden",
                ));
            }
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_statement() {
        let failures = NoDebugger.check("if (x) {\n    debugger;\n}\n", &[]);

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].start.line, 2);
        assert_eq!(failures[0].start.column, 4);
        assert_eq!(failures[0].end.column, 12);
    }

    #[test]
    fn test_ignores_identifiers_containing_keyword() {
        assert!(NoDebugger.check("const isDebugger = debuggerEnabled;\n", &[]).is_empty());
    }
}
