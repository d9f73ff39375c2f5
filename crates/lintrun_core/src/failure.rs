//! Lint failure types produced by the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity a rule is configured with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    /// Should be reviewed.
    Warning,
    /// Must be fixed.
    #[default]
    Error,
    /// Rule is disabled.
    Off,
}

impl RuleSeverity {
    /// Parses a severity name as written in lint configuration files.
    ///
    /// Accepts `warning`/`warn`, `error` and `off`/`none`, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "warning" | "warn" => Some(Self::Warning),
            "error" => Some(Self::Error),
            "off" | "none" => Some(Self::Off),
            _ => None,
        }
    }

    /// Returns the canonical name of the severity.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for RuleSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A position in source text.
///
/// Lines are 1-indexed, columns are 0-indexed character offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (0-indexed).
    pub column: u32,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A single finding reported by a rule for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintFailure {
    /// Path of the linted file, as it was discovered.
    pub file_name: String,
    /// Start of the offending range.
    pub start: Position,
    /// End of the offending range.
    pub end: Position,
    /// Name of the rule that produced this failure.
    pub rule_name: String,
    /// Severity the rule was configured with.
    pub rule_severity: RuleSeverity,
    /// Human readable message.
    pub failure: String,
}

impl LintFailure {
    pub fn is_error(&self) -> bool {
        self.rule_severity == RuleSeverity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.rule_severity == RuleSeverity::Warning
    }
}
