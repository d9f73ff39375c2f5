//! Mapping lint failures to check-run annotations.

use lintrun_core::{LintFailure, RuleSeverity};
use serde::{Deserialize, Serialize};

/// Level of a check-run annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationLevel {
    Notice,
    Warning,
    Failure,
}

impl AnnotationLevel {
    /// Maps a rule severity to an annotation level.
    ///
    /// | severity | level     |
    /// |----------|-----------|
    /// | warning  | `warning` |
    /// | error    | `failure` |
    /// | anything else, or none | `notice` |
    pub fn from_severity(severity: Option<RuleSeverity>) -> Self {
        match severity {
            Some(RuleSeverity::Warning) => Self::Warning,
            Some(RuleSeverity::Error) => Self::Failure,
            _ => Self::Notice,
        }
    }
}

/// One annotation as sent to the check-runs API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
    pub annotation_level: AnnotationLevel,
    pub message: String,
}

impl From<&LintFailure> for Annotation {
    fn from(failure: &LintFailure) -> Self {
        Self {
            path: failure.file_name.clone(),
            start_line: failure.start.line,
            end_line: failure.end.line,
            annotation_level: AnnotationLevel::from_severity(Some(failure.rule_severity)),
            message: format!("[{}] {}", failure.rule_name, failure.failure),
        }
    }
}

/// Converts failures to annotations, preserving order.
pub fn annotations(failures: &[LintFailure]) -> Vec<Annotation> {
    failures.iter().map(Annotation::from).collect()
}
