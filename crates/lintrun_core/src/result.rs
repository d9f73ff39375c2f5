//! Combined lint result.

use serde::{Deserialize, Serialize};

use crate::LintFailure;

/// Failures of every linted file plus their totals per severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintResult {
    /// Failures in the order files were linted.
    pub failures: Vec<LintFailure>,
    /// Number of failures with error severity.
    pub error_count: usize,
    /// Number of failures with warning severity.
    pub warning_count: usize,
}

impl LintResult {
    /// Builds a result, counting severities.
    pub fn new(failures: Vec<LintFailure>) -> Self {
        let error_count = failures.iter().filter(|f| f.is_error()).count();
        let warning_count = failures.iter().filter(|f| f.is_warning()).count();
        Self {
            failures,
            error_count,
            warning_count,
        }
    }
}
