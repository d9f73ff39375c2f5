//! Check-run request and response bodies.

use serde::{Deserialize, Serialize};

use crate::Annotation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckRunStatus {
    Queued,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conclusion {
    Success,
    Failure,
}

impl Conclusion {
    /// `success` when no error-level failure was found.
    pub fn from_error_count(error_count: usize) -> Self {
        if error_count > 0 {
            Self::Failure
        } else {
            Self::Success
        }
    }
}

/// Body of `POST /repos/{owner}/{repo}/check-runs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateCheckRun {
    pub name: String,
    pub head_sha: String,
    pub status: CheckRunStatus,
}

impl CreateCheckRun {
    /// A check run that starts in progress.
    pub fn in_progress(name: impl Into<String>, head_sha: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            head_sha: head_sha.into(),
            status: CheckRunStatus::InProgress,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckRunOutput {
    pub title: String,
    pub summary: String,
    pub annotations: Vec<Annotation>,
}

/// Body of `PATCH /repos/{owner}/{repo}/check-runs/{check_run_id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateCheckRun {
    pub name: String,
    pub status: CheckRunStatus,
    pub conclusion: Conclusion,
    pub output: CheckRunOutput,
}

/// The part of a check-run response this crate uses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckRun {
    pub id: u64,
    #[serde(default)]
    pub status: Option<CheckRunStatus>,
    #[serde(default)]
    pub conclusion: Option<Conclusion>,
}
