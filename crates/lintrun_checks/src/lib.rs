//! # lintrun_checks
//!
//! Reports lint results to GitHub as check runs: maps failures to
//! annotations, creates the check run and completes it in batches of at
//! most [`MAX_ANNOTATIONS`].

pub mod annotation;
pub mod client;
pub mod context;
pub mod error;
pub mod model;
pub mod reporter;

pub use annotation::{Annotation, AnnotationLevel, annotations};
pub use client::{CheckRuns, GitHubClient};
pub use context::RepoContext;
pub use error::ChecksError;
pub use model::{
    CheckRun, CheckRunOutput, CheckRunStatus, Conclusion, CreateCheckRun, UpdateCheckRun,
};
pub use reporter::{DEFAULT_CHECK_NAME, MAX_ANNOTATIONS, Reporter, batches, summary};
