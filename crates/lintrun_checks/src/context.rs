//! Repository context of the running workflow.

use crate::ChecksError;

/// Default REST endpoint when `GITHUB_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Repository, commit and API endpoint a check run is reported against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoContext {
    pub owner: String,
    pub repo: String,
    pub sha: String,
    pub api_url: String,
}

impl RepoContext {
    /// Reads `GITHUB_REPOSITORY`, `GITHUB_SHA` and `GITHUB_API_URL`.
    pub fn from_env() -> Result<Self, ChecksError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the context from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ChecksError> {
        let repository = lookup("GITHUB_REPOSITORY")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ChecksError::context("GITHUB_REPOSITORY is not set"))?;

        let (owner, repo) = repository
            .split_once('/')
            .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty() && !repo.contains('/'))
            .ok_or_else(|| {
                ChecksError::context(format!(
                    "GITHUB_REPOSITORY must be 'owner/repo', got '{repository}'"
                ))
            })?;

        let sha = lookup("GITHUB_SHA")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ChecksError::context("GITHUB_SHA is not set"))?;

        let api_url = lookup("GITHUB_API_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            sha,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the check-runs collection of this repository.
    pub fn check_runs_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/check-runs",
            self.api_url, self.owner, self.repo
        )
    }
}
