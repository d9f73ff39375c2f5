//! Check-runs API client.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::debug;

use crate::ChecksError;
use crate::context::RepoContext;
use crate::model::{CheckRun, CreateCheckRun, UpdateCheckRun};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const API_VERSION: &str = "2022-11-28";

/// Operations on the check runs of one repository.
pub trait CheckRuns {
    /// Creates a check run.
    fn create(
        &self,
        request: &CreateCheckRun,
    ) -> impl Future<Output = Result<CheckRun, ChecksError>> + Send;

    /// Updates an existing check run.
    fn update(
        &self,
        check_run_id: u64,
        request: &UpdateCheckRun,
    ) -> impl Future<Output = Result<CheckRun, ChecksError>> + Send;
}

/// GitHub REST client for the check runs of one repository.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    check_runs_url: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GitHubClient {
    /// Creates a client authenticated with `token`.
    pub fn new(token: &str, context: &RepoContext) -> Result<Self, ChecksError> {
        Self::with_timeout(token, context, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        token: &str,
        context: &RepoContext,
        timeout: Duration,
    ) -> Result<Self, ChecksError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| ChecksError::ClientBuild(format!("invalid token: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            HeaderName::from_static("x-github-api-version"),
            HeaderValue::from_static(API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("lintrun/", env!("CARGO_PKG_VERSION"))),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ChecksError::ClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            check_runs_url: context.check_runs_url(),
        })
    }

    async fn into_check_run(response: reqwest::Response) -> Result<CheckRun, ChecksError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<CheckRun>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or(body);

        Err(ChecksError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl CheckRuns for GitHubClient {
    async fn create(&self, request: &CreateCheckRun) -> Result<CheckRun, ChecksError> {
        debug!("POST {} ({})", self.check_runs_url, request.name);
        let response = self
            .http
            .post(&self.check_runs_url)
            .json(request)
            .send()
            .await?;
        let run = Self::into_check_run(response).await?;
        debug!("Created check run {}", run.id);
        Ok(run)
    }

    async fn update(
        &self,
        check_run_id: u64,
        request: &UpdateCheckRun,
    ) -> Result<CheckRun, ChecksError> {
        let url = format!("{}/{}", self.check_runs_url, check_run_id);
        debug!(
            "PATCH {} ({} annotation(s), conclusion {:?})",
            url,
            request.output.annotations.len(),
            request.conclusion
        );
        let response = self.http.patch(&url).json(request).send().await?;
        Self::into_check_run(response).await
    }
}
