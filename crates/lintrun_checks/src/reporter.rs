//! Reporting a lint result to a check run.

use lintrun_core::LintResult;
use tracing::{debug, info};

use crate::ChecksError;
use crate::annotation::{Annotation, annotations};
use crate::client::CheckRuns;
use crate::model::{CheckRunOutput, CheckRunStatus, Conclusion, CreateCheckRun, UpdateCheckRun};

/// Maximum number of annotations the API accepts per update call.
pub const MAX_ANNOTATIONS: usize = 50;

/// Check-run name used when none is configured.
pub const DEFAULT_CHECK_NAME: &str = "TSLint Action";

/// Splits `items` into consecutive slices of at most `size` elements.
///
/// Always yields at least one slice, so an empty input produces a single
/// empty batch.
pub fn batches<T>(items: &[T], size: usize) -> Vec<&[T]> {
    let size = size.max(1);
    if items.len() <= size {
        return vec![items];
    }

    let mut out = Vec::with_capacity(items.len().div_ceil(size));
    let mut start = 0;
    while start < items.len() {
        let end = (start + size).min(items.len());
        out.push(&items[start..end]);
        start = end;
    }
    out
}

/// Summary line shown on the check run.
pub fn summary(result: &LintResult) -> String {
    format!(
        "{} error(s), {} warning(s) found",
        result.error_count, result.warning_count
    )
}

/// Opens and completes one check run.
pub struct Reporter<'a, C> {
    client: &'a C,
    name: String,
    batch_size: usize,
}

impl<'a, C: CheckRuns> Reporter<'a, C> {
    pub fn new(client: &'a C, name: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
            batch_size: MAX_ANNOTATIONS,
        }
    }

    /// Overrides the number of annotations sent per update call.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Creates an in-progress check run for `head_sha` and returns its id.
    pub async fn start(&self, head_sha: &str) -> Result<u64, ChecksError> {
        let run = self
            .client
            .create(&CreateCheckRun::in_progress(&self.name, head_sha))
            .await?;
        info!("Created check run {} for {}", run.id, head_sha);
        Ok(run.id)
    }

    /// Completes the check run with the annotations of `result`.
    ///
    /// Annotations are sent in batches, one update call per batch, awaited
    /// in order. Every call carries the final conclusion and summary.
    /// Returns the number of update calls made.
    pub async fn finish(
        &self,
        check_run_id: u64,
        result: &LintResult,
    ) -> Result<usize, ChecksError> {
        let annotations = annotations(&result.failures);
        let conclusion = Conclusion::from_error_count(result.error_count);
        let summary = summary(result);
        debug!("Conclusion: {:?}, {}", conclusion, summary);

        let batches = batches(&annotations, self.batch_size);
        for (index, batch) in batches.iter().enumerate() {
            debug!(
                "Sending batch {}/{} ({} annotation(s))",
                index + 1,
                batches.len(),
                batch.len()
            );
            let request = self.update_request(conclusion, &summary, batch);
            self.client.update(check_run_id, &request).await?;
        }

        info!(
            "Reported {} annotation(s) to check run {} in {} call(s)",
            annotations.len(),
            check_run_id,
            batches.len()
        );
        Ok(batches.len())
    }

    fn update_request(
        &self,
        conclusion: Conclusion,
        summary: &str,
        batch: &[Annotation],
    ) -> UpdateCheckRun {
        UpdateCheckRun {
            name: self.name.clone(),
            status: CheckRunStatus::Completed,
            conclusion,
            output: CheckRunOutput {
                title: self.name.clone(),
                summary: summary.to_string(),
                annotations: batch.to_vec(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CheckRun;
    use lintrun_core::{LintFailure, Position, RuleSeverity};
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    /// Records every call; optionally fails the n-th update.
    #[derive(Default)]
    struct RecordingChecks {
        creates: Mutex<Vec<CreateCheckRun>>,
        updates: Mutex<Vec<(u64, UpdateCheckRun)>>,
        fail_update_at: Option<usize>,
    }

    impl CheckRuns for RecordingChecks {
        async fn create(&self, request: &CreateCheckRun) -> Result<CheckRun, ChecksError> {
            self.creates.lock().unwrap().push(request.clone());
            Ok(CheckRun {
                id: 7,
                status: Some(CheckRunStatus::InProgress),
                conclusion: None,
            })
        }

        async fn update(
            &self,
            check_run_id: u64,
            request: &UpdateCheckRun,
        ) -> Result<CheckRun, ChecksError> {
            let mut updates = self.updates.lock().unwrap();
            if self.fail_update_at == Some(updates.len()) {
                return Err(ChecksError::Api {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            updates.push((check_run_id, request.clone()));
            Ok(CheckRun {
                id: check_run_id,
                status: Some(CheckRunStatus::Completed),
                conclusion: Some(request.conclusion),
            })
        }
    }

    fn result(errors: usize, warnings: usize) -> LintResult {
        let failure = |i: usize, severity| LintFailure {
            file_name: format!("src/file{i}.ts"),
            start: Position::new(u32::try_from(i).unwrap() + 1, 0),
            end: Position::new(u32::try_from(i).unwrap() + 1, 1),
            rule_name: "rule".to_string(),
            rule_severity: severity,
            failure: format!("failure {i}"),
        };
        let failures = (0..errors)
            .map(|i| failure(i, RuleSeverity::Error))
            .chain((errors..errors + warnings).map(|i| failure(i, RuleSeverity::Warning)))
            .collect();
        LintResult::new(failures)
    }

    fn batch_sizes(client: &RecordingChecks) -> Vec<usize> {
        client
            .updates
            .lock()
            .unwrap()
            .iter()
            .map(|(_, u)| u.output.annotations.len())
            .collect()
    }

    #[test]
    fn test_batches_empty_input_yields_one_empty_batch() {
        let items: Vec<u32> = Vec::new();
        let out = batches(&items, 50);
        assert_eq!(out.len(), 1);
        assert!(out[0].is_empty());
    }

    #[test]
    fn test_batches_preserve_order_without_overlap() {
        let items: Vec<u32> = (0..130).collect();
        let out = batches(&items, 50);

        let sizes: Vec<usize> = out.iter().map(|b| b.len()).collect();
        assert_eq!(sizes, vec![50, 50, 30]);
        assert_eq!(out.concat(), items);
    }

    #[test]
    fn test_batches_exact_multiple() {
        let items: Vec<u32> = (0..100).collect();
        let sizes: Vec<usize> = batches(&items, 50).iter().map(|b| b.len()).collect();
        assert_eq!(sizes, vec![50, 50]);
    }

    #[test]
    fn test_summary() {
        assert_eq!(summary(&result(2, 3)), "2 error(s), 3 warning(s) found");
    }

    #[tokio::test]
    async fn test_start_creates_in_progress_run() {
        let client = RecordingChecks::default();
        let reporter = Reporter::new(&client, DEFAULT_CHECK_NAME);

        let id = reporter.start("abc123").await.unwrap();

        assert_eq!(id, 7);
        assert_eq!(
            client.creates.lock().unwrap().as_slice(),
            &[CreateCheckRun::in_progress("TSLint Action", "abc123")]
        );
    }

    #[tokio::test]
    async fn test_empty_result_sends_one_successful_update() {
        let client = RecordingChecks::default();
        let reporter = Reporter::new(&client, DEFAULT_CHECK_NAME);

        let calls = reporter.finish(7, &LintResult::default()).await.unwrap();

        assert_eq!(calls, 1);
        let updates = client.updates.lock().unwrap();
        let (id, update) = &updates[0];
        assert_eq!(*id, 7);
        assert_eq!(update.status, CheckRunStatus::Completed);
        assert_eq!(update.conclusion, Conclusion::Success);
        assert_eq!(update.output.title, "TSLint Action");
        assert_eq!(update.output.summary, "0 error(s), 0 warning(s) found");
        assert!(update.output.annotations.is_empty());
    }

    #[tokio::test]
    async fn test_up_to_fifty_annotations_in_one_call() {
        let client = RecordingChecks::default();
        let reporter = Reporter::new(&client, DEFAULT_CHECK_NAME);

        reporter.finish(7, &result(0, 50)).await.unwrap();

        assert_eq!(batch_sizes(&client), vec![50]);
        let updates = client.updates.lock().unwrap();
        assert_eq!(updates[0].1.conclusion, Conclusion::Success);
    }

    #[tokio::test]
    async fn test_fifty_one_annotations_in_two_calls() {
        let client = RecordingChecks::default();
        let reporter = Reporter::new(&client, DEFAULT_CHECK_NAME);

        let calls = reporter.finish(7, &result(1, 50)).await.unwrap();

        assert_eq!(calls, 2);
        assert_eq!(batch_sizes(&client), vec![50, 1]);
        let updates = client.updates.lock().unwrap();
        for (id, update) in updates.iter() {
            assert_eq!(*id, 7);
            assert_eq!(update.conclusion, Conclusion::Failure);
            assert_eq!(update.output.summary, "1 error(s), 50 warning(s) found");
        }
    }

    #[tokio::test]
    async fn test_batches_are_sent_in_order() {
        let client = RecordingChecks::default();
        let reporter = Reporter::new(&client, DEFAULT_CHECK_NAME);
        let result = result(30, 100);

        reporter.finish(7, &result).await.unwrap();

        assert_eq!(batch_sizes(&client), vec![50, 50, 30]);
        let sent: Vec<Annotation> = client
            .updates
            .lock()
            .unwrap()
            .iter()
            .flat_map(|(_, u)| u.output.annotations.clone())
            .collect();
        assert_eq!(sent, annotations(&result.failures));
    }

    #[tokio::test]
    async fn test_custom_batch_size() {
        let client = RecordingChecks::default();
        let reporter = Reporter::new(&client, "Lint").with_batch_size(2);

        reporter.finish(7, &result(5, 0)).await.unwrap();

        assert_eq!(batch_sizes(&client), vec![2, 2, 1]);
    }

    #[tokio::test]
    async fn test_failed_update_stops_remaining_batches() {
        let client = RecordingChecks {
            fail_update_at: Some(1),
            ..RecordingChecks::default()
        };
        let reporter = Reporter::new(&client, DEFAULT_CHECK_NAME);

        let err = reporter.finish(7, &result(0, 130)).await.unwrap_err();

        assert!(matches!(err, ChecksError::Api { status: 500, .. }));
        assert_eq!(batch_sizes(&client), vec![50]);
    }
}
