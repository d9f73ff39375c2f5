//! The lint-and-report pipeline.

use std::path::Path;

use lintrun_checks::{CheckRuns, RepoContext, Reporter};
use lintrun_core::{LintEngine, LintResult, lint_pattern};
use miette::{IntoDiagnostic, Result};
use tracing::{debug, info};

use crate::inputs::Inputs;

/// What a completed run reported.
#[derive(Debug)]
pub struct RunOutcome {
    pub check_run_id: u64,
    pub result: LintResult,
    pub update_calls: usize,
}

/// Creates the check run, lints the matching files and reports the result.
///
/// Any error stops the pipeline; updates already sent are left as they are.
pub async fn run<C, E>(
    inputs: &Inputs,
    context: &RepoContext,
    client: &C,
    engine: E,
    base_dir: &Path,
) -> Result<RunOutcome>
where
    C: CheckRuns,
    E: LintEngine,
{
    debug!("Lint config file: {:?}", inputs.config_file);
    debug!("Pattern: {}", inputs.pattern);

    let reporter = Reporter::new(client, &inputs.name);
    let check_run_id = reporter.start(&context.sha).await.into_diagnostic()?;

    let result = lint_pattern(
        &inputs.pattern,
        inputs.config_file.as_deref(),
        base_dir,
        engine,
    )
    .into_diagnostic()?;
    info!(
        "{} error(s), {} warning(s) in {} failure(s)",
        result.error_count,
        result.warning_count,
        result.failures.len()
    );

    let update_calls = reporter
        .finish(check_run_id, &result)
        .await
        .into_diagnostic()?;

    Ok(RunOutcome {
        check_run_id,
        result,
        update_calls,
    })
}
