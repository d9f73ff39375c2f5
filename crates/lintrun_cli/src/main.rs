//! lintrun CLI
//!
//! Lints files matched by a glob pattern and reports the findings as a
//! GitHub check run.

mod actions;
mod cli;
mod inputs;
mod pipeline;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use lintrun_checks::{GitHubClient, RepoContext};
use lintrun_core::RuleEngine;
use miette::{IntoDiagnostic, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::inputs::Inputs;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose || actions::is_debug() {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:?}", e);
            actions::set_failed(&e.to_string());
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let inputs = Inputs::from_cli(&cli).into_diagnostic()?;
    let context = RepoContext::from_env().into_diagnostic()?;
    let client = GitHubClient::new(&inputs.token, &context).into_diagnostic()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .into_diagnostic()?;

    let outcome = runtime.block_on(pipeline::run(
        &inputs,
        &context,
        &client,
        RuleEngine::new(),
        Path::new("."),
    ))?;

    info!(
        "Check run {} completed: {} error(s), {} warning(s) in {} update(s)",
        outcome.check_run_id,
        outcome.result.error_count,
        outcome.result.warning_count,
        outcome.update_calls
    );
    Ok(())
}
