//! CLI argument definitions
//!
//! Every option falls back to the `INPUT_*` variable the Actions runner
//! sets for the matching action input.

use clap::Parser;
use lintrun_checks::DEFAULT_CHECK_NAME;

/// lintrun - lint files and report the findings as a GitHub check run
#[derive(Debug, Parser)]
#[command(name = "lintrun")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Lint configuration file (tslint.json format)
    #[arg(short, long, env = "INPUT_TSLINTCONFIGFILE")]
    pub config: Option<String>,

    /// Glob pattern selecting the files to lint
    #[arg(short, long, env = "INPUT_PATTERN")]
    pub pattern: Option<String>,

    /// Token for the GitHub check-runs API
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Name of the check run
    #[arg(long, env = "INPUT_NAME", default_value = DEFAULT_CHECK_NAME)]
    pub name: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
