//! # lintrun_core
//!
//! Lint side of lintrun.
//!
//! This crate provides:
//! - `tslint.json`-style configuration loading and per-file resolution
//! - Glob-based file discovery
//! - The [`LintEngine`] capability and the built-in [`RuleEngine`]
//! - The [`Linter`] accumulator producing a [`LintResult`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::path::Path;
//! use lintrun_core::{RuleEngine, lint_pattern};
//!
//! let config = Path::new("tslint.json");
//! let result = lint_pattern("src/**/*.ts", Some(config), Path::new("."), RuleEngine::new())?;
//! println!("{} error(s), {} warning(s)", result.error_count, result.warning_count);
//! ```

pub mod config;
mod error;
mod failure;
pub mod file_finder;
mod linter;
mod result;
pub mod rules;

pub use config::{ConfigResolver, LintConfig, RuleSetting};
pub use error::LinterError;
pub use failure::{LintFailure, Position, RuleSeverity};
pub use linter::{LintEngine, Linter, RuleEngine, lint_pattern};
pub use result::LintResult;
