//! Validation of the action inputs.

use std::path::PathBuf;

use thiserror::Error;

use crate::cli::Cli;

/// A required input is missing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("lintrun: Please set the 'pattern' input")]
    MissingPattern,

    #[error("lintrun: Please set the 'token' input")]
    MissingToken,
}

/// Validated inputs of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inputs {
    pub config_file: Option<PathBuf>,
    pub pattern: String,
    pub token: String,
    pub name: String,
}

impl Inputs {
    /// Checks that `pattern` and `token` are present and non-empty.
    pub fn from_cli(cli: &Cli) -> Result<Self, InputError> {
        let pattern = non_empty(cli.pattern.as_deref()).ok_or(InputError::MissingPattern)?;
        let token = non_empty(cli.token.as_deref()).ok_or(InputError::MissingToken)?;

        Ok(Self {
            config_file: non_empty(cli.config.as_deref()).map(PathBuf::from),
            pattern: pattern.to_string(),
            token: token.to_string(),
            name: cli.name.clone(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
