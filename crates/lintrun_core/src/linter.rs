//! Lint execution.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::{ConfigResolver, LintConfig};
use crate::file_finder::FileFinder;
use crate::rules::{Rule, builtin_rules};
use crate::{LintFailure, LintResult, LinterError};

/// A linting engine: turns one file's contents into failures.
///
/// Rule evaluation and how configuration is interpreted belong to the
/// engine; [`Linter`] only feeds it files and accumulates the output.
pub trait LintEngine {
    fn lint(
        &self,
        file: &Path,
        contents: &str,
        config: &LintConfig,
    ) -> Result<Vec<LintFailure>, LinterError>;
}

/// Engine backed by the built-in text rules.
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    pub fn new() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Creates an engine with a custom rule set.
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    fn rule(&self, name: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|rule| rule.name() == name)
            .map(|rule| rule.as_ref())
    }
}

impl LintEngine for RuleEngine {
    fn lint(
        &self,
        file: &Path,
        contents: &str,
        config: &LintConfig,
    ) -> Result<Vec<LintFailure>, LinterError> {
        let file_name = file.to_string_lossy().into_owned();
        let mut failures = Vec::new();

        for (name, setting) in config.enabled_rules() {
            let Some(rule) = self.rule(name) else {
                debug!("Unknown rule '{}', skipping", name);
                continue;
            };

            failures.extend(rule.check(contents, &setting.options).into_iter().map(|f| {
                LintFailure {
                    file_name: file_name.clone(),
                    start: f.start,
                    end: f.end,
                    rule_name: name.to_string(),
                    rule_severity: setting.severity,
                    failure: f.message,
                }
            }));
        }

        failures.sort_by_key(|f| f.start);
        Ok(failures)
    }
}

/// Accumulates failures across files.
pub struct Linter<E> {
    engine: E,
    failures: Vec<LintFailure>,
}

impl<E: LintEngine> Linter<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            failures: Vec::new(),
        }
    }

    /// Lints one file and keeps its failures.
    pub fn lint(
        &mut self,
        file: &Path,
        contents: &str,
        config: &LintConfig,
    ) -> Result<(), LinterError> {
        let failures = self.engine.lint(file, contents, config)?;
        debug!("{}: {} failure(s)", file.display(), failures.len());
        self.failures.extend(failures);
        Ok(())
    }

    /// Consumes the linter and returns everything accumulated so far.
    pub fn into_result(self) -> LintResult {
        LintResult::new(self.failures)
    }
}

/// Lints every file under `base_dir` matching `pattern`.
///
/// Each file is linted with the configuration [`ConfigResolver`] picks for
/// it. Files excluded by their configuration are skipped. The first read
/// or lint error aborts the run.
pub fn lint_pattern<E: LintEngine>(
    pattern: &str,
    config_file: Option<&Path>,
    base_dir: &Path,
    engine: E,
) -> Result<LintResult, LinterError> {
    let mut resolver = ConfigResolver::new(config_file)?;
    if let Some(config) = resolver.explicit() {
        debug!("Config {:?}: {:?}", config.path, config.rules);
    }

    let files = FileFinder::new(pattern)?.discover_files(base_dir)?;
    debug!("Files found: {}", files.len());

    let mut linter = Linter::new(engine);
    for file in &files {
        debug!("Linting {}", file.display());

        let full_path = base_dir.join(file);
        let config = resolver.resolve(&full_path)?;
        // Discovered configs carry absolute exclude patterns.
        let absolute = std::path::absolute(&full_path).unwrap_or_else(|_| full_path.clone());
        if config.is_excluded(file) || config.is_excluded(&absolute) {
            debug!("{} is excluded by configuration", file.display());
            continue;
        }

        let bytes = fs::read(&full_path).map_err(|e| {
            LinterError::file(format!("Failed to read {}: {}", file.display(), e))
        })?;
        let contents = String::from_utf8_lossy(&bytes);
        linter.lint(file, &contents, config)?;
    }

    Ok(linter.into_result())
}
