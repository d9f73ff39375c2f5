//! Lint configuration.
//!
//! Configuration files follow the `tslint.json` layout and may contain
//! comments:
//!
//! ```json
//! {
//!   "extends": "./base.json",
//!   "defaultSeverity": "warning",
//!   "rules": {
//!     "max-line-length": [true, 100],
//!     "no-console": { "severity": "error", "options": ["log"] },
//!     "eofline": false
//!   },
//!   "linterOptions": { "exclude": ["generated/**"] }
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Component, Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use jsonc_parser::ParseOptions;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::rules::BUILTIN_RULES;
use crate::{LinterError, RuleSeverity};

/// File name searched for when no explicit configuration is given.
pub const CONFIG_FILENAME: &str = "tslint.json";

/// Prefix of the bundled presets (`tslint:recommended`, `tslint:latest`, ...).
/// All of them resolve to [`LintConfig::builtin`].
const PRESET_PREFIX: &str = "tslint:";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    #[serde(default)]
    extends: Option<Extends>,
    #[serde(default)]
    default_severity: Option<String>,
    #[serde(default)]
    rules: BTreeMap<String, Value>,
    #[serde(default)]
    linter_options: RawLinterOptions,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Extends {
    One(String),
    Many(Vec<String>),
}

impl Extends {
    fn into_vec(self) -> Vec<String> {
        match self {
            Extends::One(path) => vec![path],
            Extends::Many(paths) => paths,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawLinterOptions {
    #[serde(default)]
    exclude: Vec<String>,
}

/// Effective setting of one rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSetting {
    /// Severity failures of this rule are reported with.
    pub severity: RuleSeverity,
    /// Rule arguments, in the order they were written.
    pub options: Vec<Value>,
}

impl RuleSetting {
    pub fn new(severity: RuleSeverity) -> Self {
        Self {
            severity,
            options: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: Vec<Value>) -> Self {
        self.options = options;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.severity != RuleSeverity::Off
    }

    /// Parses the value of a `rules` entry.
    fn parse(name: &str, value: &Value, default: RuleSeverity) -> Result<Self, LinterError> {
        match value {
            Value::Bool(true) => Ok(Self::new(default)),
            Value::Bool(false) | Value::Null => Ok(Self::new(RuleSeverity::Off)),
            Value::Array(items) => match items.split_first() {
                Some((Value::Bool(enabled), rest)) => {
                    let severity = if *enabled { default } else { RuleSeverity::Off };
                    Ok(Self::new(severity).with_options(rest.to_vec()))
                }
                _ => Ok(Self::new(default).with_options(items.clone())),
            },
            Value::Object(map) => {
                let severity = match map.get("severity") {
                    Some(Value::String(s)) => RuleSeverity::parse(s).ok_or_else(|| {
                        LinterError::config(format!("Unknown severity '{s}' for rule '{name}'"))
                    })?,
                    Some(_) => {
                        return Err(LinterError::config(format!(
                            "Severity of rule '{name}' must be a string"
                        )));
                    }
                    None => default,
                };
                let options = match map.get("options") {
                    Some(Value::Array(items)) => items.clone(),
                    Some(Value::Null) | None => Vec::new(),
                    Some(other) => vec![other.clone()],
                };
                Ok(Self::new(severity).with_options(options))
            }
            _ => Err(LinterError::config(format!(
                "Invalid setting for rule '{name}': {value}"
            ))),
        }
    }
}

/// Resolved lint configuration for a set of files.
#[derive(Debug, Clone, Default)]
pub struct LintConfig {
    /// Rule settings keyed by rule name.
    pub rules: BTreeMap<String, RuleSetting>,
    /// Exclude patterns, resolved against the directory of the file that declared them.
    pub exclude: Vec<String>,
    /// File this configuration was loaded from, if any.
    pub path: Option<PathBuf>,
    exclude_set: Option<GlobSet>,
}

impl LintConfig {
    /// Creates an empty configuration with no rules enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration used when no configuration file can be found:
    /// every built-in rule enabled as an error.
    pub fn builtin() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .map(|name| ((*name).to_string(), RuleSetting::new(RuleSeverity::Error)))
            .collect();
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Loads configuration from a file, following `extends` chains.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinterError> {
        let mut stack = Vec::new();
        let mut config = Self::load(path.as_ref(), &mut stack)?;
        config.path = Some(path.as_ref().to_path_buf());
        config.compile_excludes()?;
        Ok(config)
    }

    /// Parses configuration from a JSON (with comments) string.
    ///
    /// `extends` entries are resolved relative to `base_dir`.
    pub fn from_jsonc(content: &str, base_dir: &Path) -> Result<Self, LinterError> {
        let mut stack = Vec::new();
        let mut config = Self::parse(content, base_dir, &mut stack)?;
        config.compile_excludes()?;
        Ok(config)
    }

    fn load(path: &Path, stack: &mut Vec<PathBuf>) -> Result<Self, LinterError> {
        let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if stack.contains(&key) {
            return Err(LinterError::config(format!(
                "Circular 'extends' detected at {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path).map_err(|e| {
            LinterError::config(format!(
                "Failed to read config {}: {}",
                path.display(),
                e
            ))
        })?;

        stack.push(key);
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let config = Self::parse(&content, base_dir, stack);
        stack.pop();

        config.map_err(|e| match e {
            LinterError::Config(msg) => {
                LinterError::config(format!("{} (in {})", msg, path.display()))
            }
            other => other,
        })
    }

    fn parse(
        content: &str,
        base_dir: &Path,
        stack: &mut Vec<PathBuf>,
    ) -> Result<Self, LinterError> {
        let value = jsonc_parser::parse_to_serde_value(content, &ParseOptions::default())
            .map_err(|e| LinterError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or(Value::Object(serde_json::Map::new()));

        let raw: RawConfig = serde_json::from_value(value)
            .map_err(|e| LinterError::config(format!("Invalid config: {}", e)))?;

        let default_severity = match raw.default_severity.as_deref() {
            Some(s) => RuleSeverity::parse(s)
                .ok_or_else(|| LinterError::config(format!("Unknown defaultSeverity '{s}'")))?,
            None => RuleSeverity::Error,
        };

        let mut config = Self::new();
        for parent in raw.extends.map(Extends::into_vec).unwrap_or_default() {
            if parent.starts_with(PRESET_PREFIX) {
                debug!("Extending preset {} with the built-in rules", parent);
                config.merge(Self::builtin());
                continue;
            }
            let parent_path = base_dir.join(&parent);
            debug!("Extending config {}", parent_path.display());
            config.merge(Self::load(&parent_path, stack)?);
        }

        for (name, value) in &raw.rules {
            let setting = RuleSetting::parse(name, value, default_severity)?;
            config.rules.insert(name.clone(), setting);
        }

        config.exclude.extend(
            raw.linter_options
                .exclude
                .iter()
                .map(|pattern| resolve_pattern(base_dir, pattern)),
        );

        Ok(config)
    }

    /// Overlays `other` on top of this configuration.
    fn merge(&mut self, other: Self) {
        self.rules.extend(other.rules);
        self.exclude.extend(other.exclude);
    }

    fn compile_excludes(&mut self) -> Result<(), LinterError> {
        if self.exclude.is_empty() {
            self.exclude_set = None;
            return Ok(());
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            let glob = Glob::new(pattern).map_err(|e| {
                LinterError::config(format!("Invalid exclude pattern '{}': {}", pattern, e))
            })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|e| LinterError::config(format!("Failed to build globset: {}", e)))?;
        self.exclude_set = Some(set);
        Ok(())
    }

    /// Returns true if `file` matches one of the `linterOptions.exclude` patterns.
    pub fn is_excluded(&self, file: &Path) -> bool {
        self.exclude_set
            .as_ref()
            .is_some_and(|set| set.is_match(normalize(file)))
    }

    /// Returns the enabled rules in name order.
    pub fn enabled_rules(&self) -> impl Iterator<Item = (&str, &RuleSetting)> {
        self.rules
            .iter()
            .filter(|(_, setting)| setting.is_enabled())
            .map(|(name, setting)| (name.as_str(), setting))
    }

    /// Searches `start` and its ancestors for a [`CONFIG_FILENAME`].
    pub fn discover(start: impl AsRef<Path>) -> Option<PathBuf> {
        let start = std::path::absolute(start.as_ref()).ok()?;
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }
}

fn resolve_pattern(base_dir: &Path, pattern: &str) -> String {
    let path = Path::new(pattern);
    if path.is_absolute() {
        return pattern.to_string();
    }
    normalize(&base_dir.join(path))
}

/// Renders a path without leading `./` components so relative paths compare equal.
fn normalize(path: &Path) -> String {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect::<PathBuf>()
        .to_string_lossy()
        .into_owned()
}

/// Resolves the effective configuration of each linted file.
///
/// With an explicit configuration file every file shares it; otherwise the
/// nearest [`CONFIG_FILENAME`] above the file applies, falling back to
/// [`LintConfig::builtin`].
#[derive(Debug)]
pub struct ConfigResolver {
    explicit: Option<LintConfig>,
    discovered: HashMap<PathBuf, LintConfig>,
    fallback: LintConfig,
}

impl ConfigResolver {
    /// Creates a resolver. An explicit configuration file is loaded immediately.
    pub fn new(config_file: Option<&Path>) -> Result<Self, LinterError> {
        let explicit = config_file.map(LintConfig::from_file).transpose()?;
        Ok(Self {
            explicit,
            discovered: HashMap::new(),
            fallback: LintConfig::builtin(),
        })
    }

    /// The explicitly configured configuration, if one was given.
    pub fn explicit(&self) -> Option<&LintConfig> {
        self.explicit.as_ref()
    }

    /// Returns the configuration that applies to `file`.
    pub fn resolve(&mut self, file: &Path) -> Result<&LintConfig, LinterError> {
        if let Some(config) = &self.explicit {
            return Ok(config);
        }

        let dir = file.parent().unwrap_or_else(|| Path::new("."));
        let dir = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir
        };

        let Some(path) = LintConfig::discover(dir) else {
            return Ok(&self.fallback);
        };

        if !self.discovered.contains_key(&path) {
            debug!("Using config {} for {}", path.display(), file.display());
            let config = LintConfig::from_file(&path)?;
            self.discovered.insert(path.clone(), config);
        }

        Ok(&self.discovered[&path])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::tempdir;

    fn parse(json: &str) -> LintConfig {
        LintConfig::from_jsonc(json, Path::new("")).unwrap()
    }

    #[test]
    fn test_config_new_is_empty() {
        let config = LintConfig::new();
        assert!(config.rules.is_empty());
        assert!(config.exclude.is_empty());
        assert!(config.path.is_none());
    }

    #[test]
    fn test_builtin_enables_all_rules() {
        let config = LintConfig::builtin();
        assert_eq!(config.rules.len(), BUILTIN_RULES.len());
        assert!(config.rules.values().all(|s| s.severity == RuleSeverity::Error));
    }

    #[test]
    fn test_rule_value_forms() {
        let config = parse(
            r#"{
                // comments are allowed
                "rules": {
                    "no-debugger": true,
                    "eofline": false,
                    "max-line-length": [true, 100],
                    "no-console": { "severity": "warning", "options": ["log", "info"] },
                    "no-todo": { "options": { "case_sensitive": true } }
                }
            }"#,
        );

        assert_eq!(config.rules["no-debugger"], RuleSetting::new(RuleSeverity::Error));
        assert_eq!(config.rules["eofline"], RuleSetting::new(RuleSeverity::Off));
        assert_eq!(
            config.rules["max-line-length"],
            RuleSetting::new(RuleSeverity::Error).with_options(vec![json!(100)])
        );
        assert_eq!(
            config.rules["no-console"],
            RuleSetting::new(RuleSeverity::Warning).with_options(vec![json!("log"), json!("info")])
        );
        assert_eq!(
            config.rules["no-todo"].options,
            vec![json!({ "case_sensitive": true })]
        );
    }

    #[test]
    fn test_default_severity_applies_to_shorthand_rules() {
        let config = parse(
            r#"{
                "defaultSeverity": "warn",
                "rules": {
                    "no-debugger": true,
                    "eofline": { "severity": "error" }
                }
            }"#,
        );

        assert_eq!(config.rules["no-debugger"].severity, RuleSeverity::Warning);
        assert_eq!(config.rules["eofline"].severity, RuleSeverity::Error);
    }

    #[test]
    fn test_enabled_rules_skips_disabled() {
        let config = parse(r#"{ "rules": { "eofline": false, "no-debugger": true } }"#);
        let enabled: Vec<&str> = config.enabled_rules().map(|(name, _)| name).collect();
        assert_eq!(enabled, vec!["no-debugger"]);
    }

    #[rstest::rstest]
    #[case::invalid_json(r#"{ "rules": "#, "Invalid JSON")]
    #[case::rules_not_object(r#"{ "rules": [] }"#, "Invalid config")]
    #[case::unknown_severity(
        r#"{ "rules": { "eofline": { "severity": "fatal" } } }"#,
        "Unknown severity"
    )]
    #[case::unknown_default(r#"{ "defaultSeverity": "loud" }"#, "Unknown defaultSeverity")]
    #[case::invalid_rule_value(r#"{ "rules": { "eofline": 3 } }"#, "Invalid setting")]
    fn test_config_errors(#[case] json: &str, #[case] expected: &str) {
        let err = LintConfig::from_jsonc(json, Path::new("")).unwrap_err();
        assert!(
            err.to_string().contains(expected),
            "Error message '{}' should contain '{}'",
            err,
            expected
        );
    }

    #[test]
    fn test_extends_overrides_parent() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("base.json"),
            r#"{ "rules": { "eofline": true, "no-debugger": true } }"#,
        )
        .unwrap();
        let child = dir.path().join("tslint.json");
        fs::write(
            &child,
            r#"{ "extends": "./base.json", "rules": { "eofline": false } }"#,
        )
        .unwrap();

        let config = LintConfig::from_file(&child).unwrap();

        assert_eq!(config.rules["eofline"].severity, RuleSeverity::Off);
        assert_eq!(config.rules["no-debugger"].severity, RuleSeverity::Error);
        assert_eq!(config.path.as_deref(), Some(child.as_path()));
    }

    #[rstest::rstest]
    #[case::recommended(r#""tslint:recommended""#)]
    #[case::latest(r#""tslint:latest""#)]
    #[case::list(r#"["tslint:all"]"#)]
    fn test_extends_preset_uses_builtin_rules(#[case] extends: &str) {
        let json = format!(r#"{{ "extends": {extends}, "rules": {{ "no-console": false }} }}"#);

        let config = LintConfig::from_jsonc(&json, Path::new("")).unwrap();

        assert_eq!(config.rules["no-debugger"].severity, RuleSeverity::Error);
        assert_eq!(config.rules["eofline"].severity, RuleSeverity::Error);
        assert_eq!(config.rules["no-console"].severity, RuleSeverity::Off);
    }

    #[test]
    fn test_extends_cycle_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.json"), r#"{ "extends": "./b.json" }"#).unwrap();
        fs::write(dir.path().join("b.json"), r#"{ "extends": ["./a.json"] }"#).unwrap();

        let err = LintConfig::from_file(dir.path().join("a.json")).unwrap_err();
        assert!(err.to_string().contains("Circular"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = LintConfig::from_file("/nonexistent/tslint.json").unwrap_err();
        assert!(matches!(err, LinterError::Config(_)));
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn test_exclude_relative_to_config_dir() {
        let config = LintConfig::from_jsonc(
            r#"{ "linterOptions": { "exclude": ["generated/**"] } }"#,
            Path::new("./web"),
        )
        .unwrap();

        assert_eq!(config.exclude, vec!["web/generated/**".to_string()]);
        assert!(config.is_excluded(Path::new("web/generated/api.ts")));
        assert!(config.is_excluded(Path::new("./web/generated/api.ts")));
        assert!(!config.is_excluded(Path::new("web/src/api.ts")));
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "{}").unwrap();

        let found = LintConfig::discover(&nested).unwrap();
        assert_eq!(found.file_name().unwrap(), CONFIG_FILENAME);
        assert_eq!(
            found.parent().unwrap().canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_resolver_prefers_explicit_config() {
        let dir = tempdir().unwrap();
        let explicit = dir.path().join("strict.json");
        fs::write(&explicit, r#"{ "rules": { "no-debugger": true } }"#).unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{ "rules": { "eofline": true } }"#,
        )
        .unwrap();

        let mut resolver = ConfigResolver::new(Some(explicit.as_path())).unwrap();
        let config = resolver.resolve(&dir.path().join("a.ts")).unwrap();

        assert!(config.rules.contains_key("no-debugger"));
        assert!(!config.rules.contains_key("eofline"));
    }

    #[test]
    fn test_resolver_uses_nearest_config() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{ "rules": { "eofline": true } }"#,
        )
        .unwrap();
        fs::write(
            sub.join(CONFIG_FILENAME),
            r#"{ "rules": { "no-debugger": true } }"#,
        )
        .unwrap();

        let mut resolver = ConfigResolver::new(None).unwrap();

        let top = resolver.resolve(&dir.path().join("a.ts")).unwrap();
        assert!(top.rules.contains_key("eofline"));

        let nested = resolver.resolve(&sub.join("b.ts")).unwrap();
        assert!(nested.rules.contains_key("no-debugger"));
        assert!(!nested.rules.contains_key("eofline"));
    }

    #[test]
    fn test_resolver_fails_fast_on_bad_explicit_config() {
        let result = ConfigResolver::new(Some(Path::new("/nonexistent/tslint.json")));
        assert!(result.is_err());
    }
}
