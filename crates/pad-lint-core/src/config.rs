//! `pad-lint.toml` configuration.
//!
//! ```toml
//! preset = "recommended"
//! fail_on = "warning"
//!
//! [analyzer]
//! exclude = ["**/generated/**"]
//!
//! [rules.class-padding]
//! severity = "error"
//!
//! [rules.max-method-lines]
//! max_lines = 40
//! ```
//!
//! Unknown top-level and `[analyzer]` keys are rejected so that typos do not
//! silently fall back to defaults. Rule tables accept arbitrary options.

use crate::Severity;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Top-level configuration for pad-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Rule preset: "recommended", "strict" or "minimal".
    #[serde(default)]
    pub preset: Option<String>,

    /// Lowest severity that fails a run (default: error).
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// File discovery settings.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule tables, keyed by rule name.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            origin: path.display().to_string(),
            source,
        })
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            origin: "<inline>".to_string(),
            source,
        })
    }

    /// Whether a rule runs. Rules without a table are enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .and_then(|c| c.enabled)
            .unwrap_or(true)
    }

    /// Severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// The `[rules.<name>]` table, if present.
    #[must_use]
    pub fn rule(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }

    /// Rule tables whose name is not in `known`, in name order.
    #[must_use]
    pub fn unknown_rules<'a>(&'a self, known: &[&str]) -> Vec<&'a str> {
        self.rules
            .keys()
            .map(String::as_str)
            .filter(|name| !known.contains(name))
            .collect()
    }

    /// Severity at which a run fails.
    #[must_use]
    pub fn fail_threshold(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Error)
    }
}

/// The `[analyzer]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Directory analyzed when no path is given.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude, matched against absolute and root-relative
    /// paths.
    #[serde(default = "default_excludes")]
    pub exclude: Vec<String>,

    /// File extensions to analyze, without the dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Whether `.gitignore` files are honoured.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_excludes(),
            extensions: default_extensions(),
            respect_gitignore: true,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_excludes() -> Vec<String> {
    ["**/node_modules/**", "**/dist/**"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_extensions() -> Vec<String> {
    ["ts", "tsx"].into_iter().map(String::from).collect()
}

fn default_true() -> bool {
    true
}

/// A `[rules.<name>]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Reads option `key` as `T`.
    ///
    /// Returns `None` when the key is missing or has the wrong type.
    #[must_use]
    pub fn get_option<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.options
            .get(key)
            .and_then(|v| v.clone().try_into().ok())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The config is not valid TOML or does not match the schema.
    #[error("Failed to parse config {origin}: {source}")]
    Parse {
        /// File path, or `<inline>` for parsed strings.
        origin: String,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.respect_gitignore);
        assert!(config.rules.is_empty());
        assert_eq!(config.analyzer.extensions, vec!["ts", "tsx"]);
        assert_eq!(
            config.analyzer.exclude,
            vec!["**/node_modules/**", "**/dist/**"]
        );
        assert_eq!(config.fail_threshold(), Severity::Error);
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
preset = "strict"
fail_on = "warning"

[analyzer]
root = "./src"
exclude = ["**/generated/**"]

[rules.class-padding]
enabled = true
severity = "error"

[rules.variable-padding]
enabled = false

[rules.max-method-lines]
max_lines = 40
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.preset.as_deref(), Some("strict"));
        assert_eq!(config.fail_threshold(), Severity::Warning);
        assert_eq!(config.analyzer.root, PathBuf::from("./src"));
        assert_eq!(config.analyzer.exclude, vec!["**/generated/**"]);
        assert_eq!(config.analyzer.extensions, vec!["ts", "tsx"]);

        assert!(config.is_rule_enabled("class-padding"));
        assert!(!config.is_rule_enabled("variable-padding"));
        assert!(config.is_rule_enabled("if-padding"));
        assert_eq!(config.rule_severity("class-padding"), Some(Severity::Error));

        let rule_config = config.rule("max-method-lines").expect("rule block");
        assert_eq!(rule_config.get_option::<u32>("max_lines"), Some(40));
        assert_eq!(rule_config.get_option::<bool>("max_lines"), None);
        assert_eq!(rule_config.get_option::<u32>("missing"), None);
    }

    #[test]
    fn test_unknown_rules() {
        let config = Config::parse("[rules.clas-padding]\n[rules.if-padding]\n").expect("parse");
        assert_eq!(
            config.unknown_rules(&["class-padding", "if-padding"]),
            vec!["clas-padding"]
        );
    }

    #[test]
    fn test_parse_errors() {
        for bad in [
            "fail_on = \"fatal\"",
            "presett = \"strict\"",
            "[analyzer]\nexcludes = []",
        ] {
            let err = Config::parse(bad).expect_err(bad);
            assert!(matches!(err, ConfigError::Parse { .. }), "{bad}");
        }
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/pad-lint.toml")).expect_err("io");
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
