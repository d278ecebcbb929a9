//! Core analyzer for orchestrating lint execution.

use crate::config::{Config, RuleConfig};
use crate::context::FileContext;
use crate::rule::{Rule, RuleBox};
use crate::tree::SourceTree;
use crate::types::{LintResult, Severity, Suggestion, Violation};
use crate::utils::allowance::check_allow_with_reason;

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error walking the source tree.
    #[error("File discovery failed: {0}")]
    Walk(#[from] ignore::Error),

    /// Error parsing a source file.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<String>,
    extensions: Vec<String>,
    config: Option<Config>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root directory (or single file) to analyze.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds an exclude glob pattern.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Adds a file extension to analyze (without the leading dot).
    #[must_use]
    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.extensions.push(ext.into());
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets whether to fail on files with syntax errors (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be read or an exclude
    /// pattern is not a valid glob.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();

        let root = self.root.unwrap_or_else(|| config.analyzer.root.clone());
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let mut exclude_patterns = self.exclude_patterns;
        exclude_patterns.extend(config.analyzer.exclude.iter().cloned());
        let exclude_patterns = exclude_patterns
            .iter()
            .map(String::as_str)
            .map(glob::Pattern::new)
            .collect::<Result<Vec<_>, _>>()?;

        let mut extensions = self.extensions;
        if extensions.is_empty() {
            extensions.clone_from(&config.analyzer.extensions);
        }

        Ok(Analyzer {
            root,
            rules: self.rules,
            exclude_patterns,
            extensions,
            config,
            fail_on_parse_error: self.fail_on_parse_error,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    rules: Vec<RuleBox>,
    exclude_patterns: Vec<glob::Pattern>,
    extensions: Vec<String>,
    config: Config,
    fail_on_parse_error: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Gets the rule configuration for a specific rule.
    #[must_use]
    pub fn rule_config(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.config.rule(rule_name)
    }

    /// Analyzes all files and returns the results.
    ///
    /// # Errors
    ///
    /// Returns an error if file discovery fails, a file cannot be read, or a
    /// file has syntax errors while `fail_on_parse_error` is set.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {:?}", self.root);

        let mut result = LintResult::new();
        let files = self.discover_files()?;

        info!("Found {} files to analyze", files.len());

        for file_path in &files {
            let content = std::fs::read_to_string(file_path)?;
            match self.analyze_source(file_path, &content) {
                Ok(violations) => {
                    result.violations.extend(violations);
                    result.files_checked += 1;
                }
                Err(AnalyzerError::Parse { path, message }) => {
                    warn!("Failed to parse {}: {}", path.display(), message);
                    if self.fail_on_parse_error {
                        return Err(AnalyzerError::Parse { path, message });
                    }
                }
                Err(e) => return Err(e),
            }
        }

        result.violations.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
        });

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Analyzes one source text as if it were the file at `path`.
    ///
    /// The dialect is taken from the extension of `path`, defaulting to
    /// TypeScript.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::Parse`] when no tree can be built, or when the
    /// tree has syntax errors and `fail_on_parse_error` is set.
    pub fn analyze_source(
        &self,
        path: &Path,
        content: &str,
    ) -> Result<Vec<Violation>, AnalyzerError> {
        debug!("Analyzing: {}", path.display());

        let ctx = FileContext::new(path, content, self.project_root());
        let tree = SourceTree::parse(content, ctx.dialect).map_err(|e| AnalyzerError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if tree.has_syntax_errors() {
            if self.fail_on_parse_error {
                return Err(AnalyzerError::Parse {
                    path: path.to_path_buf(),
                    message: "source contains syntax errors".to_string(),
                });
            }
            warn!(
                "Syntax errors in {}, results may be incomplete",
                path.display()
            );
        }

        let mut violations = Vec::new();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            let rule_violations = rule.check(&ctx, &tree);
            let rule_violations = apply_allow_directives(rule.as_ref(), content, rule_violations);
            let rule_violations = self.apply_severity_override(rule.name(), rule_violations);
            violations.extend(rule_violations);
        }

        Ok(violations)
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Directory that reported paths are relative to.
    fn project_root(&self) -> &Path {
        if self.root.is_file() {
            self.root.parent().unwrap_or(&self.root)
        } else {
            &self.root
        }
    }

    /// Discovers all source files to analyze.
    fn discover_files(&self) -> Result<Vec<PathBuf>, AnalyzerError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(self.config.analyzer.respect_gitignore);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || !self.has_source_extension(path) {
                continue;
            }

            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    fn has_source_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    /// Checks if a path should be excluded.
    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(self.project_root()).unwrap_or(path);
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches_path(path) || pattern.matches_path(relative))
    }
}

/// Drops violations silenced by an allow directive.
///
/// A directive without a reason for a rule that requires one is reported as a
/// warning in place of the suppressed violation.
fn apply_allow_directives(
    rule: &dyn Rule,
    content: &str,
    violations: Vec<Violation>,
) -> Vec<Violation> {
    let mut kept = Vec::with_capacity(violations.len());

    for violation in violations {
        let allow_check = check_allow_with_reason(content, violation.location.line, rule.name());
        if !allow_check.is_allowed() {
            kept.push(violation);
            continue;
        }

        if rule.requires_allow_reason() && allow_check.reason().is_none() {
            kept.push(
                Violation::new(
                    rule.code(),
                    rule.name(),
                    Severity::Warning,
                    violation.location,
                    format!(
                        "Allow directive for '{}' is missing required reason",
                        rule.name()
                    ),
                )
                .with_suggestion(Suggestion::new(
                    "Add reason=\"...\" to explain why this exception is necessary",
                )),
            );
        }
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Location;

    struct DebuggerRule {
        severity: Severity,
    }

    impl Rule for DebuggerRule {
        fn name(&self) -> &'static str {
            "no-debugger"
        }

        fn code(&self) -> &'static str {
            "TEST001"
        }

        fn default_severity(&self) -> Severity {
            self.severity
        }

        fn check(&self, ctx: &FileContext, tree: &SourceTree) -> Vec<Violation> {
            tree.walk()
                .filter(|n| n.kind() == "debugger_statement")
                .map(|n| {
                    let location = Location::from_position(
                        ctx.relative_path.clone(),
                        tree.position_of(n.start_byte()),
                    );
                    Violation::new(self.code(), self.name(), self.severity, location, "debugger")
                })
                .collect()
        }
    }

    fn analyzer(severity: Severity) -> Analyzer {
        Analyzer::builder()
            .root(".")
            .rule(DebuggerRule { severity })
            .build()
            .expect("Failed to build analyzer")
    }

    #[test]
    fn test_builder() {
        let analyzer = analyzer(Severity::Warning);
        assert!(analyzer.root().exists());
        assert_eq!(analyzer.rule_count(), 1);
    }

    #[test]
    fn test_exclude_patterns() {
        let analyzer = Analyzer::builder()
            .root("/repo")
            .exclude("**/generated/**")
            .build()
            .expect("Failed to build analyzer");

        assert!(analyzer.should_exclude(Path::new("/repo/node_modules/x/index.ts")));
        assert!(analyzer.should_exclude(Path::new("/repo/src/generated/api.ts")));
        assert!(!analyzer.should_exclude(Path::new("/repo/src/app.ts")));
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let result = Analyzer::builder().root(".").exclude("a/***[").build();
        assert!(matches!(result, Err(AnalyzerError::Glob(_))));
    }

    #[test]
    fn test_analyze_source_runs_rules() {
        let analyzer = analyzer(Severity::Warning);
        let violations = analyzer
            .analyze_source(Path::new("a.ts"), "run();\ndebugger;\n")
            .expect("analyze");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 2);
    }

    #[test]
    fn test_allow_directive_silences_violation() {
        let analyzer = analyzer(Severity::Warning);
        let source = "// pad-lint: allow(no-debugger)\ndebugger;\n";
        let violations = analyzer
            .analyze_source(Path::new("a.ts"), source)
            .expect("analyze");
        assert!(violations.is_empty());
    }

    #[test]
    fn test_allow_without_reason_for_error_rule() {
        let analyzer = analyzer(Severity::Error);
        let source = "debugger; // pad-lint: allow(no-debugger)\n";
        let violations = analyzer
            .analyze_source(Path::new("a.ts"), source)
            .expect("analyze");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert!(violations[0].message.contains("missing required reason"));
    }

    #[test]
    fn test_disabled_rule_and_severity_override() {
        let disabled = Config::parse("[rules.no-debugger]\nenabled = false\n").expect("config");
        let analyzer = Analyzer::builder()
            .root(".")
            .config(disabled)
            .rule(DebuggerRule {
                severity: Severity::Warning,
            })
            .build()
            .expect("build");
        let violations = analyzer
            .analyze_source(Path::new("a.ts"), "debugger;\n")
            .expect("analyze");
        assert!(violations.is_empty());

        let escalated =
            Config::parse("[rules.no-debugger]\nseverity = \"error\"\n").expect("config");
        let analyzer = Analyzer::builder()
            .root(".")
            .config(escalated)
            .rule(DebuggerRule {
                severity: Severity::Warning,
            })
            .build()
            .expect("build");
        let violations = analyzer
            .analyze_source(Path::new("a.ts"), "debugger;\n")
            .expect("analyze");
        assert_eq!(violations[0].severity, Severity::Error);
    }

    #[test]
    fn test_syntax_errors_respect_fail_flag() {
        let source = "class {{{\ndebugger;\n";

        let lenient = analyzer(Severity::Warning);
        assert!(lenient.analyze_source(Path::new("a.ts"), source).is_ok());

        let strict = Analyzer::builder()
            .root(".")
            .fail_on_parse_error(true)
            .build()
            .expect("build");
        let result = strict.analyze_source(Path::new("a.ts"), source);
        assert!(matches!(result, Err(AnalyzerError::Parse { .. })));
    }
}
