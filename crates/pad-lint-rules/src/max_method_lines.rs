//! Rule to limit the length of methods.
//!
//! # Rationale
//!
//! Long methods are hard to pad sensibly and harder to read. This rule flags
//! methods whose body, excluding the signature line and the closing brace,
//! spans more lines than the limit. Constructors are not counted.
//!
//! # Configuration
//!
//! - `max_lines`: Maximum body lines per method (default: 25)

use pad_lint_core::tree::navigation::{first_token, last_token};
use pad_lint_core::{FileContext, Rule, RuleConfig, Severity, SourceTree, Suggestion, Violation};
use tree_sitter::Node;

/// Rule code for max-method-lines.
pub const CODE: &str = "PL010";

/// Rule name for max-method-lines.
pub const NAME: &str = "max-method-lines";

/// Default body line limit.
pub const DEFAULT_MAX_LINES: usize = 25;

/// Limits the number of lines in a method body.
#[derive(Debug, Clone)]
pub struct MaxMethodLines {
    max_lines: usize,
    severity: Severity,
}

impl Default for MaxMethodLines {
    fn default() -> Self {
        Self::new()
    }
}

impl MaxMethodLines {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_lines: DEFAULT_MAX_LINES,
            severity: Severity::Warning,
        }
    }

    /// Creates the rule from its `[rules.max-method-lines]` table.
    ///
    /// Missing or negative limits fall back to the default.
    #[must_use]
    pub fn from_config(config: &RuleConfig) -> Self {
        let max = config
            .get_option::<usize>("max_lines")
            .unwrap_or(DEFAULT_MAX_LINES);
        let rule = Self::new().max_lines(max);
        match config.severity {
            Some(severity) => rule.severity(severity),
            None => rule,
        }
    }

    /// Sets the maximum number of body lines.
    #[must_use]
    pub fn max_lines(mut self, max: usize) -> Self {
        self.max_lines = max;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn is_method(node: Node<'_>, tree: &SourceTree) -> bool {
        node.kind() == "method_definition"
            && node
                .child_by_field_name("name")
                .map_or(true, |name| tree.text(name) != "constructor")
    }
}

impl Rule for MaxMethodLines {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits the number of lines in a method"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, tree: &SourceTree) -> Vec<Violation> {
        let mut violations = Vec::new();

        for node in tree.walk().filter(|n| Self::is_method(*n, tree)) {
            let (Some(first), Some(last)) = (first_token(node), last_token(node)) else {
                continue;
            };
            let first_line = tree.start_line(first);
            let last_line = tree.start_line(last);
            let body_lines = last_line.saturating_sub(first_line).saturating_sub(2);

            if body_lines > self.max_lines {
                let location = ctx.location(tree, first.start_byte(), last.start_byte());

                violations.push(
                    Violation::new(
                        CODE,
                        NAME,
                        self.severity,
                        location,
                        format!("Max method lines is {}", self.max_lines),
                    )
                    .with_suggestion(Suggestion::new(format!(
                        "Split this method; its body has {body_lines} lines"
                    ))),
                );
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pad_lint_core::Dialect;
    use std::path::Path;

    fn class_with_method(name: &str, body_lines: usize) -> String {
        let mut source = format!("class A {{\n\n  {name}() {{\n");
        for i in 0..body_lines {
            source.push_str(&format!("    step{i}();\n"));
        }
        source.push_str("  }\n}\n");
        source
    }

    fn check(rule: &MaxMethodLines, source: &str) -> Vec<Violation> {
        let tree = SourceTree::parse(source, Dialect::TypeScript).expect("parse");
        let ctx = FileContext::new(Path::new("/p/a.ts"), source, Path::new("/p"));
        rule.check(&ctx, &tree)
    }

    #[test]
    fn short_method_passes() {
        let source = class_with_method("run", 10);
        assert!(check(&MaxMethodLines::new(), &source).is_empty());
    }

    #[test]
    fn limit_counts_lines_between_signature_and_brace() {
        // Body of n statements: last_line - first_line - 2 == n - 1.
        let at_limit = class_with_method("run", DEFAULT_MAX_LINES + 1);
        assert!(check(&MaxMethodLines::new(), &at_limit).is_empty());

        let over = class_with_method("run", DEFAULT_MAX_LINES + 2);
        let violations = check(&MaxMethodLines::new(), &over);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Max method lines is 25");
        assert_eq!(violations[0].location.line, 3);
    }

    #[test]
    fn constructors_are_not_counted() {
        let source = class_with_method("constructor", 40);
        assert!(check(&MaxMethodLines::new(), &source).is_empty());
    }

    #[test]
    fn configured_limit() {
        let config = pad_lint_core::Config::parse("[rules.max-method-lines]\nmax_lines = 3\n")
            .expect("config");
        let rule = MaxMethodLines::from_config(config.rule(NAME).expect("rule table"));
        assert_eq!(check(&rule, &class_with_method("run", 5)).len(), 1);
        assert!(check(&rule, &class_with_method("run", 4)).is_empty());
    }
}
