//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::tree::SourceTree;
use crate::types::{Severity, Violation};

/// A per-file lint rule over a tree-sitter syntax tree.
///
/// Rules receive the parsed [`SourceTree`] and typically walk it with
/// [`SourceTree::walk`], matching node kinds.
///
/// # Example
///
/// ```ignore
/// use pad_lint_core::{FileContext, Location, Rule, Severity, SourceTree, Violation};
///
/// pub struct NoDebugger;
///
/// impl Rule for NoDebugger {
///     fn name(&self) -> &'static str { "no-debugger" }
///     fn code(&self) -> &'static str { "PL100" }
///
///     fn check(&self, ctx: &FileContext, tree: &SourceTree) -> Vec<Violation> {
///         tree.walk()
///             .filter(|n| n.kind() == "debugger_statement")
///             .map(|n| {
///                 let pos = tree.position_of(n.start_byte());
///                 Violation::new(
///                     self.code(),
///                     self.name(),
///                     Severity::Warning,
///                     Location::from_position(ctx.relative_path.clone(), pos),
///                     "debugger statement",
///                 )
///             })
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "class-padding").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "PL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether this rule requires a reason when using allow directives.
    ///
    /// By default, rules with `Severity::Error` require a reason.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Checks a single file and returns any violations found.
    fn check(&self, ctx: &FileContext, tree: &SourceTree) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Dialect;
    use crate::types::Location;
    use std::path::Path;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, ctx: &FileContext, tree: &SourceTree) -> Vec<Violation> {
            tree.walk()
                .filter(|n| n.kind() == "debugger_statement")
                .map(|n| {
                    Violation::new(
                        self.code(),
                        self.name(),
                        self.default_severity(),
                        Location::from_position(
                            ctx.relative_path.clone(),
                            tree.position_of(n.start_byte()),
                        ),
                        "Test violation",
                    )
                })
                .collect()
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_severity(), Severity::Error);
        assert!(rule.requires_allow_reason());
    }

    #[test]
    fn test_rule_sees_tree() {
        let source = "run();\ndebugger;\n";
        let tree = SourceTree::parse(source, Dialect::TypeScript).expect("parse");
        let ctx = FileContext::new(Path::new("/p/a.ts"), source, Path::new("/p"));

        let violations = TestRule.check(&ctx, &tree);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.line, 2);
        assert_eq!(violations[0].location.file, Path::new("a.ts"));
    }
}
