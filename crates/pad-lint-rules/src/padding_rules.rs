//! One lint rule per padded construct.
//!
//! Each [`PaddingRule`] runs the padding checks for a single [`Construct`]
//! and reports its findings at the anchor span: the keyword for classes,
//! functions and statements, the `}` for a disallowed blank line at the end
//! of a body.
//!
//! # Configuration
//!
//! Only the common `enabled` / `severity` keys apply:
//!
//! ```toml
//! [rules.if-padding]
//! severity = "error"
//! ```

use crate::padding::{check_construct, Construct, PaddingViolation};
use pad_lint_core::{FileContext, Rule, Severity, SourceTree, Suggestion, Violation};

/// Code, name and description for each construct, in [`Construct::ALL`] order.
const RULES: [(&str, &str, &str); 9] = [
    (
        "PL001",
        "class-padding",
        "Requires blank lines around class declarations",
    ),
    (
        "PL002",
        "function-padding",
        "Requires blank lines around function declarations",
    ),
    (
        "PL003",
        "arrow-function-padding",
        "Requires blank lines around multi-line arrow functions",
    ),
    (
        "PL004",
        "method-padding",
        "Requires blank lines around class methods",
    ),
    (
        "PL005",
        "constructor-padding",
        "Requires blank lines around constructors",
    ),
    ("PL006", "for-padding", "Requires blank lines around for loops"),
    ("PL007", "if-padding", "Requires blank lines around if / else blocks"),
    (
        "PL008",
        "try-catch-padding",
        "Requires blank lines around try / catch blocks",
    ),
    (
        "PL009",
        "variable-padding",
        "Separates groups of variable declarations from other statements",
    ),
];

fn entry(construct: Construct) -> (&'static str, &'static str, &'static str) {
    let index = Construct::ALL
        .iter()
        .position(|c| *c == construct)
        .unwrap_or_default();
    RULES[index]
}

/// Padding rule for a single construct.
#[derive(Debug, Clone)]
pub struct PaddingRule {
    construct: Construct,
    severity: Severity,
}

impl PaddingRule {
    /// Creates the rule for `construct` with the default severity (warning).
    #[must_use]
    pub fn new(construct: Construct) -> Self {
        Self {
            construct,
            severity: Severity::Warning,
        }
    }

    /// `class-padding` (PL001).
    #[must_use]
    pub fn class() -> Self {
        Self::new(Construct::Class)
    }

    /// `function-padding` (PL002).
    #[must_use]
    pub fn function() -> Self {
        Self::new(Construct::Function)
    }

    /// `arrow-function-padding` (PL003).
    #[must_use]
    pub fn arrow_function() -> Self {
        Self::new(Construct::ArrowFunction)
    }

    /// `method-padding` (PL004).
    #[must_use]
    pub fn method() -> Self {
        Self::new(Construct::Method)
    }

    /// `constructor-padding` (PL005).
    #[must_use]
    pub fn constructor() -> Self {
        Self::new(Construct::Constructor)
    }

    /// `for-padding` (PL006).
    #[must_use]
    pub fn for_loop() -> Self {
        Self::new(Construct::For)
    }

    /// `if-padding` (PL007).
    #[must_use]
    pub fn if_else() -> Self {
        Self::new(Construct::If)
    }

    /// `try-catch-padding` (PL008).
    #[must_use]
    pub fn try_catch() -> Self {
        Self::new(Construct::TryCatch)
    }

    /// `variable-padding` (PL009).
    #[must_use]
    pub fn variable() -> Self {
        Self::new(Construct::Variable)
    }

    /// One rule per construct, in catalog order.
    #[must_use]
    pub fn all() -> Vec<Self> {
        Construct::ALL.into_iter().map(Self::new).collect()
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// The construct this rule checks.
    #[must_use]
    pub fn construct(&self) -> Construct {
        self.construct
    }

    fn to_violation(
        &self,
        ctx: &FileContext,
        tree: &SourceTree,
        found: &PaddingViolation,
    ) -> Violation {
        let location = ctx.location(tree, found.start, found.end);

        Violation::new(self.code(), self.name(), self.severity, location, found.message())
            .with_suggestion(Suggestion::new(found.kind.suggestion()))
    }
}

impl Rule for PaddingRule {
    fn name(&self) -> &'static str {
        entry(self.construct).1
    }

    fn code(&self) -> &'static str {
        entry(self.construct).0
    }

    fn description(&self) -> &'static str {
        entry(self.construct).2
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, tree: &SourceTree) -> Vec<Violation> {
        check_construct(tree, self.construct)
            .iter()
            .map(|found| self.to_violation(ctx, tree, found))
            .collect()
    }
}
