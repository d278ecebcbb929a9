//! Rule to flag `async` functions that never await or return.
//!
//! # Rationale
//!
//! An `async` function with neither `await` nor `return` in its body does
//! nothing asynchronous and resolves to `undefined`; the keyword is usually
//! left over from a refactoring.
//!
//! # Checked
//!
//! Function declarations, arrow functions with a block body and methods.
//! Arrow functions with an expression body return that expression and are
//! never flagged. Nested arrow functions and function declarations are not
//! searched, since their `await` belongs to them.

use pad_lint_core::tree::navigation::child_token;
use pad_lint_core::{FileContext, Rule, Severity, SourceTree, Suggestion, Violation};
use tree_sitter::Node;

/// Rule code for no-async-without-await.
pub const CODE: &str = "PL011";

/// Rule name for no-async-without-await.
pub const NAME: &str = "no-async-without-await";

const MESSAGE: &str = "Functions marked async must contain an await or return statement.";

const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "arrow_function",
    "method_definition",
];

/// Nested functions whose bodies are not searched.
const BOUNDARY_KINDS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "arrow_function",
];

/// Flags `async` functions without `await` or `return`.
#[derive(Debug, Clone)]
pub struct NoAsyncWithoutAwait {
    severity: Severity,
}

impl Default for NoAsyncWithoutAwait {
    fn default() -> Self {
        Self::new()
    }
}

impl NoAsyncWithoutAwait {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Whether `body` contains an `await` or `return` keyword outside nested
/// functions.
fn awaits_or_returns(body: Node<'_>) -> bool {
    let mut stack = vec![body];
    while let Some(node) = stack.pop() {
        if !node.is_named() && matches!(node.kind(), "await" | "return") {
            return true;
        }
        if BOUNDARY_KINDS.contains(&node.kind()) {
            continue;
        }
        let mut cursor = node.walk();
        stack.extend(node.children(&mut cursor));
    }
    false
}

impl Rule for NoAsyncWithoutAwait {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Async functions must await or return"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, tree: &SourceTree) -> Vec<Violation> {
        tree.walk()
            .filter(|node| FUNCTION_KINDS.contains(&node.kind()))
            .filter_map(|node| {
                let keyword = child_token(node, "async")?;
                let body = node.child_by_field_name("body")?;
                if body.kind() != "statement_block" || awaits_or_returns(body) {
                    return None;
                }
                let location = ctx.location(tree, keyword.start_byte(), keyword.end_byte());
                Some(
                    Violation::new(CODE, NAME, self.severity, location, MESSAGE)
                        .with_suggestion(Suggestion::new(
                            "Remove `async` or await the asynchronous work",
                        )),
                )
            })
            .collect()
    }
}
