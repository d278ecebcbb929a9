//! Adjacency checks for variable statements.
//!
//! A run of `const` / `let` / `var` statements is a single group; only the
//! edges of the group need a blank line.

use super::collector::{PaddingKind, Span, ViolationCollector};
use super::construct::ConstructDescriptor;
use pad_lint_core::tree::navigation::{
    first_token, inner_statement, next_statement, previous_statement, statement_unit,
};
use pad_lint_core::SourceTree;
use tree_sitter::Node;

const VARIABLE_KINDS: &[&str] = &["lexical_declaration", "variable_declaration"];

fn is_variable_statement(node: Node<'_>) -> bool {
    VARIABLE_KINDS.contains(&inner_statement(node).kind())
}

pub(crate) fn check(
    tree: &SourceTree<'_>,
    node: Node<'_>,
    descriptor: &ConstructDescriptor,
    out: &mut ViolationCollector,
) {
    let Some(anchor) = first_token(node).map(Span::of) else {
        return;
    };
    let unit = statement_unit(node);

    if let Some(prev) = previous_statement(unit) {
        if !is_variable_statement(prev) && tree.end_line(prev) + 1 == tree.start_line(unit) {
            out.record(anchor, PaddingKind::BeforeMissing, descriptor.construct);
        }
    }

    if let Some(next) = next_statement(unit) {
        if !is_variable_statement(next) && tree.start_line(next) == tree.end_line(unit) + 1 {
            out.record(anchor, PaddingKind::AfterMissing, descriptor.construct);
        }
    }
}
