//! The shared before / after / end padding checks.

use super::collector::{PaddingKind, PaddingViolation, Span, ViolationCollector};
use super::construct::{Construct, ConstructDescriptor, Mode, Opening, Previous, SingleLine};
use super::variable;
use pad_lint_core::tree::navigation::{
    first_statement, first_token, is_statement_list, last_token, leading_node, previous_statement,
    previous_token, statement_unit,
};
use pad_lint_core::SourceTree;
use tracing::trace;
use tree_sitter::Node;

/// Checks every instance of one construct in the tree.
///
/// Violations come back in document order.
#[must_use]
pub fn check_construct(tree: &SourceTree<'_>, construct: Construct) -> Vec<PaddingViolation> {
    let descriptor = construct.descriptor();
    let mut collector = ViolationCollector::new();

    for node in tree.walk() {
        if descriptor.matches(node, tree.source()) {
            check_node(tree, node, descriptor, &mut collector);
        }
    }

    collector.drain()
}

/// Checks every construct in the catalog in a single traversal.
#[must_use]
pub fn check_all(tree: &SourceTree<'_>) -> Vec<PaddingViolation> {
    let mut collector = ViolationCollector::new();

    for node in tree.walk() {
        if let Some(construct) = Construct::of(node, tree.source()) {
            check_node(tree, node, construct.descriptor(), &mut collector);
        }
    }

    collector.drain()
}

fn check_node(
    tree: &SourceTree<'_>,
    node: Node<'_>,
    descriptor: &ConstructDescriptor,
    out: &mut ViolationCollector,
) {
    match descriptor.mode {
        Mode::Adjacent => variable::check(tree, node, descriptor, out),
        Mode::Block => check_block_construct(tree, node, descriptor, out),
    }
}

fn check_block_construct(
    tree: &SourceTree<'_>,
    node: Node<'_>,
    descriptor: &ConstructDescriptor,
    out: &mut ViolationCollector,
) {
    let construct = descriptor.construct;
    let Some(anchor) = (descriptor.anchor)(node) else {
        trace!("{construct} at byte {} has no anchor, skipping", node.start_byte());
        return;
    };

    if descriptor.single_line == SingleLine::SkipAll && !tree.spans_lines(node) {
        return;
    }

    if !continues_else_chain(node) {
        check_before(tree, node, anchor, descriptor, out);
    }

    if let Some(body) = (descriptor.body)(node).filter(|b| tree.spans_lines(*b)) {
        check_after(tree, body, anchor, descriptor, out);
        check_end(tree, body, construct, out);
    }

    if let Some(clause) = descriptor.clause {
        let block = (clause.locate)(node).and_then(|c| (clause.block)(c).map(|b| (c, b)));
        if let Some((clause_node, block)) = block {
            check_clause(tree, clause_node, block, clause.kind, construct, out);
        }
    }
}

/// `if` nodes that are the `if` of an `else if`.
fn continues_else_chain(node: Node<'_>) -> bool {
    node.kind() == "if_statement" && node.parent().is_some_and(|p| p.kind() == "else_clause")
}

fn check_before(
    tree: &SourceTree<'_>,
    node: Node<'_>,
    anchor: Span,
    descriptor: &ConstructDescriptor,
    out: &mut ViolationCollector,
) {
    let lead = leading_node(node);
    let line = tree.start_line(lead);

    let previous = match descriptor.previous {
        Previous::Statement => previous_statement(lead),
        Previous::Token => previous_token(lead),
        Previous::StatementOrToken => {
            if statement_unit(node).parent().is_some_and(is_statement_list) {
                previous_statement(lead)
            } else {
                previous_token(lead)
            }
        }
    };

    if let Some(prev) = previous {
        if tree.start_line(prev) + 1 == line || tree.end_line(prev) + 1 == line {
            out.record(anchor, PaddingKind::BeforeMissing, descriptor.construct);
        }
        return;
    }

    // The program root has nothing above it to be separated from.
    let Some(parent) = lead.parent().filter(|p| p.parent().is_some()) else {
        return;
    };
    if tree.start_line(parent) + 1 >= line {
        out.record(anchor, PaddingKind::BeforeMissing, descriptor.construct);
    }
}

fn check_after(
    tree: &SourceTree<'_>,
    body: Node<'_>,
    anchor: Span,
    descriptor: &ConstructDescriptor,
    out: &mut ViolationCollector,
) {
    let opening_line = match descriptor.opening {
        Opening::Anchor => tree.position_of(anchor.start).line,
        Opening::Delimiter => match first_token(body).filter(|t| t.kind() == "{") {
            Some(open) => tree.start_line(open),
            None => return,
        },
    };

    let Some(first) = first_statement(body) else {
        return;
    };

    if tree.start_line(first) <= opening_line + 1 {
        out.record(anchor, PaddingKind::AfterMissing, descriptor.construct);
    }
}

/// The last token of the body must sit on the line directly above `}`.
fn check_end(
    tree: &SourceTree<'_>,
    body: Node<'_>,
    construct: Construct,
    out: &mut ViolationCollector,
) {
    let Some(close) = last_token(body).filter(|t| t.kind() == "}") else {
        return;
    };
    let Some(last) = previous_token(close) else {
        return;
    };

    if tree.start_line(last) + 1 != tree.start_line(close) {
        out.record(Span::of(close), PaddingKind::EndDisallowed, construct);
    }
}

fn check_clause(
    tree: &SourceTree<'_>,
    clause: Node<'_>,
    block: Node<'_>,
    kind: PaddingKind,
    construct: Construct,
    out: &mut ViolationCollector,
) {
    if !tree.spans_lines(block) {
        return;
    }
    let Some(keyword) = first_token(clause) else {
        return;
    };

    if let Some(first) = first_statement(block) {
        if tree.start_line(first) <= tree.start_line(keyword) + 1 {
            out.record(Span::of(keyword), kind, construct);
        }
    }

    check_end(tree, block, construct, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pad_lint_core::Dialect;

    fn check(source: &str, construct: Construct) -> Vec<PaddingViolation> {
        let tree = SourceTree::parse(source, Dialect::TypeScript).expect("parse");
        check_construct(&tree, construct)
    }

    fn kinds(source: &str, construct: Construct) -> Vec<PaddingKind> {
        check(source, construct).into_iter().map(|v| v.kind).collect()
    }

    #[test]
    fn single_line_class_is_exempt() {
        assert!(check("class Maria { }", Construct::Class).is_empty());
    }

    #[test]
    fn fully_padded_class() {
        let source = "class Maria {\n\n  run() {\n\n    go();\n  }\n}\n";
        assert!(check(source, Construct::Class).is_empty());
    }

    #[test]
    fn unpadded_open_and_padded_close() {
        let source = "class Maria {\n  run() {}\n\n}\n";
        assert_eq!(
            kinds(source, Construct::Class),
            vec![PaddingKind::AfterMissing, PaddingKind::EndDisallowed]
        );
    }

    #[test]
    fn before_reported_at_keyword() {
        let source = "import jj from 'jj';\nexport class Maria {}\n";
        let violations = check(source, Construct::Class);
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.kind, PaddingKind::BeforeMissing);
        assert_eq!(&source[v.start..v.end], "class");
    }

    #[test]
    fn end_reported_at_closing_brace() {
        let source = "function f() {\n\n  go();\n\n}\n";
        let violations = check(source, Construct::Function);
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.kind, PaddingKind::EndDisallowed);
        assert_eq!(&source[v.start..v.end], "}");
        assert_eq!(v.start, source.rfind('}').unwrap_or_default());
    }

    #[test]
    fn blank_line_inside_empty_block_is_disallowed() {
        assert!(check("function f() {\n}\n", Construct::Function).is_empty());

        let source = "function f() {\n\n}\n";
        let violations = check(source, Construct::Function);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, PaddingKind::EndDisallowed);
        assert_eq!(&source[violations[0].start..violations[0].end], "}");

        assert_eq!(
            kinds("class Maria {\n\n}\n", Construct::Class),
            vec![PaddingKind::EndDisallowed]
        );
    }

    #[test]
    fn first_statement_in_block_needs_blank_line() {
        let source = "function f() {\n\n  if (a) {\n\n    go();\n  }\n}\n";
        assert_eq!(kinds(source, Construct::If), vec![]);

        let tight = "function f() {\n  if (a) {\n\n    go();\n  }\n}\n";
        assert_eq!(kinds(tight, Construct::If), vec![PaddingKind::BeforeMissing]);
    }

    #[test]
    fn comments_are_not_statements() {
        let source = "run();\n\n// explain the loop\nfor (const x of xs) {\n\n  use(x);\n}\n";
        assert_eq!(kinds(source, Construct::For), vec![]);
    }

    #[test]
    fn else_if_chain_checks_each_block() {
        let source = "\
if (a) {

  one();
} else if (b) {
  two();
} else {
  three();
}
";
        assert_eq!(
            kinds(source, Construct::If),
            vec![PaddingKind::AfterMissing, PaddingKind::AfterMissingElse]
        );
    }

    #[test]
    fn catch_clause_padding() {
        let source = "\
try {

  run();
} catch (e) {
  log(e);

}
";
        assert_eq!(
            kinds(source, Construct::TryCatch),
            vec![PaddingKind::AfterMissingCatch, PaddingKind::EndDisallowed]
        );
    }

    #[test]
    fn malformed_construct_is_skipped() {
        let tree = SourceTree::parse("class A {\n  x() {\n", Dialect::TypeScript).expect("parse");
        // Only the absence of a panic matters here.
        let _ = check_all(&tree);
    }

    #[test]
    fn check_all_is_idempotent_and_ordered() {
        let source = "const a = 1;\nclass Maria {\n  run() {\n    go();\n  }\n}\n";
        let tree = SourceTree::parse(source, Dialect::TypeScript).expect("parse");

        let first = check_all(&tree);
        let second = check_all(&tree);
        assert_eq!(first, second);
        assert!(first
            .iter()
            .any(|v| v.construct == Construct::Variable && v.kind == PaddingKind::AfterMissing));
        assert!(first
            .iter()
            .any(|v| v.construct == Construct::Method && v.kind == PaddingKind::BeforeMissing));
    }
}
