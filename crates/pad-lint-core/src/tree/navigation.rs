//! Token and statement navigation over a tree-sitter syntax tree.
//!
//! Comments are extras in the TypeScript grammar; none of the queries here
//! ever return one. Zero-width nodes (automatic semicolons, nodes inserted by
//! error recovery) are skipped as well, so a "token" always covers source
//! text.

use tree_sitter::Node;

/// Node kinds whose named children form a statement list.
const STATEMENT_LISTS: &[&str] = &[
    "program",
    "statement_block",
    "class_body",
    "switch_case",
    "switch_default",
];

/// Nodes that wrap a single statement without changing its position in the
/// list (`export class A {}`, `label: for (...) {}`, `declare const x: T;`).
const WRAPPERS: &[&str] = &["export_statement", "labeled_statement", "ambient_declaration"];

/// Nodes treated as one token even though the grammar gives them children.
const ATOMIC: &[&str] = &["string", "template_string", "regex"];

fn is_trivia(node: Node<'_>) -> bool {
    node.is_extra() || node.is_missing() || node.start_byte() == node.end_byte()
}

fn is_token(node: Node<'_>) -> bool {
    node.child_count() == 0 || ATOMIC.contains(&node.kind())
}

/// Returns true when `node` holds an ordered list of statements.
#[must_use]
pub fn is_statement_list(node: Node<'_>) -> bool {
    STATEMENT_LISTS.contains(&node.kind())
}

/// First token covered by `node`, or `None` when it covers no text.
#[must_use]
pub fn first_token(node: Node<'_>) -> Option<Node<'_>> {
    if is_trivia(node) {
        return None;
    }
    if is_token(node) {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_token)
}

/// Last token covered by `node`, or `None` when it covers no text.
#[must_use]
pub fn last_token(node: Node<'_>) -> Option<Node<'_>> {
    if is_trivia(node) {
        return None;
    }
    if is_token(node) {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().rev().find_map(last_token)
}

/// The last token that ends before `node` starts.
///
/// Returns `None` at the start of the file.
#[must_use]
pub fn previous_token(node: Node<'_>) -> Option<Node<'_>> {
    let mut current = node;
    loop {
        let mut sibling = current.prev_sibling();
        while let Some(candidate) = sibling {
            if let Some(token) = last_token(candidate) {
                return Some(token);
            }
            sibling = candidate.prev_sibling();
        }
        current = current.parent()?;
    }
}

/// The statement directly before `node` in its statement list.
///
/// Returns `None` when `node` is first in the list or does not sit in a
/// statement list at all.
#[must_use]
pub fn previous_statement(node: Node<'_>) -> Option<Node<'_>> {
    let parent = node.parent().filter(|p| is_statement_list(*p))?;
    let case_value = parent.child_by_field_name("value");
    let mut sibling = node.prev_named_sibling();
    while let Some(candidate) = sibling {
        if Some(candidate) == case_value {
            return None;
        }
        if !is_trivia(candidate) {
            return Some(candidate);
        }
        sibling = candidate.prev_named_sibling();
    }
    None
}

/// The statement directly after `node` in its statement list.
#[must_use]
pub fn next_statement(node: Node<'_>) -> Option<Node<'_>> {
    node.parent().filter(|p| is_statement_list(*p))?;
    let mut sibling = node.next_named_sibling();
    while let Some(candidate) = sibling {
        if !is_trivia(candidate) {
            return Some(candidate);
        }
        sibling = candidate.next_named_sibling();
    }
    None
}

/// First statement (or class member) inside a block.
#[must_use]
pub fn first_statement(block: Node<'_>) -> Option<Node<'_>> {
    let case_value = block.child_by_field_name("value");
    let mut cursor = block.walk();
    let found = block
        .named_children(&mut cursor)
        .find(|child| !is_trivia(*child) && Some(*child) != case_value);
    found
}

/// Climbs wrapper nodes so that `export class A {}` is one statement.
#[must_use]
pub fn statement_unit(node: Node<'_>) -> Node<'_> {
    let mut unit = node;
    while let Some(parent) = unit.parent().filter(|p| WRAPPERS.contains(&p.kind())) {
        unit = parent;
    }
    unit
}

/// Unwraps wrapper nodes down to the wrapped statement.
#[must_use]
pub fn inner_statement(node: Node<'_>) -> Node<'_> {
    let mut inner = node;
    while WRAPPERS.contains(&inner.kind()) {
        let mut cursor = inner.walk();
        let last = inner
            .named_children(&mut cursor)
            .filter(|child| !is_trivia(*child) && child.kind() != "decorator")
            .last();
        match last {
            Some(child) => inner = child,
            None => break,
        }
    }
    inner
}

/// The node where a construct visually begins.
///
/// This is the statement unit, extended backwards over decorators that the
/// grammar places as siblings (method and constructor decorators in a class
/// body).
#[must_use]
pub fn leading_node(node: Node<'_>) -> Node<'_> {
    let mut lead = statement_unit(node);
    let mut sibling = lead.prev_sibling();
    while let Some(candidate) = sibling {
        if candidate.is_extra() {
            sibling = candidate.prev_sibling();
            continue;
        }
        if candidate.kind() != "decorator" {
            break;
        }
        lead = candidate;
        sibling = candidate.prev_sibling();
    }
    lead
}

/// First direct child token with the given kind, e.g. the `class` keyword.
#[must_use]
pub fn child_token<'tree>(node: Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .find(|child| !child.is_named() && child.kind() == kind && !is_trivia(*child));
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Dialect, SourceTree};

    fn parse(source: &str) -> SourceTree<'_> {
        SourceTree::parse(source, Dialect::TypeScript).expect("grammar loads")
    }

    fn find<'t>(tree: &'t SourceTree<'_>, kind: &str) -> Node<'t> {
        tree.walk()
            .find(|n| n.kind() == kind)
            .unwrap_or_else(|| panic!("no {kind} node"))
    }

    #[test]
    fn previous_token_skips_comments() {
        let tree = parse("a();\n// note\nif (x) {}\n");
        let if_node = find(&tree, "if_statement");
        let token = previous_token(if_node).expect("token before if");
        assert_eq!(tree.text(token), ";");
    }

    #[test]
    fn previous_token_is_none_at_file_start() {
        let tree = parse("if (x) {}\n");
        let if_node = find(&tree, "if_statement");
        assert!(previous_token(if_node).is_none());
    }

    #[test]
    fn previous_and_next_statement_in_block() {
        let tree = parse("function f() {\n  a();\n  const b = 1;\n  c();\n}\n");
        let decl = find(&tree, "lexical_declaration");

        let prev = previous_statement(decl).expect("previous");
        let next = next_statement(decl).expect("next");
        assert_eq!(tree.text(prev), "a();");
        assert_eq!(tree.text(next), "c();");
    }

    #[test]
    fn first_statement_in_switch_case_skips_value() {
        let tree = parse("switch (x) {\n  case 1:\n    run();\n}\n");
        let case = find(&tree, "switch_case");
        let first = first_statement(case).expect("statement");
        assert_eq!(first.kind(), "expression_statement");
        assert!(previous_statement(first).is_none());
    }

    #[test]
    fn statement_unit_climbs_export() {
        let tree = parse("export class A {}\n");
        let class = find(&tree, "class_declaration");
        let unit = statement_unit(class);
        assert_eq!(unit.kind(), "export_statement");
        assert_eq!(inner_statement(unit), class);
    }

    #[test]
    fn leading_node_includes_member_decorators() {
        let tree = parse("class A {\n  @Get()\n  run() {}\n}\n");
        let method = find(&tree, "method_definition");
        let lead = leading_node(method);
        assert_eq!(lead.kind(), "decorator");
        assert_eq!(tree.start_line(lead), 1);
    }

    #[test]
    fn string_literal_is_one_token() {
        let tree = parse("const s = 'a b';\n");
        let decl = find(&tree, "lexical_declaration");
        let last = last_token(decl).expect("last");
        let before = previous_token(last).expect("string");
        assert_eq!(tree.text(before), "'a b'");
    }

    #[test]
    fn first_and_last_token_of_block() {
        let tree = parse("if (x) {\n  y();\n}\n");
        let block = find(&tree, "statement_block");
        assert_eq!(first_token(block).map(|t| t.kind()), Some("{"));
        assert_eq!(last_token(block).map(|t| t.kind()), Some("}"));
    }

    #[test]
    fn child_token_finds_keyword() {
        let tree = parse("abstract class A {}\n");
        let class = find(&tree, "abstract_class_declaration");
        let keyword = child_token(class, "class").expect("class keyword");
        assert_eq!(tree.text(keyword), "class");
    }
}
