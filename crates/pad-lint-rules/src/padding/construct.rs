//! The construct catalog.
//!
//! Every padded construct is one row of [`DESCRIPTORS`]: the node kinds it
//! matches, how its parts are located, and which variant of the padding
//! checks applies.

use super::collector::{PaddingKind, Span};
use pad_lint_core::tree::navigation::{
    child_token, first_token, is_statement_list, statement_unit,
};
use tree_sitter::Node;

/// Structural constructs with padding conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    /// `class A {}`
    Class,
    /// `function f() {}` and function expressions.
    Function,
    /// `() => {}`
    ArrowFunction,
    /// Class methods other than the constructor.
    Method,
    /// `constructor() {}`
    Constructor,
    /// `for (...) {}`, `for (... of ...) {}`, `for (... in ...) {}`
    For,
    /// `if (...) {} else {}`
    If,
    /// `try {} catch {}`
    TryCatch,
    /// `const`, `let` and `var` statements.
    Variable,
}

impl Construct {
    /// All constructs in catalog order.
    pub const ALL: [Self; 9] = [
        Self::Class,
        Self::Function,
        Self::ArrowFunction,
        Self::Method,
        Self::Constructor,
        Self::For,
        Self::If,
        Self::TryCatch,
        Self::Variable,
    ];

    /// Name used in messages.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Class => "class declaration",
            Self::Function => "function declaration",
            Self::ArrowFunction => "arrow function declaration",
            Self::Method => "method declaration",
            Self::Constructor => "constructor",
            Self::For => "for",
            Self::If => "if",
            Self::TryCatch => "try",
            Self::Variable => "variable declaration",
        }
    }

    /// The catalog row for this construct.
    #[must_use]
    pub fn descriptor(self) -> &'static ConstructDescriptor {
        match self {
            Self::Class => &DESCRIPTORS[0],
            Self::Function => &DESCRIPTORS[1],
            Self::ArrowFunction => &DESCRIPTORS[2],
            Self::Method => &DESCRIPTORS[3],
            Self::Constructor => &DESCRIPTORS[4],
            Self::For => &DESCRIPTORS[5],
            Self::If => &DESCRIPTORS[6],
            Self::TryCatch => &DESCRIPTORS[7],
            Self::Variable => &DESCRIPTORS[8],
        }
    }

    /// Finds the construct a node belongs to, if any.
    #[must_use]
    pub fn of(node: Node<'_>, source: &str) -> Option<Self> {
        DESCRIPTORS
            .iter()
            .find(|d| d.matches(node, source))
            .map(|d| d.construct)
    }
}

impl std::fmt::Display for Construct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Where the "before" check looks for the preceding code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Previous {
    /// The previous sibling statement.
    Statement,
    /// The previous token, wherever it is.
    Token,
    /// The previous statement when the node sits in a statement list,
    /// otherwise the previous token.
    StatementOrToken,
}

/// Which line counts as the opening of the body for the "after" check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opening {
    /// The line of the anchor keyword.
    Anchor,
    /// The line of the body's `{`.
    Delimiter,
}

/// What a construct that fits on one line is exempt from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SingleLine {
    /// Only the body checks are skipped; "before" still applies.
    CheckBefore,
    /// Every check is skipped.
    SkipAll,
}

/// How the construct is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Before / after / end checks around a braced body.
    Block,
    /// Separation from adjacent statements of a different kind.
    Adjacent,
}

/// A trailing clause with its own block (`else`, `catch`).
#[derive(Clone, Copy)]
pub struct Clause {
    /// Violation kind for a missing blank line after the clause keyword.
    pub kind: PaddingKind,
    /// Locates the clause node on the construct.
    pub locate: for<'a> fn(Node<'a>) -> Option<Node<'a>>,
    /// Locates the braced block of the clause.
    pub block: for<'a> fn(Node<'a>) -> Option<Node<'a>>,
}

/// One row of the construct catalog.
#[derive(Clone, Copy)]
pub struct ConstructDescriptor {
    /// The construct described.
    pub construct: Construct,
    /// Named node kinds that may be this construct.
    pub node_kinds: &'static [&'static str],
    /// Extra predicate for kinds shared between constructs.
    pub refine: Option<for<'a, 'b> fn(Node<'a>, &'b str) -> bool>,
    /// Lookup used by the "before" check.
    pub previous: Previous,
    /// Opening line used by the "after" check.
    pub opening: Opening,
    /// Single-line exemption.
    pub single_line: SingleLine,
    /// Check variant.
    pub mode: Mode,
    /// Span violations are reported at.
    pub anchor: for<'a> fn(Node<'a>) -> Option<Span>,
    /// The braced body, if the node has one.
    pub body: for<'a> fn(Node<'a>) -> Option<Node<'a>>,
    /// Trailing clause checked after the body.
    pub clause: Option<Clause>,
}

impl ConstructDescriptor {
    /// Whether `node` is an instance of this construct.
    #[must_use]
    pub fn matches(&self, node: Node<'_>, source: &str) -> bool {
        node.is_named()
            && self.node_kinds.contains(&node.kind())
            && self.refine.map_or(true, |refine| refine(node, source))
    }
}

impl std::fmt::Debug for ConstructDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructDescriptor")
            .field("construct", &self.construct)
            .field("node_kinds", &self.node_kinds)
            .field("previous", &self.previous)
            .field("opening", &self.opening)
            .field("single_line", &self.single_line)
            .field("mode", &self.mode)
            .field("clause", &self.clause.map(|c| c.kind))
            .finish_non_exhaustive()
    }
}

/// The construct catalog, in [`Construct::ALL`] order.
pub static DESCRIPTORS: [ConstructDescriptor; 9] = [
    ConstructDescriptor {
        construct: Construct::Class,
        node_kinds: &["class_declaration", "abstract_class_declaration"],
        refine: None,
        previous: Previous::Statement,
        opening: Opening::Delimiter,
        single_line: SingleLine::CheckBefore,
        mode: Mode::Block,
        anchor: class_keyword,
        body: class_body,
        clause: None,
    },
    ConstructDescriptor {
        construct: Construct::Function,
        node_kinds: &[
            "function_declaration",
            "generator_function_declaration",
            "function_expression",
            "generator_function",
            "function",
        ],
        refine: None,
        previous: Previous::StatementOrToken,
        opening: Opening::Anchor,
        single_line: SingleLine::CheckBefore,
        mode: Mode::Block,
        anchor: function_keyword,
        body: body_block,
        clause: None,
    },
    ConstructDescriptor {
        construct: Construct::ArrowFunction,
        node_kinds: &["arrow_function"],
        refine: None,
        previous: Previous::Token,
        opening: Opening::Anchor,
        single_line: SingleLine::SkipAll,
        mode: Mode::Block,
        anchor: arrow_head,
        body: body_block,
        clause: None,
    },
    ConstructDescriptor {
        construct: Construct::Method,
        node_kinds: &["method_definition"],
        refine: Some(is_method),
        previous: Previous::Token,
        opening: Opening::Delimiter,
        single_line: SingleLine::CheckBefore,
        mode: Mode::Block,
        anchor: first_token_span,
        body: body_block,
        clause: None,
    },
    ConstructDescriptor {
        construct: Construct::Constructor,
        node_kinds: &["method_definition"],
        refine: Some(is_constructor),
        previous: Previous::Token,
        opening: Opening::Delimiter,
        single_line: SingleLine::CheckBefore,
        mode: Mode::Block,
        anchor: first_token_span,
        body: body_block,
        clause: None,
    },
    ConstructDescriptor {
        construct: Construct::For,
        node_kinds: &["for_statement", "for_in_statement"],
        refine: None,
        previous: Previous::Statement,
        opening: Opening::Anchor,
        single_line: SingleLine::CheckBefore,
        mode: Mode::Block,
        anchor: for_keyword,
        body: body_block,
        clause: None,
    },
    ConstructDescriptor {
        construct: Construct::If,
        node_kinds: &["if_statement"],
        refine: None,
        previous: Previous::Statement,
        opening: Opening::Anchor,
        single_line: SingleLine::CheckBefore,
        mode: Mode::Block,
        anchor: if_keyword,
        body: consequence_block,
        clause: Some(Clause {
            kind: PaddingKind::AfterMissingElse,
            locate: else_clause,
            block: else_block,
        }),
    },
    ConstructDescriptor {
        construct: Construct::TryCatch,
        node_kinds: &["try_statement"],
        refine: None,
        previous: Previous::Statement,
        opening: Opening::Anchor,
        single_line: SingleLine::CheckBefore,
        mode: Mode::Block,
        anchor: try_keyword,
        body: body_block,
        clause: Some(Clause {
            kind: PaddingKind::AfterMissingCatch,
            locate: catch_clause,
            block: body_block,
        }),
    },
    ConstructDescriptor {
        construct: Construct::Variable,
        node_kinds: &["lexical_declaration", "variable_declaration"],
        refine: Some(in_statement_list),
        previous: Previous::Statement,
        opening: Opening::Anchor,
        single_line: SingleLine::CheckBefore,
        mode: Mode::Adjacent,
        anchor: first_token_span,
        body: no_body,
        clause: None,
    },
];

fn keyword(node: Node<'_>, kind: &str) -> Option<Span> {
    child_token(node, kind).map(Span::of)
}

fn class_keyword(node: Node<'_>) -> Option<Span> {
    keyword(node, "class")
}

fn function_keyword(node: Node<'_>) -> Option<Span> {
    keyword(node, "function")
}

fn for_keyword(node: Node<'_>) -> Option<Span> {
    keyword(node, "for")
}

fn if_keyword(node: Node<'_>) -> Option<Span> {
    keyword(node, "if")
}

fn try_keyword(node: Node<'_>) -> Option<Span> {
    keyword(node, "try")
}

fn first_token_span(node: Node<'_>) -> Option<Span> {
    first_token(node).map(Span::of)
}

/// From the start of the arrow function through its `=>`.
fn arrow_head(node: Node<'_>) -> Option<Span> {
    let arrow = child_token(node, "=>")?;
    Some(Span {
        start: node.start_byte(),
        end: arrow.end_byte(),
    })
}

fn statement_block<'a>(node: Node<'a>, field: &str) -> Option<Node<'a>> {
    node.child_by_field_name(field)
        .filter(|block| block.kind() == "statement_block")
}

fn body_block(node: Node<'_>) -> Option<Node<'_>> {
    statement_block(node, "body")
}

fn consequence_block(node: Node<'_>) -> Option<Node<'_>> {
    statement_block(node, "consequence")
}

fn class_body(node: Node<'_>) -> Option<Node<'_>> {
    node.child_by_field_name("body")
        .filter(|body| body.kind() == "class_body")
}

fn no_body(_: Node<'_>) -> Option<Node<'_>> {
    None
}

fn else_clause(node: Node<'_>) -> Option<Node<'_>> {
    node.child_by_field_name("alternative")
}

fn catch_clause(node: Node<'_>) -> Option<Node<'_>> {
    node.child_by_field_name("handler")
}

/// The block directly following `else`; `None` for `else if`.
fn else_block(clause: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = clause.walk();
    let block = clause
        .named_children(&mut cursor)
        .find(|child| !child.is_extra())
        .filter(|child| child.kind() == "statement_block");
    block
}

fn is_constructor(node: Node<'_>, source: &str) -> bool {
    node.child_by_field_name("name")
        .and_then(|name| source.get(name.start_byte()..name.end_byte()))
        .is_some_and(|name| name == "constructor")
}

fn is_method(node: Node<'_>, source: &str) -> bool {
    !is_constructor(node, source)
}

fn in_statement_list(node: Node<'_>, _source: &str) -> bool {
    statement_unit(node).parent().is_some_and(is_statement_list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pad_lint_core::{Dialect, SourceTree};

    fn constructs(source: &str) -> Vec<Construct> {
        let tree = SourceTree::parse(source, Dialect::TypeScript).expect("parse");
        tree.walk()
            .filter_map(|node| Construct::of(node, source))
            .collect()
    }

    #[test]
    fn descriptors_follow_catalog_order() {
        for construct in Construct::ALL {
            assert_eq!(construct.descriptor().construct, construct);
        }
    }

    #[test]
    fn kinds_map_to_exactly_one_construct() {
        let found = constructs(
            "class A {\n  constructor() {}\n  run() {}\n}\n\
             function f() {}\n\
             const g = () => {};\n\
             for (const x of xs) {}\n\
             if (a) {} else {}\n\
             try {} catch (e) {}\n",
        );
        assert_eq!(
            found,
            vec![
                Construct::Class,
                Construct::Constructor,
                Construct::Method,
                Construct::Function,
                Construct::Variable,
                Construct::ArrowFunction,
                Construct::For,
                Construct::If,
                Construct::TryCatch,
            ]
        );
    }

    #[test]
    fn loop_initializer_is_not_a_variable_statement() {
        let found = constructs("for (let i = 0; i < 3; i++) {}\n");
        assert_eq!(found, vec![Construct::For]);
    }

    #[test]
    fn exported_declarations_are_recognized() {
        let found = constructs("export const a = 1;\nexport abstract class B {}\n");
        assert_eq!(found, vec![Construct::Variable, Construct::Class]);
    }

    #[test]
    fn function_keyword_token_is_not_a_construct() {
        let found = constructs("const f = function () {};\n");
        assert_eq!(found, vec![Construct::Variable, Construct::Function]);
    }

    #[test]
    fn arrow_head_spans_parameters_and_arrow() {
        let source = "const g = (a, b) => {};\n";
        let tree = SourceTree::parse(source, Dialect::TypeScript).expect("parse");
        let arrow = tree
            .walk()
            .find(|n| n.kind() == "arrow_function")
            .expect("arrow");
        let span = arrow_head(arrow).expect("span");
        assert_eq!(&source[span.start..span.end], "(a, b) =>");
    }

    #[test]
    fn else_if_has_no_else_block() {
        let source = "if (a) {} else if (b) {}\n";
        let tree = SourceTree::parse(source, Dialect::TypeScript).expect("parse");
        let clause = tree
            .walk()
            .find(|n| n.kind() == "else_clause")
            .expect("else");
        assert!(else_block(clause).is_none());
    }
}
