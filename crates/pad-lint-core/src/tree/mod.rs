//! Parsed source files.
//!
//! [`SourceTree`] owns a tree-sitter [`Tree`] together with the text it was
//! parsed from and a [`LineIndex`]. Rules only ever read from it.

pub mod navigation;
mod position;

pub use position::{LineIndex, Position};

use std::path::Path;
use thiserror::Error;
use tree_sitter::{Language, Node, Parser, Tree, TreeCursor};

/// Grammar used to parse a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Plain TypeScript (`.ts`, `.mts`, `.cts`).
    TypeScript,
    /// TypeScript with JSX. Also used for JavaScript sources.
    Tsx,
}

impl Dialect {
    /// Picks the dialect from a file extension, if the extension is supported.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" | "js" | "jsx" | "mjs" | "cjs" => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Picks the dialect from a file path.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    fn language(self) -> Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeScript => write!(f, "typescript"),
            Self::Tsx => write!(f, "tsx"),
        }
    }
}

/// Errors from building a syntax tree.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The grammar could not be loaded into the parser.
    #[error("Failed to load {dialect} grammar: {message}")]
    Language {
        /// Dialect that failed to load.
        dialect: Dialect,
        /// Message from tree-sitter.
        message: String,
    },

    /// The parser returned no tree.
    #[error("Parser produced no syntax tree")]
    NoTree,
}

/// A parsed source file.
pub struct SourceTree<'src> {
    source: &'src str,
    tree: Tree,
    lines: LineIndex,
    dialect: Dialect,
}

impl<'src> SourceTree<'src> {
    /// Parses `source` with the given dialect.
    ///
    /// Syntax errors do not fail the parse; tree-sitter recovers and marks
    /// the damaged region. Use [`SourceTree::has_syntax_errors`] to detect
    /// them.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar cannot be loaded or no tree is
    /// produced.
    pub fn parse(source: &'src str, dialect: Dialect) -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&dialect.language())
            .map_err(|e| ParseError::Language {
                dialect,
                message: e.to_string(),
            })?;
        let tree = parser.parse(source, None).ok_or(ParseError::NoTree)?;

        Ok(Self {
            source,
            tree,
            lines: LineIndex::new(source),
            dialect,
        })
    }

    /// The root `program` node.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// The source text.
    #[must_use]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Line index of the source text.
    #[must_use]
    pub fn lines(&self) -> &LineIndex {
        &self.lines
    }

    /// Whether tree-sitter had to recover from syntax errors.
    #[must_use]
    pub fn has_syntax_errors(&self) -> bool {
        self.root().has_error()
    }

    /// Source text covered by `node`.
    #[must_use]
    pub fn text(&self, node: Node<'_>) -> &'src str {
        self.source
            .get(node.start_byte()..node.end_byte())
            .unwrap_or("")
    }

    /// Position of a byte offset, with the character counted in UTF-16 code
    /// units as editors and the TypeScript compiler do.
    #[must_use]
    pub fn position_of(&self, offset: usize) -> Position {
        self.lines.utf16_position(self.source, offset)
    }

    /// Line on which `node` starts.
    #[must_use]
    pub fn start_line(&self, node: Node<'_>) -> usize {
        self.lines.line_of(node.start_byte())
    }

    /// Line on which `node` ends (the line of its last byte).
    #[must_use]
    pub fn end_line(&self, node: Node<'_>) -> usize {
        let last = node.end_byte().saturating_sub(1).max(node.start_byte());
        self.lines.line_of(last)
    }

    /// Whether `node` starts and ends on different lines.
    #[must_use]
    pub fn spans_lines(&self, node: Node<'_>) -> bool {
        self.start_line(node) != self.end_line(node)
    }

    /// Pre-order traversal of every node, named or not.
    #[must_use]
    pub fn walk(&self) -> Preorder<'_> {
        Preorder {
            cursor: self.tree.walk(),
            done: false,
        }
    }
}

impl std::fmt::Debug for SourceTree<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceTree")
            .field("dialect", &self.dialect)
            .field("lines", &self.lines.line_count())
            .field("has_syntax_errors", &self.has_syntax_errors())
            .finish_non_exhaustive()
    }
}

/// Pre-order node iterator driven by a [`TreeCursor`].
pub struct Preorder<'tree> {
    cursor: TreeCursor<'tree>,
    done: bool,
}

impl<'tree> Iterator for Preorder<'tree> {
    type Item = Node<'tree>;

    fn next(&mut self) -> Option<Node<'tree>> {
        if self.done {
            return None;
        }
        let node = self.cursor.node();
        if self.cursor.goto_first_child() {
            return Some(node);
        }
        loop {
            if self.cursor.goto_next_sibling() {
                return Some(node);
            }
            if !self.cursor.goto_parent() {
                self.done = true;
                return Some(node);
            }
        }
    }
}
