//! # pad-lint-core
//!
//! Core framework for blank-line linting of TypeScript sources, built on
//! tree-sitter syntax trees.
//!
//! This crate provides:
//!
//! - [`SourceTree`] and the [`tree::navigation`] queries rules are written with
//! - [`Rule`] trait for per-file rules
//! - [`Analyzer`] for discovering files and orchestrating lint execution
//! - [`Violation`] for representing lint findings
//! - [`Config`] for `pad-lint.toml` files
//!
//! ## Example
//!
//! ```ignore
//! use pad_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod rule;
mod types;

pub mod tree;
/// Utility modules for rule implementations.
pub mod utils;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use rule::{Rule, RuleBox};
pub use tree::{Dialect, LineIndex, ParseError, Position, SourceTree};
pub use types::{
    LintResult, Location, Severity, SeverityCounts, Suggestion, Violation, ViolationDiagnostic,
};
pub use utils::allowance::AllowCheck;
