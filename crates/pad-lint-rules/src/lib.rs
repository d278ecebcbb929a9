//! # pad-lint-rules
//!
//! Built-in blank-line padding rules for pad-lint, plus two structural
//! checks on methods and async functions.
//!
//! The [`padding`] module holds the shared engine: a catalog of padded
//! constructs and the before / after / end checks run against each of them.
//! The rules below wrap it for the [`pad_lint_core::Analyzer`].
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | PL001 | `class-padding` | Blank lines around class declarations |
//! | PL002 | `function-padding` | Blank lines around functions and function expressions |
//! | PL003 | `arrow-function-padding` | Blank lines around multi-line arrow functions |
//! | PL004 | `method-padding` | Blank lines around class methods |
//! | PL005 | `constructor-padding` | Blank lines around constructors |
//! | PL006 | `for-padding` | Blank lines around `for` loops |
//! | PL007 | `if-padding` | Blank lines around `if` / `else` blocks |
//! | PL008 | `try-catch-padding` | Blank lines around `try` / `catch` blocks |
//! | PL009 | `variable-padding` | Groups of variable declarations are set apart |
//! | PL010 | `max-method-lines` | Limits the length of methods |
//! | PL011 | `no-async-without-await` | `async` functions must await or return |
//!
//! ## Usage
//!
//! ```ignore
//! use pad_lint_core::Analyzer;
//! use pad_lint_rules::{MaxMethodLines, PaddingRule};
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .rule(PaddingRule::class())
//!     .rule(MaxMethodLines::new().max_lines(40))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod max_method_lines;
mod no_async_without_await;
pub mod padding;
mod padding_rules;
mod presets;

pub use max_method_lines::MaxMethodLines;
pub use no_async_without_await::NoAsyncWithoutAwait;
pub use padding::Construct;
pub use padding_rules::PaddingRule;
pub use presets::{
    all_rules, apply_options, configured_rules, minimal_rules, recommended_rules, strict_rules,
    Preset,
};

/// Re-export core types for convenience.
pub use pad_lint_core::{Rule, Severity, Violation};
