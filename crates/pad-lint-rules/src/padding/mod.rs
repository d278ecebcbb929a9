//! Blank-line padding checks over a parsed TypeScript tree.
//!
//! [`check_construct`] runs the before / after / end checks for one
//! construct of the [`Construct`] catalog; [`check_all`] runs every construct
//! in a single walk. Both return raw [`PaddingViolation`]s with byte spans;
//! the rule wrappers in this crate turn them into reportable violations.

mod collector;
pub mod construct;
mod engine;
mod variable;

pub use collector::{PaddingKind, PaddingViolation, Span, ViolationCollector};
pub use construct::Construct;
pub use engine::{check_all, check_construct};
