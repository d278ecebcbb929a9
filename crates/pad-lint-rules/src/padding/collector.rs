//! Padding violations and the per-check collector.

use super::construct::Construct;
use tree_sitter::Node;

/// Byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start offset (inclusive).
    pub start: usize,
    /// End offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Span covering `node`.
    #[must_use]
    pub fn of(node: Node<'_>) -> Self {
        Self {
            start: node.start_byte(),
            end: node.end_byte(),
        }
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// What went wrong with the padding of a construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaddingKind {
    /// No blank line before the construct.
    BeforeMissing,
    /// No blank line after the opening of the body.
    AfterMissing,
    /// No blank line after `else {`.
    AfterMissingElse,
    /// No blank line after `catch {`.
    AfterMissingCatch,
    /// The body does not end directly above its closing brace.
    EndDisallowed,
}

impl PaddingKind {
    /// Message for this kind on the given construct.
    #[must_use]
    pub fn message(self, construct: Construct) -> String {
        match self {
            Self::BeforeMissing => format!("Missing blank line before {construct}"),
            Self::AfterMissing => format!("Missing blank line after {construct}"),
            Self::EndDisallowed => format!("Not allowed blank line before {construct} ends"),
            Self::AfterMissingElse => "Missing blank line after else".to_string(),
            Self::AfterMissingCatch => "Missing blank line after catch".to_string(),
        }
    }

    /// How to fix a violation of this kind.
    #[must_use]
    pub fn suggestion(self) -> &'static str {
        match self {
            Self::BeforeMissing => "Insert a blank line above this statement",
            Self::AfterMissing | Self::AfterMissingElse | Self::AfterMissingCatch => {
                "Insert a blank line after the opening brace"
            }
            Self::EndDisallowed => "Remove blank lines before the closing brace",
        }
    }
}

/// One padding violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddingViolation {
    /// Start offset of the reported span.
    pub start: usize,
    /// End offset of the reported span.
    pub end: usize,
    /// What is wrong.
    pub kind: PaddingKind,
    /// The construct being checked.
    pub construct: Construct,
}

impl PaddingViolation {
    /// Message text.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.message(self.construct)
    }

    /// Reported span.
    #[must_use]
    pub fn span(&self) -> Span {
        Span {
            start: self.start,
            end: self.end,
        }
    }
}

/// Ordered, append-only sink for one check invocation.
#[derive(Debug, Default)]
pub struct ViolationCollector {
    violations: Vec<PaddingViolation>,
}

impl ViolationCollector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a violation.
    pub fn record(&mut self, span: Span, kind: PaddingKind, construct: Construct) {
        self.violations.push(PaddingViolation {
            start: span.start,
            end: span.end,
            kind,
            construct,
        });
    }

    /// Number of violations recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns all violations in recording order and clears the collector.
    pub fn drain(&mut self) -> Vec<PaddingViolation> {
        std::mem::take(&mut self.violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            PaddingKind::BeforeMissing.message(Construct::Class),
            "Missing blank line before class declaration"
        );
        assert_eq!(
            PaddingKind::AfterMissing.message(Construct::ArrowFunction),
            "Missing blank line after arrow function declaration"
        );
        assert_eq!(
            PaddingKind::EndDisallowed.message(Construct::If),
            "Not allowed blank line before if ends"
        );
        assert_eq!(
            PaddingKind::AfterMissingElse.message(Construct::If),
            "Missing blank line after else"
        );
        assert_eq!(
            PaddingKind::AfterMissingCatch.message(Construct::TryCatch),
            "Missing blank line after catch"
        );
    }

    #[test]
    fn drain_keeps_order_and_clears() {
        let mut collector = ViolationCollector::new();
        let span = Span { start: 3, end: 8 };
        collector.record(span, PaddingKind::BeforeMissing, Construct::For);
        collector.record(span, PaddingKind::BeforeMissing, Construct::For);
        collector.record(span, PaddingKind::EndDisallowed, Construct::For);
        assert_eq!(collector.len(), 3);

        let drained = collector.drain();
        assert_eq!(drained.len(), 3);
        assert_eq!(drained[0], drained[1]);
        assert_eq!(drained[2].kind, PaddingKind::EndDisallowed);
        assert_eq!(drained[0].span().len(), 5);
        assert!(collector.is_empty());
        assert!(collector.drain().is_empty());
    }
}
