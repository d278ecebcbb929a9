//! Comment-based allowance directives.
//!
//! A directive on the reported line, or on the line directly above it,
//! silences a rule:
//!
//! ```text
//! // pad-lint: allow(class-padding) reason="generated code"
//! /* pad-lint: allow(if-padding, for-padding) */
//! ```
//!
//! `allow(all)` silences every rule.

use std::collections::HashSet;

/// Directive prefix inside a comment.
const DIRECTIVE: &str = "pad-lint:";

/// Result of checking for allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone)]
struct AllowDirective {
    rules: HashSet<String>,
    reason: Option<String>,
}

impl AllowDirective {
    fn covers(&self, rule_name: &str) -> bool {
        self.rules.contains(rule_name) || self.rules.contains("all")
    }
}

/// Checks source code for an allow directive covering `rule_name`.
///
/// `line` is 1-indexed. The line itself and the line before it are searched.
#[must_use]
pub fn check_allow_with_reason(content: &str, line: usize, rule_name: &str) -> AllowCheck {
    if line == 0 {
        return AllowCheck::Denied;
    }

    let first = line.saturating_sub(2);
    let candidates = content.lines().enumerate().skip(first).take(line - first);

    for (_, text) in candidates {
        if let Some(directive) = parse_allow_directive(text) {
            if directive.covers(rule_name) {
                return AllowCheck::Allowed {
                    reason: directive.reason,
                };
            }
        }
    }

    AllowCheck::Denied
}

/// Parses an allowance directive from a line that contains a comment.
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    let comment = comment_body(line)?;
    let allow_content = comment
        .strip_prefix(DIRECTIVE)?
        .trim()
        .strip_prefix("allow(")?;

    let paren_end = allow_content.find(')')?;
    let rules: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let reason = parse_reason(allow_content[paren_end + 1..].trim());

    Some(AllowDirective { rules, reason })
}

/// Text of the first `//` or `/* */` comment on the line, trimmed.
fn comment_body(line: &str) -> Option<&str> {
    let line_comment = line.find("//");
    let block_comment = line.find("/*");

    match (line_comment, block_comment) {
        (Some(l), Some(b)) if b < l => block_body(&line[b + 2..]),
        (Some(l), _) => Some(line[l + 2..].trim()),
        (None, Some(b)) => block_body(&line[b + 2..]),
        (None, None) => None,
    }
}

fn block_body(rest: &str) -> Option<&str> {
    let body = rest.strip_prefix('*').unwrap_or(rest);
    let body = body.find("*/").map_or(body, |end| &body[..end]);
    Some(body.trim())
}

fn parse_reason(rest: &str) -> Option<String> {
    let quoted = rest.strip_prefix("reason=")?.trim().strip_prefix('"')?;
    let end = quoted.find('"')?;
    Some(quoted[..end].to_string())
}
