//! Shared output formatting for lint results.

use anyhow::Result;
use miette::{NamedSource, Report};
use pad_lint_core::{LintResult, Severity, ViolationDiagnostic};
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `base` is the directory violation paths are relative to; the pretty format
/// reads the sources from there.
pub fn print(result: &LintResult, format: OutputFormat, base: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Pretty => print_pretty(result, base),
    }
    Ok(())
}

fn print_text(result: &LintResult) {
    for violation in &result.violations {
        let (color, label) = severity_style(violation.severity);
        let location = &violation.location;
        println!(
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            location.file.display(),
            location.line,
            location.column,
        );
        println!("  {color}{label}{RESET}: {}", violation.message);
        if let Some(suggestion) = &violation.suggestion {
            println!("  = help: {}", suggestion.message);
        }
        println!();
    }

    print_summary(result);
}

const RESET: &str = "\x1b[0m";

fn severity_style(severity: Severity) -> (&'static str, &'static str) {
    match severity {
        Severity::Error => ("\x1b[31m", "error"),
        Severity::Warning => ("\x1b[33m", "warning"),
        Severity::Info => ("\x1b[34m", "info"),
    }
}

fn print_summary(result: &LintResult) {
    let counts = result.counts();
    let color = if counts.errors > 0 {
        severity_style(Severity::Error).0
    } else if counts.warnings > 0 {
        severity_style(Severity::Warning).0
    } else {
        "\x1b[32m"
    };

    println!(
        "{color}Found {counts} in {} file(s){RESET}",
        result.files_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}

fn print_pretty(result: &LintResult, base: &Path) {
    for violation in &result.violations {
        let file = &violation.location.file;
        let report = Report::new(ViolationDiagnostic::from(violation));

        match std::fs::read_to_string(base.join(file)) {
            Ok(content) => {
                let source = NamedSource::new(file.display().to_string(), content);
                println!("{:?}", report.with_source_code(source));
            }
            Err(e) => {
                tracing::debug!("Cannot read {} for display: {}", file.display(), e);
                println!("{}", violation.format());
            }
        }
    }

    print_summary(result);
}
