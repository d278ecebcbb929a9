//! List rules command implementation.

use pad_lint_rules::{all_rules, Preset};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<25} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<25} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nPresets:");
    for (name, preset, note) in [
        ("recommended", Preset::Recommended, " (default)"),
        ("strict", Preset::Strict, ", as errors"),
        ("minimal", Preset::Minimal, ""),
    ] {
        let codes: Vec<_> = preset.rules().iter().map(|r| r.code()).collect();
        println!("  {name:<12} - {}{note}", codes.join(", "));
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  pad-lint check --rules class-padding,if-padding");
    println!("  pad-lint check --rules PL001,PL007");
}
