//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

/// File written by `pad-lint init`.
pub const CONFIG_FILE: &str = "pad-lint.toml";

const DEFAULT_CONFIG: &str = r#"# pad-lint configuration

# Rule preset: recommended | strict | minimal
preset = "recommended"

# Lowest severity that makes `pad-lint check` exit with status 1
fail_on = "error"

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
]

# File extensions to analyze
extensions = ["ts", "tsx"]

# Respect .gitignore files
respect_gitignore = true

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.class-padding]
enabled = true
# severity = "error"

[rules.variable-padding]
enabled = true

[rules.max-method-lines]
max_lines = 25
"#;

/// Writes a starter `pad-lint.toml` into `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: pad-lint check");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pad_lint_core::{Config, Severity};
    use tempfile::TempDir;

    #[test]
    fn template_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.preset.as_deref(), Some("recommended"));
        assert_eq!(config.fail_threshold(), Severity::Error);
        assert_eq!(
            config
                .rule("max-method-lines")
                .and_then(|r| r.get_option::<usize>("max_lines")),
            Some(25)
        );
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(run(tmp.path(), false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        run(tmp.path(), true).unwrap();
        assert!(std::fs::read_to_string(&path)
            .unwrap()
            .contains("[rules.max-method-lines]"));
    }
}
