//! Check command implementation.

use anyhow::{Context, Result};
use pad_lint_core::{Analyzer, Config, RuleBox};
use pad_lint_rules::{all_rules, apply_options, configured_rules};
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Command-line options of `pad-lint check`.
#[derive(Debug, Default)]
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Comma-separated rule names or codes.
    pub rules_filter: Option<String>,
    /// Extra exclude patterns.
    pub exclude: Vec<String>,
    /// Preset overriding the config file.
    pub preset: Option<String>,
}

/// Loads the configuration described by `source`.
pub fn load_config(source: &ConfigSource) -> Result<Config> {
    let Some(p) = source.path() else {
        return Ok(Config::default());
    };
    if source.is_global() {
        tracing::info!("Using global config: {}", p.display());
    }
    Config::from_file(p).with_context(|| format!("Failed to load config: {}", p.display()))
}

/// Runs the check command.
///
/// Returns `true` when a violation reached the configured failure threshold.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<bool> {
    let mut config = load_config(source)?;
    if let Some(preset) = &options.preset {
        config.preset = Some(preset.clone());
    }
    let threshold = config.fail_threshold();

    let known: Vec<&str> = all_rules().iter().map(|rule| rule.name()).collect();
    for name in config.unknown_rules(&known) {
        tracing::warn!("Unknown rule in config: {}", name);
    }

    let rules = select_rules(&config, options.rules_filter.as_deref());

    let mut builder = Analyzer::builder()
        .root(path)
        .config(config)
        .excludes(options.exclude.iter().cloned());

    for rule in rules {
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules",
        path.display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    let root = analyzer.root();
    let base = if root.is_file() {
        root.parent().unwrap_or(root)
    } else {
        root
    };
    super::output::print(&result, options.format, base)?;

    Ok(result.has_violations_at(threshold))
}

/// Picks the rules to run: the `--rules` selection when given, otherwise the
/// configured preset.
fn select_rules(config: &Config, filter: Option<&str>) -> Vec<RuleBox> {
    let Some(filter) = filter else {
        return configured_rules(config);
    };

    let wanted: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();
    let available = apply_options(all_rules(), config);

    for name in &wanted {
        if !available
            .iter()
            .any(|rule| rule.name() == *name || rule.code() == *name)
        {
            tracing::warn!("Unknown rule: {}", name);
        }
    }

    available
        .into_iter()
        .filter(|rule| {
            wanted
                .iter()
                .any(|name| rule.name() == *name || rule.code() == *name)
        })
        .collect()
}
