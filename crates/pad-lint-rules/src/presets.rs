//! Rule presets for common configurations.

use crate::{Construct, MaxMethodLines, NoAsyncWithoutAwait, PaddingRule};
use pad_lint_core::{Config, RuleBox, Severity};

/// Preset configurations for pad-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Every padding rule plus the method and async checks, as warnings.
    Recommended,
    /// The recommended rules reported as errors.
    Strict,
    /// Declaration padding only, for gradual adoption.
    Minimal,
}

impl Preset {
    /// Looks up a preset by its configuration name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "recommended" => Some(Self::Recommended),
            "strict" => Some(Self::Strict),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }

    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes all nine padding rules (PL001-PL009), `max-method-lines`
/// (PL010) and `no-async-without-await` (PL011), each at warning severity.
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    let mut rules: Vec<RuleBox> = PaddingRule::all()
        .into_iter()
        .map(|rule| Box::new(rule) as RuleBox)
        .collect();
    rules.push(Box::new(MaxMethodLines::new()));
    rules.push(Box::new(NoAsyncWithoutAwait::new()));
    rules
}

/// Returns the strict set of rules.
///
/// Same rules as [`recommended_rules`], reported as errors.
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    let mut rules: Vec<RuleBox> = PaddingRule::all()
        .into_iter()
        .map(|rule| Box::new(rule.severity(Severity::Error)) as RuleBox)
        .collect();
    rules.push(Box::new(MaxMethodLines::new().severity(Severity::Error)));
    rules.push(Box::new(NoAsyncWithoutAwait::new().severity(Severity::Error)));
    rules
}

/// Returns the minimal set of rules.
///
/// For gradual adoption, only includes:
/// - `class-padding` (PL001)
/// - `function-padding` (PL002)
/// - `method-padding` (PL004)
/// - `constructor-padding` (PL005)
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    [
        Construct::Class,
        Construct::Function,
        Construct::Method,
        Construct::Constructor,
    ]
    .into_iter()
    .map(|construct| Box::new(PaddingRule::new(construct)) as RuleBox)
    .collect()
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    recommended_rules()
}

/// Returns the rules selected by `config`.
///
/// Starts from the configured preset (recommended when unset or unknown) and
/// applies rule options with [`apply_options`].
#[must_use]
pub fn configured_rules(config: &Config) -> Vec<RuleBox> {
    let preset = match config.preset.as_deref() {
        Some(name) => Preset::from_name(name).unwrap_or_else(|| {
            tracing::warn!("Unknown preset '{name}', using recommended");
            Preset::Recommended
        }),
        None => Preset::Recommended,
    };
    apply_options(preset.rules(), config)
}

/// Rebuilds rules whose construction depends on their options, such as
/// `[rules.max-method-lines] max_lines`.
///
/// Enable flags and severity overrides are left to the analyzer.
#[must_use]
pub fn apply_options(rules: Vec<RuleBox>, config: &Config) -> Vec<RuleBox> {
    let Some(options) = config.rule(crate::max_method_lines::NAME) else {
        return rules;
    };
    rules
        .into_iter()
        .map(|rule| {
            if rule.name() == crate::max_method_lines::NAME {
                let configured =
                    MaxMethodLines::from_config(options).severity(rule.default_severity());
                Box::new(configured) as RuleBox
            } else {
                rule
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_preset_rules() {
        assert_eq!(Preset::Recommended.rules().len(), 11);
        assert_eq!(Preset::Strict.rules().len(), 11);
        assert!(names(&Preset::Recommended.rules()).contains(&"no-async-without-await"));
        assert_eq!(
            names(&Preset::Minimal.rules()),
            [
                "class-padding",
                "function-padding",
                "method-padding",
                "constructor-padding"
            ]
        );
    }

    #[test]
    fn strict_reports_errors() {
        assert!(strict_rules()
            .iter()
            .all(|r| r.default_severity() == Severity::Error));
        assert!(recommended_rules()
            .iter()
            .all(|r| r.default_severity() == Severity::Warning));
    }

    #[test]
    fn preset_names() {
        assert_eq!(Preset::from_name("strict"), Some(Preset::Strict));
        assert_eq!(Preset::from_name("relaxed"), None);
    }

    #[test]
    fn configured_rules_follow_preset() {
        let config = Config::parse("preset = \"minimal\"\n").expect("config");
        assert_eq!(configured_rules(&config).len(), 4);

        let config = Config::parse("preset = \"nope\"\n").expect("config");
        assert_eq!(configured_rules(&config).len(), 11);
    }

    #[test]
    fn options_rebuild_max_method_lines() {
        let config = Config::parse("[rules.max-method-lines]\nmax_lines = 2\n").expect("config");
        let rules = apply_options(strict_rules(), &config);
        let rule = rules
            .iter()
            .find(|r| r.name() == "max-method-lines")
            .expect("present");
        assert_eq!(rule.default_severity(), Severity::Error);
    }
}
