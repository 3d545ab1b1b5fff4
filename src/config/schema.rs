//! Config schema and deserialization

use crate::analyzer::EngineOptions;
use crate::lexicon::RuleSpec;
use crate::{CategoryWeights, EngineError, MarkerCategory, Verdict, VerdictThresholds};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language used when neither the config nor the command line names one
pub const DEFAULT_LANGUAGE: &str = "ru";

/// File extensions analyzed when the config does not list any
pub const DEFAULT_EXTENSIONS: &[&str] = &["txt", "md", "text"];

/// Rule on/off switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleToggle {
    On,
    Off,
}

/// Per-rule override: `"off"` / `"on"`, or a replacement weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSetting {
    Toggle(RuleToggle),
    Weight(f64),
}

/// Partial verdict thresholds; missing bounds keep their defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<f64>,
}

impl ThresholdOverrides {
    pub fn is_empty(&self) -> bool {
        self.moderate.is_none() && self.high.is_none() && self.critical.is_none()
    }

    pub fn apply(&self, mut base: VerdictThresholds) -> VerdictThresholds {
        if let Some(v) = self.moderate {
            base.moderate = v;
        }
        if let Some(v) = self.high {
            base.high = v;
        }
        if let Some(v) = self.critical {
            base.critical = v;
        }
        base
    }

    fn merge_from(&mut self, base: ThresholdOverrides) {
        self.moderate = self.moderate.or(base.moderate);
        self.high = self.high.or(base.high);
        self.critical = self.critical.or(base.critical);
    }
}

fn default_extra_weight() -> f64 {
    1.0
}

/// Additional marker rule declared in a config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraRule {
    pub id: String,
    pub category: MarkerCategory,
    pub patterns: Vec<String>,
    #[serde(default = "default_extra_weight")]
    pub weight: f64,
    /// Lexicon the rule is added to (default: the config's language)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl ExtraRule {
    pub fn to_spec(&self) -> RuleSpec {
        RuleSpec {
            id: self.id.clone(),
            category: self.category,
            patterns: self.patterns.clone(),
            weight: self.weight,
        }
    }
}

/// Root config structure for .quacksenserc.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Default text language ("ru", "en")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Category importance overrides. Key is the kebab-case category id.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub category_weights: BTreeMap<String, f64>,

    /// Verdict tier boundaries
    #[serde(default, skip_serializing_if = "ThresholdOverrides::is_empty")]
    pub verdict_thresholds: ThresholdOverrides,

    /// Exit with status 1 when a verdict reaches this tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<Verdict>,

    /// Per-rule overrides. Key is the rule id.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: BTreeMap<String, RuleSetting>,

    /// Rules added on top of the built-in lexicons
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_rules: Vec<ExtraRule>,

    /// Glob patterns for files/directories to exclude from analysis
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,

    /// File extensions to analyze when walking directories (default: txt, md, text)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, language: Option<String>, fail_on: Option<Verdict>) -> Self {
        if language.is_some() {
            self.language = language;
        }
        if fail_on.is_some() {
            self.fail_on = fail_on;
        }
        self
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        if self.language.is_none() {
            self.language = base.language;
        }
        if self.fail_on.is_none() {
            self.fail_on = base.fail_on;
        }
        if self.extends.is_none() {
            self.extends = base.extends;
        }
        self.verdict_thresholds.merge_from(base.verdict_thresholds);

        for (category, weight) in base.category_weights {
            self.category_weights.entry(category).or_insert(weight);
        }
        for (rule, setting) in base.rules {
            self.rules.entry(rule).or_insert(setting);
        }

        // Base extra rules first, unless this config redefines the id
        let mut extra_rules: Vec<ExtraRule> = base
            .extra_rules
            .into_iter()
            .filter(|r| !self.extra_rules.iter().any(|own| own.id == r.id))
            .collect();
        extra_rules.append(&mut self.extra_rules);
        self.extra_rules = extra_rules;

        let mut all_ignores = base.ignore;
        all_ignores.append(&mut self.ignore);
        self.ignore = all_ignores;

        if self.extensions.is_empty() {
            self.extensions = base.extensions;
        }
    }

    /// Effective default language
    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Effective extensions, lowercase and without the leading dot
    pub fn extensions(&self) -> Vec<String> {
        if self.extensions.is_empty() {
            DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
        } else {
            self.extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect()
        }
    }

    /// Validated engine options
    pub fn to_engine_options(&self) -> Result<EngineOptions, EngineError> {
        let mut category_weights = CategoryWeights::default();
        for (key, weight) in &self.category_weights {
            let category: MarkerCategory = key
                .parse()
                .map_err(|reason| EngineError::InvalidConfig { reason })?;
            category_weights.set(category, *weight)?;
        }

        let verdict_thresholds = self.verdict_thresholds.apply(VerdictThresholds::default());
        verdict_thresholds.validate()?;

        Ok(EngineOptions {
            language: self.language().to_string(),
            category_weights,
            verdict_thresholds,
        })
    }

    /// Default config written by `quacksense init`
    pub fn starter(language: &str) -> Self {
        Self {
            language: Some(language.to_string()),
            verdict_thresholds: ThresholdOverrides {
                moderate: Some(VerdictThresholds::default().moderate),
                high: Some(VerdictThresholds::default().high),
                critical: Some(VerdictThresholds::default().critical),
            },
            fail_on: Some(Verdict::High),
            ignore: vec!["**/node_modules/**".to_string(), "**/drafts/**".to_string()],
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            ..Self::default()
        }
    }
}
