//! Marker lexicons
//!
//! A lexicon is the versioned, validated set of marker rules for one language.
//! Rule data lives in the per-language modules; this module validates and
//! compiles it. Matching and scoring only ever see categories and rules, so
//! adding rules never touches them.

mod english;
mod pattern;
mod russian;

pub use pattern::{compile_pattern, REGEX_PREFIX};

use crate::{EngineError, MarkerCategory};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Upper bound for a rule weight
pub const MAX_RULE_WEIGHT: f64 = 100.0;

/// Built-in rule entry
pub(crate) struct StaticRule {
    pub id: &'static str,
    pub category: MarkerCategory,
    pub patterns: &'static [&'static str],
    pub weight: f64,
}

/// Built-in data for one language
pub(crate) struct LanguageData {
    pub code: &'static str,
    pub aliases: &'static [&'static str],
    pub version: &'static str,
    pub rules: &'static [StaticRule],
    pub evidence_terms: &'static [&'static str],
    pub amplifiers: &'static [&'static str],
}

static LANGUAGES: &[&LanguageData] = &[&russian::RUSSIAN, &english::ENGLISH];

/// Canonical codes of every language with a built-in lexicon
pub fn supported_languages() -> Vec<&'static str> {
    LANGUAGES.iter().map(|l| l.code).collect()
}

/// Resolve a language code or alias ("ru", "Russian", "en-US") to its canonical code
pub fn canonical_language(language: &str) -> Result<&'static str, EngineError> {
    language_data(language).map(|data| data.code)
}

fn language_data(language: &str) -> Result<&'static LanguageData, EngineError> {
    let wanted = language.trim().to_lowercase();
    let primary = wanted.split(['-', '_']).next().unwrap_or("");
    LANGUAGES
        .iter()
        .copied()
        .find(|data| {
            data.code == wanted
                || data.code == primary
                || data.aliases.iter().any(|alias| *alias == wanted)
        })
        .ok_or_else(|| EngineError::UnsupportedLanguage {
            language: language.to_string(),
        })
}

fn default_rule_weight() -> f64 {
    1.0
}

/// Uncompiled rule definition, as written in config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSpec {
    /// Unique rule id (kebab-case by convention)
    pub id: String,
    pub category: MarkerCategory,
    /// Phrase patterns, or regexes prefixed with `re:`
    pub patterns: Vec<String>,
    #[serde(default = "default_rule_weight")]
    pub weight: f64,
}

impl RuleSpec {
    pub fn new(id: impl Into<String>, category: MarkerCategory, patterns: &[&str]) -> Self {
        Self {
            id: id.into(),
            category,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            weight: default_rule_weight(),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

/// A validated, compiled marker rule
#[derive(Debug, Clone)]
pub struct MarkerRule {
    id: String,
    category: MarkerCategory,
    patterns: Vec<String>,
    weight: f64,
    regexes: Vec<Regex>,
}

impl MarkerRule {
    /// Validate and compile a rule; any defect is an `InvalidRule` error
    pub fn compile(spec: RuleSpec) -> Result<Self, EngineError> {
        if spec.id.trim().is_empty() {
            return Err(EngineError::invalid_rule("<unnamed>", "empty rule id"));
        }
        if !spec.weight.is_finite() || spec.weight <= 0.0 || spec.weight > MAX_RULE_WEIGHT {
            return Err(EngineError::invalid_rule(
                &spec.id,
                format!(
                    "weight must be in (0, {}], got {}",
                    MAX_RULE_WEIGHT, spec.weight
                ),
            ));
        }
        if spec.patterns.is_empty() {
            return Err(EngineError::invalid_rule(&spec.id, "rule has no patterns"));
        }

        let regexes = spec
            .patterns
            .iter()
            .map(|p| compile_pattern(&spec.id, p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: spec.id,
            category: spec.category,
            patterns: spec.patterns,
            weight: spec.weight,
            regexes,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn category(&self) -> MarkerCategory {
        self.category
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn regexes(&self) -> &[Regex] {
        &self.regexes
    }
}

/// Immutable lexicon for one language
#[derive(Debug, Clone)]
pub struct Lexicon {
    language: &'static str,
    version: String,
    categories: Vec<MarkerCategory>,
    rules: Vec<MarkerRule>,
    evidence_terms: Vec<Regex>,
    amplifiers: Vec<Regex>,
}

impl Lexicon {
    /// Load the built-in lexicon for a language
    pub fn for_language(language: &str) -> Result<Self, EngineError> {
        LexiconBuilder::for_language(language)?.build()
    }

    /// Canonical language code
    pub fn language(&self) -> &'static str {
        self.language
    }

    /// `<language>-<data version>+<content fingerprint>`
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Categories in declaration order
    pub fn categories(&self) -> &[MarkerCategory] {
        &self.categories
    }

    /// Rules grouped by category, in declaration order
    pub fn rules(&self) -> &[MarkerRule] {
        &self.rules
    }

    pub fn rules_in(&self, category: MarkerCategory) -> impl Iterator<Item = &MarkerRule> {
        self.rules.iter().filter(move |r| r.category == category)
    }

    pub fn rule(&self, id: &str) -> Option<&MarkerRule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn evidence_patterns(&self) -> &[Regex] {
        &self.evidence_terms
    }

    pub fn amplifier_patterns(&self) -> &[Regex] {
        &self.amplifiers
    }

    /// Position of a category in declaration order (tie-break key for hits)
    pub fn category_rank(&self, category: MarkerCategory) -> usize {
        self.categories
            .iter()
            .position(|c| *c == category)
            .unwrap_or(self.categories.len())
    }
}

/// Builds a lexicon from built-in data plus configured changes
pub struct LexiconBuilder {
    data: &'static LanguageData,
    extra: Vec<RuleSpec>,
    disabled: BTreeSet<String>,
    weights: BTreeMap<String, f64>,
}

impl LexiconBuilder {
    pub fn for_language(language: &str) -> Result<Self, EngineError> {
        Ok(Self {
            data: language_data(language)?,
            extra: Vec::new(),
            disabled: BTreeSet::new(),
            weights: BTreeMap::new(),
        })
    }

    /// True if a built-in or already added rule has this id
    pub fn has_rule(&self, id: &str) -> bool {
        self.data.rules.iter().any(|r| r.id == id) || self.extra.iter().any(|r| r.id == id)
    }

    /// Add a rule after the built-in ones
    pub fn with_rule(mut self, spec: RuleSpec) -> Self {
        self.extra.push(spec);
        self
    }

    /// Drop a rule by id
    pub fn disable(mut self, id: impl Into<String>) -> Self {
        self.disabled.insert(id.into());
        self
    }

    /// Override the weight of a rule by id
    pub fn with_weight(mut self, id: impl Into<String>, weight: f64) -> Self {
        self.weights.insert(id.into(), weight);
        self
    }

    pub fn build(self) -> Result<Lexicon, EngineError> {
        let mut specs: Vec<RuleSpec> = self
            .data
            .rules
            .iter()
            .map(|r| RuleSpec::new(r.id, r.category, r.patterns).with_weight(r.weight))
            .collect();
        specs.extend(self.extra);

        let mut seen = HashSet::new();
        for spec in &specs {
            if !seen.insert(spec.id.as_str()) {
                return Err(EngineError::invalid_rule(&spec.id, "duplicate rule id"));
            }
        }
        for id in self.disabled.iter().chain(self.weights.keys()) {
            if !seen.contains(id.as_str()) {
                return Err(EngineError::InvalidConfig {
                    reason: format!("unknown rule '{}' for language '{}'", id, self.data.code),
                });
            }
        }

        let mut rules = Vec::with_capacity(specs.len());
        for mut spec in specs {
            if self.disabled.contains(&spec.id) {
                continue;
            }
            if let Some(weight) = self.weights.get(&spec.id) {
                spec.weight = *weight;
            }
            rules.push(MarkerRule::compile(spec)?);
        }
        // Stable: keeps declaration order inside a category
        rules.sort_by_key(|r| r.category);

        let evidence_terms = compile_terms("evidence-term", self.data.evidence_terms)?;
        let amplifiers = compile_terms("amplifier", self.data.amplifiers)?;
        let version = format!(
            "{}-{}+{}",
            self.data.code,
            self.data.version,
            fingerprint(&rules)
        );

        debug!(
            "loaded lexicon {} with {} rules",
            version,
            rules.len()
        );

        Ok(Lexicon {
            language: self.data.code,
            version,
            categories: MarkerCategory::ALL.to_vec(),
            rules,
            evidence_terms,
            amplifiers,
        })
    }
}

fn compile_terms(kind: &str, terms: &[&str]) -> Result<Vec<Regex>, EngineError> {
    terms
        .iter()
        .map(|t| compile_pattern(&format!("{}:{}", kind, t), t))
        .collect()
}

/// First 12 hex digits of a SHA-256 over the final rule data
fn fingerprint(rules: &[MarkerRule]) -> String {
    let mut hasher = Sha256::new();
    for rule in rules {
        hasher.update(rule.id.as_bytes());
        hasher.update([0]);
        hasher.update(rule.category.id().as_bytes());
        hasher.update([0]);
        for pattern in &rule.patterns {
            hasher.update(pattern.as_bytes());
            hasher.update([0]);
        }
        hasher.update(rule.weight.to_bits().to_le_bytes());
        hasher.update([0xff]);
    }
    let digest = hex::encode(hasher.finalize());
    digest[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lexicons_load() {
        for code in supported_languages() {
            let lexicon = Lexicon::for_language(code).unwrap();
            assert_eq!(lexicon.language(), code);
            assert!(!lexicon.rules().is_empty());
            assert_eq!(lexicon.categories(), &MarkerCategory::ALL[..]);
        }
    }

    #[test]
    fn test_every_category_has_rules() {
        for code in supported_languages() {
            let lexicon = Lexicon::for_language(code).unwrap();
            for category in MarkerCategory::ALL {
                assert!(
                    lexicon.rules_in(category).next().is_some(),
                    "{} lexicon has no rules for {}",
                    code,
                    category
                );
            }
        }
    }

    #[test]
    fn test_language_aliases() {
        assert_eq!(canonical_language("ru").unwrap(), "ru");
        assert_eq!(canonical_language("Russian").unwrap(), "ru");
        assert_eq!(canonical_language("EN").unwrap(), "en");
        assert_eq!(canonical_language("en-US").unwrap(), "en");
        assert_eq!(canonical_language("english").unwrap(), "en");
    }

    #[test]
    fn test_unsupported_language() {
        let err = Lexicon::for_language("de").unwrap_err();
        assert_eq!(
            err,
            EngineError::UnsupportedLanguage {
                language: "de".to_string()
            }
        );
        assert!(Lexicon::for_language("").is_err());
    }

    #[test]
    fn test_rules_grouped_by_category() {
        let lexicon = Lexicon::for_language("ru").unwrap();
        let categories: Vec<MarkerCategory> = lexicon.rules().iter().map(|r| r.category()).collect();
        let mut sorted = categories.clone();
        sorted.sort();
        assert_eq!(categories, sorted);
    }

    #[test]
    fn test_version_is_stable_and_content_sensitive() {
        let a = Lexicon::for_language("en").unwrap();
        let b = Lexicon::for_language("en").unwrap();
        assert_eq!(a.version(), b.version());
        assert!(a.version().starts_with("en-"));

        let changed = LexiconBuilder::for_language("en")
            .unwrap()
            .with_weight("en-miracle-cure", 3.0)
            .build()
            .unwrap();
        assert_ne!(a.version(), changed.version());
    }

    #[test]
    fn test_extra_rule_is_added_in_category_order() {
        let lexicon = LexiconBuilder::for_language("en")
            .unwrap()
            .with_rule(RuleSpec::new(
                "custom-colloidal-silver",
                MarkerCategory::MiracleCure,
                &["colloidal silver"],
            ))
            .build()
            .unwrap();
        let ids: Vec<&str> = lexicon
            .rules_in(MarkerCategory::MiracleCure)
            .map(|r| r.id())
            .collect();
        assert_eq!(ids.last(), Some(&"custom-colloidal-silver"));
    }

    #[test]
    fn test_disable_rule() {
        let lexicon = LexiconBuilder::for_language("ru")
            .unwrap()
            .disable("ru-jargon-slags")
            .build()
            .unwrap();
        assert!(lexicon.rule("ru-jargon-slags").is_none());
    }

    #[test]
    fn test_unknown_override_is_config_error() {
        let err = LexiconBuilder::for_language("ru")
            .unwrap()
            .disable("no-such-rule")
            .build()
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig { .. }));
    }

    #[test]
    fn test_invalid_rules_fail_at_load() {
        let bad_weight = LexiconBuilder::for_language("en")
            .unwrap()
            .with_rule(RuleSpec::new("w", MarkerCategory::Anecdotal, &["x y"]).with_weight(0.0))
            .build();
        assert!(matches!(bad_weight, Err(EngineError::InvalidRule { .. })));

        let nan_weight = LexiconBuilder::for_language("en")
            .unwrap()
            .with_rule(RuleSpec::new("n", MarkerCategory::Anecdotal, &["x y"]).with_weight(f64::NAN))
            .build();
        assert!(matches!(nan_weight, Err(EngineError::InvalidRule { .. })));

        let no_patterns = LexiconBuilder::for_language("en")
            .unwrap()
            .with_rule(RuleSpec::new("p", MarkerCategory::Anecdotal, &[]))
            .build();
        assert!(matches!(no_patterns, Err(EngineError::InvalidRule { .. })));

        let duplicate = LexiconBuilder::for_language("en")
            .unwrap()
            .with_rule(RuleSpec::new("en-miracle-cure", MarkerCategory::Anecdotal, &["x"]))
            .build();
        assert!(matches!(duplicate, Err(EngineError::InvalidRule { .. })));

        let bad_regex = LexiconBuilder::for_language("en")
            .unwrap()
            .with_rule(RuleSpec::new("r", MarkerCategory::Anecdotal, &["re:[unclosed"]))
            .build();
        assert!(matches!(bad_regex, Err(EngineError::InvalidRule { .. })));
    }

    #[test]
    fn test_rule_spec_deserializes_with_default_weight() {
        let spec: RuleSpec = serde_json::from_str(
            r#"{ "id": "x", "category": "pseudo-jargon", "patterns": ["torsion field*"] }"#,
        )
        .unwrap();
        assert_eq!(spec.weight, 1.0);
        assert_eq!(spec.category, MarkerCategory::PseudoJargon);
    }
}
