//! Quacksense: risk analyzer for pseudoscientific medical claims
//!
//! This library scores free-form text against a versioned lexicon of marker
//! phrases and produces a structured, auditable risk assessment: per-category
//! scores, the matched markers, an overall score and a verdict tier.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod reporter;

pub use analyzer::{AnalysisEngine, AnalyzedDocument, EngineOptions};
pub use error::EngineError;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// The main result of analyzing one piece of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Canonical language code of the lexicon used ("ru", "en")
    pub language: String,
    /// Version string of the lexicon, including its content fingerprint
    pub lexicon_version: String,
    /// Length of the original text in bytes
    pub text_len: usize,
    /// One entry per lexicon category, in declaration order (zero scores included)
    pub categories: Vec<CategoryScore>,
    /// Overall risk score (weighted sum of capped category scores)
    pub overall_score: f64,
    /// Verdict tier derived from the overall score
    pub verdict: Verdict,
    /// All marker hits, ordered by offset
    pub hits: Vec<MarkerHit>,
    /// Basic statistics about the text
    pub stats: TextStats,
    /// Set when the script of the text does not look like the requested language
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_warning: Option<String>,
    /// Evidence-based-medicine vocabulary found in the text (not scored)
    #[serde(default)]
    pub evidence_terms: Vec<TermSpan>,
    /// Intensifier words found in the text (not scored)
    #[serde(default)]
    pub amplifiers: Vec<TermSpan>,
}

impl AnalysisResult {
    /// Score entry for a category, if the lexicon declares it
    pub fn category(&self, category: MarkerCategory) -> Option<&CategoryScore> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Number of hits per category, for categories with at least one hit
    pub fn hit_counts(&self) -> BTreeMap<MarkerCategory, usize> {
        let mut counts = BTreeMap::new();
        for hit in &self.hits {
            *counts.entry(hit.category).or_insert(0) += 1;
        }
        counts
    }

    /// Categories ordered by weighted contribution, strongest first, zero entries skipped
    pub fn top_categories(&self) -> Vec<&CategoryScore> {
        let mut sorted: Vec<&CategoryScore> =
            self.categories.iter().filter(|c| c.hit_count > 0).collect();
        sorted.sort_by(|a, b| {
            b.contribution
                .total_cmp(&a.contribution)
                .then_with(|| a.category.cmp(&b.category))
        });
        sorted
    }
}

/// Risk category of a marker. Declaration order is the lexicon order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerCategory {
    /// Miraculous healing, "wonder drug", "revolutionary breakthrough"
    MiracleCure,
    /// One remedy for every disease
    UniversalRemedy,
    /// 100% guarantees, complete and permanent cures
    AbsoluteCertainty,
    /// Doctors or pharma hide the truth, secret ancient knowledge
    SuppressedTruth,
    /// Energy fields, quantum healing, detox and "slags"
    PseudoJargon,
    /// "Natural" presented as a safety guarantee
    NaturalFallacy,
    /// Urgency, scarcity, fear and unrealistic timeframes
    UrgencyPressure,
    /// Mass testimonials instead of evidence
    Anecdotal,
}

impl MarkerCategory {
    pub const ALL: [MarkerCategory; 8] = [
        MarkerCategory::MiracleCure,
        MarkerCategory::UniversalRemedy,
        MarkerCategory::AbsoluteCertainty,
        MarkerCategory::SuppressedTruth,
        MarkerCategory::PseudoJargon,
        MarkerCategory::NaturalFallacy,
        MarkerCategory::UrgencyPressure,
        MarkerCategory::Anecdotal,
    ];

    /// Stable kebab-case identifier, as used in config files and JSON
    pub fn id(&self) -> &'static str {
        match self {
            MarkerCategory::MiracleCure => "miracle-cure",
            MarkerCategory::UniversalRemedy => "universal-remedy",
            MarkerCategory::AbsoluteCertainty => "absolute-certainty",
            MarkerCategory::SuppressedTruth => "suppressed-truth",
            MarkerCategory::PseudoJargon => "pseudo-jargon",
            MarkerCategory::NaturalFallacy => "natural-fallacy",
            MarkerCategory::UrgencyPressure => "urgency-pressure",
            MarkerCategory::Anecdotal => "anecdotal",
        }
    }

    /// Display metadata for reports
    pub fn info(&self) -> CategoryInfo {
        match self {
            MarkerCategory::MiracleCure => CategoryInfo {
                name_en: "Miracle claims",
                name_ru: "Чудодейственные утверждения",
                description_en: "Unsubstantiated promises of miraculous healing",
                description_ru: "Необоснованные обещания чудесного исцеления",
                severity: Severity::High,
            },
            MarkerCategory::UniversalRemedy => CategoryInfo {
                name_en: "Universal remedies",
                name_ru: "Универсальные средства",
                description_en: "Claims of curing all diseases",
                description_ru: "Утверждения о лечении всех болезней",
                severity: Severity::High,
            },
            MarkerCategory::AbsoluteCertainty => CategoryInfo {
                name_en: "Absolute guarantees",
                name_ru: "Абсолютные гарантии",
                description_en: "100% result guarantees without evidence",
                description_ru: "100% гарантии результата без доказательств",
                severity: Severity::High,
            },
            MarkerCategory::SuppressedTruth => CategoryInfo {
                name_en: "Suppressed truth",
                name_ru: "Скрываемая правда",
                description_en: "References to secret, hidden or unrecognized methods",
                description_ru: "Ссылки на секретные, скрываемые или непризнанные методы",
                severity: Severity::High,
            },
            MarkerCategory::PseudoJargon => CategoryInfo {
                name_en: "Pseudo-scientific jargon",
                name_ru: "Псевдонаучный жаргон",
                description_en: "Energy fields, quantum healing and detox myths",
                description_ru: "Энергетические поля, квантовое исцеление и детокс-мифы",
                severity: Severity::Medium,
            },
            MarkerCategory::NaturalFallacy => CategoryInfo {
                name_en: "Natural as guarantee",
                name_ru: "Натуральность как гарантия",
                description_en: "Misconception about the safety of natural products",
                description_ru: "Ошибочное представление о безопасности натурального",
                severity: Severity::Low,
            },
            MarkerCategory::UrgencyPressure => CategoryInfo {
                name_en: "Urgency and pressure",
                name_ru: "Давление и срочность",
                description_en: "Pressure on emotions and unrealistic treatment timeframes",
                description_ru: "Давление на эмоции и нереалистичные сроки лечения",
                severity: Severity::Medium,
            },
            MarkerCategory::Anecdotal => CategoryInfo {
                name_en: "Mass testimonials",
                name_ru: "Массовые отзывы",
                description_en: "Unsubstantiated mass efficacy claims",
                description_ru: "Необоснованные утверждения о массовой эффективности",
                severity: Severity::Medium,
            },
        }
    }

    /// Default importance of a category in the overall score
    pub fn default_weight(&self) -> f64 {
        match self {
            MarkerCategory::MiracleCure => 1.0,
            MarkerCategory::SuppressedTruth => 1.0,
            MarkerCategory::UniversalRemedy => 0.9,
            MarkerCategory::AbsoluteCertainty => 0.9,
            MarkerCategory::PseudoJargon => 0.7,
            MarkerCategory::UrgencyPressure => 0.5,
            MarkerCategory::Anecdotal => 0.5,
            MarkerCategory::NaturalFallacy => 0.3,
        }
    }
}

impl std::fmt::Display for MarkerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for MarkerCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MarkerCategory::ALL
            .iter()
            .copied()
            .find(|c| c.id() == s)
            .ok_or_else(|| format!("unknown marker category '{}'", s))
    }
}

/// Static description of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub name_en: &'static str,
    pub name_ru: &'static str,
    pub description_en: &'static str,
    pub description_ru: &'static str,
    /// Nominal severity, shown in reports
    pub severity: Severity,
}

impl CategoryInfo {
    /// Display name in the report language
    pub fn name(&self, language: &str) -> &'static str {
        if language == "ru" {
            self.name_ru
        } else {
            self.name_en
        }
    }

    /// Description in the report language
    pub fn description(&self, language: &str) -> &'static str {
        if language == "ru" {
            self.description_ru
        } else {
            self.description_en
        }
    }
}

/// Nominal severity of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// One marker match. Offsets are byte offsets into the original text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerHit {
    /// Category of the matched rule
    pub category: MarkerCategory,
    /// Id of the matched rule
    pub rule: String,
    /// Weight of the matched rule
    pub weight: f64,
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
}

impl MarkerHit {
    /// The matched text, sliced from the text that was analyzed
    pub fn matched_text<'t>(&self, source: &'t str) -> &'t str {
        source.get(self.start..self.end).unwrap_or("")
    }
}

/// Span of an auxiliary (unscored) term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermSpan {
    pub start: usize,
    pub end: usize,
}

/// Score of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: MarkerCategory,
    /// Sum of the weights of all hits in this category
    pub raw_score: f64,
    /// Raw score after diminishing returns (bounded by the category cap)
    pub capped_score: f64,
    /// Importance weight applied to the capped score
    pub importance: f64,
    /// capped_score * importance
    pub contribution: f64,
    /// Number of hits in this category
    pub hit_count: usize,
    /// The contributing hits, in offset order
    pub hits: Vec<MarkerHit>,
}

/// Verdict tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Low,
    Moderate,
    High,
    Critical,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Low => write!(f, "low"),
            Verdict::Moderate => write!(f, "moderate"),
            Verdict::High => write!(f, "high"),
            Verdict::Critical => write!(f, "critical"),
        }
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Verdict::Low),
            "moderate" | "medium" => Ok(Verdict::Moderate),
            "high" => Ok(Verdict::High),
            "critical" => Ok(Verdict::Critical),
            other => Err(format!("unknown verdict '{}'", other)),
        }
    }
}

/// Lower bounds of the Moderate, High and Critical tiers.
///
/// Tiers are half-open: `[0, moderate)` Low, `[moderate, high)` Moderate,
/// `[high, critical)` High, `[critical, inf)` Critical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictThresholds {
    pub moderate: f64,
    pub high: f64,
    pub critical: f64,
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        Self {
            moderate: 1.5,
            high: 3.5,
            critical: 6.5,
        }
    }
}

impl VerdictThresholds {
    /// Boundaries must be finite, non-negative and strictly increasing
    pub fn validate(&self) -> Result<(), EngineError> {
        let bounds = [self.moderate, self.high, self.critical];
        if bounds.iter().any(|b| !b.is_finite() || *b < 0.0) {
            return Err(EngineError::InvalidConfig {
                reason: format!(
                    "verdict thresholds must be finite and non-negative, got {:?}",
                    bounds
                ),
            });
        }
        if !(self.moderate < self.high && self.high < self.critical) {
            return Err(EngineError::InvalidConfig {
                reason: format!(
                    "verdict thresholds must be strictly increasing, got {:?}",
                    bounds
                ),
            });
        }
        Ok(())
    }

    pub fn verdict_for(&self, score: f64) -> Verdict {
        if score >= self.critical {
            Verdict::Critical
        } else if score >= self.high {
            Verdict::High
        } else if score >= self.moderate {
            Verdict::Moderate
        } else {
            Verdict::Low
        }
    }
}

/// Importance of each category in the overall score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    weights: BTreeMap<MarkerCategory, f64>,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            weights: MarkerCategory::ALL
                .iter()
                .map(|c| (*c, c.default_weight()))
                .collect(),
        }
    }
}

impl CategoryWeights {
    pub fn get(&self, category: MarkerCategory) -> f64 {
        self.weights
            .get(&category)
            .copied()
            .unwrap_or_else(|| category.default_weight())
    }

    /// Override one category's importance. Must be finite and non-negative.
    pub fn set(&mut self, category: MarkerCategory, weight: f64) -> Result<(), EngineError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(EngineError::InvalidConfig {
                reason: format!(
                    "category weight for '{}' must be finite and non-negative, got {}",
                    category, weight
                ),
            });
        }
        self.weights.insert(category, weight);
        Ok(())
    }

    pub fn with(mut self, category: MarkerCategory, weight: f64) -> Result<Self, EngineError> {
        self.set(category, weight)?;
        Ok(self)
    }
}

/// Basic statistics about the analyzed text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStats {
    /// Number of Unicode scalar values
    pub chars: usize,
    /// Number of whitespace-separated words
    pub words: usize,
    /// Number of sentences
    pub sentences: usize,
    /// Mean words per sentence (0 when there are no sentences)
    pub avg_sentence_length: f64,
}

/// Public API: analyze a text file with the config found from `work_dir`.
///
/// * `path` - the text file
/// * `work_dir` - directory where the config search starts
/// * `config_path` - optional explicit config file
pub fn analyze_file(
    path: &std::path::Path,
    work_dir: &std::path::Path,
    config_path: Option<&std::path::Path>,
) -> anyhow::Result<AnalysisResult> {
    let config = crate::config::load_config(work_dir, config_path)?;
    let engine = AnalysisEngine::from_config(&config)?;
    engine.analyze_file(path).map(|doc| doc.result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_ids_round_trip() {
        for category in MarkerCategory::ALL {
            assert_eq!(category.id().parse::<MarkerCategory>(), Ok(category));
        }
        assert!("snake-oil".parse::<MarkerCategory>().is_err());
    }

    #[test]
    fn test_category_serializes_kebab_case() {
        let json = serde_json::to_string(&MarkerCategory::SuppressedTruth).unwrap();
        assert_eq!(json, "\"suppressed-truth\"");
    }

    #[test]
    fn test_verdict_ordering() {
        assert!(Verdict::Low < Verdict::Moderate);
        assert!(Verdict::Moderate < Verdict::High);
        assert!(Verdict::High < Verdict::Critical);
    }

    #[test]
    fn test_verdict_from_str() {
        assert_eq!("HIGH".parse::<Verdict>(), Ok(Verdict::High));
        assert_eq!("medium".parse::<Verdict>(), Ok(Verdict::Moderate));
        assert!("severe".parse::<Verdict>().is_err());
    }

    #[test]
    fn test_thresholds_partition_boundaries() {
        let t = VerdictThresholds::default();
        assert_eq!(t.verdict_for(0.0), Verdict::Low);
        assert_eq!(t.verdict_for(1.49), Verdict::Low);
        assert_eq!(t.verdict_for(1.5), Verdict::Moderate);
        assert_eq!(t.verdict_for(3.49), Verdict::Moderate);
        assert_eq!(t.verdict_for(3.5), Verdict::High);
        assert_eq!(t.verdict_for(6.49), Verdict::High);
        assert_eq!(t.verdict_for(6.5), Verdict::Critical);
        assert_eq!(t.verdict_for(1e9), Verdict::Critical);
    }

    #[test]
    fn test_thresholds_validation() {
        assert!(VerdictThresholds::default().validate().is_ok());
        let unordered = VerdictThresholds {
            moderate: 3.0,
            high: 2.0,
            critical: 8.0,
        };
        assert!(unordered.validate().is_err());
        let negative = VerdictThresholds {
            moderate: -1.0,
            high: 2.0,
            critical: 8.0,
        };
        assert!(negative.validate().is_err());
        let infinite = VerdictThresholds {
            moderate: 1.0,
            high: 2.0,
            critical: f64::INFINITY,
        };
        assert!(infinite.validate().is_err());
    }

    #[test]
    fn test_category_weights_defaults_and_override() {
        let weights = CategoryWeights::default();
        assert!(weights.get(MarkerCategory::MiracleCure) > weights.get(MarkerCategory::UrgencyPressure));
        assert!(weights.get(MarkerCategory::SuppressedTruth) > weights.get(MarkerCategory::NaturalFallacy));

        let weights = weights.with(MarkerCategory::Anecdotal, 2.0).unwrap();
        assert_eq!(weights.get(MarkerCategory::Anecdotal), 2.0);

        let mut weights = CategoryWeights::default();
        assert!(weights.set(MarkerCategory::Anecdotal, -0.1).is_err());
        assert!(weights.set(MarkerCategory::Anecdotal, f64::NAN).is_err());
    }

    #[test]
    fn test_matched_text_slices_source() {
        let source = "Чудо-средство!";
        let hit = MarkerHit {
            category: MarkerCategory::MiracleCure,
            rule: "ru-miracle-cure-remedy".to_string(),
            weight: 1.0,
            start: 0,
            end: "Чудо-средство".len(),
        };
        assert_eq!(hit.matched_text(source), "Чудо-средство");

        let out_of_range = MarkerHit { end: 999, ..hit };
        assert_eq!(out_of_range.matched_text(source), "");
    }
}
