//! Analysis engine - orchestrates normalization, matching and scoring

use crate::config::{Config, RuleSetting, RuleToggle};
use crate::lexicon::{canonical_language, supported_languages, Lexicon, LexiconBuilder};
use crate::{AnalysisResult, CategoryWeights, EngineError, Verdict, VerdictThresholds};
use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use super::matcher::{find_hits, find_terms};
use super::normalize::NormalizedText;
use super::signals::{detect_script_language, text_stats};
use super::ScoreCalculator;

/// Options recognized by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    /// Language used by `analyze` and `analyze_file`
    pub language: String,
    /// Importance of each category in the overall score
    pub category_weights: CategoryWeights,
    /// Verdict tier boundaries
    pub verdict_thresholds: VerdictThresholds,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            language: crate::config::DEFAULT_LANGUAGE.to_string(),
            category_weights: CategoryWeights::default(),
            verdict_thresholds: VerdictThresholds::default(),
        }
    }
}

/// A text together with its analysis, for reporters that quote the source
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedDocument {
    /// Source file, `None` for inline text and stdin
    pub path: Option<PathBuf>,
    pub text: String,
    pub result: AnalysisResult,
}

impl AnalyzedDocument {
    /// Display name for reports
    pub fn label(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => "<text>".to_string(),
        }
    }
}

/// Main analysis engine. Owns its lexicons; immutable once built.
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    options: EngineOptions,
    lexicons: Vec<Lexicon>,
}

impl AnalysisEngine {
    /// Engine with every built-in lexicon
    pub fn new(options: EngineOptions) -> Result<Self, EngineError> {
        let lexicons = supported_languages()
            .into_iter()
            .map(Lexicon::for_language)
            .collect::<Result<Vec<_>, _>>()?;
        Self::with_lexicons(options, lexicons)
    }

    /// Engine with explicitly provided lexicons
    pub fn with_lexicons(options: EngineOptions, lexicons: Vec<Lexicon>) -> Result<Self, EngineError> {
        options.verdict_thresholds.validate()?;
        let engine = Self { options, lexicons };
        // The default language must be usable
        engine.lexicon(&engine.options.language)?;
        Ok(engine)
    }

    /// Build options and lexicons from a loaded config
    pub fn from_config(config: &Config) -> Result<Self, EngineError> {
        let options = config.to_engine_options()?;
        let default_language = canonical_language(config.language())?;

        let mut claimed: BTreeSet<&str> = BTreeSet::new();
        let mut lexicons = Vec::new();

        for code in supported_languages() {
            let mut builder = LexiconBuilder::for_language(code)?;

            for extra in &config.extra_rules {
                let language = match &extra.language {
                    Some(language) => canonical_language(language)?,
                    None => default_language,
                };
                if language == code {
                    builder = builder.with_rule(extra.to_spec());
                }
            }

            for (id, setting) in &config.rules {
                if !builder.has_rule(id) {
                    continue;
                }
                claimed.insert(id.as_str());
                builder = match setting {
                    RuleSetting::Toggle(RuleToggle::Off) => builder.disable(id.clone()),
                    RuleSetting::Toggle(RuleToggle::On) => builder,
                    RuleSetting::Weight(weight) => builder.with_weight(id.clone(), *weight),
                };
            }

            lexicons.push(builder.build()?);
        }

        if let Some(unknown) = config.rules.keys().find(|id| !claimed.contains(id.as_str())) {
            return Err(EngineError::InvalidConfig {
                reason: format!("unknown rule '{}'", unknown),
            });
        }

        Self::with_lexicons(options, lexicons)
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn lexicons(&self) -> &[Lexicon] {
        &self.lexicons
    }

    /// Lexicon for a language code or alias
    pub fn lexicon(&self, language: &str) -> Result<&Lexicon, EngineError> {
        let code = canonical_language(language)?;
        self.lexicons
            .iter()
            .find(|l| l.language() == code)
            .ok_or_else(|| EngineError::UnsupportedLanguage {
                language: language.to_string(),
            })
    }

    /// Analyze text in the given language
    pub fn analyze_text(&self, text: &str, language: &str) -> Result<AnalysisResult, EngineError> {
        let lexicon = self.lexicon(language)?;

        let normalized = NormalizedText::new(text);
        let hits = find_hits(&normalized, lexicon);
        let scoring = ScoreCalculator::score(
            &hits,
            lexicon.categories(),
            &self.options.category_weights,
            &self.options.verdict_thresholds,
        );

        let language_warning = detect_script_language(text)
            .filter(|detected| *detected != lexicon.language())
            .map(|detected| {
                format!(
                    "text looks like '{}' but was analyzed with the '{}' lexicon",
                    detected,
                    lexicon.language()
                )
            });

        debug!(
            "analyzed {} bytes with {}: {} hits, score {:.2} ({})",
            text.len(),
            lexicon.version(),
            hits.len(),
            scoring.overall_score,
            scoring.verdict
        );

        Ok(AnalysisResult {
            language: lexicon.language().to_string(),
            lexicon_version: lexicon.version().to_string(),
            text_len: text.len(),
            categories: scoring.categories,
            overall_score: scoring.overall_score,
            verdict: scoring.verdict,
            hits,
            stats: text_stats(text),
            language_warning,
            evidence_terms: find_terms(&normalized, lexicon.evidence_patterns()),
            amplifiers: find_terms(&normalized, lexicon.amplifier_patterns()),
        })
    }

    /// Analyze text in the engine's default language
    pub fn analyze(&self, text: &str) -> Result<AnalysisResult, EngineError> {
        self.analyze_text(text, &self.options.language)
    }

    /// Analyze in-memory text and keep it for reporting
    pub fn analyze_document(
        &self,
        text: String,
        path: Option<PathBuf>,
        language: Option<&str>,
    ) -> Result<AnalyzedDocument, EngineError> {
        let language = language.unwrap_or(self.options.language.as_str());
        let result = self.analyze_text(&text, language)?;
        Ok(AnalyzedDocument { path, text, result })
    }

    /// Read a UTF-8 text file and analyze it in the default language
    pub fn analyze_file(&self, path: &Path) -> Result<AnalyzedDocument> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read text file: {}", path.display()))?;
        self.analyze_document(text, Some(path.to_path_buf()), None)
            .with_context(|| format!("Failed to analyze {}", path.display()))
    }

    /// Analyze multiple files sequentially
    pub fn analyze_many(&self, paths: &[PathBuf]) -> Vec<Result<AnalyzedDocument>> {
        paths.iter().map(|p| self.analyze_file(p)).collect()
    }

    /// Analyze multiple files in parallel using rayon. Output order matches `paths`.
    pub fn analyze_many_parallel(&self, paths: &[PathBuf]) -> Vec<Result<AnalyzedDocument>> {
        use rayon::prelude::*;

        paths.par_iter().map(|p| self.analyze_file(p)).collect()
    }

    /// Get aggregate stats from multiple results
    pub fn aggregate_stats(results: &[AnalysisResult]) -> AggregateStats {
        if results.is_empty() {
            return AggregateStats::default();
        }

        let total_score: f64 = results.iter().map(|r| r.overall_score).sum();
        let mut verdict_counts = BTreeMap::new();
        for result in results {
            *verdict_counts.entry(result.verdict).or_insert(0) += 1;
        }

        AggregateStats {
            documents: results.len(),
            average_score: total_score / results.len() as f64,
            worst_verdict: results
                .iter()
                .map(|r| r.verdict)
                .max()
                .unwrap_or(Verdict::Low),
            total_hits: results.iter().map(|r| r.hits.len()).sum(),
            verdict_counts,
        }
    }
}

/// Aggregate statistics from multiple analyses
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    /// Number of documents analyzed
    pub documents: usize,
    /// Mean overall score
    pub average_score: f64,
    /// Highest verdict tier among the documents
    pub worst_verdict: Verdict,
    /// Total number of marker hits
    pub total_hits: usize,
    /// Documents per verdict tier
    pub verdict_counts: BTreeMap<Verdict, usize>,
}

impl Default for AggregateStats {
    fn default() -> Self {
        Self {
            documents: 0,
            average_score: 0.0,
            worst_verdict: Verdict::Low,
            total_hits: 0,
            verdict_counts: BTreeMap::new(),
        }
    }
}
