//! Console reporter with colored output

use crate::analyzer::scoring::{ScoreCalculator, CATEGORY_CAP};
use crate::analyzer::{AggregateStats, AnalyzedDocument};
use crate::{AnalysisResult, Severity, Verdict};
use colored::{ColoredString, Colorize};
use std::fmt::Write;

/// Number of phrases listed under "Top markers" unless verbose
const TOP_PHRASES: usize = 5;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

/// A matched phrase with its occurrence count and summed weight
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseSummary {
    pub phrase: String,
    pub rule: String,
    pub count: usize,
    pub total_weight: f64,
}

/// Matched phrases grouped case-insensitively, heaviest first
pub fn top_phrases(doc: &AnalyzedDocument) -> Vec<PhraseSummary> {
    let mut phrases: Vec<PhraseSummary> = Vec::new();
    for hit in &doc.result.hits {
        let phrase = hit.matched_text(&doc.text).to_lowercase();
        match phrases
            .iter_mut()
            .find(|p| p.phrase == phrase && p.rule == hit.rule)
        {
            Some(existing) => {
                existing.count += 1;
                existing.total_weight += hit.weight;
            }
            None => phrases.push(PhraseSummary {
                phrase,
                rule: hit.rule.clone(),
                count: 1,
                total_weight: hit.weight,
            }),
        }
    }
    // Stable: first occurrence wins ties
    phrases.sort_by(|a, b| b.total_weight.total_cmp(&a.total_weight));
    phrases
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// One line: label, score and verdict
    pub fn render_quiet(&self, doc: &AnalyzedDocument) -> String {
        format!(
            "{}: {:.2} ({})",
            doc.label(),
            doc.result.overall_score,
            self.paint(self.colorize_verdict(doc.result.verdict))
        )
    }

    pub fn render_many(&self, docs: &[AnalyzedDocument], stats: &AggregateStats) -> String {
        let mut out = String::new();
        for doc in docs {
            out.push_str(&self.render(doc));
            let _ = writeln!(out, "{}", "─".repeat(60));
        }
        out.push_str(&self.render_summary(stats));
        out
    }

    pub fn render(&self, doc: &AnalyzedDocument) -> String {
        let mut out = String::new();
        self.write_header(&mut out, doc);
        self.write_score(&mut out, &doc.result);
        self.write_breakdown(&mut out, &doc.result);
        if !doc.result.hits.is_empty() {
            self.write_phrases(&mut out, doc);
        }
        self.write_signals(&mut out, &doc.result);
        self.write_recommendations(&mut out, &doc.result);
        out.push('\n');
        out
    }

    pub fn render_summary(&self, stats: &AggregateStats) -> String {
        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "═".repeat(60));
        let _ = writeln!(out, "{}", self.paint("Summary".bold()));
        let _ = writeln!(out, "{}", "═".repeat(60));
        let _ = writeln!(
            out,
            "   Documents analyzed: {}",
            self.paint(stats.documents.to_string().bold())
        );
        let _ = writeln!(out, "   Average score:      {:.2}", stats.average_score);
        let _ = writeln!(
            out,
            "   Worst verdict:      {}",
            self.paint(self.colorize_verdict(stats.worst_verdict))
        );
        let _ = writeln!(out, "   Total markers:      {}", stats.total_hits);
        for (verdict, count) in &stats.verdict_counts {
            let _ = writeln!(out, "     {:<10} {}", verdict.to_string(), count);
        }
        let _ = writeln!(out);
        out
    }

    fn write_header(&self, out: &mut String, doc: &AnalyzedDocument) {
        let result = &doc.result;
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{}",
            self.paint(format!("Pseudoscience Risk Analysis: {}", doc.label()).bold())
        );
        let _ = writeln!(
            out,
            "   Language: {} | Lexicon: {}",
            result.language, result.lexicon_version
        );
        let _ = writeln!(
            out,
            "   Characters: {} | Words: {} | Sentences: {} | Avg sentence: {:.1} words",
            result.stats.chars,
            result.stats.words,
            result.stats.sentences,
            result.stats.avg_sentence_length
        );
        if let Some(ref warning) = result.language_warning {
            let _ = writeln!(out, "   {} {}", self.paint("Warning:".yellow()), warning);
        }
        let _ = writeln!(out);
    }

    fn write_score(&self, out: &mut String, result: &AnalysisResult) {
        let max_score: f64 = result
            .categories
            .iter()
            .map(|c| c.importance * CATEGORY_CAP)
            .sum();
        let bar = self.create_score_bar(result.overall_score, max_score, result.verdict);

        let _ = writeln!(
            out,
            "   Risk: {} {}",
            bar,
            self.paint(self.colorize_verdict(result.verdict).bold())
        );
        let _ = writeln!(
            out,
            "   {}",
            self.paint(ScoreCalculator::verdict_description(result.verdict, &result.language).dimmed())
        );
        let _ = writeln!(out);
    }

    fn write_breakdown(&self, out: &mut String, result: &AnalysisResult) {
        let _ = writeln!(out, "   {}", self.paint("Category Breakdown:".bold()));

        for score in &result.categories {
            if score.hit_count == 0 && !self.verbose {
                continue;
            }
            let info = score.category.info();
            let bar = self.create_mini_bar(score.capped_score, CATEGORY_CAP);
            let score_str = format!("{:>4.2}/{}", score.capped_score, CATEGORY_CAP);
            let colored_score = match info.severity {
                Severity::High => score_str.red(),
                Severity::Medium => score_str.yellow(),
                Severity::Low => score_str.normal(),
            };
            let _ = writeln!(
                out,
                "   {} {} {} ({} hits, weight {}, contributes {:.2})",
                bar,
                self.paint(colored_score),
                info.name(&result.language),
                score.hit_count,
                score.importance,
                score.contribution
            );
        }
        if result.hits.is_empty() {
            let _ = writeln!(out, "   {}", self.paint("No markers found".green()));
        }
        let _ = writeln!(out);
    }

    fn write_phrases(&self, out: &mut String, doc: &AnalyzedDocument) {
        let _ = writeln!(out, "   {}", self.paint("Top markers:".bold()));
        let phrases = top_phrases(doc);
        let shown = if self.verbose {
            phrases.len()
        } else {
            TOP_PHRASES
        };
        for phrase in phrases.iter().take(shown) {
            let _ = writeln!(
                out,
                "   {} \"{}\" x{} {}",
                self.paint("•".red()),
                phrase.phrase,
                phrase.count,
                self.paint(format!("[{}]", phrase.rule).dimmed())
            );
        }
        if phrases.len() > shown {
            let _ = writeln!(
                out,
                "   {} more (use --verbose to show)",
                phrases.len() - shown
            );
        }
        let _ = writeln!(out);
    }

    fn write_signals(&self, out: &mut String, result: &AnalysisResult) {
        if result.evidence_terms.is_empty() && result.amplifiers.is_empty() {
            return;
        }
        let _ = writeln!(
            out,
            "   Evidence-based terms: {} | Amplifiers: {}",
            result.evidence_terms.len(),
            result.amplifiers.len()
        );
        let _ = writeln!(out);
    }

    fn write_recommendations(&self, out: &mut String, result: &AnalysisResult) {
        let _ = writeln!(out, "   {}", self.paint("Recommendations:".bold()));
        for rec in ScoreCalculator::recommendations(result) {
            let _ = writeln!(out, "   {} {}", self.paint("→".cyan()), rec);
        }
    }

    fn paint(&self, s: ColoredString) -> String {
        if self.use_colors {
            s.to_string()
        } else {
            s.clear().to_string()
        }
    }

    fn colorize_verdict(&self, verdict: Verdict) -> ColoredString {
        let s = verdict.to_string().to_uppercase();
        match verdict {
            Verdict::Low => s.green(),
            Verdict::Moderate => s.yellow(),
            Verdict::High => s.red(),
            Verdict::Critical => s.red().bold(),
        }
    }

    fn create_score_bar(&self, score: f64, max: f64, verdict: Verdict) -> String {
        let ratio = if max > 0.0 {
            (score / max).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let filled = (ratio * 20.0).round() as usize;
        let empty = 20 - filled;

        let bar = format!("[{}{}] {:>5.2}", "█".repeat(filled), "░".repeat(empty), score);

        let colored = match verdict {
            Verdict::Low => bar.green(),
            Verdict::Moderate => bar.yellow(),
            Verdict::High | Verdict::Critical => bar.red(),
        };
        self.paint(colored)
    }

    fn create_mini_bar(&self, score: f64, max: f64) -> String {
        let filled = ((score / max).clamp(0.0, 1.0) * 10.0).round() as usize;
        let empty = 10 - filled;
        format!("[{}{}]", "▓".repeat(filled), "░".repeat(empty))
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
