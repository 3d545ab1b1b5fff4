//! Risk score calculation

use crate::{
    AnalysisResult, CategoryScore, CategoryWeights, MarkerCategory, MarkerHit, Verdict,
    VerdictThresholds,
};

/// Ceiling of every capped category score.
///
/// Diminishing returns use a concave saturation,
/// `capped = CAP * (1 - e^(-raw / CAP))`: monotone, bounded by CAP, and
/// strictly positive for any positive raw score.
pub const CATEGORY_CAP: f64 = 5.0;

/// Scores for one analysis
#[derive(Debug, Clone, PartialEq)]
pub struct Scoring {
    pub categories: Vec<CategoryScore>,
    pub overall_score: f64,
    pub verdict: Verdict,
}

/// Calculator for category scores, overall score and verdict
pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Apply diminishing returns to a raw category sum
    pub fn saturate(raw: f64) -> f64 {
        if raw <= 0.0 {
            return 0.0;
        }
        -CATEGORY_CAP * (-raw / CATEGORY_CAP).exp_m1()
    }

    /// Score every category in `categories`, in that order. Hits keep their order.
    pub fn score_categories(
        hits: &[MarkerHit],
        categories: &[MarkerCategory],
        weights: &CategoryWeights,
    ) -> Vec<CategoryScore> {
        categories
            .iter()
            .map(|&category| {
                let category_hits: Vec<MarkerHit> = hits
                    .iter()
                    .filter(|h| h.category == category)
                    .cloned()
                    .collect();
                let raw_score: f64 = category_hits.iter().map(|h| h.weight).sum();
                let capped_score = Self::saturate(raw_score);
                let importance = weights.get(category);
                CategoryScore {
                    category,
                    raw_score,
                    capped_score,
                    importance,
                    contribution: capped_score * importance,
                    hit_count: category_hits.len(),
                    hits: category_hits,
                }
            })
            .collect()
    }

    /// Weighted sum of capped category scores
    pub fn overall(categories: &[CategoryScore]) -> f64 {
        categories.iter().map(|c| c.contribution).sum()
    }

    /// Full scoring pass
    pub fn score(
        hits: &[MarkerHit],
        categories: &[MarkerCategory],
        weights: &CategoryWeights,
        thresholds: &VerdictThresholds,
    ) -> Scoring {
        let categories = Self::score_categories(hits, categories, weights);
        let overall_score = Self::overall(&categories);
        let verdict = thresholds.verdict_for(overall_score);
        Scoring {
            categories,
            overall_score,
            verdict,
        }
    }

    /// One-line description of a verdict
    pub fn verdict_description(verdict: Verdict, language: &str) -> &'static str {
        if language == "ru" {
            match verdict {
                Verdict::Low => "Значимых признаков псевдонаучных утверждений не найдено",
                Verdict::Moderate => "Есть отдельные признаки псевдонаучных утверждений, читайте критически",
                Verdict::High => "Много признаков псевдонаучных утверждений, проверяйте каждое заявление",
                Verdict::Critical => "Текст насыщен псевдонаучными утверждениями",
            }
        } else {
            match verdict {
                Verdict::Low => "No significant markers of pseudoscientific claims",
                Verdict::Moderate => "Some markers of pseudoscientific claims - read critically",
                Verdict::High => "Many markers of pseudoscientific claims - verify every statement",
                Verdict::Critical => "Text is saturated with pseudoscientific claims",
            }
        }
    }

    /// Reader-facing recommendations, in the result's language
    pub fn recommendations(result: &AnalysisResult) -> Vec<String> {
        let ru = result.language == "ru";
        let mut recs: Vec<String> = Vec::new();

        match result.verdict {
            Verdict::High | Verdict::Critical => {
                if ru {
                    recs.push("Проверьте источники информации".to_string());
                    recs.push("Обратитесь к квалифицированным специалистам".to_string());
                    recs.push("Ищите подтверждения в рецензируемых исследованиях".to_string());
                } else {
                    recs.push("Check where the information comes from".to_string());
                    recs.push("Consult a qualified medical professional".to_string());
                    recs.push("Look for confirmation in peer-reviewed research".to_string());
                }
            }
            Verdict::Moderate => {
                if ru {
                    recs.push("Проявите критическое мышление и проверьте факты".to_string());
                } else {
                    recs.push("Read critically and fact-check the claims".to_string());
                }
            }
            Verdict::Low => {}
        }

        for score in result.top_categories().into_iter().take(2) {
            if let Some(tip) = Self::category_tip(score.category, ru) {
                recs.push(tip.to_string());
            }
        }

        if recs.is_empty() {
            if ru {
                recs.push("Значимых признаков псевдонауки нет, но источники стоит проверять всегда".to_string());
            } else {
                recs.push("No significant markers found, but checking sources is always worthwhile".to_string());
            }
        }

        recs
    }

    fn category_tip(category: MarkerCategory, ru: bool) -> Option<&'static str> {
        let tip = match (category, ru) {
            (MarkerCategory::MiracleCure, false) => "Real treatments rarely promise miracles; ask for trial data",
            (MarkerCategory::MiracleCure, true) => "Настоящие методы лечения не обещают чудес; спросите о данных испытаний",
            (MarkerCategory::UniversalRemedy, false) => "No single remedy treats every disease",
            (MarkerCategory::UniversalRemedy, true) => "Не бывает средства от всех болезней",
            (MarkerCategory::AbsoluteCertainty, false) => "Medicine does not give 100% guarantees; look for reported efficacy rates",
            (MarkerCategory::AbsoluteCertainty, true) => "Медицина не даёт 100% гарантий; ищите данные об эффективности",
            (MarkerCategory::SuppressedTruth, false) => "Claims of hidden cures are a classic manipulation technique",
            (MarkerCategory::SuppressedTruth, true) => "Утверждения о скрываемых лекарствах - классический приём манипуляции",
            (MarkerCategory::PseudoJargon, false) => "Scientific-sounding terms are not evidence; check what they mean",
            (MarkerCategory::PseudoJargon, true) => "Наукообразные термины - не доказательство; проверьте их значение",
            (MarkerCategory::UrgencyPressure, false) => "Pressure to decide quickly is a warning sign",
            (MarkerCategory::UrgencyPressure, true) => "Давление и спешка - тревожный признак",
            (MarkerCategory::Anecdotal, false) => "Testimonials do not replace controlled studies",
            (MarkerCategory::Anecdotal, true) => "Отзывы не заменяют контролируемых исследований",
            (MarkerCategory::NaturalFallacy, _) => return None,
        };
        Some(tip)
    }
}
