//! HTML reporter: generates a self-contained report page
//!
//! Every document gets its verdict, category breakdown, recommendations and
//! the source text with marker hits highlighted.

use crate::analyzer::scoring::{ScoreCalculator, CATEGORY_CAP};
use crate::analyzer::{AggregateStats, AnalyzedDocument};
use crate::reporter::console::top_phrases;
use crate::{MarkerHit, Verdict};
use std::collections::BTreeSet;
use std::fmt::Write;

/// Escapes text for HTML element content and attribute values
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escaped `text` with every hit wrapped in a `<mark>`. Overlapping hits are
/// split into segments; each segment is tagged with the first hit covering it.
pub fn highlight(text: &str, hits: &[MarkerHit]) -> String {
    let mut bounds: BTreeSet<usize> = BTreeSet::new();
    bounds.insert(0);
    bounds.insert(text.len());
    for hit in hits {
        if hit.start < hit.end && hit.end <= text.len() {
            bounds.insert(hit.start);
            bounds.insert(hit.end);
        }
    }

    let bounds: Vec<usize> = bounds.into_iter().collect();
    let mut out = String::with_capacity(text.len() * 2);
    for window in bounds.windows(2) {
        let (start, end) = (window[0], window[1]);
        let Some(segment) = text.get(start..end) else {
            continue;
        };
        let covering: Vec<&MarkerHit> = hits
            .iter()
            .filter(|h| h.start <= start && h.end >= end && h.end <= text.len())
            .collect();
        match covering.first() {
            None => out.push_str(&escape_html(segment)),
            Some(first) => {
                let rules: Vec<&str> = covering.iter().map(|h| h.rule.as_str()).collect();
                let _ = write!(
                    out,
                    "<mark class=\"marker cat-{}\" title=\"{}\">{}</mark>",
                    first.category,
                    escape_html(&rules.join(", ")),
                    escape_html(segment)
                );
            }
        }
    }
    out
}

/// Reporter that generates a self-contained HTML page
pub struct HtmlReporter;

impl HtmlReporter {
    pub fn new() -> Self {
        Self
    }

    /// Generate the full HTML report
    pub fn report(&self, docs: &[AnalyzedDocument], stats: &AggregateStats) -> String {
        let mut html = String::with_capacity(16_384);
        html.push_str(&Self::template_head());
        html.push_str("<body>\n<header><h1>Quacksense &ndash; Pseudoscience Risk Report</h1>");
        let _ = write!(
            html,
            "<p class=\"summary\">Documents: <b>{}</b> &middot; Average score: <b>{:.2}</b> &middot; Worst verdict: <span class=\"verdict v-{}\">{}</span> &middot; Markers: <b>{}</b></p></header>\n",
            stats.documents,
            stats.average_score,
            stats.worst_verdict,
            stats.worst_verdict,
            stats.total_hits
        );
        html.push_str("<main>\n");
        for doc in docs {
            self.write_document(&mut html, doc);
        }
        html.push_str("</main>\n</body>\n</html>");
        html
    }

    fn write_document(&self, html: &mut String, doc: &AnalyzedDocument) {
        let result = &doc.result;
        let lang = result.language.as_str();

        let _ = write!(
            html,
            "<section class=\"doc\" lang=\"{}\">\n<h2>{}</h2>\n<p class=\"meta\">Language: {} &middot; Lexicon: {} &middot; {} characters, {} words, {} sentences</p>\n",
            escape_html(lang),
            escape_html(&doc.label()),
            escape_html(lang),
            escape_html(&result.lexicon_version),
            result.stats.chars,
            result.stats.words,
            result.stats.sentences
        );
        if let Some(ref warning) = result.language_warning {
            let _ = writeln!(html, "<p class=\"warning\">{}</p>", escape_html(warning));
        }
        let _ = write!(
            html,
            "<p class=\"score\">Risk score <b>{:.2}</b> <span class=\"verdict v-{}\">{}</span></p>\n<p class=\"desc\">{}</p>\n",
            result.overall_score,
            result.verdict,
            result.verdict,
            escape_html(ScoreCalculator::verdict_description(result.verdict, lang))
        );

        html.push_str("<table class=\"categories\">\n<tr><th>Category</th><th>Hits</th><th>Score</th><th>Weight</th><th>Contribution</th></tr>\n");
        for score in &result.categories {
            let info = score.category.info();
            let pct = (score.capped_score / CATEGORY_CAP * 100.0).clamp(0.0, 100.0);
            let _ = writeln!(
                html,
                "<tr class=\"{}\"><td><span class=\"swatch cat-{}\"></span>{}<div class=\"hint\">{}</div></td><td>{}</td><td><div class=\"bar\"><div style=\"width:{:.0}%\"></div></div>{:.2}</td><td>{}</td><td>{:.2}</td></tr>",
                if score.hit_count == 0 { "zero" } else { "hit" },
                score.category,
                escape_html(info.name(lang)),
                escape_html(info.description(lang)),
                score.hit_count,
                pct,
                score.capped_score,
                score.importance,
                score.contribution
            );
        }
        html.push_str("</table>\n");

        let phrases = top_phrases(doc);
        if !phrases.is_empty() {
            html.push_str("<h3>Top markers</h3>\n<ul class=\"phrases\">\n");
            for phrase in phrases.iter().take(10) {
                let _ = writeln!(
                    html,
                    "<li>&ldquo;{}&rdquo; &times;{} <code>{}</code></li>",
                    escape_html(&phrase.phrase),
                    phrase.count,
                    escape_html(&phrase.rule)
                );
            }
            html.push_str("</ul>\n");
        }

        html.push_str("<h3>Recommendations</h3>\n<ul class=\"recs\">\n");
        for rec in ScoreCalculator::recommendations(result) {
            let _ = writeln!(html, "<li>{}</li>", escape_html(&rec));
        }
        html.push_str("</ul>\n");

        let _ = write!(
            html,
            "<h3>Text</h3>\n<div class=\"text\">{}</div>\n</section>\n",
            highlight(&doc.text, &result.hits)
        );
    }

    fn verdict_color(verdict: Verdict) -> &'static str {
        match verdict {
            Verdict::Low => "#2e7d32",
            Verdict::Moderate => "#f9a825",
            Verdict::High => "#e65100",
            Verdict::Critical => "#b71c1c",
        }
    }

    fn template_head() -> String {
        let mut css = String::from(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Quacksense &ndash; Pseudoscience Risk Report</title>
<style>
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;margin:0;background:#f5f5f7;color:#222}
header{background:#263238;color:#fff;padding:16px 32px}
header h1{margin:0 0 6px;font-size:22px}
main{padding:16px 32px;max-width:1100px}
.doc{background:#fff;border-radius:8px;padding:16px 24px;margin-bottom:24px;box-shadow:0 1px 3px rgba(0,0,0,.12)}
.meta,.desc,.hint{color:#666;font-size:13px}
.warning{background:#fff8e1;border-left:4px solid #f9a825;padding:6px 10px}
.verdict{color:#fff;border-radius:4px;padding:2px 8px;text-transform:uppercase;font-size:12px;font-weight:600}
table.categories{border-collapse:collapse;width:100%}
table.categories th,table.categories td{text-align:left;padding:6px 8px;border-bottom:1px solid #eee;vertical-align:top}
tr.zero{color:#aaa}
.bar{display:inline-block;width:80px;height:8px;background:#eee;border-radius:4px;margin-right:6px}
.bar div{height:8px;background:#e65100;border-radius:4px}
.swatch{display:inline-block;width:10px;height:10px;border-radius:2px;margin-right:6px}
.text{white-space:pre-wrap;line-height:1.6;border:1px solid #eee;padding:12px;border-radius:6px}
mark.marker{padding:0 1px;border-radius:2px}
"##,
        );
        for verdict in [Verdict::Low, Verdict::Moderate, Verdict::High, Verdict::Critical] {
            let _ = writeln!(css, ".v-{}{{background:{}}}", verdict, Self::verdict_color(verdict));
        }
        for (category, color) in [
            ("miracle-cure", "#ffcdd2"),
            ("universal-remedy", "#f8bbd0"),
            ("absolute-certainty", "#ffe0b2"),
            ("suppressed-truth", "#d1c4e9"),
            ("pseudo-jargon", "#bbdefb"),
            ("natural-fallacy", "#c8e6c9"),
            ("urgency-pressure", "#fff9c4"),
            ("anecdotal", "#d7ccc8"),
        ] {
            let _ = writeln!(css, ".cat-{}{{background:{}}}", category, color);
        }
        css.push_str("</style>\n</head>\n");
        css
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnalysisEngine, EngineOptions, MarkerCategory};
    use std::path::PathBuf;

    fn hit(rule: &str, category: MarkerCategory, start: usize, end: usize) -> MarkerHit {
        MarkerHit {
            category,
            rule: rule.to_string(),
            weight: 1.0,
            start,
            end,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_highlight_no_hits() {
        assert_eq!(highlight("a < b", &[]), "a &lt; b");
    }

    #[test]
    fn test_highlight_single_hit() {
        let out = highlight(
            "Try detox today",
            &[hit("en-jargon-detox", MarkerCategory::PseudoJargon, 4, 9)],
        );
        assert_eq!(
            out,
            "Try <mark class=\"marker cat-pseudo-jargon\" title=\"en-jargon-detox\">detox</mark> today"
        );
    }

    #[test]
    fn test_highlight_overlapping_hits() {
        let hits = [
            hit("a", MarkerCategory::MiracleCure, 0, 7),
            hit("b", MarkerCategory::Anecdotal, 4, 11),
        ];
        let out = highlight("abcdefghijk", &hits);
        assert_eq!(
            out,
            "<mark class=\"marker cat-miracle-cure\" title=\"a\">abcd</mark>\
             <mark class=\"marker cat-miracle-cure\" title=\"a, b\">efg</mark>\
             <mark class=\"marker cat-anecdotal\" title=\"b\">hijk</mark>"
        );
    }

    #[test]
    fn test_highlight_ignores_out_of_range_hits() {
        let out = highlight("short", &[hit("x", MarkerCategory::Anecdotal, 2, 99)]);
        assert_eq!(out, "short");
    }

    #[test]
    fn test_report_contains_structure() {
        let engine = AnalysisEngine::new(EngineOptions::default()).unwrap();
        let doc = engine
            .analyze_document(
                "Врачи скрывают <правду>!".to_string(),
                Some(PathBuf::from("post.txt")),
                None,
            )
            .unwrap();
        let stats = AnalysisEngine::aggregate_stats(&[doc.result.clone()]);
        let html = HtmlReporter::new().report(&[doc], &stats);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>"));
        assert!(html.contains("post.txt"));
        assert!(html.contains("Скрываемая правда"));
        assert!(html.contains("<mark class=\"marker cat-suppressed-truth\""));
        assert!(html.contains("&lt;правду"));
        assert!(html.contains("&gt;!"));
        assert!(!html.contains("<правду>"));
        assert!(html.contains("<section class=\"doc\" lang=\"ru\">"));
        assert!(html.contains("Есть отдельные признаки псевдонаучных утверждений"));
    }

    #[test]
    fn test_empty_report() {
        let html = HtmlReporter::new().report(&[], &AggregateStats::default());
        assert!(html.contains("Documents: <b>0</b>"));
        assert!(html.contains("</main>"));
    }
}
