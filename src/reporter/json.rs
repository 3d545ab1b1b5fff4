//! JSON reporter for machine-readable output

use crate::analyzer::scoring::ScoreCalculator;
use crate::analyzer::{AggregateStats, AnalyzedDocument};
use crate::{AnalysisResult, MarkerCategory};
use serde::Serialize;
use std::path::Path;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Report a single analysis as JSON
    pub fn report(&self, doc: &AnalyzedDocument) -> String {
        self.to_json(&JsonDocument::new(doc), "{}")
    }

    /// Report multiple analyses as a JSON array
    pub fn report_many(&self, docs: &[AnalyzedDocument]) -> String {
        let docs: Vec<JsonDocument<'_>> = docs.iter().map(JsonDocument::new).collect();
        self.to_json(&docs, "[]")
    }

    /// Report with summary and generation timestamp
    pub fn report_with_summary(&self, docs: &[AnalyzedDocument], stats: &AggregateStats) -> String {
        let output = JsonOutput {
            generated_at: chrono::Utc::now().to_rfc3339(),
            tool: JsonTool {
                name: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
            },
            results: docs.iter().map(JsonDocument::new).collect(),
            summary: stats,
        };
        self.to_json(&output, "{}")
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.unwrap_or_else(|_| fallback.to_string())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a Path>,
    #[serde(flatten)]
    result: &'a AnalysisResult,
    matches: Vec<JsonMatch<'a>>,
    recommendations: Vec<String>,
}

impl<'a> JsonDocument<'a> {
    fn new(doc: &'a AnalyzedDocument) -> Self {
        Self {
            path: doc.path.as_deref(),
            result: &doc.result,
            matches: doc
                .result
                .hits
                .iter()
                .map(|hit| JsonMatch {
                    rule: &hit.rule,
                    category: hit.category,
                    text: hit.matched_text(&doc.text),
                    start: hit.start,
                    end: hit.end,
                })
                .collect(),
            recommendations: ScoreCalculator::recommendations(&doc.result),
        }
    }
}

/// A hit with the text it matched
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonMatch<'a> {
    rule: &'a str,
    category: MarkerCategory,
    text: &'a str,
    start: usize,
    end: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonTool {
    name: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    generated_at: String,
    tool: JsonTool,
    results: Vec<JsonDocument<'a>>,
    summary: &'a AggregateStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnalysisEngine, EngineOptions};
    use std::path::PathBuf;

    fn document(text: &str, path: Option<&str>) -> AnalyzedDocument {
        AnalysisEngine::new(EngineOptions::default())
            .unwrap()
            .analyze_document(text.to_string(), path.map(PathBuf::from), Some("en"))
            .unwrap()
    }

    #[test]
    fn test_json_single_result_has_expected_keys() {
        let doc = document("Miracle cure with no side effects!", Some("ad.txt"));
        let json = JsonReporter::new().report(&doc);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["path"], "ad.txt");
        assert_eq!(parsed["language"], "en");
        assert!(parsed.get("lexiconVersion").is_some());
        assert!(parsed.get("overallScore").is_some());
        assert!(parsed.get("categories").is_some());
        assert!(parsed.get("hits").is_some());
        assert!(parsed.get("stats").is_some());
        assert!(parsed.get("recommendations").is_some());
        assert!(parsed.get("generatedAt").is_none());

        let matches = parsed["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0]["text"], "Miracle cure");
        assert_eq!(matches[0]["category"], "miracle-cure");
        assert_eq!(matches[1]["text"], "no side effects");
    }

    #[test]
    fn test_json_result_fields_deserialize_back() {
        let doc = document("Detox now", None);
        let json = JsonReporter::new().report(&doc);
        let parsed: AnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc.result);
    }

    #[test]
    fn test_json_pretty_output() {
        let doc = document("", None);
        let json = JsonReporter::new().pretty().report(&doc);
        assert!(json.contains('\n'), "pretty JSON should have newlines");
        assert!(json.contains("  "), "pretty JSON should have indentation");
    }

    #[test]
    fn test_json_report_many() {
        let docs = vec![document("a", Some("a.txt")), document("b", Some("b.txt"))];
        let json = JsonReporter::new().report_many(&docs);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let arr = parsed.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["path"], "a.txt");
        assert_eq!(arr[1]["path"], "b.txt");
    }

    #[test]
    fn test_json_report_many_empty() {
        let json = JsonReporter::new().report_many(&[]);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.as_array().unwrap().is_empty());
    }

    #[test]
    fn test_json_report_with_summary() {
        let docs = vec![document("Big pharma!", None), document("", None)];
        let results: Vec<AnalysisResult> = docs.iter().map(|d| d.result.clone()).collect();
        let stats = AnalysisEngine::aggregate_stats(&results);

        let json = JsonReporter::new().report_with_summary(&docs, &stats);
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(parsed["generatedAt"].as_str().is_some());
        assert_eq!(parsed["tool"]["name"], "quacksense");
        assert_eq!(parsed["results"].as_array().unwrap().len(), 2);

        let summary = &parsed["summary"];
        assert_eq!(summary["documents"], 2);
        assert_eq!(summary["totalHits"], 1);
        assert_eq!(summary["verdictCounts"]["low"], 2);
    }
}
